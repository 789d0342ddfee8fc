use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log one line per interaction pass (method, path, status, latency).
pub async fn trace_interaction(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "interaction"
    );

    response
}
