use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ephinv_core::DomainError;

/// Map a boundary failure to a JSON error response.
///
/// Domain outcomes of a pass (duplicates, missing items, ...) never reach
/// this function; they are reported as notifications inside the view.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match err {
        DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::DuplicateName(_) => StatusCode::CONFLICT,
        DomainError::EmptyName | DomainError::InvalidQuantity(_) | DomainError::Overflow(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    json_error(status, err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
