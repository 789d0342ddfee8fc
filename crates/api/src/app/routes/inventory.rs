use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use ephinv_inventory::{RawInteraction, Variant};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:variant", get(render))
        .route("/:variant/items", post(add_item))
        .route("/:variant/items/remove", post(remove_item))
        .route("/:variant/items/:identifier", delete(remove_item_by_path))
}

/// Plain re-render: the snapshot with no mutation applied.
pub async fn render(Path(variant): Path<String>) -> axum::response::Response {
    run_pass(&variant, RawInteraction::None)
}

pub async fn add_item(
    Path(variant): Path<String>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    run_pass(&variant, body.into())
}

pub async fn remove_item(
    Path(variant): Path<String>,
    Json(body): Json<dto::RemoveItemRequest>,
) -> axum::response::Response {
    run_pass(&variant, body.into())
}

pub async fn remove_item_by_path(
    Path((variant, identifier)): Path<(String, String)>,
) -> axum::response::Response {
    run_pass(&variant, RawInteraction::Remove { identifier })
}

/// One complete interaction pass. Nothing is shared with other requests.
fn run_pass(variant: &str, interaction: RawInteraction) -> axum::response::Response {
    let variant: Variant = match variant.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::NOT_FOUND,
                "unknown_variant",
                format!("variant must be one of: v1, v2, v3 (got '{variant}')"),
            )
        }
    };

    match variant.render(interaction) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
