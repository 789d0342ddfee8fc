use axum::Router;

pub mod inventory;
pub mod system;

/// Router for the per-variant inventory pages.
pub fn router() -> Router {
    inventory::router()
}
