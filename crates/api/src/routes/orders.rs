use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /                    -> list_orders
/// GET    /{id}                -> get_order
/// GET    /{id}/transitions    -> list_transitions
/// PATCH  /{id}/status         -> update_status
/// POST   /{id}/status         -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/transitions", get(orders::list_transitions))
        .route(
            "/{id}/status",
            patch(orders::update_status).post(orders::update_status),
        )
}
