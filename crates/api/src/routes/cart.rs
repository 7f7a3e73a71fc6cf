use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
///
/// ```text
/// GET    /               -> get_cart
/// POST   /items          -> add_item
/// PATCH  /items/{id}     -> update_item
/// DELETE /items/{id}     -> remove_item
/// POST   /checkout       -> checkout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get_cart))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(cart::checkout))
}
