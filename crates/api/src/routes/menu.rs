//! Route definitions for the menu tree.
//!
//! Categories and items are addressed by their own ids once created, so they
//! get top-level prefixes instead of deep nesting under `/menus`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// Routes mounted at `/menus`.
///
/// ```text
/// GET    /                    -> list_menus
/// POST   /                    -> create_menu
/// POST   /{id}/categories     -> create_category
/// ```
pub fn menus_router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::list_menus).post(menu::create_menu))
        .route("/{id}/categories", post(menu::create_category))
}

/// Routes mounted at `/categories`.
///
/// ```text
/// POST   /{id}/items          -> create_item
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new().route("/{id}/items", post(menu::create_item))
}

/// Routes mounted at `/items`.
///
/// ```text
/// PATCH  /{id}                -> update_item
/// ```
pub fn items_router() -> Router<AppState> {
    Router::new().route("/{id}", patch(menu::update_item))
}
