use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`. No authentication.
///
/// ```text
/// GET    /tenant/config       -> tenant_config
/// GET    /tenant/menu         -> tenant_menu
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tenant/config", get(public::tenant_config))
        .route("/tenant/menu", get(public::tenant_menu))
}
