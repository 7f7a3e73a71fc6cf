//! Route definitions for platform administration.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::platform;
use crate::state::AppState;

/// Routes mounted at `/platform`.
///
/// ```text
/// GET    /tenants                -> list_tenants
/// POST   /tenants                -> create_tenant
/// PATCH  /tenants/{id}/status    -> update_tenant_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants",
            get(platform::list_tenants).post(platform::create_tenant),
        )
        .route("/tenants/{id}/status", patch(platform::update_tenant_status))
}
