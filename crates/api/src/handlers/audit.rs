//! Handler for reading the tenant's audit trail.

use axum::extract::{Query, State};
use axum::Json;
use platter_db::models::audit::{AuditLogPage, AuditQuery};
use platter_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireTenantAdmin;
use crate::state::AppState;

/// GET /api/audit-logs?entity_type=&action_type=&limit=&offset=
pub async fn list_audit_logs(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let items = AuditLogRepo::query(&state.pool, ctx.tenant.id, &params).await?;
    let total = AuditLogRepo::count(&state.pool, ctx.tenant.id, &params).await?;
    Ok(Json(AuditLogPage { items, total }))
}
