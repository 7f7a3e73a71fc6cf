//! Handlers for tenant key/value settings.
//!
//! Known keys (`currency_code`, `tax_rate`, `intentsPerMin`) are validated
//! on write; unknown keys are stored verbatim. Reads through the config
//! cache pick up changes once the cached entry expires.

use axum::extract::{Path, State};
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::tenant_config::validate_setting;
use platter_db::models::tenant_setting::TenantSetting;
use platter_db::repositories::TenantSettingRepo;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireTenantAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted setting key.
const MAX_KEY_LEN: usize = 64;

#[derive(Debug, Deserialize, Validate)]
pub struct PutSettingRequest {
    #[validate(length(max = 1000, message = "value must be at most 1000 characters"))]
    pub value: String,
}

/// GET /api/settings
pub async fn list_settings(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
) -> AppResult<Json<DataResponse<Vec<TenantSetting>>>> {
    let settings = TenantSettingRepo::list_for_tenant(&state.pool, ctx.tenant.id).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/settings/{key}
pub async fn put_setting(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    Path(key): Path<String>,
    AppJson(input): AppJson<PutSettingRequest>,
) -> AppResult<Json<TenantSetting>> {
    input.validate()?;

    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(AppError::BadRequest(format!(
            "setting key must be 1-{MAX_KEY_LEN} characters"
        )));
    }
    let value = input.value.trim();
    validate_setting(&key, value).map_err(AppError::BadRequest)?;

    let setting = TenantSettingRepo::upsert(&state.pool, ctx.tenant.id, &key, value).await?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        key = %key,
        user_id = %ctx.user.user_id,
        "Tenant setting updated"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::TENANT_SETTING, action_types::SETTING_UPDATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(setting.id)
                .summary(json!({ "key": key, "value": value })),
        )
        .await;

    Ok(Json(setting))
}
