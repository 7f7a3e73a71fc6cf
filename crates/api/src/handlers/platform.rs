//! Handlers for platform-level tenant administration.
//!
//! All endpoints require the `platform_admin` role and are not tenant-scoped.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::error::CoreError;
use platter_core::tenant_config::parse_currency_code;
use platter_core::types::DbId;
use platter_db::models::tenant::{CreateTenant, Tenant, TENANT_STATUS_ACTIVE, TENANT_STATUS_SUSPENDED};
use platter_db::repositories::TenantRepo;
use serde::Deserialize;
use serde_json::json;
use validator::{Validate, ValidationError};

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult, FieldError};
use crate::extract::AppJson;
use crate::middleware::rbac::RequirePlatformAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_domain"))]
    pub domain: String,
    #[validate(length(equal = 3, message = "currency_code must be a three-letter code"))]
    pub currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTenantStatusRequest {
    pub status: String,
}

/// Lowercase hostname-like string: letters, digits, dots, hyphens.
fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    let valid = (3..=253).contains(&domain.len())
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-']);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("domain").with_message("domain must be a valid hostname".into()))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/platform/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    RequirePlatformAdmin(admin): RequirePlatformAdmin,
    AppJson(input): AppJson<CreateTenantRequest>,
) -> AppResult<(StatusCode, Json<Tenant>)> {
    input.validate()?;

    let currency_code = match input.currency_code.as_deref() {
        Some(raw) => Some(parse_currency_code(raw).ok_or_else(|| {
            AppError::InvalidFields(vec![FieldError {
                field: "currency_code".into(),
                message: "currency_code must be a three-letter code".into(),
            }])
        })?),
        None => None,
    };

    let create = CreateTenant {
        name: input.name.trim().to_string(),
        domain: input.domain,
        currency_code,
    };
    let tenant = TenantRepo::create(&state.pool, &create).await?;

    tracing::info!(
        tenant_id = %tenant.id,
        domain = %tenant.domain,
        user_id = %admin.user_id,
        "Tenant created"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::TENANT, action_types::TENANT_CREATE)
                .tenant(tenant.id)
                .actor(admin.user_id)
                .entity(tenant.id)
                .summary(json!({ "name": tenant.name, "domain": tenant.domain })),
        )
        .await;

    Ok((StatusCode::CREATED, Json(tenant)))
}

/// GET /api/platform/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    RequirePlatformAdmin(_admin): RequirePlatformAdmin,
) -> AppResult<Json<DataResponse<Vec<Tenant>>>> {
    let tenants = TenantRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tenants }))
}

/// PATCH /api/platform/tenants/{id}/status
pub async fn update_tenant_status(
    State(state): State<AppState>,
    RequirePlatformAdmin(admin): RequirePlatformAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTenantStatusRequest>,
) -> AppResult<Json<Tenant>> {
    let status = input.status.trim();
    if status != TENANT_STATUS_ACTIVE && status != TENANT_STATUS_SUSPENDED {
        return Err(AppError::BadRequest(format!(
            "status must be '{TENANT_STATUS_ACTIVE}' or '{TENANT_STATUS_SUSPENDED}'"
        )));
    }

    let tenant = TenantRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tenant",
            id,
        }))?;

    tracing::info!(tenant_id = %id, status, user_id = %admin.user_id, "Tenant status changed");

    state
        .audit
        .record(
            AuditEntry::new(entity_types::TENANT, action_types::TENANT_STATUS_CHANGE)
                .tenant(id)
                .actor(admin.user_id)
                .entity(id)
                .summary(json!({ "status": status })),
        )
        .await;

    Ok(Json(tenant))
}
