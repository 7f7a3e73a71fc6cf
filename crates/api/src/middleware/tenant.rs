//! Tenant resolution from request headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use platter_core::error::CoreError;
use platter_core::types::DbId;
use platter_db::models::tenant::Tenant;
use platter_db::repositories::TenantRepo;
use sqlx::PgPool;

use crate::error::AppError;
use crate::state::AppState;

pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const TENANT_DOMAIN_HEADER: &str = "x-tenant-domain";

/// The active tenant a request is scoped to.
///
/// Resolved once per request; the result is cached in request extensions so
/// middleware and handler extractors share one lookup.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Tenant);

impl FromRequestParts<AppState> for CurrentTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentTenant>() {
            return Ok(current.clone());
        }

        let tenant = resolve_tenant(&parts.headers, &state.pool).await?;
        let current = CurrentTenant(tenant);
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

/// Load the active tenant named by the request headers.
///
/// `X-Tenant-Id` wins over `X-Tenant-Domain`. Unknown tenants are 404 and
/// suspended tenants 403.
pub async fn resolve_tenant(headers: &HeaderMap, pool: &PgPool) -> Result<Tenant, AppError> {
    ensure_active(lookup_tenant(headers, pool).await?)
}

/// Load the tenant named by the request headers, whatever its status.
pub async fn lookup_tenant(headers: &HeaderMap, pool: &PgPool) -> Result<Tenant, AppError> {
    let tenant = if let Some(raw) = header_str(headers, TENANT_ID_HEADER) {
        let id: DbId = raw
            .parse()
            .map_err(|_| AppError::BadRequest("X-Tenant-Id must be a UUID".into()))?;
        TenantRepo::find_by_id(pool, id).await?
    } else if let Some(domain) = header_str(headers, TENANT_DOMAIN_HEADER) {
        TenantRepo::find_by_domain(pool, &domain.to_ascii_lowercase()).await?
    } else {
        return Err(AppError::BadRequest(
            "X-Tenant-Id or X-Tenant-Domain header is required".into(),
        ));
    };

    tenant.ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

/// Reject suspended tenants.
pub fn ensure_active(tenant: Tenant) -> Result<Tenant, AppError> {
    if !tenant.is_active() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "tenant {} is suspended",
            tenant.id
        ))));
    }
    Ok(tenant)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
