//! Unauthenticated, cacheable tenant endpoints for the customer app.

use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use platter_core::types::DbId;
use platter_db::models::tenant::Tenant;
use platter_db::repositories::{MenuRepo, TenantRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::ensure_active;
use crate::response::DataResponse;
use crate::state::AppState;

const PUBLIC_CACHE_CONTROL: HeaderValue = HeaderValue::from_static("public, max-age=300");

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PublicConfigParams {
    pub domain: Option<String>,
    /// Tenant id or domain.
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenuParams {
    pub tenant_id: Option<DbId>,
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicTenantConfig {
    pub tenant_id: DbId,
    pub name: String,
    pub domain: String,
    pub currency_code: String,
    pub tax_rate: Decimal,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn find_active_by_domain(pool: &PgPool, domain: &str) -> AppResult<Tenant> {
    let tenant = TenantRepo::find_by_domain(pool, &domain.to_ascii_lowercase())
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    ensure_active(tenant)
}

async fn find_active_by_id(pool: &PgPool, id: DbId) -> AppResult<Tenant> {
    let tenant = TenantRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    ensure_active(tenant)
}

fn cacheable<T: IntoResponse>(body: T) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, PUBLIC_CACHE_CONTROL);
    response
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/public/tenant/config?domain=|identifier=
pub async fn tenant_config(
    State(state): State<AppState>,
    Query(params): Query<PublicConfigParams>,
) -> AppResult<Response> {
    let tenant = if let Some(domain) = non_empty(params.domain.as_deref()) {
        find_active_by_domain(&state.pool, domain).await?
    } else if let Some(identifier) = non_empty(params.identifier.as_deref()) {
        match identifier.parse::<DbId>() {
            Ok(id) => find_active_by_id(&state.pool, id).await?,
            Err(_) => find_active_by_domain(&state.pool, identifier).await?,
        }
    } else {
        return Err(AppError::BadRequest(
            "domain or identifier query parameter is required".into(),
        ));
    };

    let config = state
        .tenant_configs
        .get_config(&state.pool, &tenant)
        .await?;

    Ok(cacheable(Json(PublicTenantConfig {
        tenant_id: tenant.id,
        name: tenant.name,
        domain: tenant.domain,
        currency_code: config.currency_code,
        tax_rate: config.tax_rate,
    })))
}

/// GET /api/public/tenant/menu?tenantId=|domain=
///
/// Active menus with available items only.
pub async fn tenant_menu(
    State(state): State<AppState>,
    Query(params): Query<PublicMenuParams>,
) -> AppResult<Response> {
    let tenant = if let Some(id) = params.tenant_id {
        find_active_by_id(&state.pool, id).await?
    } else if let Some(domain) = non_empty(params.domain.as_deref()) {
        find_active_by_domain(&state.pool, domain).await?
    } else {
        return Err(AppError::BadRequest(
            "tenantId or domain query parameter is required".into(),
        ));
    };

    let menus = MenuRepo::list_tree(&state.pool, tenant.id, true).await?;
    Ok(cacheable(Json(DataResponse { data: menus })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_params_are_ignored() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" diner.test ")), Some("diner.test"));
        assert_eq!(non_empty(None), None);
    }
}
