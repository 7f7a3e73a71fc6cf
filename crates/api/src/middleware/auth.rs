//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use platter_core::error::CoreError;
use platter_core::roles::ROLE_PLATFORM_ADMIN;
use platter_core::types::DbId;
use platter_db::models::tenant::Tenant;

use crate::auth::jwt::{validate_token, Claims, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;
use super::tenant::CurrentTenant;

/// Authenticated caller extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's id (from `claims.sub`).
    pub user_id: DbId,
    /// Tenant the token was issued for (from `claims.tenant_id`).
    pub tenant_id: Option<DbId>,
    /// The caller's role name.
    pub role: String,
}

impl AuthUser {
    pub fn is_platform_admin(&self) -> bool {
        self.role == ROLE_PLATFORM_ADMIN
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
            role: claims.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(claims.into())
    }
}

/// Caller id from a valid bearer token, if any. Never rejects.
pub fn bearer_user_id(headers: &HeaderMap, jwt: &JwtConfig) -> Option<DbId> {
    let token = headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    validate_token(token, jwt).ok().map(|c| c.sub)
}

/// An authenticated caller acting inside the resolved tenant.
///
/// The token's `tenant_id` claim must match the tenant named in the request
/// headers; platform admins may act on any tenant.
#[derive(Debug, Clone)]
pub struct TenantUser {
    pub tenant: Tenant,
    pub user: AuthUser,
}

impl FromRequestParts<AppState> for TenantUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentTenant(tenant) = CurrentTenant::from_request_parts(parts, state).await?;
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_platform_admin() && user.tenant_id != Some(tenant.id) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "token tenant {:?} does not match tenant {}",
                user.tenant_id, tenant.id
            ))));
        }

        Ok(TenantUser { tenant, user })
    }
}
