//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] or [`TenantUser`] and rejects requests
//! whose role does not meet the requirement with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use platter_core::error::CoreError;
use platter_core::roles::{can_update_order_status, is_tenant_staff, ROLE_TENANT_ADMIN};

use crate::error::AppError;
use crate::state::AppState;
use super::auth::{AuthUser, TenantUser};

/// Requires the `platform_admin` role. Not tenant-scoped.
///
/// ```ignore
/// async fn admin_only(RequirePlatformAdmin(user): RequirePlatformAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePlatformAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequirePlatformAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_platform_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Platform admin role required".into(),
            )));
        }
        Ok(RequirePlatformAdmin(user))
    }
}

/// Requires `tenant_admin` within the resolved tenant.
pub struct RequireTenantAdmin(pub TenantUser);

impl FromRequestParts<AppState> for RequireTenantAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = TenantUser::from_request_parts(parts, state).await?;
        if ctx.user.role != ROLE_TENANT_ADMIN && !ctx.user.is_platform_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Tenant admin role required".into(),
            )));
        }
        Ok(RequireTenantAdmin(ctx))
    }
}

/// Requires `tenant_admin` or `staff` within the resolved tenant.
pub struct RequireStaff(pub TenantUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = TenantUser::from_request_parts(parts, state).await?;
        if !is_tenant_staff(&ctx.user.role) && !ctx.user.is_platform_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireStaff(ctx))
    }
}

/// Requires a role that may move orders through the workflow
/// (`tenant_admin`, `staff`, or `delivery`).
pub struct RequireOrderOperator(pub TenantUser);

impl FromRequestParts<AppState> for RequireOrderOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = TenantUser::from_request_parts(parts, state).await?;
        if !can_update_order_status(&ctx.user.role) && !ctx.user.is_platform_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Order operator role required".into(),
            )));
        }
        Ok(RequireOrderOperator(ctx))
    }
}
