//! Request-scoped extractors and middleware.
//!
//! - [`tenant::CurrentTenant`] -- Resolves the tenant from `X-Tenant-Id` / `X-Tenant-Domain`.
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`auth::TenantUser`] -- Tenant plus caller, with the token bound to that tenant.
//! - [`rbac`] -- Role-gated wrappers around the above.
//! - [`rate_limit`] -- Token bucket middleware setting `X-RateLimit-*` headers.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
pub mod tenant;
