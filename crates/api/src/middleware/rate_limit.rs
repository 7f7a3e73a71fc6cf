//! Rate limit middleware.
//!
//! Every limited response carries `X-RateLimit-Limit`, `X-RateLimit-Remaining`
//! and `X-RateLimit-Reset` (unix seconds), whether or not the request was
//! allowed. Rejected requests get a 429 problem body.

use axum::extract::{OriginalUri, Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platter_core::rate_limit::{limit_key, RateLimitDecision};

use crate::error::AppError;
use crate::state::AppState;
use super::auth::bearer_user_id;
use super::tenant::{lookup_tenant, resolve_tenant, CurrentTenant};

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Window for the per-tenant payment intent limit.
pub const INTENT_WINDOW_MS: u64 = 60_000;

/// Tenant segment for requests that name no known tenant.
pub const PUBLIC_TENANT: &str = "public";

/// Apply the server-wide default limit (`RATE_LIMIT_WINDOW_MS` / `RATE_LIMIT_MAX`).
///
/// Keyed on the resolved tenant id, so every spelling of the tenant headers
/// shares one bucket. Missing, malformed, or unknown tenant headers share the
/// `public` segment. An active tenant is left in request extensions for the
/// handler.
pub async fn default_limit(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let tenant = match lookup_tenant(req.headers(), &state.pool).await {
        Ok(tenant) => {
            let segment = tenant.id.to_string();
            if tenant.is_active() {
                req.extensions_mut().insert(CurrentTenant(tenant));
            }
            segment
        }
        Err(_) => PUBLIC_TENANT.to_string(),
    };
    let key = request_key(&state, &req, &tenant);
    let limits = state.config.rate_limit;

    let decision = state
        .rate_limiter
        .check_limit(&key, limits.window_ms, limits.max)
        .await;

    respond(decision, &key, req, next).await
}

/// Apply the tenant's `intentsPerMin` limit.
///
/// Resolves the tenant up front (the limit is a tenant setting) and leaves it
/// in request extensions for the handler.
pub async fn intent_limit(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let headers = req.headers().clone();
    let tenant = match resolve_tenant(&headers, &state.pool).await {
        Ok(tenant) => tenant,
        Err(e) => return e.into_response(),
    };
    let config = match state.tenant_configs.get_config(&state.pool, &tenant).await {
        Ok(config) => config,
        Err(e) => return AppError::from(e).into_response(),
    };

    let key = request_key(&state, &req, &tenant.id.to_string());
    req.extensions_mut().insert(CurrentTenant(tenant));

    let decision = state
        .rate_limiter
        .check_limit(&key, INTENT_WINDOW_MS, config.limits.intents_per_min)
        .await;

    respond(decision, &key, req, next).await
}

fn request_key(state: &AppState, req: &Request, tenant: &str) -> String {
    let user = bearer_user_id(req.headers(), &state.config.jwt)
        .map(|id| id.to_string())
        .unwrap_or_else(|| "anon".into());
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|u| u.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    limit_key(tenant, &user, &path)
}

async fn respond(decision: RateLimitDecision, key: &str, req: Request, next: Next) -> Response {
    let mut response = if decision.allowed {
        next.run(req).await
    } else {
        tracing::warn!(key, limit = decision.limit, "Rate limit exceeded");
        AppError::RateLimited.into_response()
    };

    let headers = response.headers_mut();
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(
        X_RATELIMIT_RESET,
        HeaderValue::from(decision.reset_at.timestamp()),
    );
    response
}
