use std::sync::Arc;
use std::time::Duration;

use platter_core::rate_limit::RateLimitStore;

use crate::audit::AuditWriter;
use crate::config::ServerConfig;
use crate::tenant_config::TenantConfigCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: platter_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-key request limiter consulted by the rate limit middleware.
    pub rate_limiter: Arc<dyn RateLimitStore>,
    /// Short-lived cache of typed tenant settings.
    pub tenant_configs: Arc<TenantConfigCache>,
    /// Best-effort audit log writer.
    pub audit: AuditWriter,
}

impl AppState {
    pub fn new(
        pool: platter_db::DbPool,
        config: ServerConfig,
        rate_limiter: Arc<dyn RateLimitStore>,
    ) -> Self {
        let ttl = Duration::from_secs(config.tenant_config_ttl_secs);
        Self {
            audit: AuditWriter::new(pool.clone()),
            pool,
            config: Arc::new(config),
            rate_limiter,
            tenant_configs: Arc::new(TenantConfigCache::new(ttl)),
        }
    }
}
