//! Per-tenant cache of typed settings.
//!
//! Settings are read from `tenant_settings`, coerced through
//! [`TenantConfig::from_settings`], and kept for a fixed TTL. Writes do not
//! invalidate the cache, so a settings change becomes visible once the
//! cached entry expires.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use platter_core::tenant_config::TenantConfig;
use platter_core::types::DbId;
use platter_db::models::tenant::Tenant;
use platter_db::repositories::TenantSettingRepo;
use sqlx::PgPool;
use tokio::sync::RwLock;

struct CachedConfig {
    config: TenantConfig,
    loaded_at: Instant,
}

pub struct TenantConfigCache {
    ttl: Duration,
    entries: RwLock<HashMap<DbId, CachedConfig>>,
}

impl TenantConfigCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the tenant's config, loading it from the database when no
    /// fresh entry is cached.
    ///
    /// Concurrent misses may each load; the last writer wins, which is
    /// harmless since they read the same rows.
    pub async fn get_config(
        &self,
        pool: &PgPool,
        tenant: &Tenant,
    ) -> Result<TenantConfig, sqlx::Error> {
        if let Some(config) = self.cached(tenant.id).await {
            return Ok(config);
        }

        let rows = TenantSettingRepo::list_for_tenant(pool, tenant.id).await?;
        let config = TenantConfig::from_settings(
            rows.iter().map(|r| (r.key.as_str(), r.value.as_str())),
            Some(&tenant.currency_code),
        );

        tracing::debug!(
            tenant_id = %tenant.id,
            currency_code = %config.currency_code,
            tax_rate = %config.tax_rate,
            "Loaded tenant config"
        );

        self.entries.write().await.insert(
            tenant.id,
            CachedConfig {
                config: config.clone(),
                loaded_at: Instant::now(),
            },
        );

        Ok(config)
    }

    async fn cached(&self, tenant_id: DbId) -> Option<TenantConfig> {
        let entries = self.entries.read().await;
        entries
            .get(&tenant_id)
            .filter(|c| c.loaded_at.elapsed() < self.ttl)
            .map(|c| c.config.clone())
    }
}
