//! Repository for the `tenant_settings` key/value table.

use platter_core::types::DbId;
use sqlx::PgPool;

use crate::models::tenant_setting::TenantSetting;

const COLUMNS: &str = "id, tenant_id, key, value, created_at, updated_at";

pub struct TenantSettingRepo;

impl TenantSettingRepo {
    /// All settings for a tenant, ordered by key.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<TenantSetting>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tenant_settings WHERE tenant_id = $1 ORDER BY key");
        sqlx::query_as::<_, TenantSetting>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite a setting value.
    pub async fn upsert(
        pool: &PgPool,
        tenant_id: DbId,
        key: &str,
        value: &str,
    ) -> Result<TenantSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenant_settings (tenant_id, key, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (tenant_id, key)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TenantSetting>(&query)
            .bind(tenant_id)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
