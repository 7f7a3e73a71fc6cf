use platter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tenant_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TenantSetting {
    pub id: DbId,
    pub tenant_id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
