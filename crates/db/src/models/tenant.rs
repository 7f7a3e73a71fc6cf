//! Tenant entity model and DTOs.

use platter_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TENANT_STATUS_ACTIVE: &str = "active";
pub const TENANT_STATUS_SUSPENDED: &str = "suspended";

/// A row from the `tenants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub name: String,
    pub domain: String,
    pub status: String,
    pub currency_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tenant {
    pub fn is_active(&self) -> bool {
        self.status == TENANT_STATUS_ACTIVE
    }
}

/// DTO for creating a new tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub domain: String,
    /// Defaults to `USD` if omitted.
    pub currency_code: Option<String>,
}
