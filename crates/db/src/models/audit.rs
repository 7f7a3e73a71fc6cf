//! Audit log entity models and DTOs.
//!
//! Audit logs have no `updated_at` field (immutable records).

use platter_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub tenant_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub action_type: String,
    pub change_summary: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub tenant_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub action_type: String,
    pub change_summary: Option<serde_json::Value>,
}

/// Filter parameters for querying a tenant's audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub entity_type: Option<String>,
    pub action_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated response for audit log queries.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}
