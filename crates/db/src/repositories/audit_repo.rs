//! Repository for the `audit_logs` table.

use platter_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "\
    id, tenant_id, actor_id, entity_type, entity_id, action_type, \
    change_summary, created_at";

/// Column list for INSERT (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    tenant_id, actor_id, entity_type, entity_id, action_type, change_summary";

/// Default and maximum page sizes for audit queries.
const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// AuditLogRepo
// ---------------------------------------------------------------------------

/// Provides query and insert operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert a single audit entry.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.tenant_id)
            .bind(entry.actor_id)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.action_type)
            .bind(&entry.change_summary)
            .fetch_one(pool)
            .await
    }

    /// Query a tenant's audit logs, newest first.
    pub async fn query(
        pool: &PgPool,
        tenant_id: DbId,
        params: &AuditQuery,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let (where_clause, bind_values, bind_idx) = build_audit_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {where_clause} \
             ORDER BY created_at DESC, id \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AuditLog>(&query).bind(tenant_id);
        for value in &bind_values {
            q = q.bind(value);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count a tenant's audit logs matching the filter.
    pub async fn count(
        pool: &PgPool,
        tenant_id: DbId,
        params: &AuditQuery,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_audit_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM audit_logs {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query).bind(tenant_id);
        for value in &bind_values {
            q = q.bind(value);
        }
        q.fetch_one(pool).await
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter builder
// ---------------------------------------------------------------------------

/// Build the WHERE clause for an audit query.
///
/// `$1` is always the tenant id. Returns the clause, the text values to bind
/// after it, and the next free parameter index.
fn build_audit_filter(params: &AuditQuery) -> (String, Vec<String>, u32) {
    let mut conditions = vec!["tenant_id = $1".to_string()];
    let mut bind_idx = 2u32;
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(ref entity_type) = params.entity_type {
        conditions.push(format!("entity_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(entity_type.clone());
    }

    if let Some(ref action_type) = params.action_type {
        conditions.push(format!("action_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(action_type.clone());
    }

    (
        format!("WHERE {}", conditions.join(" AND ")),
        bind_values,
        bind_idx,
    )
}
