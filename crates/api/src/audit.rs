//! Best-effort audit log writer.
//!
//! Handlers call [`AuditWriter::record`] after a state change has been
//! committed. A failed insert is logged and dropped; it never fails the
//! request that triggered it.

use platter_core::audit::redact_sensitive_fields;
use platter_core::types::DbId;
use platter_db::models::audit::CreateAuditLog;
use platter_db::repositories::AuditLogRepo;
use sqlx::PgPool;

/// One audit event, built up before recording.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    tenant_id: Option<DbId>,
    actor_id: Option<DbId>,
    entity_type: &'static str,
    entity_id: Option<DbId>,
    action_type: &'static str,
    summary: Option<serde_json::Value>,
}

impl AuditEntry {
    pub fn new(entity_type: &'static str, action_type: &'static str) -> Self {
        Self {
            tenant_id: None,
            actor_id: None,
            entity_type,
            entity_id: None,
            action_type,
            summary: None,
        }
    }

    pub fn tenant(mut self, tenant_id: DbId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    pub fn actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn entity(mut self, entity_id: DbId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn summary(mut self, summary: serde_json::Value) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Convert to the insert DTO, redacting sensitive summary fields.
    fn into_create(self) -> CreateAuditLog {
        CreateAuditLog {
            tenant_id: self.tenant_id,
            actor_id: self.actor_id,
            entity_type: self.entity_type.to_string(),
            entity_id: self.entity_id,
            action_type: self.action_type.to_string(),
            change_summary: self.summary.as_ref().map(redact_sensitive_fields),
        }
    }
}

#[derive(Clone)]
pub struct AuditWriter {
    pool: PgPool,
}

impl AuditWriter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry. Errors are logged with `warn` and swallowed.
    pub async fn record(&self, entry: AuditEntry) {
        let action_type = entry.action_type;
        let entity_type = entry.entity_type;
        let create = entry.into_create();

        if let Err(e) = AuditLogRepo::insert(&self.pool, &create).await {
            tracing::warn!(
                error = %e,
                action_type,
                entity_type,
                entity_id = ?create.entity_id,
                "Failed to write audit log entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn builder_fills_every_field() {
        let tenant = Uuid::new_v4();
        let actor = Uuid::new_v4();
        let entity = Uuid::new_v4();

        let create = AuditEntry::new("order", "order.create")
            .tenant(tenant)
            .actor(actor)
            .entity(entity)
            .summary(json!({"total": "17.98"}))
            .into_create();

        assert_eq!(create.tenant_id, Some(tenant));
        assert_eq!(create.actor_id, Some(actor));
        assert_eq!(create.entity_id, Some(entity));
        assert_eq!(create.entity_type, "order");
        assert_eq!(create.action_type, "order.create");
        assert_eq!(create.change_summary, Some(json!({"total": "17.98"})));
    }

    #[test]
    fn summary_is_redacted() {
        let create = AuditEntry::new("payment_intent", "payment.intent_create")
            .summary(json!({"amount": "10.00", "client_secret": "pi_x"}))
            .into_create();

        let summary = create.change_summary.unwrap();
        assert_eq!(summary["amount"], "10.00");
        assert_eq!(summary["client_secret"], "[REDACTED]");
    }
}
