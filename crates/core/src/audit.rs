//! Audit logging constants and payload redaction.

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const TENANT_CREATE: &str = "tenant.create";
    pub const TENANT_STATUS_CHANGE: &str = "tenant.status_change";
    pub const SETTING_UPDATE: &str = "setting.update";
    pub const MENU_CREATE: &str = "menu.create";
    pub const CATEGORY_CREATE: &str = "category.create";
    pub const ITEM_CREATE: &str = "item.create";
    pub const ITEM_UPDATE: &str = "item.update";
    pub const ORDER_CREATE: &str = "order.create";
    pub const ORDER_STATUS_CHANGE: &str = "order.status_change";
    pub const PAYMENT_INTENT_CREATE: &str = "payment.intent_create";
    pub const PAYMENT_SUCCEEDED: &str = "payment.succeeded";
}

/// Known entity types for audit log entries.
pub mod entity_types {
    pub const TENANT: &str = "tenant";
    pub const TENANT_SETTING: &str = "tenant_setting";
    pub const MENU: &str = "menu";
    pub const MENU_CATEGORY: &str = "menu_category";
    pub const MENU_ITEM: &str = "menu_item";
    pub const ORDER: &str = "order";
    pub const PAYMENT_INTENT: &str = "payment_intent";
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Fields that are redacted from change summaries before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "authorization",
    "card",
];

/// Redact sensitive fields from a JSON value, recursing into nested objects
/// and arrays.
///
/// Replaces the value of any key containing one of [`SENSITIVE_FIELDS`]
/// (case-insensitive) with `"[REDACTED]"`.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn client_secret_is_redacted() {
        let input = json!({"order_id": "abc", "client_secret": "pi_x_secret_y", "amount": "9.99"});
        let out = redact_sensitive_fields(&input);
        assert_eq!(out["client_secret"], "[REDACTED]");
        assert_eq!(out["order_id"], "abc");
        assert_eq!(out["amount"], "9.99");
    }

    #[test]
    fn matching_is_case_insensitive_and_nested() {
        let input = json!({"outer": {"Authorization": "Bearer x"}, "list": [{"Token": 1}]});
        let out = redact_sensitive_fields(&input);
        assert_eq!(out["outer"]["Authorization"], "[REDACTED]");
        assert_eq!(out["list"][0]["Token"], "[REDACTED]");
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(redact_sensitive_fields(&json!(42)), json!(42));
        assert_eq!(redact_sensitive_fields(&json!(null)), json!(null));
    }
}
