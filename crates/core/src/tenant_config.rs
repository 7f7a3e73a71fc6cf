//! Typed view over a tenant's key/value settings.
//!
//! Settings are stored as free-form strings; [`TenantConfig::from_settings`]
//! coerces the known keys and falls back to safe defaults for anything
//! missing or malformed.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Setting keys
// ---------------------------------------------------------------------------

pub mod keys {
    pub const CURRENCY_CODE: &str = "currency_code";
    pub const TAX_RATE: &str = "tax_rate";
    pub const INTENTS_PER_MIN: &str = "intentsPerMin";

    pub const ALL: &[&str] = &[CURRENCY_CODE, TAX_RATE, INTENTS_PER_MIN];
}

pub const DEFAULT_CURRENCY_CODE: &str = "USD";
pub const DEFAULT_INTENTS_PER_MIN: u32 = 10;

/// Per-tenant request limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantLimits {
    pub intents_per_min: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantConfig {
    pub currency_code: String,
    pub tax_rate: Decimal,
    pub limits: TenantLimits,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            tax_rate: Decimal::ZERO,
            limits: TenantLimits {
                intents_per_min: DEFAULT_INTENTS_PER_MIN,
            },
        }
    }
}

impl TenantConfig {
    /// Build a config from `(key, value)` rows.
    ///
    /// `fallback_currency` is the tenant row's own currency column, used when
    /// no valid `currency_code` setting exists.
    pub fn from_settings<'a, I>(settings: I, fallback_currency: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        if let Some(code) = fallback_currency.and_then(parse_currency_code) {
            config.currency_code = code;
        }

        for (key, value) in settings {
            match key {
                keys::CURRENCY_CODE => {
                    if let Some(code) = parse_currency_code(value) {
                        config.currency_code = code;
                    }
                }
                keys::TAX_RATE => {
                    if let Some(rate) = parse_tax_rate(value) {
                        config.tax_rate = rate;
                    }
                }
                keys::INTENTS_PER_MIN => {
                    if let Some(n) = value.trim().parse::<u32>().ok().filter(|n| *n > 0) {
                        config.limits.intents_per_min = n;
                    }
                }
                _ => {}
            }
        }

        config
    }
}

/// Accept a three-letter ASCII currency code, normalised to upper case.
pub fn parse_currency_code(value: &str) -> Option<String> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Accept a decimal tax rate between 0 and 1 inclusive (`0.0825` means 8.25%).
pub fn parse_tax_rate(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim())
        .ok()
        .filter(|rate| !rate.is_sign_negative() && *rate <= Decimal::ONE)
}

/// Validate a setting write. Unknown keys are allowed (stored verbatim);
/// known keys must parse.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        keys::CURRENCY_CODE if parse_currency_code(value).is_none() => {
            Err("currency_code must be a three-letter code".into())
        }
        keys::TAX_RATE if parse_tax_rate(value).is_none() => {
            Err("tax_rate must be a decimal between 0 and 1".into())
        }
        keys::INTENTS_PER_MIN if value.trim().parse::<u32>().map_or(true, |n| n == 0) => {
            Err("intentsPerMin must be a positive integer".into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_settings() {
        let config = TenantConfig::from_settings(Vec::<(&str, &str)>::new(), None);
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.tax_rate, Decimal::ZERO);
        assert_eq!(config.limits.intents_per_min, 10);
    }

    #[test]
    fn known_keys_are_coerced() {
        let rows = [
            ("currency_code", "eur"),
            ("tax_rate", "0.0825"),
            ("intentsPerMin", "25"),
            ("something_else", "ignored"),
        ];
        let config = TenantConfig::from_settings(rows, None);
        assert_eq!(config.currency_code, "EUR");
        assert_eq!(config.tax_rate.to_string(), "0.0825");
        assert_eq!(config.limits.intents_per_min, 25);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let rows = [
            ("currency_code", "dollars"),
            ("tax_rate", "-0.1"),
            ("intentsPerMin", "0"),
        ];
        let config = TenantConfig::from_settings(rows, None);
        assert_eq!(config, TenantConfig::default());

        let rows = [("tax_rate", "abc"), ("intentsPerMin", "many")];
        assert_eq!(TenantConfig::from_settings(rows, None), TenantConfig::default());

        let rows = [("tax_rate", "79228162514264337593543950335")];
        assert_eq!(TenantConfig::from_settings(rows, None), TenantConfig::default());
    }

    #[test]
    fn tenant_currency_used_before_default() {
        let config = TenantConfig::from_settings(Vec::<(&str, &str)>::new(), Some("gbp"));
        assert_eq!(config.currency_code, "GBP");

        let config = TenantConfig::from_settings([("currency_code", "JPY")], Some("GBP"));
        assert_eq!(config.currency_code, "JPY");
    }

    #[test]
    fn setting_validation() {
        assert!(validate_setting("currency_code", "usd").is_ok());
        assert!(validate_setting("currency_code", "US").is_err());
        assert!(validate_setting("tax_rate", "0.2").is_ok());
        assert!(validate_setting("tax_rate", "-1").is_err());
        assert!(validate_setting("tax_rate", "1").is_ok());
        assert!(validate_setting("tax_rate", "1.01").is_err());
        assert!(validate_setting("tax_rate", "79228162514264337593543950335").is_err());
        assert!(validate_setting("intentsPerMin", "0").is_err());
        assert!(validate_setting("intentsPerMin", "5").is_ok());
        assert!(validate_setting("welcome_banner", "anything").is_ok());
    }
}
