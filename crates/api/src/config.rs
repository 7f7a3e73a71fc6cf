use crate::auth::jwt::JwtConfig;

/// Default rate limit window in milliseconds.
const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 60_000;
/// Default requests allowed per window.
const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
/// Default tenant config cache lifetime in seconds.
const DEFAULT_TENANT_CONFIG_TTL_SECS: u64 = 60;

/// Default limiter parameters applied to API routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max: u32,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for background tasks to stop after the listener closes.
    pub shutdown_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Shared secret for payment webhook signatures.
    pub webhook_secret: String,
    pub rate_limit: RateLimitConfig,
    /// Lifetime of cached tenant configs (default: `60`).
    pub tenant_config_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                    |
    /// | `WEBHOOK_SECRET`         | **required**            |
    /// | `RATE_LIMIT_WINDOW_MS`   | `60000`                 |
    /// | `RATE_LIMIT_MAX`         | `100`                   |
    /// | `TENANT_CONFIG_TTL_SECS` | `60`                    |
    ///
    /// `JWT_SECRET` is read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed numbers or a missing secret, so misconfiguration
    /// fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let webhook_secret =
            std::env::var("WEBHOOK_SECRET").expect("WEBHOOK_SECRET must be set in the environment");
        assert!(!webhook_secret.is_empty(), "WEBHOOK_SECRET must not be empty");

        let window_ms: u64 = std::env::var("RATE_LIMIT_WINDOW_MS")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_WINDOW_MS.to_string())
            .parse()
            .expect("RATE_LIMIT_WINDOW_MS must be a valid u64");

        let max: u32 = std::env::var("RATE_LIMIT_MAX")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_MAX.to_string())
            .parse()
            .expect("RATE_LIMIT_MAX must be a valid u32");

        let tenant_config_ttl_secs: u64 = std::env::var("TENANT_CONFIG_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TENANT_CONFIG_TTL_SECS.to_string())
            .parse()
            .expect("TENANT_CONFIG_TTL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            webhook_secret,
            rate_limit: RateLimitConfig { window_ms, max },
            tenant_config_ttl_secs,
        }
    }
}
