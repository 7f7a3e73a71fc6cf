//! Repository for the `tenants` table.

use platter_core::types::DbId;
use sqlx::PgPool;

use crate::models::tenant::{CreateTenant, Tenant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, domain, status, currency_code, created_at, updated_at";

/// Provides operations for tenants. Tenants are never hard-deleted.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant, returning the created row.
    ///
    /// If `currency_code` is `None` in the input, defaults to `USD`.
    pub async fn create(pool: &PgPool, input: &CreateTenant) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants (name, domain, currency_code)
             VALUES ($1, LOWER($2), COALESCE(UPPER($3), 'USD'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(&input.name)
            .bind(&input.domain)
            .bind(&input.currency_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tenant by its (case-insensitive) domain.
    pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE domain = LOWER($1)");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(domain.trim())
            .fetch_optional(pool)
            .await
    }

    /// List all tenants ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants ORDER BY name");
        sqlx::query_as::<_, Tenant>(&query).fetch_all(pool).await
    }

    /// Set a tenant's status. Returns `None` if the tenant does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!(
            "UPDATE tenants SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
