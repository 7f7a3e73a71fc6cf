//! Repository for the `payment_intents` table.

use platter_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::payment::{PaymentIntent, INTENT_STATUS_REQUIRES_PAYMENT, INTENT_STATUS_SUCCEEDED};

const COLUMNS: &str = "\
    id, tenant_id, order_id, client_secret, amount, currency_code, status, \
    created_at, updated_at";

pub struct PaymentIntentRepo;

impl PaymentIntentRepo {
    /// Record a new intent in `requires_payment` state.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        order_id: DbId,
        client_secret: &str,
        amount: Decimal,
        currency_code: &str,
    ) -> Result<PaymentIntent, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_intents
                (tenant_id, order_id, client_secret, amount, currency_code, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentIntent>(&query)
            .bind(tenant_id)
            .bind(order_id)
            .bind(client_secret)
            .bind(amount)
            .bind(currency_code)
            .bind(INTENT_STATUS_REQUIRES_PAYMENT)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_order(
        pool: &PgPool,
        tenant_id: DbId,
        order_id: DbId,
    ) -> Result<Vec<PaymentIntent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_intents
             WHERE tenant_id = $1 AND order_id = $2
             ORDER BY created_at"
        );
        sqlx::query_as::<_, PaymentIntent>(&query)
            .bind(tenant_id)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every open intent for the order as succeeded.
    ///
    /// Returns the number of intents updated (zero on a repeated webhook).
    pub async fn mark_succeeded_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE payment_intents SET status = $2, updated_at = NOW()
             WHERE order_id = $1 AND status = $3",
        )
        .bind(order_id)
        .bind(INTENT_STATUS_SUCCEEDED)
        .bind(INTENT_STATUS_REQUIRES_PAYMENT)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
