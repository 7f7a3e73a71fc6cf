use platter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

pub const INTENT_STATUS_REQUIRES_PAYMENT: &str = "requires_payment";
pub const INTENT_STATUS_SUCCEEDED: &str = "succeeded";

/// A stub payment intent handed to the client for an order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentIntent {
    pub id: DbId,
    pub tenant_id: DbId,
    pub order_id: DbId,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub amount: Decimal,
    pub currency_code: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
