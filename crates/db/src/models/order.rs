//! Order snapshot models.
//!
//! Orders and their items are written once at checkout. Only `status`,
//! `payment_status`, and `updated_at` change afterwards.

use platter_core::checkout::TotalsError;
use platter_core::pagination::SortSpec;
use platter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub currency_code: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub tenant_id: DbId,
    pub order_id: DbId,
    pub menu_item_id: Option<DbId>,
    pub name: String,
    pub unit_price: Decimal,
    pub qty: i32,
    pub line_total: Decimal,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// The order was created and the cart emptied.
    Created(OrderWithItems),
    /// The user has no cart or the cart has no lines.
    EmptyCart,
    /// The cart's totals cannot be stored. Nothing was written.
    Rejected(TotalsError),
}

/// Tenant-scoped order listing filter.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Restrict to a single customer's orders.
    pub user_id: Option<DbId>,
    pub status: Option<String>,
    pub sort: SortSpec,
    pub limit: i64,
    pub offset: i64,
}
