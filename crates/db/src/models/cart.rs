//! Cart aggregate models.

use platter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `carts` table. One per (tenant, user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: DbId,
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub tenant_id: DbId,
    pub cart_id: DbId,
    pub menu_item_id: DbId,
    pub qty: i32,
    pub unit_price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with its menu item's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLine {
    pub id: DbId,
    pub menu_item_id: DbId,
    pub name: String,
    pub qty: i32,
    pub unit_price: Decimal,
}

/// Cart contents as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub cart_id: DbId,
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
}
