//! Repository for the `carts` and `cart_items` tables.

use platter_core::checkout::MAX_LINE_QTY;
use platter_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::cart::{Cart, CartItem, CartLine};

const CART_COLUMNS: &str = "id, tenant_id, user_id, created_at, updated_at";

const ITEM_COLUMNS: &str = "\
    id, tenant_id, cart_id, menu_item_id, qty, unit_price, created_at, updated_at";

/// `ITEM_COLUMNS` qualified with the `ci` alias for joined updates/deletes.
const ITEM_COLUMNS_CI: &str = "\
    ci.id, ci.tenant_id, ci.cart_id, ci.menu_item_id, ci.qty, ci.unit_price, \
    ci.created_at, ci.updated_at";

pub struct CartRepo;

impl CartRepo {
    /// Return the user's cart in this tenant, creating it if needed.
    ///
    /// A single upsert against `uq_carts_tenant_user`, so concurrent first
    /// requests converge on one row.
    pub async fn get_or_create(
        pool: &PgPool,
        tenant_id: DbId,
        user_id: DbId,
    ) -> Result<Cart, sqlx::Error> {
        let query = format!(
            "INSERT INTO carts (tenant_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (tenant_id, user_id) DO UPDATE SET updated_at = NOW()
             RETURNING {CART_COLUMNS}"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(tenant_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Add `qty` of a menu item to the cart.
    ///
    /// If the item is already in the cart its quantity is incremented and the
    /// stored unit price is refreshed to `unit_price`. Returns `None`, leaving
    /// the line untouched, when the increment would push the line past
    /// [`MAX_LINE_QTY`].
    pub async fn add_item(
        pool: &PgPool,
        tenant_id: DbId,
        cart_id: DbId,
        menu_item_id: DbId,
        qty: i32,
        unit_price: Decimal,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (tenant_id, cart_id, menu_item_id, qty, unit_price)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (cart_id, menu_item_id) DO UPDATE SET
                qty = cart_items.qty + EXCLUDED.qty,
                unit_price = EXCLUDED.unit_price,
                updated_at = NOW()
             WHERE cart_items.qty + EXCLUDED.qty <= $6
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(tenant_id)
            .bind(cart_id)
            .bind(menu_item_id)
            .bind(qty)
            .bind(unit_price)
            .bind(MAX_LINE_QTY)
            .fetch_optional(pool)
            .await
    }

    /// Cart lines joined with the item name, oldest first.
    pub async fn list_lines(
        pool: &PgPool,
        tenant_id: DbId,
        cart_id: DbId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            "SELECT ci.id, ci.menu_item_id, mi.name, ci.qty, ci.unit_price
             FROM cart_items ci
             JOIN menu_items mi ON mi.id = ci.menu_item_id AND mi.tenant_id = ci.tenant_id
             WHERE ci.tenant_id = $1 AND ci.cart_id = $2
             ORDER BY ci.created_at, ci.id",
        )
        .bind(tenant_id)
        .bind(cart_id)
        .fetch_all(pool)
        .await
    }

    /// Set the quantity of one of the user's cart lines.
    ///
    /// Returns `None` if the line does not exist in this user's cart.
    pub async fn set_item_qty(
        pool: &PgPool,
        tenant_id: DbId,
        user_id: DbId,
        cart_item_id: DbId,
        qty: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items ci SET qty = $4, updated_at = NOW()
             FROM carts c
             WHERE ci.id = $3 AND ci.cart_id = c.id
               AND c.tenant_id = $1 AND c.user_id = $2
             RETURNING {ITEM_COLUMNS_CI}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(tenant_id)
            .bind(user_id)
            .bind(cart_item_id)
            .bind(qty)
            .fetch_optional(pool)
            .await
    }

    /// Remove one of the user's cart lines. Returns `true` if a row was removed.
    pub async fn remove_item(
        pool: &PgPool,
        tenant_id: DbId,
        user_id: DbId,
        cart_item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM cart_items ci
             USING carts c
             WHERE ci.id = $3 AND ci.cart_id = c.id
               AND c.tenant_id = $1 AND c.user_id = $2",
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(cart_item_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
