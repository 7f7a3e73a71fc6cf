//! Repository for the `orders` and `order_items` tables.

use platter_core::checkout::{compute_totals, PricedLine};
use platter_core::order_status::{OrderStatus, PaymentStatus};
use platter_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::cart::CartLine;
use crate::models::order::{CheckoutOutcome, Order, OrderItem, OrderListQuery, OrderWithItems};

const COLUMNS: &str = "\
    id, tenant_id, user_id, subtotal, tax, discount, total, currency_code, \
    status, payment_status, created_at, updated_at";

const ITEM_COLUMNS: &str = "\
    id, tenant_id, order_id, menu_item_id, name, unit_price, qty, line_total, created_at";

pub struct OrderRepo;

impl OrderRepo {
    // -----------------------------------------------------------------------
    // Checkout
    // -----------------------------------------------------------------------

    /// Convert the user's cart into an order.
    ///
    /// Runs in one transaction: the cart row is locked, its lines are read and
    /// priced, the order and its item snapshots are inserted, and the cart's
    /// lines are deleted. The cart row itself is kept (empty). A concurrent
    /// checkout of the same cart waits on the lock and then sees no lines.
    pub async fn checkout(
        pool: &PgPool,
        tenant_id: DbId,
        user_id: DbId,
        tax_rate: Decimal,
        currency_code: &str,
    ) -> Result<CheckoutOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cart_id: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM carts WHERE tenant_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(cart_id) = cart_id else {
            return Ok(CheckoutOutcome::EmptyCart);
        };

        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT ci.id, ci.menu_item_id, mi.name, ci.qty, ci.unit_price
             FROM cart_items ci
             JOIN menu_items mi ON mi.id = ci.menu_item_id AND mi.tenant_id = ci.tenant_id
             WHERE ci.tenant_id = $1 AND ci.cart_id = $2
             ORDER BY ci.created_at, ci.id",
        )
        .bind(tenant_id)
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|l| PricedLine {
                unit_price: l.unit_price,
                qty: l.qty,
            })
            .collect();
        let totals = match compute_totals(&priced, tax_rate) {
            Ok(totals) => totals,
            Err(err) => return Ok(CheckoutOutcome::Rejected(err)),
        };

        let order_query = format!(
            "INSERT INTO orders
                (tenant_id, user_id, subtotal, tax, discount, total, currency_code, status, payment_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&order_query)
            .bind(tenant_id)
            .bind(user_id)
            .bind(totals.subtotal)
            .bind(totals.tax)
            .bind(totals.discount)
            .bind(totals.total)
            .bind(currency_code)
            .bind(OrderStatus::Created.as_str())
            .bind(PaymentStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let item_query = format!(
            "INSERT INTO order_items
                (tenant_id, order_id, menu_item_id, name, unit_price, qty, line_total)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(lines.len());
        for (line, priced) in lines.iter().zip(&priced) {
            let item = sqlx::query_as::<_, OrderItem>(&item_query)
                .bind(tenant_id)
                .bind(order.id)
                .bind(line.menu_item_id)
                .bind(&line.name)
                .bind(line.unit_price)
                .bind(line.qty)
                .bind(priced.line_total())
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        sqlx::query("DELETE FROM cart_items WHERE tenant_id = $1 AND cart_id = $2")
            .bind(tenant_id)
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CheckoutOutcome::Created(OrderWithItems { order, items }))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $2 AND tenant_id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_items(
        pool: &PgPool,
        tenant_id: DbId,
        order_id: DbId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE tenant_id = $1 AND order_id = $2
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(tenant_id)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// List a page of the tenant's orders.
    ///
    /// `query.sort` comes from a whitelist, so interpolating it is safe.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        query: &OrderListQuery,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE tenant_id = $1
               AND ($2::uuid IS NULL OR user_id = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY {sort}, id
             LIMIT $4 OFFSET $5",
            sort = query.sort
        );
        sqlx::query_as::<_, Order>(&sql)
            .bind(tenant_id)
            .bind(query.user_id)
            .bind(&query.status)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(pool)
            .await
    }

    /// Count the tenant's orders matching the same filter as [`Self::list`].
    pub async fn count(
        pool: &PgPool,
        tenant_id: DbId,
        query: &OrderListQuery,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM orders
             WHERE tenant_id = $1
               AND ($2::uuid IS NULL OR user_id = $2)
               AND ($3::text IS NULL OR status = $3)",
        )
        .bind(tenant_id)
        .bind(query.user_id)
        .bind(&query.status)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Status updates
    // -----------------------------------------------------------------------

    /// Compare-and-set the order status.
    ///
    /// Only updates when the stored status still equals `from`. Returns `None`
    /// when the order is missing or was changed concurrently.
    pub async fn transition_status(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $4, updated_at = NOW()
             WHERE id = $2 AND tenant_id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Record a successful payment for an order.
    ///
    /// Always sets `payment_status = 'paid'`; moves `status` to `paid` only
    /// from statuses that accept payment, so a late webhook never rewinds a
    /// fulfilled order. Applying it twice leaves the same row state.
    ///
    /// Called from the payment webhook, which identifies orders globally;
    /// the returned row carries the tenant for auditing.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let payable: Vec<&str> = OrderStatus::ALL
            .iter()
            .filter(|s| s.accepts_payment())
            .map(OrderStatus::as_str)
            .collect();

        let query = format!(
            "UPDATE orders SET
                payment_status = $2,
                status = CASE WHEN status = ANY($3) THEN $4 ELSE status END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(PaymentStatus::Paid.as_str())
            .bind(&payable)
            .bind(OrderStatus::Paid.as_str())
            .fetch_optional(pool)
            .await
    }
}
