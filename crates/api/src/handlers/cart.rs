//! Handlers for the caller's cart and checkout.
//!
//! A cart belongs to one (tenant, user) pair and is created lazily.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::checkout::{compute_totals, validate_qty, PricedLine, MAX_LINE_QTY};
use platter_core::error::CoreError;
use platter_core::types::DbId;
use platter_db::models::cart::CartView;
use platter_db::models::order::CheckoutOutcome;
use platter_db::repositories::{CartRepo, MenuRepo, OrderRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult, FieldError};
use crate::extract::AppJson;
use crate::middleware::auth::TenantUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    /// The menu item to add.
    pub item_id: DbId,
    pub qty: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    /// `0` removes the line.
    #[validate(range(min = 0, max = 99, message = "qty must be between 0 and 99"))]
    pub qty: i32,
}

#[derive(Debug, Serialize)]
pub struct CartItemAdded {
    pub cart_item_id: DbId,
    pub qty: i32,
}

#[derive(Debug, Serialize)]
pub struct CheckoutReceipt {
    pub order_id: DbId,
    pub total: Decimal,
    pub currency_code: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/cart
pub async fn get_cart(
    State(state): State<AppState>,
    ctx: TenantUser,
) -> AppResult<Json<CartView>> {
    let cart = CartRepo::get_or_create(&state.pool, ctx.tenant.id, ctx.user.user_id).await?;
    let items = CartRepo::list_lines(&state.pool, ctx.tenant.id, cart.id).await?;

    let priced: Vec<PricedLine> = items
        .iter()
        .map(|l| PricedLine {
            unit_price: l.unit_price,
            qty: l.qty,
        })
        .collect();
    let subtotal = compute_totals(&priced, Decimal::ZERO)
        .map_err(CoreError::from)?
        .subtotal;

    Ok(Json(CartView {
        cart_id: cart.id,
        items,
        subtotal,
    }))
}

/// POST /api/cart/items
///
/// Adding an item already in the cart increments its quantity and refreshes
/// the stored unit price.
pub async fn add_item(
    State(state): State<AppState>,
    ctx: TenantUser,
    AppJson(input): AppJson<AddCartItemRequest>,
) -> AppResult<(StatusCode, Json<CartItemAdded>)> {
    validate_qty(input.qty).map_err(|message| {
        AppError::InvalidFields(vec![FieldError {
            field: "qty".into(),
            message,
        }])
    })?;

    let item = MenuRepo::find_available_item(&state.pool, ctx.tenant.id, input.item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id: input.item_id,
        }))?;

    let cart = CartRepo::get_or_create(&state.pool, ctx.tenant.id, ctx.user.user_id).await?;
    let line = CartRepo::add_item(
        &state.pool,
        ctx.tenant.id,
        cart.id,
        item.id,
        input.qty,
        item.price,
    )
    .await?
    .ok_or_else(|| {
        AppError::InvalidFields(vec![FieldError {
            field: "qty".into(),
            message: format!("a cart line cannot hold more than {MAX_LINE_QTY}"),
        }])
    })?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        user_id = %ctx.user.user_id,
        cart_id = %cart.id,
        menu_item_id = %item.id,
        qty = line.qty,
        "Cart item added"
    );

    Ok((
        StatusCode::CREATED,
        Json(CartItemAdded {
            cart_item_id: line.id,
            qty: line.qty,
        }),
    ))
}

/// PATCH /api/cart/items/{id}
///
/// Sets the line quantity; `qty = 0` removes the line and returns 204.
pub async fn update_item(
    State(state): State<AppState>,
    ctx: TenantUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCartItemRequest>,
) -> AppResult<Response> {
    input.validate()?;

    if input.qty == 0 {
        return remove_line(&state, &ctx, id).await;
    }

    let line = CartRepo::set_item_qty(&state.pool, ctx.tenant.id, ctx.user.user_id, id, input.qty)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        user_id = %ctx.user.user_id,
        cart_item_id = %id,
        qty = line.qty,
        "Cart item quantity set"
    );

    Ok(Json(line).into_response())
}

/// DELETE /api/cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    ctx: TenantUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    remove_line(&state, &ctx, id).await
}

async fn remove_line(state: &AppState, ctx: &TenantUser, id: DbId) -> AppResult<Response> {
    let removed = CartRepo::remove_item(&state.pool, ctx.tenant.id, ctx.user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }));
    }
    tracing::info!(
        tenant_id = %ctx.tenant.id,
        user_id = %ctx.user.user_id,
        cart_item_id = %id,
        "Cart item removed"
    );
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/cart/checkout
///
/// Converts the cart into an order using the tenant's tax rate and currency.
pub async fn checkout(
    State(state): State<AppState>,
    ctx: TenantUser,
) -> AppResult<(StatusCode, Json<CheckoutReceipt>)> {
    let config = state
        .tenant_configs
        .get_config(&state.pool, &ctx.tenant)
        .await?;

    let outcome = OrderRepo::checkout(
        &state.pool,
        ctx.tenant.id,
        ctx.user.user_id,
        config.tax_rate,
        &config.currency_code,
    )
    .await?;

    let placed = match outcome {
        CheckoutOutcome::Created(placed) => placed,
        CheckoutOutcome::EmptyCart => return Err(AppError::BadRequest("cart is empty".into())),
        CheckoutOutcome::Rejected(err) => return Err(CoreError::from(err).into()),
    };
    let order = placed.order;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        user_id = %ctx.user.user_id,
        order_id = %order.id,
        lines = placed.items.len(),
        subtotal = %order.subtotal,
        tax = %order.tax,
        total = %order.total,
        "Order created from cart"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::ORDER, action_types::ORDER_CREATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(order.id)
                .summary(json!({
                    "subtotal": order.subtotal,
                    "tax": order.tax,
                    "discount": order.discount,
                    "total": order.total,
                    "currency_code": order.currency_code,
                    "lines": placed.items.len(),
                })),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutReceipt {
            order_id: order.id,
            total: order.total,
            currency_code: order.currency_code,
        }),
    ))
}
