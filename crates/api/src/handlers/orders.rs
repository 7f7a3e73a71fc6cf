//! Handlers for orders and the order status workflow.
//!
//! Customers see only their own orders. Status changes go through the
//! server-side transition table and a compare-and-set on the stored status.

use axum::extract::{Path, Query, State};
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::error::CoreError;
use platter_core::order_status::{check_transition, OrderStatus, TransitionError};
use platter_core::pagination::{
    clamp_page, clamp_page_size, page_offset, parse_sort, total_pages, SortDirection, SortSpec,
};
use platter_core::roles::can_update_order_status;
use platter_core::types::DbId;
use platter_db::models::order::{Order, OrderListQuery, OrderWithItems};
use platter_db::repositories::OrderRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, TenantUser};
use crate::middleware::rbac::RequireOrderOperator;
use crate::query::PageParams;
use crate::response::OkResponse;
use crate::state::AppState;

/// Columns the order list may be sorted by.
const SORTABLE_FIELDS: &[&str] = &["created_at", "total", "status"];

const DEFAULT_SORT: SortSpec = SortSpec {
    field: "created_at",
    direction: SortDirection::Desc,
};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct OrderTransitions {
    pub status: OrderStatus,
    pub allowed: Vec<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Callers that are not order operators are limited to their own orders.
fn customer_scope(user: &AuthUser) -> Option<DbId> {
    if can_update_order_status(&user.role) || user.is_platform_admin() {
        None
    } else {
        Some(user.user_id)
    }
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.trim()
        .parse::<OrderStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Parse a status read back from the database.
fn stored_status(order: &Order) -> AppResult<OrderStatus> {
    order.status.parse::<OrderStatus>().map_err(|e| {
        AppError::InternalError(format!("order {} has invalid status: {e}", order.id))
    })
}

/// Load an order visible to the caller, or 404.
async fn find_visible_order(state: &AppState, ctx: &TenantUser, id: DbId) -> AppResult<Order> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Order", id });

    let order = OrderRepo::find_by_id(&state.pool, ctx.tenant.id, id)
        .await?
        .ok_or_else(not_found)?;

    match customer_scope(&ctx.user) {
        Some(user_id) if order.user_id != user_id => Err(not_found()),
        _ => Ok(order),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/orders?page=&pageSize=&status=&sort=field:dir
pub async fn list_orders(
    State(state): State<AppState>,
    ctx: TenantUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<OrderPage>> {
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size);
    let sort = parse_sort(params.sort.as_deref(), SORTABLE_FIELDS, DEFAULT_SORT)
        .map_err(AppError::BadRequest)?;
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_status)
        .transpose()?;

    let query = OrderListQuery {
        user_id: customer_scope(&ctx.user),
        status: status.map(|s| s.as_str().to_string()),
        sort,
        limit: page_size,
        offset: page_offset(page, page_size),
    };

    let items = OrderRepo::list(&state.pool, ctx.tenant.id, &query).await?;
    let total = OrderRepo::count(&state.pool, ctx.tenant.id, &query).await?;

    Ok(Json(OrderPage {
        page,
        page_size,
        total,
        total_pages: total_pages(total, page_size),
        items,
    }))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    ctx: TenantUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderWithItems>> {
    let order = find_visible_order(&state, &ctx, id).await?;
    let items = OrderRepo::list_items(&state.pool, ctx.tenant.id, id).await?;
    Ok(Json(OrderWithItems { order, items }))
}

/// GET /api/orders/{id}/transitions
///
/// Statuses the caller may move the order to next.
pub async fn list_transitions(
    State(state): State<AppState>,
    RequireOrderOperator(ctx): RequireOrderOperator,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderTransitions>> {
    let order = find_visible_order(&state, &ctx, id).await?;
    let status = stored_status(&order)?;

    let allowed = status
        .allowed_next()
        .iter()
        .copied()
        .filter(|next| check_transition(&ctx.user.role, status, *next).is_ok())
        .collect();

    Ok(Json(OrderTransitions { status, allowed }))
}

/// PATCH|POST /api/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireOrderOperator(ctx): RequireOrderOperator,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<OkResponse>> {
    let next = parse_status(&input.status)?;
    let order = find_visible_order(&state, &ctx, id).await?;
    let current = stored_status(&order)?;

    check_transition(&ctx.user.role, current, next).map_err(|e| match e {
        TransitionError::Illegal { .. } => AppError::Core(CoreError::Conflict(e.to_string())),
        TransitionError::RoleNotPermitted { .. } => {
            AppError::Core(CoreError::Forbidden(e.to_string()))
        }
    })?;

    OrderRepo::transition_status(&state.pool, ctx.tenant.id, id, current, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "order {id} changed status concurrently"
            )))
        })?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        order_id = %id,
        from = %current,
        to = %next,
        user_id = %ctx.user.user_id,
        role = %ctx.user.role,
        "Order status changed"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::ORDER, action_types::ORDER_STATUS_CHANGE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(id)
                .summary(json!({ "from": current, "to": next })),
        )
        .await;

    Ok(Json(OkResponse::ok()))
}
