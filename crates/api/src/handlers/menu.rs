//! Handlers for menus, categories, and items.
//!
//! Staff can read the full tree (including inactive menus and unavailable
//! items); only tenant admins can change it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::error::CoreError;
use platter_core::money::MONEY_SCALE;
use platter_core::types::DbId;
use platter_db::models::menu::{
    CreateMenu, CreateMenuCategory, CreateMenuItem, Menu, MenuCategory, MenuItem, MenuTree,
    UpdateMenuItem,
};
use platter_db::repositories::MenuRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult, FieldError};
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireStaff, RequireTenantAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMenuRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "sort_order must not be negative"))]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}

/// Prices are non-negative with at most two decimal places.
fn check_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() || price.scale() > MONEY_SCALE {
        return Err(AppError::InvalidFields(vec![FieldError {
            field: "price".into(),
            message: "price must be a non-negative amount with at most two decimals".into(),
        }]));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

/// GET /api/menus
pub async fn list_menus(
    State(state): State<AppState>,
    RequireStaff(ctx): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<MenuTree>>>> {
    let menus = MenuRepo::list_tree(&state.pool, ctx.tenant.id, false).await?;
    Ok(Json(DataResponse { data: menus }))
}

/// POST /api/menus
pub async fn create_menu(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    AppJson(input): AppJson<CreateMenuRequest>,
) -> AppResult<(StatusCode, Json<Menu>)> {
    input.validate()?;

    let create = CreateMenu {
        name: input.name.trim().to_string(),
        is_active: input.is_active,
    };
    let menu = MenuRepo::create_menu(&state.pool, ctx.tenant.id, &create).await?;

    tracing::info!(tenant_id = %ctx.tenant.id, menu_id = %menu.id, "Menu created");

    state
        .audit
        .record(
            AuditEntry::new(entity_types::MENU, action_types::MENU_CREATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(menu.id)
                .summary(json!({ "name": menu.name })),
        )
        .await;

    Ok((StatusCode::CREATED, Json(menu)))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// POST /api/menus/{id}/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    Path(menu_id): Path<DbId>,
    AppJson(input): AppJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<MenuCategory>)> {
    input.validate()?;

    let create = CreateMenuCategory {
        name: input.name.trim().to_string(),
        sort_order: input.sort_order,
    };
    let category = MenuRepo::create_category(&state.pool, ctx.tenant.id, menu_id, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Menu",
            id: menu_id,
        }))?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        menu_id = %menu_id,
        category_id = %category.id,
        "Menu category created"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::MENU_CATEGORY, action_types::CATEGORY_CREATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(category.id)
                .summary(json!({ "menu_id": menu_id, "name": category.name })),
        )
        .await;

    Ok((StatusCode::CREATED, Json(category)))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// POST /api/categories/{id}/items
pub async fn create_item(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    Path(category_id): Path<DbId>,
    AppJson(input): AppJson<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    input.validate()?;
    check_price(input.price)?;

    let create = CreateMenuItem {
        name: input.name.trim().to_string(),
        description: input.description,
        price: input.price,
        is_available: input.is_available,
    };
    let item = MenuRepo::create_item(&state.pool, ctx.tenant.id, category_id, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuCategory",
            id: category_id,
        }))?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        category_id = %category_id,
        item_id = %item.id,
        price = %item.price,
        "Menu item created"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::MENU_ITEM, action_types::ITEM_CREATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(item.id)
                .summary(json!({ "name": item.name, "price": item.price })),
        )
        .await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireTenantAdmin(ctx): RequireTenantAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateItemRequest>,
) -> AppResult<Json<MenuItem>> {
    input.validate()?;
    if let Some(price) = input.price {
        check_price(price)?;
    }

    let update = UpdateMenuItem {
        name: input.name.map(|n| n.trim().to_string()),
        description: input.description,
        price: input.price,
        is_available: input.is_available,
    };
    let item = MenuRepo::update_item(&state.pool, ctx.tenant.id, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

    tracing::info!(tenant_id = %ctx.tenant.id, item_id = %id, "Menu item updated");

    state
        .audit
        .record(
            AuditEntry::new(entity_types::MENU_ITEM, action_types::ITEM_UPDATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(id)
                .summary(json!({
                    "name": update.name,
                    "price": update.price,
                    "is_available": update.is_available,
                })),
        )
        .await;

    Ok(Json(item))
}
