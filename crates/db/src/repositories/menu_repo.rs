//! Repository for the `menus`, `menu_categories`, and `menu_items` tables.
//!
//! Child rows are only inserted when the parent exists under the same tenant
//! (`INSERT ... SELECT ... WHERE tenant_id = $n`), so a missing or foreign
//! parent comes back as `None` instead of a row.

use std::collections::HashMap;

use platter_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu::{
    CategoryWithItems, CreateMenu, CreateMenuCategory, CreateMenuItem, Menu, MenuCategory,
    MenuItem, MenuTree, UpdateMenuItem,
};

const MENU_COLUMNS: &str = "id, tenant_id, name, is_active, created_at, updated_at";

const CATEGORY_COLUMNS: &str =
    "id, tenant_id, menu_id, name, sort_order, created_at, updated_at";

const ITEM_COLUMNS: &str = "\
    id, tenant_id, category_id, name, description, price, \
    is_available, created_at, updated_at";

pub struct MenuRepo;

impl MenuRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_menu(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateMenu,
    ) -> Result<Menu, sqlx::Error> {
        let query = format!(
            "INSERT INTO menus (tenant_id, name, is_active)
             VALUES ($1, $2, COALESCE($3, TRUE))
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(tenant_id)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Create a category under `menu_id`. Returns `None` if the menu does not
    /// belong to the tenant.
    pub async fn create_category(
        pool: &PgPool,
        tenant_id: DbId,
        menu_id: DbId,
        input: &CreateMenuCategory,
    ) -> Result<Option<MenuCategory>, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_categories (tenant_id, menu_id, name, sort_order)
             SELECT m.tenant_id, m.id, $3, COALESCE($4, 0)
             FROM menus m WHERE m.id = $2 AND m.tenant_id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, MenuCategory>(&query)
            .bind(tenant_id)
            .bind(menu_id)
            .bind(&input.name)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Create an item under `category_id`. Returns `None` if the category
    /// does not belong to the tenant.
    pub async fn create_item(
        pool: &PgPool,
        tenant_id: DbId,
        category_id: DbId,
        input: &CreateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items (tenant_id, category_id, name, description, price, is_available)
             SELECT c.tenant_id, c.id, $3, $4, $5, COALESCE($6, TRUE)
             FROM menu_categories c WHERE c.id = $2 AND c.tenant_id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(tenant_id)
            .bind(category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such item exists under the tenant.
    pub async fn update_item(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                is_available = COALESCE($6, is_available),
                updated_at = NOW()
             WHERE id = $2 AND tenant_id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find an item that can currently be ordered: it belongs to the tenant
    /// and is flagged available.
    pub async fn find_available_item(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items
             WHERE id = $2 AND tenant_id = $1 AND is_available = TRUE"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the tenant's menus as nested trees.
    ///
    /// With `customer_view` set, inactive menus and unavailable items are
    /// left out; otherwise everything is returned for staff editing.
    pub async fn list_tree(
        pool: &PgPool,
        tenant_id: DbId,
        customer_view: bool,
    ) -> Result<Vec<MenuTree>, sqlx::Error> {
        let menu_query = format!(
            "SELECT {MENU_COLUMNS} FROM menus
             WHERE tenant_id = $1 AND ($2 = FALSE OR is_active = TRUE)
             ORDER BY created_at"
        );
        let menus = sqlx::query_as::<_, Menu>(&menu_query)
            .bind(tenant_id)
            .bind(customer_view)
            .fetch_all(pool)
            .await?;

        let category_query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM menu_categories
             WHERE tenant_id = $1
             ORDER BY sort_order, name"
        );
        let categories = sqlx::query_as::<_, MenuCategory>(&category_query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await?;

        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items
             WHERE tenant_id = $1 AND ($2 = FALSE OR is_available = TRUE)
             ORDER BY name"
        );
        let items = sqlx::query_as::<_, MenuItem>(&item_query)
            .bind(tenant_id)
            .bind(customer_view)
            .fetch_all(pool)
            .await?;

        Ok(assemble_trees(menus, categories, items))
    }
}

/// Group flat rows into menu -> category -> item trees, preserving the
/// order each query returned.
fn assemble_trees(
    menus: Vec<Menu>,
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
) -> Vec<MenuTree> {
    let mut items_by_category: HashMap<DbId, Vec<MenuItem>> = HashMap::new();
    for item in items {
        items_by_category.entry(item.category_id).or_default().push(item);
    }

    let mut categories_by_menu: HashMap<DbId, Vec<CategoryWithItems>> = HashMap::new();
    for category in categories {
        let items = items_by_category.remove(&category.id).unwrap_or_default();
        categories_by_menu
            .entry(category.menu_id)
            .or_default()
            .push(CategoryWithItems { category, items });
    }

    menus
        .into_iter()
        .map(|menu| {
            let categories = categories_by_menu.remove(&menu.id).unwrap_or_default();
            MenuTree { menu, categories }
        })
        .collect()
}
