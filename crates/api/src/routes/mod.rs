pub mod audit;
pub mod cart;
pub mod health;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod platform;
pub mod public;
pub mod settings;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /platform/tenants                                list, create (platform admin)
/// /platform/tenants/{id}/status                    suspend / reactivate
///
/// /settings                                        list (tenant admin)
/// /settings/{key}                                  upsert (tenant admin)
///
/// /menus                                           full tree (staff), create (tenant admin)
/// /menus/{id}/categories                           create category
/// /categories/{id}/items                           create item
/// /items/{id}                                      update item
///
/// /cart                                            current user's cart
/// /cart/items                                      add line
/// /cart/items/{id}                                 set qty, remove line
/// /cart/checkout                                   place order
///
/// /orders                                          paginated list
/// /orders/{id}                                     order with items
/// /orders/{id}/transitions                         allowed next statuses
/// /orders/{id}/status                              change status (PATCH, POST)
///
/// /payments/intent                                 create intent (per-tenant limit)
/// /payments/webhook                                provider callback (HMAC)
///
/// /audit-logs                                      tenant audit trail
///
/// /public/tenant/config                            public tenant config
/// /public/tenant/menu                              public menu
/// ```
///
/// Every route is rate limited. `/payments/intent` uses the tenant's
/// `intentsPerMin` setting; everything else uses the server default.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let standard = Router::new()
        // Platform administration.
        .nest("/platform", platform::router())
        // Tenant settings.
        .nest("/settings", settings::router())
        // Menu tree.
        .nest("/menus", menu::menus_router())
        .nest("/categories", menu::categories_router())
        .nest("/items", menu::items_router())
        // Cart and checkout.
        .nest("/cart", cart::router())
        // Orders and status workflow.
        .nest("/orders", orders::router())
        // Payment provider webhook.
        .merge(payments::webhook_router())
        // Audit trail.
        .nest("/audit-logs", audit::router())
        // Unauthenticated customer endpoints.
        .nest("/public", public::router())
        .route_layer(from_fn_with_state(state.clone(), rate_limit::default_limit));

    let intents = payments::intent_router()
        .route_layer(from_fn_with_state(state.clone(), rate_limit::intent_limit));

    standard.merge(intents)
}
