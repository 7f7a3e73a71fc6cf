//! Shared harness for API integration tests.
//!
//! Requests go straight to the router with `tower::ServiceExt::oneshot`, no
//! TCP listener involved. The router is `Clone`, and clones share state, so a
//! test that needs the limiter or config cache to persist between requests
//! builds one app and reuses it.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use platter_api::auth::jwt::{Claims, JwtConfig};
use platter_api::config::{RateLimitConfig, ServerConfig};
use platter_api::router::build_app_router;
use platter_api::state::AppState;
use platter_core::payments::sign_payload_hex;
use platter_core::rate_limit::InMemoryRateLimiter;
use platter_db::models::menu::{CreateMenu, CreateMenuCategory, CreateMenuItem};
use platter_db::models::tenant::CreateTenant;
use platter_db::repositories::{MenuRepo, TenantRepo};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const WEBHOOK_SECRET: &str = "whsec_test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
        webhook_secret: WEBHOOK_SECRET.to_string(),
        rate_limit: RateLimitConfig {
            window_ms: 60_000,
            max: 1_000,
        },
        tenant_config_ttl_secs: 60,
    }
}

/// Build the full application router, using the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the application router with a custom config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone(), Arc::new(InMemoryRateLimiter::new()));
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Callers
// ---------------------------------------------------------------------------

/// Who a request is sent as: tenant header plus bearer token.
#[derive(Debug, Clone)]
pub struct Caller {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub token: String,
}

/// Mint a token for a new user with `role` in `tenant_id`.
pub fn caller(tenant_id: Uuid, role: &str) -> Caller {
    let user_id = Uuid::new_v4();
    let token = token_for(user_id, Some(tenant_id), role);
    Caller {
        tenant_id,
        user_id,
        token,
    }
}

/// Sign a 15 minute token the way the identity service does.
pub fn token_for(user_id: Uuid, tenant_id: Option<Uuid>, role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        tenant_id,
        role: role.to_string(),
        exp: now + 15 * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A platform admin token (no tenant claim).
pub fn platform_admin_token() -> String {
    token_for(Uuid::new_v4(), None, "platform_admin")
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_tenant(pool: &PgPool, domain: &str) -> Uuid {
    TenantRepo::create(
        pool,
        &CreateTenant {
            name: format!("Tenant {domain}"),
            domain: domain.to_string(),
            currency_code: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Seed one active menu with one available item priced `cents` and return
/// the item id.
pub async fn seed_menu_item(pool: &PgPool, tenant_id: Uuid, name: &str, cents: i64) -> Uuid {
    let menu = MenuRepo::create_menu(
        pool,
        tenant_id,
        &CreateMenu {
            name: "Main menu".into(),
            is_active: None,
        },
    )
    .await
    .unwrap();
    let category = MenuRepo::create_category(
        pool,
        tenant_id,
        menu.id,
        &CreateMenuCategory {
            name: "Mains".into(),
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    MenuRepo::create_item(
        pool,
        tenant_id,
        category.id,
        &CreateMenuItem {
            name: name.to_string(),
            description: None,
            price: Decimal::new(cents, 2),
            is_available: None,
        },
    )
    .await
    .unwrap()
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, String)],
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

fn caller_headers(caller: &Caller) -> Vec<(&'static str, String)> {
    vec![
        ("x-tenant-id", caller.tenant_id.to_string()),
        ("authorization", format!("Bearer {}", caller.token)),
    ]
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, &[], None).await
}

pub async fn get_as(app: &Router, uri: &str, caller: &Caller) -> Response<Body> {
    send(app, Method::GET, uri, &caller_headers(caller), None).await
}

pub async fn post_as(app: &Router, uri: &str, caller: &Caller, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, &caller_headers(caller), Some(body)).await
}

pub async fn put_as(app: &Router, uri: &str, caller: &Caller, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, &caller_headers(caller), Some(body)).await
}

pub async fn patch_as(app: &Router, uri: &str, caller: &Caller, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, &caller_headers(caller), Some(body)).await
}

pub async fn delete_as(app: &Router, uri: &str, caller: &Caller) -> Response<Body> {
    send(app, Method::DELETE, uri, &caller_headers(caller), None).await
}

/// POST a raw webhook body signed with the test secret.
pub async fn post_webhook(app: &Router, body: &Value) -> Response<Body> {
    let raw = serde_json::to_vec(body).unwrap();
    let signature = sign_payload_hex(WEBHOOK_SECRET, &raw);
    post_webhook_raw(app, raw, &signature).await
}

pub async fn post_webhook_raw(app: &Router, raw: Vec<u8>, signature: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/payments/webhook")
        .header("content-type", "application/json")
        .header("x-signature", signature)
        .body(Body::from(raw))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Add `qty` of `item` to the caller's cart and check out. Returns the
/// order id.
pub async fn place_order(app: &Router, caller: &Caller, item: Uuid, qty: i32) -> Uuid {
    let added = post_as(
        app,
        "/api/cart/items",
        caller,
        serde_json::json!({ "item_id": item, "qty": qty }),
    )
    .await;
    assert_eq!(added.status(), 201);

    let placed = post_as(app, "/api/cart/checkout", caller, serde_json::json!({})).await;
    assert_eq!(placed.status(), 201);
    let json = body_json(placed).await;
    json["order_id"].as_str().unwrap().parse().unwrap()
}
