//! HTTP-level tests for platform tenant administration and tenant resolution.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, caller, get_as, platform_admin_token, send};
use serde_json::json;
use sqlx::PgPool;

fn admin_headers() -> Vec<(&'static str, String)> {
    vec![("authorization", format!("Bearer {}", platform_admin_token()))]
}

#[sqlx::test(migrations = "../db/migrations")]
async fn platform_admin_creates_and_lists_tenants(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(
        &app,
        Method::POST,
        "/api/platform/tenants",
        &admin_headers(),
        Some(json!({ "name": "Corner Diner", "domain": "Diner.Example.com", "currency_code": "eur" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tenant = body_json(response).await;
    assert_eq!(tenant["domain"], "diner.example.com");
    assert_eq!(tenant["currency_code"], "EUR");
    assert_eq!(tenant["status"], "active");

    let response = send(&app, Method::GET, "/api/platform/tenants", &admin_headers(), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_domain_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Diner", "domain": "diner.test" });

    let first = send(&app, Method::POST, "/api/platform/tenants", &admin_headers(), Some(body.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(&app, Method::POST, "/api/platform/tenants", &admin_headers(), Some(body)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_tenant_fields_are_reported(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(
        &app,
        Method::POST,
        "/api/platform/tenants",
        &admin_headers(),
        Some(json!({ "name": "", "domain": "bad domain" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["domain", "name"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tenant_admin_cannot_manage_tenants(pool: PgPool) {
    let tenant_id = common::seed_tenant(&pool, "diner.test").await;
    let app = common::build_test_app(pool);
    let admin = caller(tenant_id, "tenant_admin");

    let response = get_as(&app, "/api/platform/tenants", &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::GET, "/api/platform/tenants", &[], None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn suspended_tenant_is_rejected(pool: PgPool) {
    let tenant_id = common::seed_tenant(&pool, "diner.test").await;
    let app = common::build_test_app(pool);
    let customer = caller(tenant_id, "customer");

    assert_eq!(get_as(&app, "/api/cart", &customer).await.status(), StatusCode::OK);

    let response = send(
        &app,
        Method::PATCH,
        &format!("/api/platform/tenants/{tenant_id}/status"),
        &admin_headers(),
        Some(json!({ "status": "suspended" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "suspended");

    assert_eq!(get_as(&app, "/api/cart", &customer).await.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_tenant_status_is_400(pool: PgPool) {
    let tenant_id = common::seed_tenant(&pool, "diner.test").await;
    let app = common::build_test_app(pool);

    let response = send(
        &app,
        Method::PATCH,
        &format!("/api/platform/tenants/{tenant_id}/status"),
        &admin_headers(),
        Some(json!({ "status": "closed" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Tenant resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tenant_resolves_by_domain_header(pool: PgPool) {
    let tenant_id = common::seed_tenant(&pool, "diner.test").await;
    let app = common::build_test_app(pool);
    let customer = caller(tenant_id, "customer");

    let headers = [
        ("x-tenant-domain", "DINER.test".to_string()),
        ("authorization", format!("Bearer {}", customer.token)),
    ];
    let response = send(&app, Method::GET, "/api/cart", &headers, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_or_unknown_tenant_is_rejected(pool: PgPool) {
    let tenant_id = common::seed_tenant(&pool, "diner.test").await;
    let app = common::build_test_app(pool);
    let customer = caller(tenant_id, "customer");
    let auth = ("authorization", format!("Bearer {}", customer.token));

    let response = send(&app, Method::GET, "/api/cart", &[auth.clone()], None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let headers = [("x-tenant-id", "not-a-uuid".to_string()), auth.clone()];
    let response = send(&app, Method::GET, "/api/cart", &headers, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let headers = [("x-tenant-domain", "nowhere.test".to_string()), auth];
    let response = send(&app, Method::GET, "/api/cart", &headers, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn token_for_another_tenant_is_forbidden(pool: PgPool) {
    let t1 = common::seed_tenant(&pool, "one.test").await;
    let t2 = common::seed_tenant(&pool, "two.test").await;
    let app = common::build_test_app(pool);

    let mut intruder = caller(t1, "tenant_admin");
    intruder.tenant_id = t2;

    let response = get_as(&app, "/api/settings", &intruder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["detail"], "Access denied");
}
