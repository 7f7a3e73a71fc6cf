use sqlx::PgPool;

/// Connect, migrate, verify every table the repositories touch exists.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    platter_db::health_check(&pool).await.unwrap();

    let tables = [
        "tenants",
        "tenant_settings",
        "menus",
        "menu_categories",
        "menu_items",
        "carts",
        "cart_items",
        "orders",
        "order_items",
        "payment_intents",
        "audit_logs",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_order_totals_check_constraint(pool: PgPool) {
    let tenant_id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO tenants (name, domain) VALUES ('Check', 'check.test') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let result = sqlx::query(
        "INSERT INTO orders (tenant_id, user_id, subtotal, tax, discount, total, currency_code)
         VALUES ($1, $2, 10.00, 1.00, 0.00, 99.00, 'USD')",
    )
    .bind(tenant_id)
    .bind(uuid::Uuid::new_v4())
    .execute(&pool)
    .await;

    assert!(result.is_err(), "total must equal subtotal + tax - discount");
}
