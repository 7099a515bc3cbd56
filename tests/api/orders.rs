use crate::helper::{seeded_at, spawn_app};
use claim::assert_err;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use order_reports::db_models::Order;
use order_reports::queries::{JoinedOrder, OrderDetail, OrderRevenue, OrderWithItems};
use order_reports::schema::{customers, order_items, orders, products};
use order_reports::seed::{seed_database, seed_snapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

#[tokio::test]
async fn all_orders_match_the_seed() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let orders: Vec<Order> = app.get_json("/orders").await;
    assert_eq!(orders, seed_snapshot(seeded_at()).orders);

    let raw: Value = app.get_json("/orders").await;
    assert_eq!(raw[0]["orderId"], 1);
    assert_eq!(raw[0]["orderDate"], "2022-01-01T00:00:00");
    assert_eq!(raw[0]["customerId"], 1);
    app.cleanup();
}

#[tokio::test]
async fn seeding_twice_leaves_data_alone() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let inserted = seed_database(&app.db_pool, seeded_at())
        .await
        .expect("Failed to run seed");
    assert!(!inserted);
    let orders: Vec<Order> = app.get_json("/orders").await;
    assert_eq!(orders.len(), 10);
    app.cleanup();
}

#[tokio::test]
async fn failed_seed_inserts_nothing() {
    let Some(app) = spawn_app().await else {
        return;
    };
    let mut conn = app.db_pool.get().await.expect("Failed to get connection");
    diesel::delete(order_items::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear order items");
    diesel::delete(orders::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear orders");
    diesel::delete(products::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear products");
    diesel::delete(customers::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear customers");

    // Customers are empty, but product 1 collides once the products go in
    let leftover = seed_snapshot(seeded_at()).products.remove(0);
    diesel::insert_into(products::table)
        .values(&leftover)
        .execute(&mut conn)
        .await
        .expect("Failed to insert leftover product");

    assert_err!(seed_database(&app.db_pool, seeded_at()).await);

    let customer_count: i64 = customers::table
        .count()
        .get_result(&mut conn)
        .await
        .expect("Failed to count customers");
    assert_eq!(customer_count, 0);
    let product_count: i64 = products::table
        .count()
        .get_result(&mut conn)
        .await
        .expect("Failed to count products");
    assert_eq!(product_count, 1);
    let orders: Vec<Order> = app.get_json("/orders").await;
    assert!(orders.is_empty());
    app.cleanup();
}

#[tokio::test]
async fn joined_orders_keep_customer_and_product_names_apart() {
    let Some(app) = spawn_app().await else {
        return;
    };
    let seed = seed_snapshot(seeded_at());

    let rows: Vec<JoinedOrder> = app.get_json("/orders/joined").await;

    assert_eq!(rows.len(), seed.order_items.len());
    for row in &rows {
        let customer = seed
            .customers
            .iter()
            .find(|c| c.id == row.order.customer_id)
            .unwrap();
        assert_eq!(row.customer.name, customer.name);
        assert!(!seed.products.iter().any(|p| p.name == row.customer.name));
    }
    app.cleanup();
}

#[tokio::test]
async fn orders_by_product_include_all_items() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let orders: Vec<OrderWithItems> = app.get_json("/orders/product/2").await;
    let ids: Vec<i32> = orders.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![1, 3, 7]);
    assert_eq!(orders[0].order_items.len(), 2);

    let none: Vec<OrderWithItems> = app.get_json("/orders/product/404").await;
    assert!(none.is_empty());
    app.cleanup();
}

#[tokio::test]
async fn detailed_orders_carry_decimal_totals() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let details: Vec<OrderDetail> = app.get_json("/orders/detailed").await;

    assert_eq!(details.len(), 10);
    assert_eq!(details[0].order_id, 1);
    assert_eq!(details[0].total, dec!(34.97));
    for detail in &details {
        let sum: Decimal = detail
            .order_items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.product.price)
            .sum();
        assert_eq!(detail.total, sum);
    }

    let raw: Value = app.get_json("/orders/detailed").await;
    assert_eq!(raw[0]["total"], "34.97");
    app.cleanup();
}

#[tokio::test]
async fn date_range_defaults_to_configured_bounds() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let orders: Vec<OrderRevenue> = app.get_json("/orders/date_range").await;

    assert_eq!(
        orders,
        vec![OrderRevenue {
            customer_name: "John Smith".to_string(),
            total_revenue: dec!(34.97),
        }]
    );
    app.cleanup();
}

#[tokio::test]
async fn date_range_includes_both_bounds() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let orders: Vec<OrderRevenue> = app
        .get_json("/orders/date_range?start=2022-02-15&end=2022-03-10")
        .await;

    let names: Vec<&str> = orders.iter().map(|o| o.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Jane Doe", "Bob Johnson"]);
    assert_eq!(orders[0].total_revenue, dec!(49.96));
    assert_eq!(orders[1].total_revenue, dec!(69.96));
    app.cleanup();
}

#[tokio::test]
async fn reversed_date_range_is_rejected() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let response = app
        .get("/orders/date_range?start=2022-03-01&end=2022-01-01")
        .await;

    assert_eq!(response.status().as_u16(), 400);
    app.cleanup();
}
