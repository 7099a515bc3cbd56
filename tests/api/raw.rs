use crate::helper::spawn_app;
use order_reports::queries::{JoinedOrder, OrderDetail};
use rust_decimal_macros::dec;

#[tokio::test]
async fn raw_join_matches_builder_join() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let raw: Vec<JoinedOrder> = app.get_json("/raw/orders/joined").await;
    let built: Vec<JoinedOrder> = app.get_json("/orders/joined").await;

    assert_eq!(raw, built);
    let first = &raw[0];
    assert_eq!(first.customer.name, "John Smith");
    assert_eq!(first.product.name, "Product 1");
    app.cleanup();
}

#[tokio::test]
async fn raw_rows_nest_into_the_same_details() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let nested: Vec<OrderDetail> = app.get_json("/raw/orders/detailed").await;
    let built: Vec<OrderDetail> = app.get_json("/orders/detailed").await;

    // Every seeded order has items, so the inner and outer joins agree
    assert_eq!(nested, built);
    assert_eq!(nested[0].total, dec!(34.97));
    app.cleanup();
}
