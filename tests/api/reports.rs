use crate::helper::{seeded_at, spawn_app};
use order_reports::queries::{CustomerRevenue, ProductOrderItems, ProductRevenue};
use rust_decimal::Decimal;
use order_reports::seed::seed_snapshot;
use rust_decimal_macros::dec;
use serde_json::Value;

#[tokio::test]
async fn revenue_by_customer_uses_configured_year() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let report: Vec<CustomerRevenue> = app.get_json("/reports/revenue/customers").await;

    let names: Vec<&str> = report.iter().map(|r| r.customer_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Alice Williams",
            "Bob Johnson",
            "John Smith",
            "Jane Doe",
            "Charlie Brown"
        ]
    );
    assert_eq!(report[2].revenue, dec!(59.96));
    assert!(report.windows(2).all(|w| w[0].revenue > w[1].revenue));

    let raw: Value = app.get_json("/reports/revenue/customers").await;
    assert_eq!(raw[0]["customerName"], "Alice Williams");
    assert_eq!(raw[0]["revenue"], "89.97");
    app.cleanup();
}

#[tokio::test]
async fn revenue_by_customer_for_another_year() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let report: Vec<CustomerRevenue> = app
        .get_json("/reports/revenue/customers?year=2023")
        .await;

    assert_eq!(
        report,
        vec![
            CustomerRevenue {
                customer_name: "Bob Johnson".to_string(),
                revenue: dec!(79.96),
            },
            CustomerRevenue {
                customer_name: "Jane Doe".to_string(),
                revenue: dec!(14.99),
            },
        ]
    );

    let empty: Vec<CustomerRevenue> = app
        .get_json("/reports/revenue/customers?year=1999")
        .await;
    assert!(empty.is_empty());
    app.cleanup();
}

#[tokio::test]
async fn lens_view_agrees_with_revenue_by_product() {
    let Some(app) = spawn_app().await else {
        return;
    };

    let revenue: Vec<ProductRevenue> = app.get_json("/reports/revenue/products").await;
    let groups: Vec<ProductOrderItems> = app.get_json("/reports/order_items/by_product").await;

    assert_eq!(revenue[0].product_name, "Product 3");
    assert_eq!(revenue[0].revenue, dec!(139.93));
    assert_eq!(groups.len(), revenue.len());

    let seed = seed_snapshot(seeded_at());
    for group in &groups {
        let name = &group.product_name[0];
        let reported = revenue
            .iter()
            .find(|r| &r.product_name == name)
            .unwrap()
            .revenue;
        let unit_price = seed
            .products
            .iter()
            .find(|p| &p.name == name)
            .unwrap()
            .price;
        let lens_total: Decimal = group
            .quantity
            .iter()
            .map(|&q| Decimal::from(q) * unit_price)
            .sum();
        assert_eq!(lens_total, reported, "{}", name);
        assert_eq!(group.order_item_id.len(), group.quantity.len());
    }
    app.cleanup();
}
