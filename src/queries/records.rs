use crate::db_models::{Customer, Order, OrderItem, Product};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row per (order, order item) of the four-way inner join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedOrder {
    pub order: Order,
    pub customer: Customer,
    pub order_item: OrderItem,
    pub product: Product,
}

/// An order together with every one of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    pub order_item_id: i32,
    pub order_id: i32,
    pub quantity: i32,
    pub product: Product,
}

/// An order with its customer, its items and their products, and the sum of
/// `quantity × price` over the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: i32,
    pub order_date: NaiveDateTime,
    pub customer: Customer,
    pub order_items: Vec<OrderItemDetail>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRevenue {
    pub customer_name: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub product_name: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRevenue {
    pub customer_name: String,
    pub total_revenue: Decimal,
}

/// Items of one product as parallel lists: index `i` of each list describes
/// the same order item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrderItems {
    pub product_name: Vec<String>,
    pub order_item_id: Vec<i32>,
    pub quantity: Vec<i32>,
}
