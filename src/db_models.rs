use crate::schema::{customers, order_items, orders, products};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Numeric, Text, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "customerId")]
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "productId")]
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "orderId")]
    pub id: i32,
    pub order_date: NaiveDateTime,
    pub customer_id: i32,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub order_item_id: i32,
    pub quantity: i32,
}

/******************************************/
// Flat row of the hand-written join
/******************************************/
// Fields are matched to result columns by name, so every column that exists
// on more than one table is aliased in the SQL (`customer_name`, `product_name`).
#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct JoinedRow {
    #[diesel(sql_type = Integer)]
    pub order_id: i32,
    #[diesel(sql_type = Timestamp)]
    pub order_date: NaiveDateTime,
    #[diesel(sql_type = Integer)]
    pub customer_id: i32,
    #[diesel(sql_type = Text)]
    pub customer_name: String,
    #[diesel(sql_type = Text)]
    pub customer_email: String,
    #[diesel(sql_type = Integer)]
    pub order_item_id: i32,
    #[diesel(sql_type = Integer)]
    pub quantity: i32,
    #[diesel(sql_type = Integer)]
    pub product_id: i32,
    #[diesel(sql_type = Text)]
    pub product_name: String,
    #[diesel(sql_type = Numeric)]
    pub product_price: Decimal,
}

impl JoinedRow {
    pub fn into_parts(self) -> (Order, Customer, OrderItem, Product) {
        let order = Order {
            id: self.order_id,
            order_date: self.order_date,
            customer_id: self.customer_id,
        };
        let customer = Customer {
            id: self.customer_id,
            name: self.customer_name,
            email: self.customer_email,
        };
        let order_item = OrderItem {
            order_id: self.order_id,
            product_id: self.product_id,
            order_item_id: self.order_item_id,
            quantity: self.quantity,
        };
        let product = Product {
            id: self.product_id,
            name: self.product_name,
            price: self.product_price,
        };
        (order, customer, order_item, product)
    }
}
