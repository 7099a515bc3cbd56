//! Read-only reports over the customers, orders, order items and products
//! tables.
//!
//! Every report is a pure function of a [`Snapshot`]. Money is always
//! `rust_decimal::Decimal`; a line's contribution is `quantity × price`.
//! A foreign key that a report has to follow and cannot resolve is an
//! [`IntegrityError`], never a silently skipped row.

mod orders;
mod records;
mod revenue;

pub use orders::{
    all_orders, joined_orders, nest_joined_rows, orders_in_date_range, orders_with_details,
    orders_with_product,
};
pub use records::{
    CustomerRevenue, JoinedOrder, OrderDetail, OrderItemDetail, OrderRevenue, OrderWithItems,
    ProductOrderItems, ProductRevenue,
};
pub use revenue::{order_items_by_product, revenue_by_customer, revenue_by_product};

use crate::db_models::{Customer, Order, OrderItem, Product};
use crate::errors::custom::IntegrityError;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The four tables as read at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}

pub fn line_total(quantity: i32, price: Decimal) -> Decimal {
    Decimal::from(quantity) * price
}

/// Key lookups built once per report.
struct Lookup<'a> {
    customers: HashMap<i32, &'a Customer>,
    products: HashMap<i32, &'a Product>,
    items_by_order: HashMap<i32, Vec<&'a OrderItem>>,
}

impl<'a> Lookup<'a> {
    fn new(snapshot: &'a Snapshot) -> Self {
        let customers = snapshot.customers.iter().map(|c| (c.id, c)).collect();
        let products = snapshot.products.iter().map(|p| (p.id, p)).collect();
        let mut items_by_order: HashMap<i32, Vec<&'a OrderItem>> = HashMap::new();
        for item in &snapshot.order_items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }
        Self {
            customers,
            products,
            items_by_order,
        }
    }

    fn customer(&self, order: &Order) -> Result<&'a Customer, IntegrityError> {
        self.customers
            .get(&order.customer_id)
            .copied()
            .ok_or(IntegrityError::MissingCustomer {
                order_id: order.id,
                customer_id: order.customer_id,
            })
    }

    fn product(&self, item: &OrderItem) -> Result<&'a Product, IntegrityError> {
        self.products
            .get(&item.product_id)
            .copied()
            .ok_or(IntegrityError::MissingProduct {
                order_item_id: item.order_item_id,
                product_id: item.product_id,
            })
    }

    /// Items of an order in table order; empty when the order has none.
    fn items(&self, order_id: i32) -> &[&'a OrderItem] {
        self.items_by_order
            .get(&order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn order_total(&self, order_id: i32) -> Result<Decimal, IntegrityError> {
        self.items(order_id).iter().try_fold(Decimal::ZERO, |sum, item| {
            let product = self.product(item)?;
            Ok(sum + line_total(item.quantity, product.price))
        })
    }
}
