use super::records::{JoinedOrder, OrderDetail, OrderItemDetail, OrderRevenue, OrderWithItems};
use super::{line_total, Lookup, Snapshot};
use crate::db_models::{Customer, Order};
use crate::errors::custom::IntegrityError;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub fn all_orders(snapshot: &Snapshot) -> Vec<Order> {
    snapshot.orders.clone()
}

/// Orders ⋈ customers ⋈ order items ⋈ products, ordered by order id and then
/// order item id. Orders without items produce no rows.
pub fn joined_orders(snapshot: &Snapshot) -> Result<Vec<JoinedOrder>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    let mut rows = Vec::new();
    for order in &snapshot.orders {
        let items = lookup.items(order.id);
        if items.is_empty() {
            continue;
        }
        let customer = lookup.customer(order)?;
        for item in items {
            let product = lookup.product(item)?;
            rows.push(JoinedOrder {
                order: order.clone(),
                customer: customer.clone(),
                order_item: (*item).clone(),
                product: product.clone(),
            });
        }
    }
    rows.sort_by_key(|row| (row.order.id, row.order_item.order_item_id));
    Ok(rows)
}

/// Orders having at least one item for `product_id`, each with all of its items.
pub fn orders_with_product(snapshot: &Snapshot, product_id: i32) -> Vec<OrderWithItems> {
    let lookup = Lookup::new(snapshot);
    snapshot
        .orders
        .iter()
        .filter(|order| {
            lookup
                .items(order.id)
                .iter()
                .any(|item| item.product_id == product_id)
        })
        .map(|order| OrderWithItems {
            order: order.clone(),
            order_items: lookup.items(order.id).iter().map(|&item| item.clone()).collect(),
        })
        .collect()
}

/// Every order with its customer and items; orders without items keep an
/// empty item list and a zero total.
pub fn orders_with_details(snapshot: &Snapshot) -> Result<Vec<OrderDetail>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    snapshot
        .orders
        .iter()
        .map(|order| {
            let customer = lookup.customer(order)?;
            let order_items = lookup
                .items(order.id)
                .iter()
                .map(|item| {
                    Ok(OrderItemDetail {
                        order_item_id: item.order_item_id,
                        order_id: item.order_id,
                        quantity: item.quantity,
                        product: lookup.product(item)?.clone(),
                    })
                })
                .collect::<Result<Vec<_>, IntegrityError>>()?;
            Ok(OrderDetail {
                order_id: order.id,
                order_date: order.order_date,
                customer: customer.clone(),
                total: detail_total(&order_items),
                order_items,
            })
        })
        .collect()
}

/// Orders dated from midnight of `start` through midnight of `end`, both
/// instants included, oldest first. An order later on the `end` day is out of
/// range.
pub fn orders_in_date_range(
    snapshot: &Snapshot,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<OrderRevenue>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    let bounds = start.and_time(NaiveTime::MIN)..=end.and_time(NaiveTime::MIN);
    let mut in_range: Vec<&Order> = snapshot
        .orders
        .iter()
        .filter(|order| bounds.contains(&order.order_date))
        .collect();
    in_range.sort_by_key(|order| (order.order_date, order.id));

    in_range
        .into_iter()
        .map(|order| {
            Ok(OrderRevenue {
                customer_name: lookup.customer(order)?.name.clone(),
                total_revenue: lookup.order_total(order.id)?,
            })
        })
        .collect()
}

/// Rebuilds nested orders from flat joined rows in two passes: the first
/// fixes one slot per distinct order in encounter order, the second appends
/// each row's item to its order's slot.
pub fn nest_joined_rows(rows: Vec<JoinedOrder>) -> Vec<OrderDetail> {
    let mut slot_of: HashMap<i32, usize> = HashMap::new();
    let mut heads: Vec<(Order, Customer)> = Vec::new();
    for row in &rows {
        if !slot_of.contains_key(&row.order.id) {
            slot_of.insert(row.order.id, heads.len());
            heads.push((row.order.clone(), row.customer.clone()));
        }
    }

    let mut items: Vec<Vec<OrderItemDetail>> = vec![Vec::new(); heads.len()];
    for row in rows {
        let slot = slot_of[&row.order.id];
        items[slot].push(OrderItemDetail {
            order_item_id: row.order_item.order_item_id,
            order_id: row.order_item.order_id,
            quantity: row.order_item.quantity,
            product: row.product,
        });
    }

    heads
        .into_iter()
        .zip(items)
        .map(|((order, customer), order_items)| OrderDetail {
            order_id: order.id,
            order_date: order.order_date,
            customer,
            total: detail_total(&order_items),
            order_items,
        })
        .collect()
}

fn detail_total(items: &[OrderItemDetail]) -> Decimal {
    items
        .iter()
        .map(|item| line_total(item.quantity, item.product.price))
        .sum()
}
