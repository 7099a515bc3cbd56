use super::records::{CustomerRevenue, ProductOrderItems, ProductRevenue};
use super::{line_total, Lookup, Snapshot};
use crate::errors::custom::IntegrityError;
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Sums per key, keeping keys in the order they were first seen.
struct Totals<K> {
    slot_of: HashMap<K, usize>,
    entries: Vec<(K, Decimal)>,
}

impl<K: std::hash::Hash + Eq + Clone> Totals<K> {
    fn new() -> Self {
        Self {
            slot_of: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: &K, amount: Decimal) {
        match self.slot_of.get(key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.slot_of.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), amount));
            }
        }
    }

    /// Largest first; equal sums stay in first-seen order.
    fn into_descending(self) -> Vec<(K, Decimal)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Revenue of each customer name over the orders dated in `year`.
pub fn revenue_by_customer(
    snapshot: &Snapshot,
    year: i32,
) -> Result<Vec<CustomerRevenue>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    let mut totals = Totals::new();
    for order in snapshot
        .orders
        .iter()
        .filter(|order| order.order_date.year() == year)
    {
        let items = lookup.items(order.id);
        if items.is_empty() {
            continue;
        }
        let customer = lookup.customer(order)?;
        for item in items {
            let product = lookup.product(item)?;
            totals.add(&customer.name, line_total(item.quantity, product.price));
        }
    }

    Ok(totals
        .into_descending()
        .into_iter()
        .map(|(customer_name, revenue)| CustomerRevenue {
            customer_name,
            revenue,
        })
        .collect())
}

/// Revenue of each product over all order items.
pub fn revenue_by_product(snapshot: &Snapshot) -> Result<Vec<ProductRevenue>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    let mut totals = Totals::new();
    let mut names: HashMap<i32, &str> = HashMap::new();
    for item in &snapshot.order_items {
        let product = lookup.product(item)?;
        names.insert(product.id, &product.name);
        totals.add(&product.id, line_total(item.quantity, product.price));
    }

    Ok(totals
        .into_descending()
        .into_iter()
        .map(|(product_id, revenue)| ProductRevenue {
            product_name: names
                .get(&product_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            revenue,
        })
        .collect())
}

/// Order items grouped by product, one group per product in the order the
/// products first occur among the items.
pub fn order_items_by_product(
    snapshot: &Snapshot,
) -> Result<Vec<ProductOrderItems>, IntegrityError> {
    let lookup = Lookup::new(snapshot);
    let mut slot_of: HashMap<i32, usize> = HashMap::new();
    let mut groups: Vec<ProductOrderItems> = Vec::new();
    for item in &snapshot.order_items {
        let product = lookup.product(item)?;
        let slot = *slot_of.entry(product.id).or_insert_with(|| {
            groups.push(ProductOrderItems::default());
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.product_name.push(product.name.clone());
        group.order_item_id.push(item.order_item_id);
        group.quantity.push(item.quantity);
    }
    Ok(groups)
}
