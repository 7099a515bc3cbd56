use crate::db::PgPool;
use crate::db_models::{Customer, Order, OrderItem, Product};
use crate::errors::custom::{CustomError, DbError};
use crate::queries::Snapshot;
use crate::schema::{customers, order_items, orders, products};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use rust_decimal::Decimal;
use tracing::{info, instrument};

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("seed dates are valid calendar dates")
}

/******************************************/
// Fixed seed data
/******************************************/
/// The demo dataset. Orders 9 and 10 are dated relative to `now`
/// (one week and two hours before it).
pub fn seed_snapshot(now: NaiveDateTime) -> Snapshot {
    let customers = [
        (1, "John Smith", "john.smith@example.com"),
        (2, "Jane Doe", "jane.doe@example.com"),
        (3, "Bob Johnson", "bob.johnson@example.com"),
        (4, "Alice Williams", "alice.w@example.com"),
        (5, "Charlie Brown", "charlie.b@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect();

    let products = [
        (1, "Product 1", 999),
        (2, "Product 2", 1499),
        (3, "Product 3", 1999),
        (4, "Product 4", 2499),
        (5, "Product 5", 2999),
    ]
    .into_iter()
    .map(|(id, name, cents)| Product {
        id,
        name: name.to_string(),
        price: Decimal::new(cents, 2),
    })
    .collect();

    let orders = [
        (1, midnight(2022, 1, 1), 1),
        (2, midnight(2022, 2, 15), 2),
        (3, midnight(2022, 3, 10), 3),
        (4, midnight(2022, 6, 20), 1),
        (5, midnight(2022, 9, 5), 4),
        (6, midnight(2022, 11, 11), 5),
        (7, midnight(2023, 1, 15), 2),
        (8, midnight(2023, 4, 22), 3),
        (9, now - Duration::days(7), 1),
        (10, now - Duration::hours(2), 5),
    ]
    .into_iter()
    .map(|(id, order_date, customer_id)| Order {
        id,
        order_date,
        customer_id,
    })
    .collect();

    // (order item id, order id, product id, quantity)
    let order_items = [
        (1, 1, 1, 2),
        (2, 1, 2, 1),
        (3, 2, 1, 3),
        (4, 2, 3, 1),
        (5, 3, 2, 2),
        (6, 3, 3, 2),
        (7, 4, 4, 1),
        (8, 5, 5, 3),
        (9, 6, 1, 2),
        (10, 7, 2, 1),
        (11, 8, 3, 4),
        (12, 9, 4, 2),
        (13, 9, 5, 1),
        (14, 10, 1, 5),
    ]
    .into_iter()
    .map(|(order_item_id, order_id, product_id, quantity)| OrderItem {
        order_id,
        product_id,
        order_item_id,
        quantity,
    })
    .collect();

    Snapshot {
        customers,
        products,
        orders,
        order_items,
    }
}

/******************************************/
// Adding seed data to an empty database
/******************************************/
/// Returns `false` without touching anything when customers already exist.
/// The emptiness check and the four inserts share one transaction, so a
/// failed insert leaves every table as it was.
#[instrument(name = "Seed database", skip(pool))]
pub async fn seed_database(pool: &PgPool, now: NaiveDateTime) -> Result<bool, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let data = seed_snapshot(now);
    let rows = &data;
    let inserted = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let existing: i64 = customers::table.count().get_result(conn).await?;
                if existing > 0 {
                    info!(existing, "Customers already present, skipping seed");
                    return Ok(false);
                }

                diesel::insert_into(customers::table)
                    .values(&rows.customers)
                    .execute(conn)
                    .await?;
                diesel::insert_into(products::table)
                    .values(&rows.products)
                    .execute(conn)
                    .await?;
                diesel::insert_into(orders::table)
                    .values(&rows.orders)
                    .execute(conn)
                    .await?;
                diesel::insert_into(order_items::table)
                    .values(&rows.order_items)
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    if inserted {
        info!(
            customers = data.customers.len(),
            products = data.products.len(),
            orders = data.orders.len(),
            order_items = data.order_items.len(),
            "Seed data inserted"
        );
    }
    Ok(inserted)
}
