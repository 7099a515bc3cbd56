use crate::db::PgPool;
use crate::db_models::{Customer, JoinedRow, Order, OrderItem, Product};
use crate::errors::custom::{CustomError, DbError};
use crate::queries::{JoinedOrder, Snapshot};
use crate::schema::{customers, order_items, orders, products};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

/// Hand-written join. Every column name that exists on more than one table is
/// aliased, so each result column maps to exactly one `JoinedRow` field.
pub const JOINED_ORDERS_SQL: &str = r#"
    SELECT
        o.id AS order_id,
        o.order_date,
        o.customer_id,
        c.name AS customer_name,
        c.email AS customer_email,
        oi.order_item_id,
        oi.quantity,
        p.id AS product_id,
        p.name AS product_name,
        p.price AS product_price
    FROM orders o
    INNER JOIN customers c ON o.customer_id = c.id
    INNER JOIN order_items oi ON o.id = oi.order_id
    INNER JOIN products p ON oi.product_id = p.id
    ORDER BY o.id, oi.order_item_id"#;

/// Read access to the order tables, each call bounded by `timeout`.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
    timeout: Duration,
}

impl Store {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn connection(&self) -> Result<Object<AsyncPgConnection>, DbError> {
        self.pool
            .get()
            .await
            .map_err(|err| DbError::ConnectionError(err.to_string()))
    }

    async fn bounded<T>(
        &self,
        work: impl Future<Output = Result<T, DbError>>,
    ) -> Result<T, CustomError> {
        let result = tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| DbError::Timeout(self.timeout))?;
        Ok(result?)
    }

    /******************************************/
    // Loading the four tables
    /******************************************/
    /// All four tables are read inside one read-only repeatable-read
    /// transaction, so every SELECT sees the same database state.
    #[instrument(name = "Load table snapshot", skip(self))]
    pub async fn snapshot(&self) -> Result<Snapshot, CustomError> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            conn.build_transaction()
                .read_only()
                .repeatable_read()
                .run(|conn| {
                    async move {
                        let customers_query = customers::table
                            .select(Customer::as_select())
                            .order(customers::id.asc());
                        debug!(sql = %diesel::debug_query::<Pg, _>(&customers_query), "Compiled SQL");
                        let customers = customers_query.load(conn).await?;

                        let products_query = products::table
                            .select(Product::as_select())
                            .order(products::id.asc());
                        debug!(sql = %diesel::debug_query::<Pg, _>(&products_query), "Compiled SQL");
                        let products = products_query.load(conn).await?;

                        let orders_query = orders::table
                            .select(Order::as_select())
                            .order(orders::id.asc());
                        debug!(sql = %diesel::debug_query::<Pg, _>(&orders_query), "Compiled SQL");
                        let orders = orders_query.load(conn).await?;

                        let items_query = order_items::table
                            .select(OrderItem::as_select())
                            .order(order_items::order_item_id.asc());
                        debug!(sql = %diesel::debug_query::<Pg, _>(&items_query), "Compiled SQL");
                        let order_items = items_query.load(conn).await?;

                        Ok::<_, diesel::result::Error>(Snapshot {
                            customers,
                            products,
                            orders,
                            order_items,
                        })
                    }
                    .scope_boxed()
                })
                .await
                .map_err(query_error)
        })
        .await
    }

    /******************************************/
    // Hand-written join with aliased columns
    /******************************************/
    #[instrument(name = "Load joined rows with raw SQL", skip(self))]
    pub async fn joined_rows(&self) -> Result<Vec<JoinedOrder>, CustomError> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            debug!(sql = JOINED_ORDERS_SQL, "Raw SQL");
            let rows = sql_query(JOINED_ORDERS_SQL)
                .load::<JoinedRow>(&mut conn)
                .await
                .map_err(query_error)?;
            let joined: Vec<JoinedOrder> = rows
                .into_iter()
                .map(|row| {
                    let (order, customer, order_item, product) = row.into_parts();
                    JoinedOrder {
                        order,
                        customer,
                        order_item,
                        product,
                    }
                })
                .collect();
            Ok::<_, DbError>(joined)
        })
        .await
    }
}

fn query_error(err: diesel::result::Error) -> DbError {
    DbError::QueryBuilderError(err.to_string())
}
