use crate::config::configuration::ReportSettings;
use crate::errors::custom::CustomError;
use crate::queries;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/******************************************/
// Reteriving All Orders
/******************************************/
/**
 * @route   GET /orders
 * @access  Public
 */
#[instrument(name = "List all orders", skip(store))]
pub async fn list_orders(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    Ok(HttpResponse::Ok().json(queries::all_orders(&snapshot)))
}

/******************************************/
// Orders joined with customer, item and product
/******************************************/
/**
 * @route   GET /orders/joined
 * @access  Public
 */
#[instrument(name = "List joined orders", skip(store))]
pub async fn joined_orders(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    let rows = queries::joined_orders(&snapshot)?;
    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Orders containing a product
/******************************************/
/**
 * @route   GET /orders/product/{product_id}
 * @access  Public
 */
#[instrument(name = "List orders by product", skip(store))]
pub async fn orders_by_product(
    store: web::Data<Store>,
    product_id: web::Path<i32>,
) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    let orders = queries::orders_with_product(&snapshot, product_id.into_inner());
    Ok(HttpResponse::Ok().json(orders))
}

/******************************************/
// Orders with nested detail and total
/******************************************/
/**
 * @route   GET /orders/detailed
 * @access  Public
 */
#[instrument(name = "List detailed orders", skip(store))]
pub async fn order_details(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    let details = queries::orders_with_details(&snapshot)?;
    Ok(HttpResponse::Ok().json(details))
}

/******************************************/
// Orders placed within a date range
/******************************************/
/**
 * @route   GET /orders/date_range?start=YYYY-MM-DD&end=YYYY-MM-DD
 * @access  Public
 */
#[instrument(name = "List orders in date range", skip(store, reports))]
pub async fn orders_in_date_range(
    store: web::Data<Store>,
    reports: web::Data<ReportSettings>,
    range: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, CustomError> {
    let range = range.into_inner();
    let start = range.start.unwrap_or(reports.date_range_start);
    let end = range.end.unwrap_or(reports.date_range_end);
    if start > end {
        return Err(CustomError::ValidationError(format!(
            "start {} is after end {}",
            start, end
        )));
    }

    let snapshot = store.snapshot().await?;
    let orders = queries::orders_in_date_range(&snapshot, start, end)?;
    Ok(HttpResponse::Ok().json(orders))
}
