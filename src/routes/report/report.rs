use crate::config::configuration::ReportSettings;
use crate::errors::custom::CustomError;
use crate::queries;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/**
 * @route   GET /reports/revenue/customers?year=YYYY
 * @access  Public
 */
#[instrument(name = "Revenue by customer", skip(store, reports))]
pub async fn revenue_by_customer(
    store: web::Data<Store>,
    reports: web::Data<ReportSettings>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, CustomError> {
    let year = query.year.unwrap_or(reports.revenue_year);
    let snapshot = store.snapshot().await?;
    let report = queries::revenue_by_customer(&snapshot, year)?;
    Ok(HttpResponse::Ok().json(report))
}

/**
 * @route   GET /reports/revenue/products
 * @access  Public
 */
#[instrument(name = "Revenue by product", skip(store))]
pub async fn revenue_by_product(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    let report = queries::revenue_by_product(&snapshot)?;
    Ok(HttpResponse::Ok().json(report))
}

/**
 * @route   GET /reports/order_items/by_product
 * @access  Public
 */
#[instrument(name = "Order items grouped by product", skip(store))]
pub async fn order_items_by_product(
    store: web::Data<Store>,
) -> Result<HttpResponse, CustomError> {
    let snapshot = store.snapshot().await?;
    let groups = queries::order_items_by_product(&snapshot)?;
    Ok(HttpResponse::Ok().json(groups))
}
