use crate::errors::custom::CustomError;
use crate::queries;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use tracing::instrument;

/******************************************/
// Joined orders through hand-written SQL
/******************************************/
/**
 * @route   GET /raw/orders/joined
 * @access  Public
 */
#[instrument(name = "List joined orders with raw SQL", skip(store))]
pub async fn raw_joined_orders(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let rows = store.joined_rows().await?;
    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Nested orders rebuilt from raw rows
/******************************************/
/**
 * @route   GET /raw/orders/detailed
 * @access  Public
 */
#[instrument(name = "List detailed orders with raw SQL", skip(store))]
pub async fn raw_order_details(store: web::Data<Store>) -> Result<HttpResponse, CustomError> {
    let rows = store.joined_rows().await?;
    // Inner join: orders without items are absent here
    Ok(HttpResponse::Ok().json(queries::nest_joined_rows(rows)))
}
