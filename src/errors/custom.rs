use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Database Error: {0}")]
    DatabaseError(#[from] DbError),

    #[error("Integrity Error: {0}")]
    IntegrityError(#[from] IntegrityError),

    #[error("Validation Error: {0}")]
    ValidationError(String),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Query Error: {0}")]
    QueryBuilderError(String),

    #[error("Insertion Error: {0}")]
    InsertionError(String),

    #[error("Migration Error: {0}")]
    MigrationError(String),

    #[error("Timeout Error: no response within {0:?}")]
    Timeout(Duration),
}

/// A foreign key that a query followed did not resolve to a row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("order {order_id} references missing customer {customer_id}")]
    MissingCustomer { order_id: i32, customer_id: i32 },

    #[error("order item {order_item_id} references missing product {product_id}")]
    MissingProduct { order_item_id: i32, product_id: i32 },
}

impl ResponseError for CustomError {
    fn error_response(&self) -> HttpResponse {
        match self {
            CustomError::ValidationError(_) => HttpResponse::BadRequest().body(self.to_string()),
            CustomError::IntegrityError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
            CustomError::DatabaseError(err) => match err {
                DbError::ConnectionError(_) | DbError::Timeout(_) => {
                    HttpResponse::ServiceUnavailable().body(self.to_string())
                }
                DbError::QueryBuilderError(_)
                | DbError::InsertionError(_)
                | DbError::MigrationError(_) => {
                    HttpResponse::InternalServerError().body(self.to_string())
                }
            },
        }
    }
}
