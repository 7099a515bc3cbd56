pub mod config;
pub mod db;
pub mod db_models;
pub mod errors;
pub mod queries;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod startup;
pub mod store;
pub mod telemetry;
