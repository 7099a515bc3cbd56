use crate::errors::custom::DbError;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};

pub type PgPool = Pool<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/******************************************/
// Establishing Db Connection
/******************************************/
pub fn establish_connection(database_url: &str) -> Result<PgPool, DbError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .build()
        .map_err(|err| DbError::ConnectionError(err.to_string()))
}

/******************************************/
// Running embedded migrations
/******************************************/
pub fn run_migrations(database_url: &str) -> Result<(), DbError> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| DbError::MigrationError(err.to_string()))?;
    info!(count = applied.len(), "Applied pending migrations");
    Ok(())
}

/******************************************/
// Creating new db for tests
/******************************************/
pub fn create_database(server_url: &str, database_name: &str) -> Result<(), DbError> {
    let mut connection = PgConnection::establish(server_url)
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let create_db_query = format!(r#"CREATE DATABASE "{}";"#, database_name);
    sql_query(&create_db_query)
        .execute(&mut connection)
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;
    info!(database = %database_name, "Database created");
    Ok(())
}

/******************************************/
// Dropping db code
/******************************************/
pub fn drop_database(server_url: &str, database_name: &str) {
    let mut connection = match PgConnection::establish(server_url) {
        Ok(connection) => connection,
        Err(e) => {
            warn!("Failed to connect to the maintenance database: {}", e);
            return;
        }
    };

    // A database with open sessions cannot be dropped
    let terminate_query = format!(
        r#"
        SELECT pg_terminate_backend(pid)
        FROM pg_stat_activity
        WHERE datname = '{}';
    "#,
        database_name
    );

    if let Err(e) = sql_query(&terminate_query).execute(&mut connection) {
        warn!("Failed to terminate connections: {}", e);
        return;
    }

    let drop_query = format!(r#"DROP DATABASE IF EXISTS "{}";"#, database_name);

    if let Err(e) = sql_query(&drop_query).execute(&mut connection) {
        warn!("Failed to drop database: {}", e);
    } else {
        info!(database = %database_name, "Database dropped");
    }
}
