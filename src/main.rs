use order_reports::config::configuration;
use order_reports::db::{establish_connection, run_migrations};
use order_reports::seed::seed_database;
use order_reports::startup::Application;
use order_reports::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("order_reports".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = configuration::Settings::new().expect("Failed to load configurations");

    let database_url = config.database.url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await?
        .expect("Failed to run migrations");

    let pool = establish_connection(&config.database.url).expect("Failed to create pool");
    if config.application.seed_on_startup {
        seed_database(&pool, chrono::Local::now().naive_local())
            .await
            .expect("Failed to seed database");
    }

    let application = Application::build(&config, pool).await?;
    application.run_until_stopped().await?;
    Ok(())
}
