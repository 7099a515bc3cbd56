use crate::config::configuration::{ReportSettings, Settings};
use crate::db::PgPool;
use crate::routes::{
    health_check::health_check,
    order::order::{
        joined_orders, list_orders, order_details, orders_by_product, orders_in_date_range,
    },
    raw::raw::{raw_joined_orders, raw_order_details},
    report::report::{order_items_by_product, revenue_by_customer, revenue_by_product},
};
use crate::store::Store;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(settings: &Settings, pool: PgPool) -> Result<Self, std::io::Error> {
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let actual_port = listener.local_addr()?.port();

        let store = Store::new(pool, settings.database.query_timeout());
        let server = run_server(listener, store, settings.reports.clone())?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/******************************************/
// Running Server
/******************************************/
pub fn run_server(
    listener: TcpListener,
    store: Store,
    reports: ReportSettings,
) -> Result<Server, std::io::Error> {
    let store = web::Data::new(store);
    let reports = web::Data::new(reports);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(reports.clone())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/orders")
                    .route("", web::get().to(list_orders))
                    .route("/joined", web::get().to(joined_orders))
                    .route("/product/{product_id}", web::get().to(orders_by_product))
                    .route("/detailed", web::get().to(order_details))
                    .route("/date_range", web::get().to(orders_in_date_range)),
            )
            .service(
                web::scope("/reports")
                    .route("/revenue/customers", web::get().to(revenue_by_customer))
                    .route("/revenue/products", web::get().to(revenue_by_product))
                    .route(
                        "/order_items/by_product",
                        web::get().to(order_items_by_product),
                    ),
            )
            .service(
                web::scope("/raw")
                    .route("/orders/joined", web::get().to(raw_joined_orders))
                    .route("/orders/detailed", web::get().to(raw_order_details)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
