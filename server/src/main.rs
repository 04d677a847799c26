use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use common::db;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod notify;
mod pages;
mod routes;
mod session;

use config::Config;
use notify::NotifyServer;
use routes::AppState;
use session::SessionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("Starting the order tracker");

    let pool = db::establish_connection(&config.database_url).await;
    db::init_schema(&pool).await.expect("Failed to create tables");
    db::seed_if_empty(&pool).await.expect("Failed to seed sample data");

    let events = notify::event_channel();

    let notify_server = NotifyServer::new(events.clone());
    let notify_addr = config.notify_address();
    tokio::spawn(async move {
        if let Err(e) = notify_server.start(&notify_addr).await {
            eprintln!("Notify server error: {}", e);
        }
    });

    let app_state = web::Data::new(AppState {
        pool,
        sessions: SessionStore::new(),
        events,
        notify_port: config.notify_port,
    });

    info!("Starting HTTP server on {}", config.server_address());
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(routes::home)
            .service(routes::login_page)
            .service(routes::login)
            .service(routes::logout)
            .service(routes::customer_dashboard)
            .service(routes::add_page)
            .service(routes::add_order)
            .service(routes::edit_page)
            .service(routes::edit_order)
            .service(routes::health_check)
    })
    .bind(config.server_address())?
    .run()
    .await
}
