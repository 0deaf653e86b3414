// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage, and start HTTP server

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use hbnb_api::config::Config;
use hbnb_api::handlers;
use hbnb_api::storage::Storage;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting hbnb-api...");
    log::info!("Environment: {}", config.environment);
    log::info!("Storage: {}", config.storage_type);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the storage engine
    let storage = match Storage::from_config(&config).await {
        Ok(storage) => web::Data::new(storage),
        Err(e) => {
            log::error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let server_storage = storage.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(server_storage.clone())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(handlers::api_config)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    // 6. Flush anything staged and release the pool
    if let Err(e) = storage.close().await {
        log::error!("Failed to close storage: {}", e);
    }
    log::info!("Server stopped");
    Ok(())
}
