// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::{start_cleanup_task, ContentCache, Mailer};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

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

    log::info!("Starting dahabiyat-api...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool (runs migrations)
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Public content cache with background cleanup
    let cache = Arc::new(ContentCache::new(config.content_cache_ttl));
    start_cleanup_task(cache.clone(), 300);
    log::info!(
        "Initialized content cache (TTL: {}s)",
        config.content_cache_ttl
    );

    // 6. Transactional mail client
    let mailer = Arc::new(Mailer::from_config(&config));
    if mailer.is_enabled() {
        log::info!("Mail client ready");
    } else {
        log::warn!("Mail client disabled (MAIL_API_URL not set)");
    }

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (database pool, config, cache, mailer)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(mailer.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::auth_config)
            .configure(handlers::tours_config)
            .configure(handlers::availability_config)
            .configure(handlers::bookings_config)
            .configure(handlers::itineraries_config)
            .configure(handlers::packages_config)
            .configure(handlers::content_config)
            .configure(handlers::pages_config)
            .configure(handlers::site_config)
            .configure(handlers::dashboard_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
