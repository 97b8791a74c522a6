//! MedSecure HTTP server
//!
//! Actix-web JSON API over the redactor, embedder, record store and clinical
//! reference data.

pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use medsecure_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::system::health)
        .service(routes::system::info)
        .service(routes::phi::redact)
        .service(routes::phi::embed)
        .service(routes::records::add_record)
        .service(routes::records::list_records)
        .service(routes::records::records_summary)
        .service(routes::records::reset)
        .service(routes::records::add_samples)
        .service(routes::records::reset_demo)
        .service(routes::search::search)
        .service(routes::symptoms::analyze)
        .service(routes::interactions::check);
}

/// Build state and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Starting MedSecure server on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
