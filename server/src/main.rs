// realshop/server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use realshop_server::web::configure_app_routes;
use realshop_server::{db, telemetry, AppConfig};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Configuration first: it decides the log format.
  let app_config = Arc::new(AppConfig::from_env().context("failed to load application configuration")?);
  telemetry::init_tracing(app_config.log_format);

  tracing::info!(storage = %app_config.storage, "Starting RealShop API server...");

  let app_state = db::build_state(app_config.clone())
    .await
    .context("failed to initialise the store")?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .configure(configure_app_routes)
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")?;

  tracing::info!("Server stopped.");
  Ok(())
}
