// realshop/server/src/db.rs

//! Store selection, connection pool, migrations and demo seeding.

use crate::config::{AppConfig, Storage};
use crate::errors::{AppError, Result};
use crate::state::AppState;
use realshop::repository::{PgCartRepository, PgProductRepository};
use realshop::{ProductFields, ProductService};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[instrument(name = "db::connect", skip(config), fields(max_connections = config.database_max_connections), err(Display))]
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let url = config
    .database_url
    .as_deref()
    .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

#[instrument(name = "db::migrate", skip(pool), err(Display))]
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Database migrations applied.");
  Ok(())
}

/// Builds the application state for the configured backend.
pub async fn build_state(config: Arc<AppConfig>) -> Result<AppState> {
  let state = match config.storage {
    Storage::Postgres => {
      let pool = connect(&config).await?;
      if config.run_migrations {
        run_migrations(&pool).await?;
      }
      AppState::new(
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgCartRepository::new(pool)),
        config.clone(),
      )
    }
    Storage::Memory => {
      warn!("Using the in-memory store; data is lost on shutdown.");
      AppState::in_memory(config.clone())
    }
  };

  if config.seed_db {
    let inserted = seed_catalog(&state.products).await?;
    info!("Database seeding inserted {} products.", inserted);
  }
  Ok(state)
}

/// Inserts a small demo catalog when there are no products yet. Returns how many were inserted.
#[instrument(name = "db::seed_catalog", skip(products), err(Display))]
pub async fn seed_catalog(products: &ProductService) -> Result<usize> {
  if !products.list(None).await?.is_empty() {
    info!("Catalog already populated; skipping seed.");
    return Ok(0);
  }
  let created = products.create_many(demo_catalog()).await?;
  Ok(created.len())
}

fn demo_catalog() -> Vec<ProductFields> {
  let product = |title: &str, price: f64, description: &str, category: &str| ProductFields {
    title: title.to_string(),
    price,
    description: Some(description.to_string()),
    image: None,
    category: category.to_string(),
  };
  vec![
    product("Cotton Crew T-Shirt", 19.99, "Soft everyday tee.", "men's clothing"),
    product("Rain Jacket", 89.5, "Lightweight waterproof shell.", "women's clothing"),
    product("Silver Chain Bracelet", 45.0, "Sterling silver, adjustable.", "jewelery"),
    product("Portable SSD 1TB", 109.0, "USB-C, up to 1050MB/s.", "electronics"),
    product("Wireless Mouse", 24.95, "Silent clicks, two-year battery.", "electronics"),
  ]
}
