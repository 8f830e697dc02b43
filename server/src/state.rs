// realshop/server/src/state.rs
use crate::config::AppConfig;
use realshop::repository::{MemoryCartRepository, MemoryProductRepository};
use realshop::{CartRepository, CartService, ProductRepository, ProductService};
use std::sync::Arc;

/// Shared by every worker; cloning is cheap (Arcs all the way down).
#[derive(Clone)]
pub struct AppState {
  pub products: ProductService,
  pub carts: CartService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
    config: Arc<AppConfig>,
  ) -> Self {
    Self {
      products: ProductService::new(products),
      carts: CartService::new(carts),
      config,
    }
  }

  /// State backed by fresh, empty in-memory stores.
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    Self::new(
      Arc::new(MemoryProductRepository::new()),
      Arc::new(MemoryCartRepository::new()),
      config,
    )
  }
}
