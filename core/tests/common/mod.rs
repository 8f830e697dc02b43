// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use realshop::repository::{MemoryCartRepository, MemoryProductRepository};
use realshop::{CartItem, CartService, NewCart, ProductFields, ProductService};
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub fn fields(title: &str, price: f64, category: &str) -> ProductFields {
  ProductFields {
    title: title.to_string(),
    price,
    description: None,
    image: None,
    category: category.to_string(),
  }
}

pub fn item(product_id: i64, quantity: i32) -> CartItem {
  CartItem { product_id, quantity }
}

pub fn new_cart(user_id: Option<i64>, items: Vec<CartItem>) -> NewCart {
  NewCart { user_id, items }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
}

/// Product service over a fresh in-memory store; the returned store shares its tables.
pub fn product_service() -> (ProductService, MemoryProductRepository) {
  let store = MemoryProductRepository::new();
  (ProductService::new(Arc::new(store.clone())), store)
}

pub fn cart_service() -> (CartService, MemoryCartRepository) {
  let store = MemoryCartRepository::new();
  (CartService::new(Arc::new(store.clone())), store)
}
