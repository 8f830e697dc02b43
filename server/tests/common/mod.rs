// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use chrono::{NaiveDate, NaiveDateTime};
use realshop::repository::{MemoryCartRepository, MemoryProductRepository};
use realshop_server::{AppConfig, AppState};
use std::sync::Arc;

/// Initialises the actix test service for `state` with the production route table.
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(realshop_server::web::configure_app_routes),
    )
    .await
  };
}
pub(crate) use test_app;

pub fn memory_state() -> AppState {
  AppState::in_memory(Arc::new(AppConfig::default()))
}

/// State whose cart store is also handed back, for fixtures with fixed creation times.
pub fn state_with_carts(carts: MemoryCartRepository) -> AppState {
  AppState::new(
    Arc::new(MemoryProductRepository::new()),
    Arc::new(carts),
    Arc::new(AppConfig::default()),
  )
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
}
