// realshop/server/src/lib.rs

//! HTTP surface for the RealShop catalog and cart API (actix-web).
//! Domain logic lives in the `realshop` crate; this crate wires it to routes,
//! configuration, logging and the database.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod telemetry;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
