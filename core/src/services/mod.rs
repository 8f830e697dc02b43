// core/src/services/mod.rs

//! Orchestration over the repositories: existence checks and domain rules.

pub mod cart_service;
pub mod product_service;

pub use cart_service::{CartListQuery, CartService, DateWindow};
pub use product_service::ProductService;
