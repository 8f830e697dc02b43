// src/lib.rs

//! RealShop core: the catalog and shopping-cart domain behind the REST API.
//!
//! The crate is layered leaf-first:
//!  - `models`: persisted entity shapes (`Product`, `Cart`, `CartItem`).
//!  - `dto`: the JSON shapes that cross the HTTP boundary, with field validation.
//!  - `mapper`: conversions between entities and DTOs.
//!  - `repository`: async query traits over the store, with PostgreSQL and in-memory backends.
//!  - `services`: existence checks and domain rules on top of the repositories.
//!  - `listing`: in-memory sort/limit helpers applied to fetched lists.
//!
//! HTTP wiring lives in the `realshop_server` crate.

pub mod dto;
pub mod error;
pub mod listing;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod services;

// --- Re-exports for the Public API ---

pub use crate::dto::{CartDto, CartItemDto, ProductBatch, ProductDto};
pub use crate::error::{ShopError, ShopResult};
pub use crate::listing::{apply_limit, sort_products, ProductSortKey, SortOrder};
pub use crate::models::{Cart, CartItem, NewCart, Product, ProductFields, DEFAULT_PRODUCT_IMAGE};
pub use crate::repository::{CartRepository, ProductRepository};
pub use crate::services::{CartListQuery, CartService, DateWindow, ProductService};
