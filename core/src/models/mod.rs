// core/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod cart;
pub mod product;

pub use cart::{Cart, CartItem, NewCart};
pub use product::{Product, ProductFields, DEFAULT_PRODUCT_IMAGE};
