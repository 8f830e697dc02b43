// core/src/dto/mod.rs

//! Shapes exchanged over the HTTP boundary. Entities never cross it directly.

pub mod cart;
pub mod product;

pub use cart::{CartDto, CartItemDto};
pub use product::{ProductBatch, ProductDto};
