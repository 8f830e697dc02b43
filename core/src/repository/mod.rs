// core/src/repository/mod.rs

//! Query interface over the persistence store.
//!
//! Services only see the `ProductRepository` / `CartRepository` traits. Two backends exist:
//! `postgres` (sqlx, the production store) and `memory` (tests and database-less runs).
//! Every method that writes more than one row is atomic in both backends.

pub mod memory;
pub mod postgres;

use crate::error::ShopResult;
use crate::listing::SortOrder;
use crate::models::{Cart, CartItem, Product, ProductFields};
use async_trait::async_trait;
use chrono::{NaiveDateTime, SubsecRound, Utc};

pub use memory::{MemoryCartRepository, MemoryProductRepository};
pub use postgres::{PgCartRepository, PgProductRepository};

#[async_trait]
pub trait ProductRepository: Send + Sync {
  /// All products, ordered by id.
  async fn find_all(&self) -> ShopResult<Vec<Product>>;

  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Product>>;

  /// Exact, case-sensitive category match, ordered by id.
  async fn find_by_category(&self, category: &str) -> ShopResult<Vec<Product>>;

  /// Case-insensitive substring match on the title, ordered by id.
  async fn find_by_title_containing(&self, fragment: &str) -> ShopResult<Vec<Product>>;

  /// Products strictly more expensive than `price`, ordered by id.
  async fn find_priced_above(&self, price: f64) -> ShopResult<Vec<Product>>;

  /// Distinct category values, sorted.
  async fn find_distinct_categories(&self) -> ShopResult<Vec<String>>;

  /// Inserts every product or none of them.
  async fn insert_all(&self, products: Vec<ProductFields>) -> ShopResult<Vec<Product>>;

  /// Replaces the client-controlled fields. `None` when the id does not exist.
  async fn update(&self, id: i64, fields: ProductFields) -> ShopResult<Option<Product>>;

  /// `false` when the id does not exist.
  async fn delete(&self, id: i64) -> ShopResult<bool>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
  /// First `limit` carts in id `order`.
  async fn find_page(&self, order: SortOrder, limit: i64) -> ShopResult<Vec<Cart>>;

  /// First `limit` carts (id `order`) created within `[start, end]`, both ends inclusive.
  async fn find_created_between(
    &self,
    start: NaiveDateTime,
    end: NaiveDateTime,
    order: SortOrder,
    limit: i64,
  ) -> ShopResult<Vec<Cart>>;

  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Cart>>;

  async fn find_by_user_id(&self, user_id: i64) -> ShopResult<Vec<Cart>>;

  /// Stores the cart and its items together.
  async fn insert(&self, user_id: i64, items: Vec<CartItem>) -> ShopResult<Cart>;

  /// Sets the user id and swaps the whole item collection. `None` when the id does not exist.
  async fn replace(&self, id: i64, user_id: i64, items: Vec<CartItem>) -> ShopResult<Option<Cart>>;

  /// Removes the cart and every item it owns. `false` when the id does not exist.
  async fn delete(&self, id: i64) -> ShopResult<bool>;
}

/// Server-side timestamp used for created/updated columns, truncated to the
/// microsecond precision of a Postgres `TIMESTAMP`.
pub(crate) fn now() -> NaiveDateTime {
  Utc::now().naive_utc().trunc_subsecs(6)
}
