// core/src/repository/memory.rs

//! In-process store with the same contract as the PostgreSQL backend.
//! Clones share the same tables, so a clone kept by a test observes what a service wrote.

use super::{now, CartRepository, ProductRepository};
use crate::error::ShopResult;
use crate::listing::SortOrder;
use crate::models::{Cart, CartItem, Product, ProductFields};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug)]
struct Table<T> {
  last_id: i64,
  rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
  fn default() -> Self {
    Self {
      last_id: 0,
      rows: BTreeMap::new(),
    }
  }
}

impl<T> Table<T> {
  fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProductRepository {
  table: Arc<RwLock<Table<Product>>>,
}

impl MemoryProductRepository {
  pub fn new() -> Self {
    Self::default()
  }

  fn select(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
    self.table.read().rows.values().filter(|p| predicate(p)).cloned().collect()
  }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
  async fn find_all(&self) -> ShopResult<Vec<Product>> {
    Ok(self.select(|_| true))
  }

  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Product>> {
    Ok(self.table.read().rows.get(&id).cloned())
  }

  async fn find_by_category(&self, category: &str) -> ShopResult<Vec<Product>> {
    Ok(self.select(|p| p.category == category))
  }

  async fn find_by_title_containing(&self, fragment: &str) -> ShopResult<Vec<Product>> {
    let needle = fragment.to_lowercase();
    Ok(self.select(|p| p.title.to_lowercase().contains(&needle)))
  }

  async fn find_priced_above(&self, price: f64) -> ShopResult<Vec<Product>> {
    Ok(self.select(|p| p.price > price))
  }

  async fn find_distinct_categories(&self) -> ShopResult<Vec<String>> {
    let categories: BTreeSet<String> = self.table.read().rows.values().map(|p| p.category.clone()).collect();
    Ok(categories.into_iter().collect())
  }

  async fn insert_all(&self, products: Vec<ProductFields>) -> ShopResult<Vec<Product>> {
    let timestamp = now();
    let mut table = self.table.write();
    let mut created = Vec::with_capacity(products.len());
    for fields in products {
      let id = table.next_id();
      let product = fields.into_product(id, timestamp);
      table.rows.insert(id, product.clone());
      created.push(product);
    }
    Ok(created)
  }

  async fn update(&self, id: i64, fields: ProductFields) -> ShopResult<Option<Product>> {
    let mut table = self.table.write();
    Ok(table.rows.get_mut(&id).map(|product| {
      fields.apply_to(product, now());
      product.clone()
    }))
  }

  async fn delete(&self, id: i64) -> ShopResult<bool> {
    Ok(self.table.write().rows.remove(&id).is_some())
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCartRepository {
  table: Arc<RwLock<Table<Cart>>>,
}

impl MemoryCartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts a cart with an explicit creation time (fixtures, imports).
  pub fn insert_at(&self, user_id: i64, items: Vec<CartItem>, created_at: NaiveDateTime) -> Cart {
    let mut table = self.table.write();
    let id = table.next_id();
    let cart = Cart {
      id,
      user_id,
      created_at,
      items,
    };
    table.rows.insert(id, cart.clone());
    cart
  }

  /// Total number of cart items across all carts.
  pub fn item_count(&self) -> usize {
    self.table.read().rows.values().map(|cart| cart.items.len()).sum()
  }

  fn page(&self, order: SortOrder, limit: i64, predicate: impl Fn(&Cart) -> bool) -> Vec<Cart> {
    let table = self.table.read();
    let limit = usize::try_from(limit).unwrap_or(0);
    let matching = table.rows.values().filter(|cart| predicate(cart));
    match order {
      SortOrder::Asc => matching.take(limit).cloned().collect(),
      SortOrder::Desc => matching.rev().take(limit).cloned().collect(),
    }
  }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
  async fn find_page(&self, order: SortOrder, limit: i64) -> ShopResult<Vec<Cart>> {
    Ok(self.page(order, limit, |_| true))
  }

  async fn find_created_between(
    &self,
    start: NaiveDateTime,
    end: NaiveDateTime,
    order: SortOrder,
    limit: i64,
  ) -> ShopResult<Vec<Cart>> {
    Ok(self.page(order, limit, |cart| cart.created_at >= start && cart.created_at <= end))
  }

  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Cart>> {
    Ok(self.table.read().rows.get(&id).cloned())
  }

  async fn find_by_user_id(&self, user_id: i64) -> ShopResult<Vec<Cart>> {
    Ok(self.table.read().rows.values().filter(|cart| cart.user_id == user_id).cloned().collect())
  }

  async fn insert(&self, user_id: i64, items: Vec<CartItem>) -> ShopResult<Cart> {
    Ok(self.insert_at(user_id, items, now()))
  }

  async fn replace(&self, id: i64, user_id: i64, items: Vec<CartItem>) -> ShopResult<Option<Cart>> {
    let mut table = self.table.write();
    Ok(table.rows.get_mut(&id).map(|cart| {
      cart.user_id = user_id;
      cart.items = items;
      cart.clone()
    }))
  }

  async fn delete(&self, id: i64) -> ShopResult<bool> {
    Ok(self.table.write().rows.remove(&id).is_some())
  }
}
