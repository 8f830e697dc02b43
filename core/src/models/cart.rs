// core/src/models/cart.rs

use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
  pub id: i64,
  pub user_id: i64,
  pub created_at: NaiveDateTime,
  // Owned by the cart; removed together with it.
  pub items: Vec<CartItem>,
}

/// A line in a cart. `product_id` is not checked against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartItem {
  pub product_id: i64,
  pub quantity: i32,
}

/// Cart contents as submitted by a client, before the user id has been checked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCart {
  pub user_id: Option<i64>,
  pub items: Vec<CartItem>,
}
