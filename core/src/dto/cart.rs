// core/src/dto/cart.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `userId` is deliberately left unvalidated here: the cart service owns that rule
/// and reports it as `ShopError::InvalidUserId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
  pub id: Option<i64>,
  pub user_id: Option<i64>,
  // ISO-8601 local date-time, e.g. 2024-01-01T00:00:00
  pub created_at: Option<NaiveDateTime>,
  #[serde(default)]
  #[validate(nested)]
  pub products: Vec<CartItemDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
  #[serde(default)]
  #[validate(range(min = 1, message = "productId must be a positive id"))]
  pub product_id: i64,

  #[serde(default)]
  #[validate(range(min = 1, message = "quantity must be at least 1"))]
  pub quantity: i32,
}
