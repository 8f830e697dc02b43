// core/src/models/product.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Image stored for products created or updated without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "default-image.png";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub title: String,
  pub price: f64,
  pub description: Option<String>,
  pub image: String,
  pub category: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

/// The client-controlled part of a product: everything except id and timestamps.
/// Used both for inserts and for full-replacement updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
  pub title: String,
  pub price: f64,
  pub description: Option<String>,
  pub image: Option<String>,
  pub category: String,
}

impl ProductFields {
  pub fn image_or_default(&self) -> String {
    match self.image.as_deref() {
      Some(image) if !image.trim().is_empty() => image.to_string(),
      _ => DEFAULT_PRODUCT_IMAGE.to_string(),
    }
  }

  /// Builds the stored row for a freshly assigned id.
  pub(crate) fn into_product(self, id: i64, now: NaiveDateTime) -> Product {
    let image = self.image_or_default();
    Product {
      id,
      title: self.title,
      price: self.price,
      description: self.description,
      image,
      category: self.category,
      created_at: now,
      updated_at: now,
    }
  }

  /// Overwrites every client-controlled column of `product`. `id` and `created_at` stay put.
  pub(crate) fn apply_to(self, product: &mut Product, now: NaiveDateTime) {
    product.image = self.image_or_default();
    product.title = self.title;
    product.price = self.price;
    product.description = self.description;
    product.category = self.category;
    product.updated_at = now;
  }
}
