// core/src/dto/product.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product as seen by clients. Timestamps are server-managed and never sent.
///
/// Required fields are `Option` so that a missing field is reported by validation
/// alongside the other field errors instead of failing JSON decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
  pub id: Option<i64>,

  #[validate(
    required(message = "title is required"),
    length(min = 1, max = 100, message = "title must be between 1 and 100 characters")
  )]
  pub title: Option<String>,

  #[validate(
    required(message = "price is required"),
    range(exclusive_min = 0.0, message = "price must be positive")
  )]
  pub price: Option<f64>,

  #[validate(length(max = 500, message = "description must be at most 500 characters"))]
  pub description: Option<String>,

  pub image: Option<String>,

  #[validate(
    required(message = "Category cannot be null"),
    length(min = 3, max = 50, message = "Category name should be between 3 and 50 characters")
  )]
  pub category: Option<String>,
}

/// Body of a bulk create: a bare JSON array of products, each validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct ProductBatch {
  #[validate(nested)]
  pub products: Vec<ProductDto>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn shirt() -> ProductDto {
    ProductDto {
      id: None,
      title: Some("Shirt".to_string()),
      price: Some(19.99),
      description: None,
      image: None,
      category: Some("apparel".to_string()),
    }
  }

  #[test]
  fn accepts_minimal_valid_product() {
    assert!(shirt().validate().is_ok());
  }

  #[test]
  fn rejects_two_letter_category() {
    let dto = ProductDto { category: Some("ab".to_string()), ..shirt() };
    let errors = dto.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("category"));
  }

  #[test]
  fn rejects_missing_title_and_non_positive_price() {
    let dto = ProductDto { title: None, price: Some(0.0), ..shirt() };
    let errors = dto.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("title"));
    assert!(fields.contains_key("price"));
  }

  #[test]
  fn rejects_overlong_description() {
    let dto = ProductDto { description: Some("x".repeat(501)), ..shirt() };
    assert!(dto.validate().is_err());
  }

  #[test]
  fn batch_reports_invalid_element() {
    let batch = ProductBatch {
      products: vec![shirt(), ProductDto { category: Some("ab".to_string()), ..shirt() }],
    };
    assert!(batch.validate().is_err());
    assert!(ProductBatch { products: vec![shirt()] }.validate().is_ok());
  }

  #[test]
  fn batch_decodes_from_bare_array() {
    let batch: ProductBatch =
      serde_json::from_str(r#"[{"title":"Shirt","price":19.99,"category":"apparel"}]"#).unwrap();
    assert_eq!(batch.products.len(), 1);
    assert_eq!(batch.products[0].title.as_deref(), Some("Shirt"));
  }
}
