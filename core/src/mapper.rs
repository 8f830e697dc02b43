// core/src/mapper.rs

//! Conversions between persisted entities and the DTOs that cross the HTTP boundary.
//! All conversions are pure; none of them touch the store.

use crate::dto::{CartDto, CartItemDto, ProductDto};
use crate::error::ShopError;
use crate::models::{Cart, CartItem, NewCart, Product, ProductFields};

impl From<&Product> for ProductDto {
  fn from(product: &Product) -> Self {
    ProductDto {
      id: Some(product.id),
      title: Some(product.title.clone()),
      price: Some(product.price),
      description: product.description.clone(),
      image: Some(product.image.clone()),
      category: Some(product.category.clone()),
    }
  }
}

/// Fails with `InvalidArgument` when a required field is absent. DTOs that went
/// through validation never hit that path.
impl TryFrom<ProductDto> for ProductFields {
  type Error = ShopError;

  fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
    Ok(ProductFields {
      title: required(dto.title, "title")?,
      price: required(dto.price, "price")?,
      description: dto.description,
      image: dto.image,
      category: required(dto.category, "category")?,
    })
  }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ShopError> {
  value.ok_or_else(|| ShopError::InvalidArgument(format!("{} is required", field)))
}

impl From<&CartItem> for CartItemDto {
  fn from(item: &CartItem) -> Self {
    CartItemDto {
      product_id: item.product_id,
      quantity: item.quantity,
    }
  }
}

impl From<&Cart> for CartDto {
  fn from(cart: &Cart) -> Self {
    CartDto {
      id: Some(cart.id),
      user_id: Some(cart.user_id),
      created_at: Some(cart.created_at),
      products: cart.items.iter().map(CartItemDto::from).collect(),
    }
  }
}

// id and createdAt in the body are ignored: both are server-assigned.
impl From<CartDto> for NewCart {
  fn from(dto: CartDto) -> Self {
    NewCart {
      user_id: dto.user_id,
      items: dto
        .products
        .into_iter()
        .map(|item| CartItem {
          product_id: item.product_id,
          quantity: item.quantity,
        })
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0).unwrap()
  }

  #[test]
  fn product_dto_carries_id_but_no_timestamps() {
    let product = Product {
      id: 42,
      title: "Shirt".to_string(),
      price: 19.99,
      description: None,
      image: "shirt.png".to_string(),
      category: "apparel".to_string(),
      created_at: timestamp(),
      updated_at: timestamp(),
    };
    let dto = ProductDto::from(&product);
    assert_eq!(dto.id, Some(42));
    assert_eq!(dto.image.as_deref(), Some("shirt.png"));

    let json = serde_json::to_value(&dto).unwrap();
    assert!(json.get("createdAt").is_none());
    assert!(json.get("updatedAt").is_none());
  }

  #[test]
  fn product_fields_require_title_price_and_category() {
    let dto = ProductDto {
      title: Some("Mug".to_string()),
      price: None,
      category: Some("kitchen".to_string()),
      ..ProductDto::default()
    };
    match ProductFields::try_from(dto) {
      Err(ShopError::InvalidArgument(msg)) => assert!(msg.contains("price")),
      other => panic!("Expected InvalidArgument, got {:?}", other),
    }
  }

  #[test]
  fn cart_round_trips_items_in_order() {
    let cart = Cart {
      id: 5,
      user_id: 9,
      created_at: timestamp(),
      items: vec![
        CartItem { product_id: 3, quantity: 1 },
        CartItem { product_id: 1, quantity: 4 },
      ],
    };
    let dto = CartDto::from(&cart);
    assert_eq!(dto.id, Some(5));
    assert_eq!(dto.created_at, Some(timestamp()));

    let new_cart = NewCart::from(dto);
    assert_eq!(new_cart.user_id, Some(9));
    assert_eq!(new_cart.items, cart.items);
  }
}
