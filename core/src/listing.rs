// core/src/listing.rs

//! Sort and limit helpers applied to lists already fetched from the store.

use crate::models::Product;
use std::cmp::Ordering;

/// Direction requested through a `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  /// Case-insensitive `asc` / `desc`. Anything else (or nothing) yields `None`.
  pub fn parse(raw: Option<&str>) -> Option<Self> {
    let raw = raw?.trim();
    if raw.eq_ignore_ascii_case("asc") {
      Some(SortOrder::Asc)
    } else if raw.eq_ignore_ascii_case("desc") {
      Some(SortOrder::Desc)
    } else {
      None
    }
  }

  pub fn as_sql(self) -> &'static str {
    match self {
      SortOrder::Asc => "ASC",
      SortOrder::Desc => "DESC",
    }
  }
}

/// Secondary product ordering requested through `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
  Price,
  Title,
}

impl ProductSortKey {
  pub fn parse(raw: Option<&str>) -> Option<Self> {
    let raw = raw?.trim();
    if raw.eq_ignore_ascii_case("price") {
      Some(ProductSortKey::Price)
    } else if raw.eq_ignore_ascii_case("title") {
      Some(ProductSortKey::Title)
    } else {
      None
    }
  }
}

/// Orders by id following `order`, then (if `key` is set) stable-sorts by that key
/// in the same direction. A key without an explicit `desc` sorts ascending.
pub fn sort_products(products: &mut [Product], order: Option<SortOrder>, key: Option<ProductSortKey>) {
  match order {
    Some(SortOrder::Asc) => products.sort_by(|a, b| a.id.cmp(&b.id)),
    Some(SortOrder::Desc) => products.sort_by(|a, b| b.id.cmp(&a.id)),
    None => {}
  }

  if let Some(key) = key {
    let descending = order == Some(SortOrder::Desc);
    products.sort_by(|a, b| {
      let ordering = compare_by(key, a, b);
      if descending {
        ordering.reverse()
      } else {
        ordering
      }
    });
  }
}

fn compare_by(key: ProductSortKey, a: &Product, b: &Product) -> Ordering {
  match key {
    ProductSortKey::Price => a.price.total_cmp(&b.price),
    ProductSortKey::Title => a.title.cmp(&b.title),
  }
}

/// Keeps the first `limit` entries when `limit` is positive; otherwise returns the list untouched.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<i64>) -> Vec<T> {
  if let Some(limit) = limit.filter(|l| *l > 0) {
    items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
  }
  items
}
