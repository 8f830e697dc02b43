// core/src/services/product_service.rs

//! Catalog operations. Missing ids surface as `ShopError::ProductNotFound`.

use crate::error::{ShopError, ShopResult};
use crate::models::{Product, ProductFields};
use crate::repository::ProductRepository;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct ProductService {
  repository: Arc<dyn ProductRepository>,
}

impl ProductService {
  pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
    Self { repository }
  }

  /// All products, or only those whose category equals `category` exactly.
  #[instrument(name = "product_service::list", skip(self), err(Display))]
  pub async fn list(&self, category: Option<&str>) -> ShopResult<Vec<Product>> {
    let products = match category {
      Some(category) => self.repository.find_by_category(category).await?,
      None => self.repository.find_all().await?,
    };
    info!("Fetched {} products.", products.len());
    Ok(products)
  }

  #[instrument(name = "product_service::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: i64) -> ShopResult<Product> {
    self.repository.find_by_id(id).await?.ok_or_else(|| {
      warn!("Product with ID {} not found.", id);
      ShopError::product_not_found(id)
    })
  }

  #[instrument(name = "product_service::list_categories", skip(self), err(Display))]
  pub async fn list_categories(&self) -> ShopResult<Vec<String>> {
    self.repository.find_distinct_categories().await
  }

  /// Title containment (case-insensitive) and/or a strict price floor. With neither
  /// filter this is the full catalog.
  #[instrument(name = "product_service::search", skip(self), err(Display))]
  pub async fn search(&self, title: Option<&str>, min_price: Option<f64>) -> ShopResult<Vec<Product>> {
    let title = title.map(str::trim).filter(|t| !t.is_empty());
    let products = match (title, min_price) {
      (Some(title), Some(floor)) => {
        let mut products = self.repository.find_by_title_containing(title).await?;
        products.retain(|p| p.price > floor);
        products
      }
      (Some(title), None) => self.repository.find_by_title_containing(title).await?,
      (None, Some(floor)) => self.repository.find_priced_above(floor).await?,
      (None, None) => self.repository.find_all().await?,
    };
    info!("Search matched {} products.", products.len());
    Ok(products)
  }

  /// Persists the whole batch atomically; ids and timestamps are assigned by the store.
  #[instrument(name = "product_service::create_many", skip(self, products), fields(count = products.len()), err(Display))]
  pub async fn create_many(&self, products: Vec<ProductFields>) -> ShopResult<Vec<Product>> {
    if products.is_empty() {
      return Ok(Vec::new());
    }
    let created = self.repository.insert_all(products).await?;
    info!("Created {} products.", created.len());
    Ok(created)
  }

  /// Full replacement of title, price, description, image and category.
  #[instrument(name = "product_service::update", skip(self, fields), err(Display))]
  pub async fn update(&self, id: i64, fields: ProductFields) -> ShopResult<Product> {
    match self.repository.update(id, fields).await? {
      Some(product) => {
        info!("Product {} updated.", id);
        Ok(product)
      }
      None => {
        warn!("Cannot update product {}: not found.", id);
        Err(ShopError::product_not_found(id))
      }
    }
  }

  #[instrument(name = "product_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: i64) -> ShopResult<()> {
    if !self.repository.delete(id).await? {
      warn!("Cannot delete product {}: not found.", id);
      return Err(ShopError::product_not_found(id));
    }
    info!("Product {} deleted.", id);
    Ok(())
  }
}
