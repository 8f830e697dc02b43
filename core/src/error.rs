// core/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
  #[error("Product with ID {0} not found.")]
  ProductNotFound(i64),

  #[error("Cart not found with ID {0}")]
  CartNotFound(i64),

  /// A malformed or out-of-range request parameter (limit, dates, ids).
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("User ID cannot be null or less than or equal to zero.")]
  InvalidUserId,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl ShopError {
  pub fn product_not_found(id: i64) -> Self {
    ShopError::ProductNotFound(id)
  }

  pub fn cart_not_found(id: i64) -> Self {
    ShopError::CartNotFound(id)
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ShopError::ProductNotFound(_) | ShopError::CartNotFound(_))
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
