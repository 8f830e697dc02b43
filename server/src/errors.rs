// realshop/server/src/errors.rs

//! The single place where failures become HTTP responses. Every handler returns
//! `Result<_, AppError>` and every extractor failure is routed here too, so products
//! and carts report errors the same way.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use realshop::ShopError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Shop(#[from] ShopError),

  /// DTO field-constraint violations.
  #[error("Validation failed: {0}")]
  Validation(ValidationErrors),

  /// Malformed path, query string or JSON body.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<sqlx::Error> for AppError {
  fn from(err: sqlx::Error) -> Self {
    AppError::Shop(ShopError::Database(err))
  }
}

impl From<sqlx::migrate::MigrateError> for AppError {
  fn from(err: sqlx::migrate::MigrateError) -> Self {
    AppError::Internal(format!("Database migration failed: {}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Shop(ShopError::ProductNotFound(_) | ShopError::CartNotFound(_)) => StatusCode::NOT_FOUND,
      AppError::Shop(ShopError::InvalidArgument(_))
      | AppError::Shop(ShopError::InvalidUserId)
      | AppError::Validation(_)
      | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Shop(ShopError::Database(_)) | AppError::Config(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    let body = match self {
      AppError::Validation(errors) => json!({"error": "Validation failed", "fields": errors}),
      // Store details stay in the logs.
      AppError::Shop(ShopError::Database(_)) => json!({"error": "Database operation failed"}),
      AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
      AppError::Internal(m) => json!({"error": "An internal error occurred", "detail": m}),
      AppError::Shop(shop_error) => json!({"error": shop_error.to_string()}),
      AppError::BadRequest(m) => json!({"error": m}),
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
    let response = error.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_rt::test]
  async fn not_found_carries_message() {
    let (status, body) = body_json(AppError::from(ShopError::cart_not_found(7))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cart not found with ID 7");
  }

  #[actix_rt::test]
  async fn invalid_user_id_is_bad_request() {
    let (status, body) = body_json(AppError::from(ShopError::InvalidUserId)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID cannot be null or less than or equal to zero.");
  }

  #[actix_rt::test]
  async fn database_errors_hide_details() {
    let (status, body) = body_json(AppError::from(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database operation failed");
  }
}
