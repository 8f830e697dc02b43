// realshop/server/src/web/extract.rs

//! Request extractors and the error handlers that route extractor failures through `AppError`.

use actix_web::dev::Payload;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

use crate::errors::AppError;

/// A JSON body that has been decoded *and* passed its `validator` constraints.
/// Constraint violations become `AppError::Validation` (400 with per-field detail).
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> FromRequest for ValidatedJson<T>
where
  T: DeserializeOwned + Validate + 'static,
{
  type Error = actix_web::Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    let json = web::Json::<T>::from_request(req, payload);
    let path = req.path().to_string();
    Box::pin(async move {
      let value = json.await?.into_inner();
      if let Err(errors) = value.validate() {
        warn!(%path, "Request body failed validation: {}", errors);
        return Err(AppError::Validation(errors).into());
      }
      Ok(ValidatedJson(value))
    })
  }
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  warn!(path = %req.path(), "Malformed JSON body: {}", err);
  AppError::BadRequest(format!("Malformed JSON body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
  warn!(path = %req.path(), "Malformed query string: {}", err);
  AppError::BadRequest(format!("Invalid query parameter: {}", err)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
  warn!(path = %req.path(), "Malformed path parameter: {}", err);
  AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}
