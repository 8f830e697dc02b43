// realshop/server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use realshop::{Cart, CartDto, CartListQuery, NewCart};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extract::ValidatedJson;

/// Raw `GET /carts` parameters. Kept as strings so that a bad `limit` or date is
/// reported by `CartListQuery::parse` with a specific message.
#[derive(Deserialize, Debug)]
pub struct ListCartsQuery {
  pub limit: Option<String>,
  pub sort: Option<String>,
  pub startdate: Option<String>,
  pub enddate: Option<String>,
}

fn to_dtos(carts: &[Cart]) -> Vec<CartDto> {
  carts.iter().map(CartDto::from).collect()
}

#[instrument(name = "handler::list_carts", skip(app_state))]
pub async fn list_carts_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListCartsQuery>,
) -> Result<HttpResponse, AppError> {
  let params = query_params.into_inner();
  let query = CartListQuery::parse(
    params.limit.as_deref(),
    params.sort.as_deref(),
    params.startdate.as_deref(),
    params.enddate.as_deref(),
  )?;

  let carts = app_state.carts.list(query).await?;
  info!("Returning {} carts.", carts.len());
  Ok(HttpResponse::Ok().json(to_dtos(&carts)))
}

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.get_by_id(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(CartDto::from(&cart)))
}

#[instrument(name = "handler::list_user_carts", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn list_user_carts_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let carts = app_state.carts.list_for_user(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(to_dtos(&carts)))
}

#[instrument(name = "handler::create_cart", skip(app_state, payload))]
pub async fn create_cart_handler(
  app_state: web::Data<AppState>,
  payload: ValidatedJson<CartDto>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.create(NewCart::from(payload.into_inner())).await?;
  Ok(HttpResponse::Ok().json(CartDto::from(&cart)))
}

#[instrument(name = "handler::update_cart", skip(app_state, path, payload), fields(cart_id = %path.as_ref()))]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: ValidatedJson<CartDto>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.update(path.into_inner(), NewCart::from(payload.into_inner())).await?;
  Ok(HttpResponse::Ok().json(CartDto::from(&cart)))
}

#[instrument(name = "handler::delete_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn delete_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.carts.delete(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
