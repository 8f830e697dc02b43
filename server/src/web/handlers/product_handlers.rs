// realshop/server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use realshop::{apply_limit, sort_products, Product, ProductBatch, ProductDto, ProductFields, ProductSortKey, SortOrder};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extract::ValidatedJson;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
  pub limit: Option<i64>,
  pub sort: Option<String>,
  pub category: Option<String>,
  pub sort_by: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CategoryProductsQuery {
  pub limit: Option<i64>,
  pub sort: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsQuery {
  pub title: Option<String>,
  pub min_price: Option<f64>,
}

fn to_dtos(products: &[Product]) -> Vec<ProductDto> {
  products.iter().map(ProductDto::from).collect()
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query_params.into_inner();
  let mut products = app_state.products.list(query.category.as_deref()).await?;

  sort_products(
    &mut products,
    SortOrder::parse(query.sort.as_deref()),
    ProductSortKey::parse(query.sort_by.as_deref()),
  );
  let products = apply_limit(products, query.limit);

  info!("Returning {} products.", products.len());
  Ok(HttpResponse::Ok().json(to_dtos(&products)))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.products.get_by_id(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(ProductDto::from(&product)))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.products.list_categories().await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::list_products_in_category", skip(app_state, path), fields(category = %path.as_str()))]
pub async fn list_products_in_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query_params: web::Query<CategoryProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let category = path.into_inner();
  let query = query_params.into_inner();
  let mut products = app_state.products.list(Some(&category)).await?;

  sort_products(&mut products, SortOrder::parse(query.sort.as_deref()), None);
  let products = apply_limit(products, query.limit);

  info!("Returning {} products in category '{}'.", products.len(), category);
  Ok(HttpResponse::Ok().json(to_dtos(&products)))
}

#[instrument(name = "handler::search_products", skip(app_state))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<SearchProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query_params.into_inner();
  let products = app_state.products.search(query.title.as_deref(), query.min_price).await?;
  Ok(HttpResponse::Ok().json(to_dtos(&products)))
}

#[instrument(name = "handler::create_products", skip(app_state, payload))]
pub async fn create_products_handler(
  app_state: web::Data<AppState>,
  payload: ValidatedJson<ProductBatch>,
) -> Result<HttpResponse, AppError> {
  let fields = payload
    .into_inner()
    .products
    .into_iter()
    .map(ProductFields::try_from)
    .collect::<Result<Vec<_>, _>>()?;

  let created = app_state.products.create_many(fields).await?;
  Ok(HttpResponse::Ok().json(to_dtos(&created)))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: ValidatedJson<ProductDto>,
) -> Result<HttpResponse, AppError> {
  let fields = ProductFields::try_from(payload.into_inner())?;
  let updated = app_state.products.update(path.into_inner(), fields).await?;
  Ok(HttpResponse::Ok().json(ProductDto::from(&updated)))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.products.delete(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
