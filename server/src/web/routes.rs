// realshop/server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;
use crate::web::extract::{json_error_handler, path_error_handler, query_error_handler};
use crate::web::handlers::{cart_handlers, product_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok", "storage": app_state.config.storage.to_string() }))
}

/// Registers every route plus the extractor configs that send decode failures through `AppError`.
/// Literal segments (`/categories`, `/search`, `/user`) are registered before `/{id}`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_products_handler))
        .route("/categories", web::get().to(product_handlers::list_categories_handler))
        .route("/search", web::get().to(product_handlers::search_products_handler))
        .route(
          "/category/{category}",
          web::get().to(product_handlers::list_products_in_category_handler),
        )
        .route("/{id}", web::get().to(product_handlers::get_product_handler))
        .route("/{id}", web::put().to(product_handlers::update_product_handler))
        .route("/{id}", web::delete().to(product_handlers::delete_product_handler)),
    )
    .service(
      web::scope("/carts")
        .route("", web::get().to(cart_handlers::list_carts_handler))
        .route("", web::post().to(cart_handlers::create_cart_handler))
        .route("/user/{user_id}", web::get().to(cart_handlers::list_user_carts_handler))
        .route("/{id}", web::get().to(cart_handlers::get_cart_handler))
        .route("/{id}", web::put().to(cart_handlers::update_cart_handler))
        .route("/{id}", web::delete().to(cart_handlers::delete_cart_handler)),
    );
}
