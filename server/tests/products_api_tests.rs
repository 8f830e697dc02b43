// tests/products_api_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use common::*;
use serde_json::{json, Value};

fn seed_request() -> TestRequest {
  TestRequest::post()
    .uri("/products")
    .set_json(json!([
      {"title": "Shirt", "price": 19.99, "category": "apparel"},
      {"title": "Boots", "price": 89.0, "category": "footwear", "description": "Waterproof"},
      {"title": "Apron", "price": 8.5, "category": "kitchen", "image": "apron.png"},
      {"title": "Mug", "price": 8.5, "category": "kitchen"}
    ]))
}

fn titles(body: &[Value]) -> Vec<&str> {
  body.iter().map(|p| p["title"].as_str().unwrap()).collect()
}

#[actix_rt::test]
async fn test_create_products_returns_generated_ids() {
  let app = test_app!(memory_state());
  let created: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  assert_eq!(created.len(), 4);
  assert!(created.iter().all(|p| p["id"].as_i64().is_some()));
  assert_eq!(created[0]["title"], "Shirt");
  assert_eq!(created[0]["image"], "default-image.png");
  assert_eq!(created[2]["image"], "apron.png");
  assert!(created[0].get("createdAt").is_none());
}

#[actix_rt::test]
async fn test_create_with_two_letter_category_is_rejected_with_field_detail() {
  let app = test_app!(memory_state());
  let request = TestRequest::post()
    .uri("/products")
    .set_json(json!([
      {"title": "Shirt", "price": 19.99, "category": "apparel"},
      {"title": "Hat", "price": 9.0, "category": "ab"}
    ]))
    .to_request();
  let response = test::call_service(&app, request).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(response).await;
  assert_eq!(body["error"], "Validation failed");
  assert!(body["fields"].is_object());

  // The valid element was not persisted either.
  let list = test::call_service(&app, TestRequest::get().uri("/products").to_request()).await;
  let products: Vec<Value> = test::read_body_json(list).await;
  assert!(products.is_empty());
}

#[actix_rt::test]
async fn test_get_missing_product_is_404_with_message() {
  let app = test_app!(memory_state());
  let response = test::call_service(&app, TestRequest::get().uri("/products/99").to_request()).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(response).await;
  assert_eq!(body["error"], "Product with ID 99 not found.");
}

#[actix_rt::test]
async fn test_non_numeric_id_is_bad_request() {
  let app = test_app!(memory_state());
  let response = test::call_service(&app, TestRequest::get().uri("/products/shirt").to_request()).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_list_sorts_desc_by_price() {
  let app = test_app!(memory_state());
  let _: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  let response =
    test::call_service(&app, TestRequest::get().uri("/products?sort=desc&sortBy=price").to_request()).await;
  assert_eq!(response.status(), StatusCode::OK);
  let body: Vec<Value> = test::read_body_json(response).await;
  let prices: Vec<f64> = body.iter().map(|p| p["price"].as_f64().unwrap()).collect();
  assert!(prices.windows(2).all(|w| w[0] >= w[1]));
  // Equal prices keep descending id order.
  assert_eq!(titles(&body), vec!["Boots", "Shirt", "Mug", "Apron"]);
}

#[actix_rt::test]
async fn test_list_sorts_asc_by_title_and_limits() {
  let app = test_app!(memory_state());
  let _: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  let response = test::call_service(
    &app,
    TestRequest::get().uri("/products?sort=asc&sortBy=title&limit=3").to_request(),
  )
  .await;
  let body: Vec<Value> = test::read_body_json(response).await;
  assert_eq!(titles(&body), vec!["Apron", "Boots", "Mug"]);
}

#[actix_rt::test]
async fn test_list_filters_by_category_and_sorts_by_id() {
  let app = test_app!(memory_state());
  let _: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  let response =
    test::call_service(&app, TestRequest::get().uri("/products?category=kitchen&sort=desc").to_request()).await;
  let body: Vec<Value> = test::read_body_json(response).await;
  assert_eq!(titles(&body), vec!["Mug", "Apron"]);
}

#[actix_rt::test]
async fn test_non_numeric_limit_is_bad_request() {
  let app = test_app!(memory_state());
  let response = test::call_service(&app, TestRequest::get().uri("/products?limit=lots").to_request()).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(response).await;
  assert!(body["error"].as_str().unwrap().starts_with("Invalid query parameter"));
}

#[actix_rt::test]
async fn test_categories_and_category_route() {
  let app = test_app!(memory_state());
  let _: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  let response = test::call_service(&app, TestRequest::get().uri("/products/categories").to_request()).await;
  let categories: Vec<String> = test::read_body_json(response).await;
  assert_eq!(categories, vec!["apparel", "footwear", "kitchen"]);

  let response = test::call_service(
    &app,
    TestRequest::get().uri("/products/category/kitchen?sort=desc&limit=1").to_request(),
  )
  .await;
  let body: Vec<Value> = test::read_body_json(response).await;
  assert_eq!(titles(&body), vec!["Mug"]);
}

#[actix_rt::test]
async fn test_search_by_title_and_price() {
  let app = test_app!(memory_state());
  let _: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;

  let response =
    test::call_service(&app, TestRequest::get().uri("/products/search?title=o&minPrice=10").to_request()).await;
  let body: Vec<Value> = test::read_body_json(response).await;
  assert_eq!(titles(&body), vec!["Boots"]);
}

#[actix_rt::test]
async fn test_update_replaces_fields_and_keeps_id() {
  let app = test_app!(memory_state());
  let created: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;
  let id = created[0]["id"].as_i64().unwrap();

  let request = TestRequest::put()
    .uri(&format!("/products/{}", id))
    .set_json(json!({"id": 500, "title": "Linen Shirt", "price": 29.5, "category": "summer"}))
    .to_request();
  let response = test::call_service(&app, request).await;
  assert_eq!(response.status(), StatusCode::OK);
  let body: Value = test::read_body_json(response).await;
  assert_eq!(body["id"], id);
  assert_eq!(body["title"], "Linen Shirt");
  assert_eq!(body["category"], "summer");

  let missing = TestRequest::put()
    .uri("/products/999")
    .set_json(json!({"title": "Ghost", "price": 1.0, "category": "nowhere"}))
    .to_request();
  assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);

  let invalid = TestRequest::put()
    .uri(&format!("/products/{}", id))
    .set_json(json!({"title": "", "price": -1.0, "category": "summer"}))
    .to_request();
  let response = test::call_service(&app, invalid).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(response).await;
  assert!(body["fields"]["title"].is_array());
  assert!(body["fields"]["price"].is_array());
}

#[actix_rt::test]
async fn test_delete_then_404() {
  let app = test_app!(memory_state());
  let created: Vec<Value> = test::call_and_read_body_json(&app, seed_request().to_request()).await;
  let uri = format!("/products/{}", created[1]["id"].as_i64().unwrap());

  let response = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
  assert_eq!(response.status(), StatusCode::NO_CONTENT);

  let response = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  let response = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_malformed_json_body_is_bad_request() {
  let app = test_app!(memory_state());
  let request = TestRequest::post()
    .uri("/products")
    .insert_header(("content-type", "application/json"))
    .set_payload("{not json")
    .to_request();
  let response = test::call_service(&app, request).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(response).await;
  assert!(body["error"].as_str().unwrap().starts_with("Malformed JSON body"));
}

#[actix_rt::test]
async fn test_health_reports_storage() {
  let app = test_app!(memory_state());
  let response = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(response.status(), StatusCode::OK);
  let body: Value = test::read_body_json(response).await;
  assert_eq!(body, json!({"status": "ok", "storage": "memory"}));
}
