// core/src/repository/postgres.rs

//! PostgreSQL backend (runtime-checked sqlx queries). Schema: `server/migrations/`.

use super::{now, CartRepository, ProductRepository};
use crate::error::ShopResult;
use crate::listing::SortOrder;
use crate::models::{Cart, CartItem, Product, ProductFields};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection, PgPool};
use std::collections::HashMap;
use tracing::{debug, instrument};

const PRODUCT_COLUMNS: &str = "id, title, price, description, image, category, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgProductRepository {
  pool: PgPool,
}

impl PgProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
  #[instrument(name = "pg_products::find_all", skip(self), err(Display))]
  async fn find_all(&self) -> ShopResult<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
    Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?)
  }

  #[instrument(name = "pg_products::find_by_id", skip(self), err(Display))]
  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    Ok(sqlx::query_as::<_, Product>(&sql).bind(id).fetch_optional(&self.pool).await?)
  }

  #[instrument(name = "pg_products::find_by_category", skip(self), err(Display))]
  async fn find_by_category(&self, category: &str) -> ShopResult<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 ORDER BY id");
    Ok(sqlx::query_as::<_, Product>(&sql).bind(category).fetch_all(&self.pool).await?)
  }

  #[instrument(name = "pg_products::find_by_title_containing", skip(self), err(Display))]
  async fn find_by_title_containing(&self, fragment: &str) -> ShopResult<Vec<Product>> {
    // strpos rather than ILIKE so '%' and '_' in the fragment match literally.
    let sql = format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE strpos(lower(title), lower($1)) > 0 ORDER BY id"
    );
    Ok(sqlx::query_as::<_, Product>(&sql).bind(fragment).fetch_all(&self.pool).await?)
  }

  #[instrument(name = "pg_products::find_priced_above", skip(self), err(Display))]
  async fn find_priced_above(&self, price: f64) -> ShopResult<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE price > $1 ORDER BY id");
    Ok(sqlx::query_as::<_, Product>(&sql).bind(price).fetch_all(&self.pool).await?)
  }

  #[instrument(name = "pg_products::find_distinct_categories", skip(self), err(Display))]
  async fn find_distinct_categories(&self) -> ShopResult<Vec<String>> {
    Ok(
      sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products ORDER BY category")
        .fetch_all(&self.pool)
        .await?,
    )
  }

  #[instrument(name = "pg_products::insert_all", skip(self, products), fields(count = products.len()), err(Display))]
  async fn insert_all(&self, products: Vec<ProductFields>) -> ShopResult<Vec<Product>> {
    let sql = format!(
      "INSERT INTO products (title, price, description, image, category, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING {PRODUCT_COLUMNS}"
    );
    let timestamp = now();
    let mut tx = self.pool.begin().await?;
    let mut created = Vec::with_capacity(products.len());
    for fields in products {
      let image = fields.image_or_default();
      let product: Product = sqlx::query_as(&sql)
        .bind(fields.title)
        .bind(fields.price)
        .bind(fields.description)
        .bind(image)
        .bind(fields.category)
        .bind(timestamp)
        .fetch_one(&mut *tx)
        .await?;
      created.push(product);
    }
    tx.commit().await?;
    debug!("Inserted {} products.", created.len());
    Ok(created)
  }

  #[instrument(name = "pg_products::update", skip(self, fields), err(Display))]
  async fn update(&self, id: i64, fields: ProductFields) -> ShopResult<Option<Product>> {
    let sql = format!(
      "UPDATE products SET title = $2, price = $3, description = $4, image = $5, category = $6, updated_at = $7 \
       WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
    );
    let image = fields.image_or_default();
    Ok(
      sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .bind(fields.title)
        .bind(fields.price)
        .bind(fields.description)
        .bind(image)
        .bind(fields.category)
        .bind(now())
        .fetch_optional(&self.pool)
        .await?,
    )
  }

  #[instrument(name = "pg_products::delete", skip(self), err(Display))]
  async fn delete(&self, id: i64) -> ShopResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(&self.pool).await?;
    Ok(result.rows_affected() > 0)
  }
}

// --- Carts ---

#[derive(Debug, FromRow)]
struct CartRow {
  id: i64,
  user_id: i64,
  created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct CartItemRow {
  cart_id: i64,
  product_id: i64,
  quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PgCartRepository {
  pool: PgPool,
}

impl PgCartRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Fetches the items for `rows` in one query and assembles the carts, keeping row order.
async fn attach_items(conn: &mut PgConnection, rows: Vec<CartRow>) -> ShopResult<Vec<Cart>> {
  if rows.is_empty() {
    return Ok(Vec::new());
  }

  let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
  let item_rows: Vec<CartItemRow> =
    sqlx::query_as("SELECT cart_id, product_id, quantity FROM cart_items WHERE cart_id = ANY($1) ORDER BY id")
      .bind(ids)
      .fetch_all(&mut *conn)
      .await?;

  let mut items_by_cart: HashMap<i64, Vec<CartItem>> = HashMap::new();
  for row in item_rows {
    items_by_cart.entry(row.cart_id).or_default().push(CartItem {
      product_id: row.product_id,
      quantity: row.quantity,
    });
  }

  Ok(
    rows
      .into_iter()
      .map(|row| Cart {
        id: row.id,
        user_id: row.user_id,
        created_at: row.created_at,
        items: items_by_cart.remove(&row.id).unwrap_or_default(),
      })
      .collect(),
  )
}

async fn insert_items(conn: &mut PgConnection, cart_id: i64, items: &[CartItem]) -> ShopResult<()> {
  if items.is_empty() {
    return Ok(());
  }

  let product_ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
  let quantities: Vec<i32> = items.iter().map(|item| item.quantity).collect();
  sqlx::query(
    "INSERT INTO cart_items (cart_id, product_id, quantity) \
     SELECT $1, t.product_id, t.quantity \
     FROM UNNEST($2::BIGINT[], $3::INT[]) WITH ORDINALITY AS t(product_id, quantity, position) \
     ORDER BY t.position",
  )
  .bind(cart_id)
  .bind(product_ids)
  .bind(quantities)
  .execute(&mut *conn)
  .await?;
  Ok(())
}

#[async_trait]
impl CartRepository for PgCartRepository {
  #[instrument(name = "pg_carts::find_page", skip(self), err(Display))]
  async fn find_page(&self, order: SortOrder, limit: i64) -> ShopResult<Vec<Cart>> {
    let sql = format!("SELECT id, user_id, created_at FROM carts ORDER BY id {} LIMIT $1", order.as_sql());
    let mut conn = self.pool.acquire().await?;
    let rows: Vec<CartRow> = sqlx::query_as(&sql).bind(limit).fetch_all(&mut *conn).await?;
    attach_items(&mut conn, rows).await
  }

  #[instrument(name = "pg_carts::find_created_between", skip(self), err(Display))]
  async fn find_created_between(
    &self,
    start: NaiveDateTime,
    end: NaiveDateTime,
    order: SortOrder,
    limit: i64,
  ) -> ShopResult<Vec<Cart>> {
    let sql = format!(
      "SELECT id, user_id, created_at FROM carts WHERE created_at BETWEEN $1 AND $2 ORDER BY id {} LIMIT $3",
      order.as_sql()
    );
    let mut conn = self.pool.acquire().await?;
    let rows: Vec<CartRow> = sqlx::query_as(&sql)
      .bind(start)
      .bind(end)
      .bind(limit)
      .fetch_all(&mut *conn)
      .await?;
    attach_items(&mut conn, rows).await
  }

  #[instrument(name = "pg_carts::find_by_id", skip(self), err(Display))]
  async fn find_by_id(&self, id: i64) -> ShopResult<Option<Cart>> {
    let mut conn = self.pool.acquire().await?;
    let row: Option<CartRow> = sqlx::query_as("SELECT id, user_id, created_at FROM carts WHERE id = $1")
      .bind(id)
      .fetch_optional(&mut *conn)
      .await?;
    let carts = attach_items(&mut conn, row.into_iter().collect()).await?;
    Ok(carts.into_iter().next())
  }

  #[instrument(name = "pg_carts::find_by_user_id", skip(self), err(Display))]
  async fn find_by_user_id(&self, user_id: i64) -> ShopResult<Vec<Cart>> {
    let mut conn = self.pool.acquire().await?;
    let rows: Vec<CartRow> = sqlx::query_as("SELECT id, user_id, created_at FROM carts WHERE user_id = $1 ORDER BY id")
      .bind(user_id)
      .fetch_all(&mut *conn)
      .await?;
    attach_items(&mut conn, rows).await
  }

  #[instrument(name = "pg_carts::insert", skip(self, items), fields(item_count = items.len()), err(Display))]
  async fn insert(&self, user_id: i64, items: Vec<CartItem>) -> ShopResult<Cart> {
    let mut tx = self.pool.begin().await?;
    let row: CartRow =
      sqlx::query_as("INSERT INTO carts (user_id, created_at) VALUES ($1, $2) RETURNING id, user_id, created_at")
        .bind(user_id)
        .bind(now())
        .fetch_one(&mut *tx)
        .await?;
    insert_items(&mut tx, row.id, &items).await?;
    tx.commit().await?;

    Ok(Cart {
      id: row.id,
      user_id: row.user_id,
      created_at: row.created_at,
      items,
    })
  }

  #[instrument(name = "pg_carts::replace", skip(self, items), fields(item_count = items.len()), err(Display))]
  async fn replace(&self, id: i64, user_id: i64, items: Vec<CartItem>) -> ShopResult<Option<Cart>> {
    let mut tx = self.pool.begin().await?;
    let row: Option<CartRow> =
      sqlx::query_as("UPDATE carts SET user_id = $2 WHERE id = $1 RETURNING id, user_id, created_at")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(row) = row else {
      // Dropping the transaction rolls it back.
      return Ok(None);
    };

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1").bind(id).execute(&mut *tx).await?;
    insert_items(&mut tx, id, &items).await?;
    tx.commit().await?;

    Ok(Some(Cart {
      id: row.id,
      user_id: row.user_id,
      created_at: row.created_at,
      items,
    }))
  }

  #[instrument(name = "pg_carts::delete", skip(self), err(Display))]
  async fn delete(&self, id: i64) -> ShopResult<bool> {
    let mut tx = self.pool.begin().await?;
    // Items first; the FK cascade is not relied upon.
    let items = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1").bind(id).execute(&mut *tx).await?;
    let carts = sqlx::query("DELETE FROM carts WHERE id = $1").bind(id).execute(&mut *tx).await?;
    if carts.rows_affected() == 0 {
      return Ok(false);
    }
    tx.commit().await?;
    debug!("Deleted cart {} with {} items.", id, items.rows_affected());
    Ok(true)
  }
}
