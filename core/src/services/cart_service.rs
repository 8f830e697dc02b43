// core/src/services/cart_service.rs

//! Cart operations and the parsing of cart-listing parameters.

use crate::error::{ShopError, ShopResult};
use crate::listing::SortOrder;
use crate::models::{Cart, NewCart};
use crate::repository::CartRepository;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Inclusive creation-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
  pub start: NaiveDateTime,
  pub end: NaiveDateTime,
}

/// Parsed `GET /carts` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartListQuery {
  pub limit: i64,
  pub order: SortOrder,
  pub window: Option<DateWindow>,
}

impl CartListQuery {
  /// `limit` is mandatory and must be a positive integer. The window only applies when
  /// both dates are present; dates are ISO-8601 local date-times (`2024-01-01T00:00:00`).
  /// `sort` orders by id, ascending unless it reads `desc`.
  pub fn parse(
    limit: Option<&str>,
    sort: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
  ) -> ShopResult<Self> {
    let raw_limit = limit
      .map(str::trim)
      .filter(|l| !l.is_empty())
      .ok_or_else(|| ShopError::InvalidArgument("limit is required".to_string()))?;
    let limit = raw_limit
      .parse::<i64>()
      .ok()
      .filter(|l| *l > 0)
      .ok_or_else(|| ShopError::InvalidArgument(format!("limit must be a positive integer, got '{}'", raw_limit)))?;

    let start = start_date.map(|raw| parse_date_time("startdate", raw)).transpose()?;
    let end = end_date.map(|raw| parse_date_time("enddate", raw)).transpose()?;
    let window = match (start, end) {
      (Some(start), Some(end)) if start > end => {
        return Err(ShopError::InvalidArgument(format!(
          "startdate {} is after enddate {}",
          start, end
        )));
      }
      (Some(start), Some(end)) => Some(DateWindow { start, end }),
      _ => None,
    };

    Ok(Self {
      limit,
      order: SortOrder::parse(sort).unwrap_or_default(),
      window,
    })
  }
}

fn parse_date_time(name: &str, raw: &str) -> ShopResult<NaiveDateTime> {
  let raw = raw.trim();
  raw
    .parse::<NaiveDateTime>()
    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
    .map_err(|e| ShopError::InvalidArgument(format!("{} '{}' is not an ISO-8601 date-time: {}", name, raw, e)))
}

/// Rejects absent or non-positive user ids before anything touches the store.
fn checked_user_id(user_id: Option<i64>) -> ShopResult<i64> {
  match user_id {
    Some(id) if id > 0 => Ok(id),
    _ => Err(ShopError::InvalidUserId),
  }
}

#[derive(Clone)]
pub struct CartService {
  repository: Arc<dyn CartRepository>,
}

impl CartService {
  pub fn new(repository: Arc<dyn CartRepository>) -> Self {
    Self { repository }
  }

  #[instrument(name = "cart_service::list", skip(self), err(Display))]
  pub async fn list(&self, query: CartListQuery) -> ShopResult<Vec<Cart>> {
    let carts = match query.window {
      Some(DateWindow { start, end }) => {
        self
          .repository
          .find_created_between(start, end, query.order, query.limit)
          .await?
      }
      None => self.repository.find_page(query.order, query.limit).await?,
    };
    info!("Fetched {} carts.", carts.len());
    Ok(carts)
  }

  #[instrument(name = "cart_service::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: i64) -> ShopResult<Cart> {
    self.repository.find_by_id(id).await?.ok_or_else(|| {
      warn!("Cart not found with ID {}.", id);
      ShopError::cart_not_found(id)
    })
  }

  #[instrument(name = "cart_service::list_for_user", skip(self), err(Display))]
  pub async fn list_for_user(&self, user_id: i64) -> ShopResult<Vec<Cart>> {
    let user_id = checked_user_id(Some(user_id))?;
    self.repository.find_by_user_id(user_id).await
  }

  #[instrument(name = "cart_service::create", skip(self, cart), fields(user_id = ?cart.user_id), err(Display))]
  pub async fn create(&self, cart: NewCart) -> ShopResult<Cart> {
    let user_id = checked_user_id(cart.user_id)?;
    let created = self.repository.insert(user_id, cart.items).await?;
    info!("Cart {} created for user {}.", created.id, user_id);
    Ok(created)
  }

  /// Replaces the user id and the entire item collection; no merging.
  #[instrument(name = "cart_service::update", skip(self, cart), fields(user_id = ?cart.user_id), err(Display))]
  pub async fn update(&self, id: i64, cart: NewCart) -> ShopResult<Cart> {
    let user_id = checked_user_id(cart.user_id)?;
    match self.repository.replace(id, user_id, cart.items).await? {
      Some(updated) => {
        info!("Cart {} updated.", id);
        Ok(updated)
      }
      None => {
        warn!("Cannot update cart {}: not found.", id);
        Err(ShopError::cart_not_found(id))
      }
    }
  }

  /// Removes the cart together with its items.
  #[instrument(name = "cart_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: i64) -> ShopResult<()> {
    if !self.repository.delete(id).await? {
      warn!("Cannot delete cart {}: not found.", id);
      return Err(ShopError::cart_not_found(id));
    }
    info!("Cart {} deleted.", id);
    Ok(())
  }
}
