use std::collections::BTreeMap;

use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{CreateStock, Stock, UpdateStock};

pub async fn fetch_all(api: &ApiClient, auth: &TokenCell) -> Result<Vec<Stock>, AppError> {
    api.get("/stocks", auth).await
}

pub async fn fetch_by_id(api: &ApiClient, auth: &TokenCell, id: i64) -> Result<Stock, AppError> {
    api.get(&format!("/stocks/{}", id), auth).await
}

pub async fn fetch_by_ticker(
    api: &ApiClient,
    auth: &TokenCell,
    ticker: &str,
) -> Result<Stock, AppError> {
    api.get(&format!("/stocks/ticker/{}", ticker), auth).await
}

pub async fn search(
    api: &ApiClient,
    auth: &TokenCell,
    query: &str,
) -> Result<Vec<Stock>, AppError> {
    api.get_query("/stocks/search", &[("query", query.to_string())], auth)
        .await
}

pub async fn top(api: &ApiClient, auth: &TokenCell, limit: u32) -> Result<Vec<Stock>, AppError> {
    api.get_query("/stocks/top", &[("limit", limit.to_string())], auth)
        .await
}

pub async fn average_price_by_sector(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<BTreeMap<String, f64>, AppError> {
    api.get("/stocks/sectors/average-price", auth).await
}

pub async fn create(
    api: &ApiClient,
    auth: &TokenCell,
    stock: &CreateStock,
) -> Result<Stock, AppError> {
    api.post("/stocks", stock, auth).await
}

pub async fn update(
    api: &ApiClient,
    auth: &TokenCell,
    id: i64,
    stock: &UpdateStock,
) -> Result<Stock, AppError> {
    api.put(&format!("/stocks/{}", id), stock, auth).await
}

pub async fn update_price(
    api: &ApiClient,
    auth: &TokenCell,
    id: i64,
    price: f64,
) -> Result<(), AppError> {
    api.patch(
        &format!("/stocks/{}/price", id),
        &[("price", price.to_string())],
        auth,
    )
    .await
}

pub async fn update_price_by_ticker(
    api: &ApiClient,
    auth: &TokenCell,
    ticker: &str,
    price: f64,
) -> Result<(), AppError> {
    api.patch(
        &format!("/stocks/ticker/{}/price", ticker),
        &[("price", price.to_string())],
        auth,
    )
    .await
}

pub async fn delete(api: &ApiClient, auth: &TokenCell, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/stocks/{}", id), auth).await
}

/// Asks the backend to re-fetch the ticker's price from its market-data
/// provider.
pub async fn refresh_price(
    api: &ApiClient,
    auth: &TokenCell,
    ticker: &str,
) -> Result<Stock, AppError> {
    api.put_empty(&format!("/stocks/ticker/{}/refresh", ticker), auth)
        .await
}

pub async fn refresh_all(api: &ApiClient, auth: &TokenCell) -> Result<String, AppError> {
    api.put_text("/stocks/refresh-all", auth).await
}

/// Imports a stock the backend doesn't know yet from its market-data
/// provider.
pub async fn lookup(api: &ApiClient, auth: &TokenCell, ticker: &str) -> Result<Stock, AppError> {
    api.post_empty(&format!("/stocks/lookup/{}", ticker), auth)
        .await
}

pub async fn clear_cache(api: &ApiClient, auth: &TokenCell) -> Result<(), AppError> {
    api.post_empty("/stocks/cache/clear", auth).await
}
