use std::collections::BTreeMap;

use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{Position, SectorAllocation};

pub async fn fetch_all(api: &ApiClient, auth: &TokenCell) -> Result<Vec<Position>, AppError> {
    api.get("/positions", auth).await
}

pub async fn fetch_by_id(
    api: &ApiClient,
    auth: &TokenCell,
    id: i64,
) -> Result<Position, AppError> {
    api.get(&format!("/positions/{}", id), auth).await
}

/// Portfolio valuation keyed by metric name (totalValue, totalCost, ...).
pub async fn portfolio_value(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<BTreeMap<String, f64>, AppError> {
    api.get("/positions/value", auth).await
}

pub async fn largest(
    api: &ApiClient,
    auth: &TokenCell,
    limit: u32,
) -> Result<Vec<Position>, AppError> {
    api.get_query("/positions/largest", &[("limit", limit.to_string())], auth)
        .await
}

pub async fn with_gains(
    api: &ApiClient,
    auth: &TokenCell,
    gain_percentage: f64,
) -> Result<Vec<Position>, AppError> {
    api.get_query(
        "/positions/gains",
        &[("gainPercentage", gain_percentage.to_string())],
        auth,
    )
    .await
}

pub async fn sector_allocation(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<SectorAllocation, AppError> {
    api.get("/positions/sector-allocation", auth).await
}
