use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{
    MonthlyActivity, PortfolioPerformance, PortfolioSummary, Position, SectorAllocation,
};

pub async fn summary(api: &ApiClient, auth: &TokenCell) -> Result<PortfolioSummary, AppError> {
    api.get("/portfolio/summary", auth).await
}

pub async fn performance(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<PortfolioPerformance, AppError> {
    api.get("/portfolio/performance", auth).await
}

pub async fn top_holdings(
    api: &ApiClient,
    auth: &TokenCell,
    limit: u32,
) -> Result<Vec<Position>, AppError> {
    api.get_query(
        "/portfolio/top-holdings",
        &[("limit", limit.to_string())],
        auth,
    )
    .await
}

pub async fn monthly_summary(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<Vec<MonthlyActivity>, AppError> {
    api.get("/portfolio/monthly-summary", auth).await
}

pub async fn sector_allocation(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<SectorAllocation, AppError> {
    api.get("/portfolio/allocation", auth).await
}
