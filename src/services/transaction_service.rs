use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{MonthlyActivity, Transaction};

pub async fn fetch_all(api: &ApiClient, auth: &TokenCell) -> Result<Vec<Transaction>, AppError> {
    api.get("/transactions", auth).await
}

pub async fn fetch_page(
    api: &ApiClient,
    auth: &TokenCell,
    page: u32,
    size: u32,
) -> Result<Vec<Transaction>, AppError> {
    api.get_query(
        "/transactions/paged",
        &[("page", page.to_string()), ("size", size.to_string())],
        auth,
    )
    .await
}

pub async fn fetch_for_stock(
    api: &ApiClient,
    auth: &TokenCell,
    stock_id: i64,
) -> Result<Vec<Transaction>, AppError> {
    api.get(&format!("/transactions/stock/{}", stock_id), auth)
        .await
}

/// Dates are inclusive, formatted YYYY-MM-DD.
pub async fn fetch_date_range(
    api: &ApiClient,
    auth: &TokenCell,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Transaction>, AppError> {
    api.get_query(
        "/transactions/date-range",
        &[
            ("startDate", start_date.to_string()),
            ("endDate", end_date.to_string()),
        ],
        auth,
    )
    .await
}

pub async fn monthly_summary(
    api: &ApiClient,
    auth: &TokenCell,
) -> Result<Vec<MonthlyActivity>, AppError> {
    api.get("/transactions/monthly-summary", auth).await
}

pub async fn buy(
    api: &ApiClient,
    auth: &TokenCell,
    transaction: &Transaction,
) -> Result<Transaction, AppError> {
    api.post("/transactions/buy", transaction, auth).await
}

pub async fn sell(
    api: &ApiClient,
    auth: &TokenCell,
    transaction: &Transaction,
) -> Result<Transaction, AppError> {
    api.post("/transactions/sell", transaction, auth).await
}
