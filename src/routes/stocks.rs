use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Stock;
use crate::services::{stock_service, transaction_service};
use crate::session::AuthGate;
use crate::state::AppState;
use crate::views::{self, components};

const DEFAULT_BROWSE_LIMIT: u32 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    q: Option<String>,
}

pub async fn browse(
    State(state): State<AppState>,
    auth: AuthGate,
    Query(query): Query<BrowseQuery>,
) -> Result<Html<String>, AppError> {
    let api = &state.api;
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let stocks = match search {
        Some(q) => stock_service::search(api, &auth.token, q).await?,
        None => stock_service::top(api, &auth.token, DEFAULT_BROWSE_LIMIT).await?,
    };

    let cards = if stocks.is_empty() {
        r#"<p class="empty">No stocks found.</p>"#.to_string()
    } else {
        stocks
            .iter()
            .map(components::stock_card)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<h1>Browse Stocks</h1>
<form method="get" action="/stocks" class="card" style="display: flex; gap: 0.75rem;">
  <input type="text" name="q" value="{q}" placeholder="Search stocks by ticker or company name...">
  <button type="submit">Search</button>
</form>
{cards}"#,
        q = views::escape(search.unwrap_or("")),
        cards = cards,
    );

    Ok(Html(views::layout("Stocks", Some(&auth.user_id), &body)))
}

pub async fn detail(
    State(state): State<AppState>,
    auth: AuthGate,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::Validation("Stock ID is required".to_string()))?;

    let api = &state.api;
    // A backend miss on either call reads as "no such stock" here; an
    // invalid token still has to bounce to login instead.
    let stock = stock_service::fetch_by_id(api, &auth.token, id)
        .await
        .map_err(not_found_unless_auth)?;
    let transactions = transaction_service::fetch_for_stock(api, &auth.token, id)
        .await
        .map_err(not_found_unless_auth)?;

    Ok(Html(render_detail(&auth.user_id, &stock, &transactions)))
}

fn not_found_unless_auth(e: AppError) -> AppError {
    match e {
        AppError::Unauthorized => AppError::Unauthorized,
        _ => AppError::NotFound,
    }
}

fn render_detail(
    user: &str,
    stock: &Stock,
    transactions: &[crate::models::Transaction],
) -> String {
    let price = stock
        .current_price
        .map(views::fmt_money)
        .unwrap_or_else(|| "—".to_string());
    let body = format!(
        r#"<div class="bar-label">
  <div><h1>{ticker}</h1><p class="muted">{name}</p></div>
  <span class="actions">
    <a class="btn" href="/transactions/buy?ticker={ticker_attr}">Buy Stock</a>
    <a class="btn danger" href="/transactions/sell?ticker={ticker_attr}">Sell Stock</a>
  </span>
</div>
<div class="card">
  <h2>Stock Information</h2>
  <div class="cards">
    <div><span class="muted">Current Price</span><div class="metric">{price}</div></div>
    <div><span class="muted">Exchange</span><div>{exchange}</div></div>
    <div><span class="muted">Sector</span><div>{sector}</div></div>
    <div><span class="muted">Industry</span><div>{industry}</div></div>
    <div><span class="muted">Currency</span><div>{currency}</div></div>
    <div><span class="muted">Last Updated</span><div>{updated}</div></div>
  </div>
</div>
<div class="card">
  <h2>Your Transactions</h2>
  {transactions}
</div>"#,
        ticker = views::escape(&stock.ticker),
        ticker_attr = views::escape(&stock.ticker),
        name = views::escape(&stock.name),
        price = price,
        exchange = views::escape(&stock.exchange),
        sector = views::escape(stock.sector.as_deref().unwrap_or("—")),
        industry = views::escape(stock.industry.as_deref().unwrap_or("—")),
        currency = views::escape(&stock.currency),
        updated = views::escape(stock.last_updated.as_deref().unwrap_or("—")),
        transactions = components::transactions_table(transactions),
    );
    views::layout(&stock.ticker, Some(user), &body)
}
