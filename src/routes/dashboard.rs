use axum::extract::State;
use axum::response::Html;
use tracing::warn;

use crate::errors::AppError;
use crate::models::{PortfolioSummary, Position, SectorAllocation};
use crate::services::portfolio_service;
use crate::session::AuthGate;
use crate::state::AppState;
use crate::views::{self, components, Series};

const TOP_HOLDINGS: u32 = 5;

/// Defensive loader: the three backend calls run concurrently and each
/// failure falls back to an empty default so the page still renders.
/// A 401 is not a partial failure and still bounces to login.
pub async fn page(State(state): State<AppState>, auth: AuthGate) -> Result<Html<String>, AppError> {
    let api = &state.api;
    let (summary, holdings, allocation) = tokio::join!(
        portfolio_service::summary(api, &auth.token),
        portfolio_service::top_holdings(api, &auth.token, TOP_HOLDINGS),
        portfolio_service::sector_allocation(api, &auth.token),
    );

    let summary = fallback(summary, "summary")?;
    let holdings = fallback(holdings, "top holdings")?;
    let allocation = fallback(allocation, "sector allocation")?;

    Ok(Html(render(&auth.user_id, &summary, &holdings, &allocation)))
}

fn fallback<T: Default>(result: Result<T, AppError>, what: &str) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            warn!("dashboard: {} call failed: {}", what, e);
            Ok(T::default())
        }
    }
}

fn render(
    user: &str,
    summary: &PortfolioSummary,
    holdings: &[Position],
    allocation: &SectorAllocation,
) -> String {
    let cards = format!(
        r#"<div class="cards">
{}
{}
{}
{}
</div>"#,
        components::summary_card("Total Value", &views::fmt_money(summary.total_value), ""),
        components::summary_card("Total Positions", &summary.total_positions.to_string(), ""),
        components::summary_card(
            "Total Gain/Loss",
            &views::fmt_money(summary.total_gain),
            views::sign_class(summary.total_gain),
        ),
        components::summary_card(
            "Return %",
            &views::fmt_percent(summary.percentage_return),
            views::sign_class(summary.percentage_return),
        ),
    );

    let holdings_html = if holdings.is_empty() {
        r#"<p class="empty">No positions yet.</p>"#.to_string()
    } else {
        holdings
            .iter()
            .map(|p| components::position_card(p, true))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<div class="bar-label"><h1>Portfolio Dashboard</h1>
<span class="actions"><a class="btn" href="/transactions/buy">Buy Stock</a> <a class="btn danger" href="/transactions/sell">Sell Stock</a></span></div>
{cards}
<div class="card">
  <h2>Sector Allocation</h2>
  {allocation}
</div>
<div class="card">
  <div class="bar-label"><h2>Top Holdings</h2><a href="/portfolio/positions">View all</a></div>
  {holdings}
</div>
<div class="card">
  <h2>Quick Actions</h2>
  <div class="actions">
    <a class="btn" href="/portfolio">View Portfolio</a>
    <a class="btn" href="/stocks">Browse Stocks</a>
    <a class="btn" href="/transactions">Transaction History</a>
  </div>
</div>"#,
        cards = cards,
        allocation = Series::from_map(allocation).pie_html(),
        holdings = holdings_html,
    );

    views::layout("Dashboard", Some(user), &body)
}
