use axum::extract::State;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::{MonthlyActivity, PortfolioPerformance, Position};
use crate::services::{portfolio_service, position_service};
use crate::session::AuthGate;
use crate::state::AppState;
use crate::views::{self, components, ChartPoint, Series};

/// Portfolio overview. Unlike the dashboard, a failure in any of the
/// three calls fails the whole page load.
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthGate,
) -> Result<Html<String>, AppError> {
    let api = &state.api;
    let (performance, monthly, allocation) = tokio::try_join!(
        portfolio_service::performance(api, &auth.token),
        portfolio_service::monthly_summary(api, &auth.token),
        portfolio_service::sector_allocation(api, &auth.token),
    )?;

    let body = format!(
        r#"<div class="bar-label"><h1>Portfolio Overview</h1>
<span class="actions"><a class="btn" href="/portfolio/positions">View Positions</a> <a class="btn" href="/portfolio/performance">Performance Details</a></span></div>
<div class="cards">
  <div class="card">
    <h2>Performance Metrics</h2>
    {metrics}
  </div>
  <div class="card">
    <h2>Investment Summary</h2>
    {investment}
  </div>
</div>
<div class="card">
  <h2>Sector Allocation</h2>
  {allocation}
</div>
<div class="card">
  <h2>Monthly Activity</h2>
  {monthly}
</div>"#,
        metrics = metrics_list(&performance),
        investment = investment_list(&performance),
        allocation = Series::from_map(&allocation).pie_html(),
        monthly = monthly_chart(&monthly).bar_html(),
    );

    Ok(Html(views::layout("Portfolio", Some(&auth.user_id), &body)))
}

pub async fn performance(
    State(state): State<AppState>,
    auth: AuthGate,
) -> Result<Html<String>, AppError> {
    let api = &state.api;
    let (performance, monthly) = tokio::try_join!(
        portfolio_service::performance(api, &auth.token),
        portfolio_service::monthly_summary(api, &auth.token),
    )?;

    let body = format!(
        r#"<h1>Portfolio Performance</h1>
<div class="cards">
{value}
{cost}
{gain}
{realized}
</div>
<div class="cards">
  <div class="card"><h2>Fees</h2>{fees}</div>
  <div class="card"><h2>Monthly Volume</h2>{monthly}</div>
</div>"#,
        value = components::summary_card("Total Value", &views::fmt_money(performance.total_value), ""),
        cost = components::summary_card("Total Cost", &views::fmt_money(performance.total_cost), ""),
        gain = components::summary_card(
            "Total Gain",
            &views::fmt_money(performance.total_gain),
            views::sign_class(performance.total_gain),
        ),
        realized = components::summary_card(
            "Realized Gain",
            &views::fmt_money(performance.realized_gain),
            views::sign_class(performance.realized_gain),
        ),
        fees = fees_list(&performance),
        monthly = monthly_chart(&monthly).bar_html(),
    );

    Ok(Html(views::layout(
        "Performance",
        Some(&auth.user_id),
        &body,
    )))
}

pub async fn positions(
    State(state): State<AppState>,
    auth: AuthGate,
) -> Result<Html<String>, AppError> {
    let api = &state.api;
    let (positions, portfolio_value) = tokio::try_join!(
        position_service::fetch_all(api, &auth.token),
        position_service::portfolio_value(api, &auth.token),
    )?;

    let total = portfolio_value.get("totalValue").copied().unwrap_or(0.0);
    let body = format!(
        r#"<div class="bar-label">
  <div><h1>My Positions</h1><p class="muted">Total Portfolio Value: {total}</p></div>
  <span class="actions"><a class="btn" href="/transactions/buy">Buy Stock</a> <a class="btn danger" href="/transactions/sell">Sell Stock</a></span>
</div>
{positions}"#,
        total = views::fmt_money(total),
        positions = positions_html(&positions),
    );

    Ok(Html(views::layout("Positions", Some(&auth.user_id), &body)))
}

fn positions_html(positions: &[Position]) -> String {
    if positions.is_empty() {
        return r#"<div class="card" style="text-align: center;">
  <h2>No positions yet</h2>
  <p class="muted">Start building your portfolio by buying your first stock.</p>
  <a class="btn" href="/transactions/buy">Buy Stock</a>
</div>"#
            .to_string();
    }
    positions
        .iter()
        .map(|p| components::position_card(p, false))
        .collect::<Vec<_>>()
        .join("\n")
}

fn monthly_chart(monthly: &[MonthlyActivity]) -> Series {
    Series::from_points(
        monthly
            .iter()
            .map(|m| ChartPoint {
                name: m.month.clone(),
                value: m.total_volume,
            })
            .collect(),
    )
}

fn metric_row(label: &str, value: String, class: &str) -> String {
    format!(
        r#"<div class="bar-label"><span class="muted">{}</span><span class="{}">{}</span></div>"#,
        label, class, value
    )
}

fn metrics_list(p: &PortfolioPerformance) -> String {
    [
        metric_row("Total Value:", views::fmt_money(p.total_value), ""),
        metric_row("Total Cost:", views::fmt_money(p.total_cost), ""),
        metric_row(
            "Total Gain:",
            views::fmt_money(p.total_gain),
            views::sign_class(p.total_gain),
        ),
        metric_row(
            "Return %:",
            views::fmt_percent(p.percentage_return),
            views::sign_class(p.percentage_return),
        ),
    ]
    .join("\n")
}

fn investment_list(p: &PortfolioPerformance) -> String {
    [
        metric_row("Total Investment:", views::fmt_money(p.total_investment), ""),
        metric_row("Total Sales:", views::fmt_money(p.total_sales), ""),
        metric_row(
            "Realized Gain:",
            views::fmt_money(p.realized_gain),
            views::sign_class(p.realized_gain),
        ),
        metric_row("Total Fees:", views::fmt_money(p.total_fees), ""),
    ]
    .join("\n")
}

fn fees_list(p: &PortfolioPerformance) -> String {
    [
        metric_row("Buy Fees:", views::fmt_money(p.total_buy_fees), ""),
        metric_row("Sell Fees:", views::fmt_money(p.total_sell_fees), ""),
        metric_row("Total Fees:", views::fmt_money(p.total_fees), ""),
    ]
    .join("\n")
}
