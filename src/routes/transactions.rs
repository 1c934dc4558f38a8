use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::NaiveDate;
use http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{Transaction, TransactionType};
use crate::services::transaction_service;
use crate::session::{AuthGate, SessionUser};
use crate::state::AppState;
use crate::views::forms::{trade_form, TradeFormErrors, TradeFormValues};
use crate::views::{self, components};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MONTHLY_CARDS: usize = 3;

// --- history ---------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    size: Option<u32>,
    #[serde(default, rename = "type")]
    tx_type: Option<String>,
}

pub async fn history(
    State(state): State<AppState>,
    auth: AuthGate,
    Query(query): Query<HistoryQuery>,
) -> Result<Html<String>, AppError> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE);
    let filter = query
        .tx_type
        .as_deref()
        .and_then(|t| t.parse::<TransactionType>().ok());

    let api = &state.api;
    let (transactions, monthly) = tokio::try_join!(
        transaction_service::fetch_page(api, &auth.token, page, size),
        transaction_service::monthly_summary(api, &auth.token),
    )?;

    let filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| filter.map_or(true, |f| tx.transaction_type == f))
        .collect();
    let rows: Vec<Transaction> = filtered.into_iter().cloned().collect();

    let filter_links = filter_links(page, size, filter);
    let pager = pager(page, size, transactions.len() as u32);

    let body = format!(
        r#"<div class="bar-label"><h1>Transaction History</h1>
<span class="actions"><a class="btn" href="/transactions/buy">Buy Stock</a> <a class="btn danger" href="/transactions/sell">Sell Stock</a></span></div>
<div class="card"><h2>Monthly Activity</h2>{monthly}</div>
<div class="card">
  <div class="bar-label"><span>Filter by type: {filters}</span>{pager}</div>
  {table}
</div>"#,
        monthly = components::monthly_cards(&monthly, MONTHLY_CARDS),
        filters = filter_links,
        pager = pager,
        table = components::transactions_table(&rows),
    );

    Ok(Html(views::layout(
        "Transactions",
        Some(&auth.user_id),
        &body,
    )))
}

fn filter_links(page: u32, size: u32, current: Option<TransactionType>) -> String {
    let mut out = String::new();
    for (label, value) in [("ALL", None), ("BUY", Some(TransactionType::Buy)), ("SELL", Some(TransactionType::Sell))] {
        let href = match value {
            None => format!("/transactions?page={}&size={}", page, size),
            Some(t) => format!("/transactions?page={}&size={}&type={}", page, size, t),
        };
        let marker = if value == current { "<strong>" } else { "" };
        let end = if value == current { "</strong>" } else { "" };
        out.push_str(&format!(r#" {}<a href="{}">{}</a>{}"#, marker, href, label, end));
    }
    out
}

fn pager(page: u32, size: u32, fetched: u32) -> String {
    let prev = if page > 0 {
        format!(
            r#"<a href="/transactions?page={}&size={}">&larr; Newer</a> "#,
            page - 1,
            size
        )
    } else {
        String::new()
    };
    // A short page means there is nothing older to fetch.
    let next = if fetched == size {
        format!(
            r#"<a href="/transactions?page={}&size={}">Older &rarr;</a>"#,
            page + 1,
            size
        )
    } else {
        String::new()
    };
    format!("<span>{}{}</span>", prev, next)
}

// --- buy / sell forms ------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TickerQuery {
    #[serde(default)]
    ticker: Option<String>,
}

pub async fn buy_page(user: SessionUser, Query(query): Query<TickerQuery>) -> Html<String> {
    Html(render_trade_page(
        &user.user_id,
        TransactionType::Buy,
        &prefilled(query.ticker),
        &TradeFormErrors::default(),
    ))
}

pub async fn sell_page(user: SessionUser, Query(query): Query<TickerQuery>) -> Html<String> {
    Html(render_trade_page(
        &user.user_id,
        TransactionType::Sell,
        &prefilled(query.ticker),
        &TradeFormErrors::default(),
    ))
}

fn prefilled(ticker: Option<String>) -> TradeFormValues {
    TradeFormValues {
        stock_ticker: ticker.unwrap_or_default(),
        ..TradeFormValues::default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeForm {
    #[serde(default)]
    stock_ticker: String,
    #[serde(default)]
    quantity: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    fee: String,
    #[serde(default)]
    transaction_date: String,
}

pub async fn buy_action(
    State(state): State<AppState>,
    auth: AuthGate,
    Form(form): Form<TradeForm>,
) -> Response {
    trade_action(state, auth, TransactionType::Buy, form).await
}

pub async fn sell_action(
    State(state): State<AppState>,
    auth: AuthGate,
    Form(form): Form<TradeForm>,
) -> Response {
    trade_action(state, auth, TransactionType::Sell, form).await
}

async fn trade_action(
    state: AppState,
    auth: AuthGate,
    kind: TransactionType,
    form: TradeForm,
) -> Response {
    let (values, parsed) = validate_trade(kind, &form);
    let transaction = match parsed {
        Ok(tx) => tx,
        // Validation failure: re-render the form, no backend call.
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(render_trade_page(&auth.user_id, kind, &values, &errors)),
            )
                .into_response();
        }
    };

    let result = match kind {
        TransactionType::Buy => transaction_service::buy(&state.api, &auth.token, &transaction).await,
        TransactionType::Sell => {
            transaction_service::sell(&state.api, &auth.token, &transaction).await
        }
    };

    match result {
        Ok(tx) => {
            info!(
                "recorded {} of {} x {}",
                kind, tx.quantity, tx.stock_ticker
            );
            Redirect::to("/portfolio/positions").into_response()
        }
        Err(AppError::Unauthorized) => AppError::Unauthorized.into_response(),
        Err(e) => {
            let errors = TradeFormErrors {
                submit: Some(e.message()),
                ..TradeFormErrors::default()
            };
            (
                StatusCode::BAD_REQUEST,
                Html(render_trade_page(&auth.user_id, kind, &values, &errors)),
            )
                .into_response()
        }
    }
}

/// Field validation for the buy/sell forms. Returns the echoed form
/// values alongside either the transaction to post or the per-field
/// errors.
fn validate_trade(
    kind: TransactionType,
    form: &TradeForm,
) -> (TradeFormValues, Result<Transaction, TradeFormErrors>) {
    let values = TradeFormValues {
        stock_ticker: form.stock_ticker.trim().to_uppercase(),
        quantity: form.quantity.trim().to_string(),
        price: form.price.trim().to_string(),
        fee: form.fee.trim().to_string(),
        transaction_date: form.transaction_date.trim().to_string(),
    };

    let mut errors = TradeFormErrors::default();

    if values.stock_ticker.is_empty() {
        errors.stock_ticker = Some("Stock ticker is required".to_string());
    }

    let quantity = values.quantity.parse::<f64>().unwrap_or(0.0);
    if quantity <= 0.0 {
        errors.quantity = Some("Quantity must be greater than 0".to_string());
    }

    let price = values.price.parse::<f64>().unwrap_or(0.0);
    if price <= 0.0 {
        errors.price = Some("Price must be greater than 0".to_string());
    }

    let fee = if values.fee.is_empty() {
        None
    } else {
        match values.fee.parse::<f64>() {
            Ok(f) if f >= 0.0 => Some(f),
            _ => {
                errors.fee = Some("Fee cannot be negative".to_string());
                None
            }
        }
    };

    let transaction_date = if values.transaction_date.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(&values.transaction_date, "%Y-%m-%d") {
            Ok(date) => Some(date.to_string()),
            Err(_) => {
                errors.transaction_date = Some("Date must be YYYY-MM-DD".to_string());
                None
            }
        }
    };

    if !errors.is_empty() {
        return (values, Err(errors));
    }

    let transaction = Transaction {
        id: None,
        stock_id: None,
        stock_ticker: values.stock_ticker.clone(),
        stock_name: None,
        transaction_type: kind,
        quantity,
        price,
        fee,
        value: None,
        total_cost: None,
        transaction_date,
    };
    (values, Ok(transaction))
}

fn render_trade_page(
    user: &str,
    kind: TransactionType,
    values: &TradeFormValues,
    errors: &TradeFormErrors,
) -> String {
    let (title, blurb) = match kind {
        TransactionType::Buy => ("Buy Stock", "Add a new position or extend an existing one"),
        TransactionType::Sell => ("Sell Stock", "Reduce or close a position in your portfolio"),
    };
    let body = format!(
        r#"<h1>{title}</h1>
<p class="muted">{blurb}</p>
{form}"#,
        title = title,
        blurb = blurb,
        form = trade_form(kind, values, errors),
    );
    views::layout(title, Some(user), &body)
}
