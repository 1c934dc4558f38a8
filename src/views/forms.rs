use crate::models::TransactionType;

use super::escape;

/// One labelled input with its inline error, if any.
pub fn text_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    error: Option<&str>,
) -> String {
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let step = if input_type == "number" {
        r#" step="any""#
    } else {
        ""
    };
    format!(
        r#"<label for="{name}">{label}</label>
<input id="{name}" name="{name}" type="{input_type}"{step} value="{value}">
{error_html}"#,
        name = name,
        label = escape(label),
        input_type = input_type,
        step = step,
        value = escape(value),
        error_html = error_html,
    )
}

/// Raw field values as submitted, echoed back on validation failure.
#[derive(Debug, Clone, Default)]
pub struct TradeFormValues {
    pub stock_ticker: String,
    pub quantity: String,
    pub price: String,
    pub fee: String,
    pub transaction_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct TradeFormErrors {
    pub stock_ticker: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub fee: Option<String>,
    pub transaction_date: Option<String>,
    pub submit: Option<String>,
}

impl TradeFormErrors {
    pub fn is_empty(&self) -> bool {
        self.stock_ticker.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.fee.is_none()
            && self.transaction_date.is_none()
            && self.submit.is_none()
    }
}

/// Shared buy/sell form; the two pages differ only in wording and the
/// endpoint the action posts to.
pub fn trade_form(kind: TransactionType, values: &TradeFormValues, errors: &TradeFormErrors) -> String {
    let (action, verb, class) = match kind {
        TransactionType::Buy => ("/transactions/buy", "Buy", ""),
        TransactionType::Sell => ("/transactions/sell", "Sell", " danger"),
    };
    let submit_error = errors
        .submit
        .as_deref()
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    format!(
        r#"<form method="post" action="{action}" class="card">
{ticker}
{quantity}
{price}
{fee}
{date}
{submit_error}
<div class="actions"><button class="btn{class}" type="submit">{verb} Stock</button></div>
</form>"#,
        action = action,
        ticker = text_field(
            "Stock Ticker",
            "stockTicker",
            "text",
            &values.stock_ticker,
            errors.stock_ticker.as_deref()
        ),
        quantity = text_field(
            "Quantity",
            "quantity",
            "number",
            &values.quantity,
            errors.quantity.as_deref()
        ),
        price = text_field(
            "Price per Share",
            "price",
            "number",
            &values.price,
            errors.price.as_deref()
        ),
        fee = text_field("Fee (optional)", "fee", "number", &values.fee, errors.fee.as_deref()),
        date = text_field(
            "Transaction Date (optional)",
            "transactionDate",
            "date",
            &values.transaction_date,
            errors.transaction_date.as_deref()
        ),
        submit_error = submit_error,
        class = class,
        verb = verb,
    )
}
