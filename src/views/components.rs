use crate::models::{MonthlyActivity, Position, Stock, Transaction};

use super::{escape, fmt_money, fmt_percent, sign_class};

/// One headline number with a label, for the dashboard grid.
pub fn summary_card(label: &str, value: &str, class: &str) -> String {
    format!(
        r#"<div class="card"><div class="muted">{}</div><div class="metric {}">{}</div></div>"#,
        escape(label),
        class,
        escape(value)
    )
}

pub fn position_card(position: &Position, compact: bool) -> String {
    let pnl = position.unrealized_profit_loss.unwrap_or(0.0);
    let ret = position.percentage_return.unwrap_or(0.0);
    let value = position.current_value.unwrap_or(0.0);

    let detail = if compact {
        String::new()
    } else {
        format!(
            r#"<div class="muted">{} shares @ {} avg · first purchased {}</div>"#,
            position.quantity,
            fmt_money(position.average_cost),
            escape(&position.first_purchased)
        )
    };

    format!(
        r#"<div class="card">
  <div class="bar-label">
    <span><a href="/stocks/{}">{}</a> <span class="muted">{}</span></span>
    <span>{}</span>
  </div>
  <div class="bar-label">
    <span class="{}">{} ({})</span>
  </div>
  {}
</div>"#,
        position.stock_id,
        escape(&position.stock_ticker),
        escape(&position.stock_name),
        fmt_money(value),
        sign_class(pnl),
        fmt_money(pnl),
        fmt_percent(ret),
        detail
    )
}

pub fn stock_card(stock: &Stock) -> String {
    let price = stock
        .current_price
        .map(fmt_money)
        .unwrap_or_else(|| "—".to_string());
    let sector = stock.sector.as_deref().unwrap_or("Unclassified");

    format!(
        r#"<div class="card">
  <div class="bar-label">
    <span><a href="/stocks/{}">{}</a> <span class="muted">{}</span></span>
    <span>{}</span>
  </div>
  <div class="muted">{} · {} · {}</div>
</div>"#,
        stock.id,
        escape(&stock.ticker),
        escape(&stock.name),
        price,
        escape(&stock.exchange),
        escape(sector),
        escape(&stock.currency)
    )
}

pub fn transactions_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return r#"<p class="empty">No transactions yet.</p>"#.to_string();
    }

    let mut rows = String::new();
    for tx in transactions {
        let class = match tx.transaction_type {
            crate::models::TransactionType::Buy => "gain",
            crate::models::TransactionType::Sell => "loss",
        };
        rows.push_str(&format!(
            r#"<tr>
  <td>{}</td>
  <td class="{}">{}</td>
  <td>{}</td>
  <td>{}</td>
  <td>{}</td>
  <td>{}</td>
</tr>
"#,
            escape(tx.transaction_date.as_deref().unwrap_or("—")),
            class,
            tx.transaction_type,
            escape(&tx.stock_ticker),
            tx.quantity,
            fmt_money(tx.price),
            tx.total_cost.map(fmt_money).unwrap_or_else(|| "—".to_string()),
        ));
    }

    format!(
        r#"<table>
<thead><tr><th>Date</th><th>Type</th><th>Ticker</th><th>Quantity</th><th>Price</th><th>Total</th></tr></thead>
<tbody>
{}
</tbody>
</table>"#,
        rows
    )
}

pub fn monthly_cards(months: &[MonthlyActivity], limit: usize) -> String {
    if months.is_empty() {
        return r#"<p class="empty">No activity yet.</p>"#.to_string();
    }
    let mut out = String::from(r#"<div class="cards">"#);
    for month in months.iter().take(limit) {
        out.push_str(&format!(
            r#"<div class="card"><div class="metric">{}</div><div class="muted">Transactions: {}</div><div class="muted">Volume: {}</div></div>"#,
            escape(&month.month),
            month.transaction_count,
            fmt_money(month.total_volume)
        ));
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn position() -> Position {
        Position {
            id: 1,
            stock_id: 7,
            stock_ticker: "AAPL".to_string(),
            stock_name: "Apple Inc.".to_string(),
            quantity: 10.5,
            average_cost: 150.0,
            first_purchased: "2024-01-15".to_string(),
            last_transaction: "2025-06-01".to_string(),
            current_price: Some(210.0),
            current_value: Some(2205.0),
            total_cost: Some(1575.0),
            unrealized_profit_loss: Some(630.0),
            percentage_return: Some(40.0),
            notes: None,
        }
    }

    #[test]
    fn position_card_links_the_stock_and_colors_the_gain() {
        let html = position_card(&position(), false);
        assert!(html.contains(r#"href="/stocks/7""#));
        assert!(html.contains("$2,205.00"));
        assert!(html.contains(r#"class="gain""#));
        assert!(html.contains("40.00%"));
    }

    #[test]
    fn compact_card_drops_the_detail_line() {
        let html = position_card(&position(), true);
        assert!(!html.contains("first purchased"));
    }

    #[test]
    fn transactions_table_handles_the_empty_case() {
        assert!(transactions_table(&[]).contains("No transactions yet"));
    }

    #[test]
    fn transactions_table_renders_one_row_per_transaction() {
        let tx = Transaction {
            id: Some(1),
            stock_id: Some(7),
            stock_ticker: "AAPL".to_string(),
            stock_name: None,
            transaction_type: TransactionType::Sell,
            quantity: 2.0,
            price: 200.0,
            fee: Some(1.5),
            value: None,
            total_cost: Some(398.5),
            transaction_date: Some("2025-06-01".to_string()),
        };
        let html = transactions_table(&[tx]);
        assert!(html.contains("SELL"));
        assert!(html.contains("$398.50"));
        assert!(html.contains("2025-06-01"));
    }
}
