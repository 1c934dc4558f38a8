use serde::{Deserialize, Serialize};

/// An aggregated holding of one stock across all buy/sell transactions.
///
/// Valuation fields are computed by the backend; they are optional
/// because a position whose price feed is stale arrives without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub stock_id: i64,
    pub stock_ticker: String,
    pub stock_name: String,
    pub quantity: f64,
    pub average_cost: f64,
    pub first_purchased: String,
    pub last_transaction: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub unrealized_profit_loss: Option<f64>,
    #[serde(default)]
    pub percentage_return: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}
