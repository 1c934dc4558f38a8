use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered category → value mapping used by the allocation endpoints.
pub type SectorAllocation = BTreeMap<String, f64>;

/// Headline numbers for the dashboard. Fields default to zero so a
/// sparse backend payload still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub total_positions: u32,
    #[serde(default)]
    pub total_gain: f64,
    #[serde(default)]
    pub percentage_return: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_gain: f64,
    #[serde(default)]
    pub percentage_return: f64,
    #[serde(default)]
    pub total_investment: f64,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub total_buy_fees: f64,
    #[serde(default)]
    pub total_sell_fees: f64,
    #[serde(default)]
    pub total_fees: f64,
    #[serde(default)]
    pub realized_gain: f64,
}

/// One month's trading activity, for the transaction history page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub transaction_count: u32,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub buy_volume: f64,
    #[serde(default)]
    pub sell_volume: f64,
}
