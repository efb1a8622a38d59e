use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query parameters for the campaign analytics rollup.
/// Kept as strings so empty parameters (`?adAccountId=`) parse cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub ad_account_id: Option<String>,
    pub campaign_id: Option<String>,
    pub start_date: Option<String>, // YYYY-MM-DD format
    pub end_date: Option<String>,   // YYYY-MM-DD format
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRollup {
    pub ad_account_id: i32,
    pub account_name: String,
    pub total_spend: Decimal,
    pub total_budget: Decimal,
    /// Per-group balance: total_budget - total_spend
    pub available_balance: Decimal,
    pub campaign_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub per_account: Vec<AccountRollup>,
    pub grand_total_spend: Decimal,
    pub grand_total_budget: Decimal,
    pub total_campaigns: usize,
}
