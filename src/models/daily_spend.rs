use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpendEntry {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Whether the calendar day still falls inside the editable window
    pub editable: bool,
    pub has_input_controls: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpendListResponse {
    pub entries: Vec<DailySpendEntry>,
    /// Trailing-window total for the calendar header
    pub window_total: Decimal,
    pub window_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDailySpendRequest {
    /// YYYY-MM-DD or RFC3339; normalized to a UTC calendar day
    pub date: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpendQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}
