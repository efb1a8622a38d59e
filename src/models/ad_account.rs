use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAccountResponse {
    pub id: i32,
    pub platform: String,
    pub account_name: String,
    pub spend_limit: Decimal,
    pub total_spend: Decimal,
    /// Account-scoped balance: spend_limit - total_spend
    pub available_balance: Decimal,
    pub overspent: bool,
    pub client_id: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAccountListResponse {
    pub ad_accounts: Vec<AdAccountResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdAccountRequest {
    pub platform: String,
    pub account_name: String,
    pub spend_limit: Decimal,
    pub total_spend: Option<Decimal>,
    pub client_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdAccountRequest {
    pub platform: Option<String>,
    pub account_name: Option<String>,
    pub spend_limit: Option<Decimal>,
    pub total_spend: Option<Decimal>,
    pub client_id: Option<i32>,
}
