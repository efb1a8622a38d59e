use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: i32,
    pub name: String,
    pub ad_account_id: i32,
    pub client_id: Option<i32>,
    pub status: String,
    pub budget: Decimal,
    /// Denormalized ledger aggregate (see spend synchronizer)
    pub spend: Decimal,
    /// Campaign-scoped balance: ad account spend_limit - campaign spend
    pub available_balance: Decimal,
    pub overspent: bool,
    pub start_date: Option<NaiveDate>,
    pub is_synced: bool,
    pub external_ref: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub ad_account_id: i32,
    pub client_id: Option<i32>,
    pub status: Option<String>,
    pub budget: Option<Decimal>,
    pub start_date: Option<String>,
    pub is_synced: Option<bool>,
    pub external_ref: Option<String>,
}

/// Campaign update payload. `spend` is deliberately absent: the
/// denormalized aggregate is written only by the spend synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub ad_account_id: Option<i32>,
    pub client_id: Option<i32>,
    pub status: Option<String>,
    pub budget: Option<Decimal>,
    pub start_date: Option<String>,
}
