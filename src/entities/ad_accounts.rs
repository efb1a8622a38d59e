//! SeaORM Entity for ad_accounts table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ad_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Ad platform the account lives on (e.g. "facebook", "google")
    pub platform: String,
    pub account_name: String,
    /// Hard spending ceiling for the whole account
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub spend_limit: Decimal,
    /// Denormalized account-level spend, maintained by form edits and
    /// platform imports, never derived from the daily-spend ledger
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub total_spend: Decimal,
    pub client_id: Option<i32>,
    pub created_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
