//! SeaORM Entity for campaigns table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub ad_account_id: i32,
    pub client_id: Option<i32>,
    /// Status: 'active', 'paused', 'completed', 'draft'
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub budget: Decimal,
    /// Denormalized cache of the daily-spend ledger aggregate.
    /// Written only by the spend synchronizer and the reconcile job.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub spend: Decimal,
    pub start_date: Option<Date>,
    /// True if the campaign was imported from an external ad platform
    pub is_synced: bool,
    /// Platform-side campaign id for imported campaigns
    pub external_ref: Option<String>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
