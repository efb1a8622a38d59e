//! SeaORM Entity for the daily-spend ledger
//!
//! One row per (campaign_id, date); the composite primary key is what
//! makes ledger writes insert-or-replace rather than append.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_spends")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub campaign_id: i32,
    /// Calendar day, normalized to a UTC date before storage
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    /// Recorded spend for the day (non-negative)
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub amount: Decimal,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
