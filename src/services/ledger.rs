//! Daily spend ledger: one durable row per (campaign, calendar day).
//!
//! The ledger is the source of truth for spend; `campaigns.spend` is a
//! denormalized cache kept in step by the spend synchronizer.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, Set,
};

use crate::entities::{daily_spends, prelude::*};

/// Days (counting back from today) a calendar cell accepts edits
pub const EDITABLE_WINDOW_DAYS: i64 = 3;

/// Days (counting back from today) a calendar cell renders input controls
pub const INPUT_CONTROLS_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEditability {
    pub editable: bool,
    pub has_input_controls: bool,
}

/// Edit policy for a single calendar day, as a pure function of the
/// current day and the entry's day. Future days are never editable.
pub fn editability_window(today: NaiveDate, entry_date: NaiveDate) -> DayEditability {
    let within = |days: i64| {
        entry_date <= today && (today - entry_date).num_days() < days
    };

    DayEditability {
        editable: within(EDITABLE_WINDOW_DAYS),
        has_input_controls: within(INPUT_CONTROLS_WINDOW_DAYS),
    }
}

/// Normalize a client-supplied date to a UTC calendar day.
///
/// Accepts plain `YYYY-MM-DD` or a full RFC3339 instant; instants are
/// converted to UTC before truncation so a late-evening edit in a
/// western timezone lands on the same ledger row as the UTC day.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.to_utc().date_naive());
    }

    Err(format!(
        "Invalid date '{}'. Use YYYY-MM-DD or an RFC3339 timestamp",
        raw
    ))
}

/// Validate a ledger amount before any write reaches the database
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err(format!("Amount must be non-negative, got {}", amount));
    }
    Ok(())
}

/// Insert-or-replace the spend recorded for one campaign day.
///
/// The composite primary key on (campaign_id, date) guarantees exactly
/// one row exists for the pair after this call; a second write for the
/// same day replaces the amount, it never accumulates.
pub async fn upsert_entry(
    db: &DatabaseConnection,
    campaign_id: i32,
    date: NaiveDate,
    amount: Decimal,
) -> Result<daily_spends::Model, Box<dyn std::error::Error + Send + Sync>> {
    let now = chrono::Utc::now().naive_utc();

    let entry = daily_spends::ActiveModel {
        campaign_id: Set(campaign_id),
        date: Set(date),
        amount: Set(amount),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };

    let stored = DailySpends::insert(entry)
        .on_conflict(
            OnConflict::columns([
                daily_spends::Column::CampaignId,
                daily_spends::Column::Date,
            ])
            .update_columns([daily_spends::Column::Amount, daily_spends::Column::UpdatedAt])
            .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    tracing::debug!(
        "Upserted daily spend for campaign {} on {}: {}",
        campaign_id,
        date,
        amount
    );

    Ok(stored)
}

/// List a campaign's ledger entries, ascending by date
pub async fn list_entries(
    db: &DatabaseConnection,
    campaign_id: i32,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<daily_spends::Model>, Box<dyn std::error::Error + Send + Sync>> {
    let mut query = DailySpends::find()
        .filter(daily_spends::Column::CampaignId.eq(campaign_id));

    if let Some(from) = from {
        query = query.filter(daily_spends::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(daily_spends::Column::Date.lte(to));
    }

    let entries = query
        .order_by(daily_spends::Column::Date, Order::Asc)
        .all(db)
        .await?;

    Ok(entries)
}
