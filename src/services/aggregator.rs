//! Spend aggregation over the daily ledger.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::entities::daily_spends;
use crate::services::ledger;

/// Trailing window shown in the spend calendar header
pub const SPEND_WINDOW_DAYS: i64 = 30;

/// Inclusive bounds of a trailing window ending today
pub fn window_bounds(today: NaiveDate, window_days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(window_days - 1), today)
}

/// Sum ledger amounts. Days with no entry simply contribute nothing.
pub fn sum_entries(entries: &[daily_spends::Model]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, entry| acc + entry.amount)
}

/// Total spend over the trailing `window_days` ending at `today`
pub async fn total_for_window(
    db: &DatabaseConnection,
    campaign_id: i32,
    today: NaiveDate,
    window_days: i64,
) -> Result<Decimal, Box<dyn std::error::Error + Send + Sync>> {
    let (from, to) = window_bounds(today, window_days);
    let entries = ledger::list_entries(db, campaign_id, Some(from), Some(to)).await?;
    Ok(sum_entries(&entries))
}

/// Total spend over the campaign's entire ledger.
///
/// This is the value the spend synchronizer pushes into the campaign's
/// denormalized `spend` column.
pub async fn lifetime_total(
    db: &DatabaseConnection,
    campaign_id: i32,
) -> Result<Decimal, Box<dyn std::error::Error + Send + Sync>> {
    let entries = ledger::list_entries(db, campaign_id, None, None).await?;
    Ok(sum_entries(&entries))
}
