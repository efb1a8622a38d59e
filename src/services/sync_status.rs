//! Sync status service for tracking background job runs
//!
//! Keeps the reconcile job from doing redundant full passes right after
//! a restart by recording when each job last succeeded.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::sync_status::{self, Entity as SyncStatus};

/// Job names for tracking sync status
pub mod jobs {
    pub const SPEND_RECONCILE: &str = "spend_reconcile";
}

/// Default minimum intervals between runs (in seconds)
pub mod intervals {
    pub const SPEND_RECONCILE: i32 = 3600; // 1 hour
}

/// Check whether a job should run based on its last successful pass.
///
/// Returns true when no record exists yet (first run) or when the last
/// success is older than the recorded minimum interval.
pub async fn should_sync(
    db: &DatabaseConnection,
    job_name: &str,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let status = SyncStatus::find()
        .filter(sync_status::Column::JobName.eq(job_name))
        .one(db)
        .await?;

    let Some(record) = status else {
        tracing::info!("[{}] First run detected, will run", job_name);
        return Ok(true);
    };

    let Some(last_success) = record.last_success_at else {
        tracing::info!("[{}] No previous successful run, will run", job_name);
        return Ok(true);
    };

    let now = Utc::now().naive_utc();
    let elapsed = now.signed_duration_since(last_success);
    let interval = Duration::seconds(record.min_interval_secs as i64);

    if elapsed >= interval {
        tracing::info!(
            "[{}] Last run was {}s ago (min: {}s), will run",
            job_name,
            elapsed.num_seconds(),
            record.min_interval_secs
        );
        Ok(true)
    } else {
        tracing::info!(
            "[{}] Skipping - last run was {}s ago, next run in {}s",
            job_name,
            elapsed.num_seconds(),
            (interval - elapsed).num_seconds()
        );
        Ok(false)
    }
}

/// Record a successful run
pub async fn record_success(
    db: &DatabaseConnection,
    job_name: &str,
    default_interval_secs: i32,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let now = Utc::now().naive_utc();

    let existing = SyncStatus::find()
        .filter(sync_status::Column::JobName.eq(job_name))
        .one(db)
        .await?;

    match existing {
        Some(record) => {
            let success_count = record.success_count;
            let mut active_model: sync_status::ActiveModel = record.into();
            active_model.last_success_at = Set(Some(now));
            active_model.last_attempt_at = Set(Some(now));
            active_model.last_error = Set(None);
            active_model.success_count = Set(success_count + 1);
            active_model.update(db).await?;
        }
        None => {
            let new_record = sync_status::ActiveModel {
                job_name: Set(job_name.to_string()),
                last_success_at: Set(Some(now)),
                last_attempt_at: Set(Some(now)),
                last_error: Set(None),
                success_count: Set(1),
                error_count: Set(0),
                min_interval_secs: Set(default_interval_secs),
                ..Default::default()
            };
            new_record.insert(db).await?;
        }
    }

    tracing::debug!("[{}] Recorded successful run", job_name);
    Ok(())
}

/// Record a failed attempt, keeping the last success timestamp intact
pub async fn record_failure(
    db: &DatabaseConnection,
    job_name: &str,
    default_interval_secs: i32,
    error: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let now = Utc::now().naive_utc();

    let existing = SyncStatus::find()
        .filter(sync_status::Column::JobName.eq(job_name))
        .one(db)
        .await?;

    match existing {
        Some(record) => {
            let error_count = record.error_count;
            let mut active_model: sync_status::ActiveModel = record.into();
            active_model.last_attempt_at = Set(Some(now));
            active_model.last_error = Set(Some(error.to_string()));
            active_model.error_count = Set(error_count + 1);
            active_model.update(db).await?;
        }
        None => {
            let new_record = sync_status::ActiveModel {
                job_name: Set(job_name.to_string()),
                last_success_at: Set(None),
                last_attempt_at: Set(Some(now)),
                last_error: Set(Some(error.to_string())),
                success_count: Set(0),
                error_count: Set(1),
                min_interval_secs: Set(default_interval_secs),
                ..Default::default()
            };
            new_record.insert(db).await?;
        }
    }

    tracing::debug!("[{}] Recorded failed attempt: {}", job_name, error);
    Ok(())
}
