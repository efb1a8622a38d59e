//! Periodic reconciliation of denormalized campaign spend.
//!
//! The debounced synchronizer covers the common path; this job sweeps
//! the whole campaign table on an interval so totals converge even when
//! a sync write failed or the process restarted mid-burst.

use sea_orm::{DatabaseConnection, EntityTrait};
use tokio::time::{interval, Duration};

use crate::entities::prelude::*;
use crate::services::read_cache::ReadCache;
use crate::services::spend_sync::{DbSpendApplier, SpendApplier};
use crate::services::sync_status::{self, intervals, jobs};

pub async fn start_spend_reconcile_job(db: DatabaseConnection, cache: ReadCache) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(intervals::SPEND_RECONCILE as u64));

        let applier = DbSpendApplier::new(db.clone(), cache);

        loop {
            interval.tick().await;

            match sync_status::should_sync(&db, jobs::SPEND_RECONCILE).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::error!("Failed to check spend reconcile status: {}", e);
                    continue;
                }
            }

            tracing::info!("Starting spend reconcile pass");

            match reconcile_all(&db, &applier).await {
                Ok(reconciled) => {
                    tracing::info!("Spend reconcile pass complete ({} campaigns)", reconciled);
                    if let Err(e) = sync_status::record_success(
                        &db,
                        jobs::SPEND_RECONCILE,
                        intervals::SPEND_RECONCILE,
                    )
                    .await
                    {
                        tracing::error!("Failed to record reconcile success: {}", e);
                    }
                }
                Err(e) => {
                    tracing::error!("Spend reconcile pass failed: {}", e);
                    if let Err(e) = sync_status::record_failure(
                        &db,
                        jobs::SPEND_RECONCILE,
                        intervals::SPEND_RECONCILE,
                        &e.to_string(),
                    )
                    .await
                    {
                        tracing::error!("Failed to record reconcile failure: {}", e);
                    }
                }
            }
        }
    });
}

/// Run the synchronizer's apply step for every campaign. Per-campaign
/// failures are logged and skipped so one bad row cannot stall the
/// whole pass.
async fn reconcile_all(
    db: &DatabaseConnection,
    applier: &DbSpendApplier,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let campaigns = Campaigns::find().all(db).await?;

    let mut reconciled = 0;
    for campaign in campaigns {
        match applier.apply(campaign.id).await {
            Ok(()) => reconciled += 1,
            Err(e) => {
                tracing::error!("Failed to reconcile campaign {}: {}", campaign.id, e);
            }
        }
    }

    Ok(reconciled)
}
