//! Campaign spend synchronizer.
//!
//! Keeps the denormalized `campaigns.spend` column eventually consistent
//! with the daily-spend ledger. Ledger writes notify the worker over an
//! mpsc channel; the worker debounces per campaign, so a burst of rapid
//! edits produces exactly one write carrying the final aggregate.
//! Intermediate aggregates are never persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use crate::entities::{campaigns, prelude::*};
use crate::services::aggregator;
use crate::services::read_cache::ReadCache;

/// Quiescence interval after the last ledger write before syncing
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// The stored total already matches the aggregate
    Skip,
    Write(Decimal),
}

/// Decide whether a synchronization write is needed. Writing an equal
/// total would be a no-op, so it is skipped outright.
pub fn decide_write(current: Decimal, aggregate: Decimal) -> WriteDecision {
    if current == aggregate {
        WriteDecision::Skip
    } else {
        WriteDecision::Write(aggregate)
    }
}

/// The apply step the debounce loop runs once a campaign goes quiet.
/// Split behind a trait so the loop's coalescing behavior is testable
/// without a database.
#[async_trait]
pub trait SpendApplier: Send + Sync {
    async fn apply(&self, campaign_id: i32)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Production applier: recomputes the ledger aggregate and pushes it
/// into `campaigns.spend` when it drifted.
pub struct DbSpendApplier {
    db: DatabaseConnection,
    cache: ReadCache,
}

impl DbSpendApplier {
    pub fn new(db: DatabaseConnection, cache: ReadCache) -> Self {
        Self { db, cache }
    }
}

#[async_trait]
impl SpendApplier for DbSpendApplier {
    async fn apply(
        &self,
        campaign_id: i32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let aggregate = aggregator::lifetime_total(&self.db, campaign_id).await?;

        let campaign = Campaigns::find_by_id(campaign_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| format!("Campaign {} not found", campaign_id))?;

        match decide_write(campaign.spend, aggregate) {
            WriteDecision::Skip => {
                tracing::debug!(
                    "Campaign {} spend already at {}, skipping write",
                    campaign_id,
                    aggregate
                );
            }
            WriteDecision::Write(total) => {
                let mut active: campaigns::ActiveModel = campaign.into();
                active.spend = Set(total);
                active.updated_at = Set(Some(Utc::now().naive_utc()));
                active.update(&self.db).await?;

                self.cache.invalidate_campaign(campaign_id).await;

                tracing::info!("Synchronized campaign {} spend -> {}", campaign_id, total);
            }
        }

        Ok(())
    }
}

/// Cloneable handle used by handlers to signal a ledger change
#[derive(Clone)]
pub struct SpendSyncHandle {
    tx: mpsc::UnboundedSender<i32>,
}

impl SpendSyncHandle {
    pub fn notify(&self, campaign_id: i32) {
        if self.tx.send(campaign_id).is_err() {
            tracing::warn!(
                "Spend sync worker is gone; campaign {} spend left stale",
                campaign_id
            );
        }
    }
}

/// Spawn the debounce worker and return its handle
pub fn spawn(applier: Arc<dyn SpendApplier>, window: Duration) -> SpendSyncHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_worker(rx, applier, window));
    SpendSyncHandle { tx }
}

/// Debounce loop. Each trigger (re)arms a per-campaign deadline of
/// `now + window`; a campaign syncs only once its deadline passes with
/// no further triggers. Campaigns debounce independently.
async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<i32>,
    applier: Arc<dyn SpendApplier>,
    window: Duration,
) {
    tracing::info!("Spend sync worker started");

    let mut pending: HashMap<i32, Instant> = HashMap::new();

    loop {
        if pending.is_empty() {
            match rx.recv().await {
                Some(campaign_id) => {
                    pending.insert(campaign_id, Instant::now() + window);
                }
                None => {
                    tracing::info!("Spend sync worker shutting down");
                    return;
                }
            }
        } else {
            let next_deadline = pending
                .values()
                .min()
                .copied()
                .expect("pending is non-empty");

            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Some(campaign_id) => {
                            // Restart the timer for this campaign only
                            pending.insert(campaign_id, Instant::now() + window);
                        }
                        None => {
                            // Channel closed: flush what is still pending, then exit
                            for campaign_id in pending.keys().copied().collect::<Vec<_>>() {
                                apply_one(applier.as_ref(), campaign_id).await;
                            }
                            tracing::info!("Spend sync worker shutting down");
                            return;
                        }
                    }
                }
                _ = sleep_until(next_deadline) => {
                    let now = Instant::now();
                    let due: Vec<i32> = pending
                        .iter()
                        .filter(|(_, deadline)| **deadline <= now)
                        .map(|(campaign_id, _)| *campaign_id)
                        .collect();

                    for campaign_id in due {
                        pending.remove(&campaign_id);
                        apply_one(applier.as_ref(), campaign_id).await;
                    }
                }
            }
        }
    }
}

async fn apply_one(applier: &dyn SpendApplier, campaign_id: i32) {
    // No retry here: the next ledger write or the reconcile job catches up
    if let Err(e) = applier.apply(campaign_id).await {
        tracing::error!("Failed to synchronize spend for campaign {}: {}", campaign_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct RecordingApplier {
        calls: Mutex<Vec<i32>>,
    }

    impl RecordingApplier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<i32> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpendApplier for RecordingApplier {
        async fn apply(
            &self,
            campaign_id: i32,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.calls.lock().unwrap().push(campaign_id);
            Ok(())
        }
    }

    #[test]
    fn equal_totals_skip_the_write() {
        assert_eq!(decide_write(dec!(80), dec!(80)), WriteDecision::Skip);
    }

    #[test]
    fn drifted_totals_write_the_aggregate() {
        assert_eq!(
            decide_write(dec!(50), dec!(80)),
            WriteDecision::Write(dec!(80))
        );
        assert_eq!(
            decide_write(dec!(80), dec!(0)),
            WriteDecision::Write(dec!(0))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_triggers_coalesce_into_one_apply() {
        let applier = RecordingApplier::new();
        let handle = spawn(applier.clone(), Duration::from_millis(1000));

        // Triggers at t=0, t=200, t=400
        handle.notify(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.notify(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.notify(1);

        // t=1300: the last deadline (t=1400) has not passed yet
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(applier.calls().is_empty());

        // t=1500: exactly one apply for the burst
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(applier.calls(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn campaigns_debounce_independently() {
        let applier = RecordingApplier::new();
        let handle = spawn(applier.clone(), Duration::from_millis(1000));

        handle.notify(1);
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.notify(2);

        tokio::time::sleep(Duration::from_millis(2000)).await;

        let mut calls = applier.calls();
        calls.sort_unstable();
        assert_eq!(calls, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn a_late_trigger_syncs_again() {
        let applier = RecordingApplier::new();
        let handle = spawn(applier.clone(), Duration::from_millis(1000));

        handle.notify(7);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(applier.calls(), vec![7]);

        handle.notify(7);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(applier.calls(), vec![7, 7]);
    }
}
