// src/lib.rs

use sea_orm::DatabaseConnection;
use services::{read_cache::ReadCache, spend_sync::SpendSyncHandle};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: ReadCache,
    pub spend_sync: SpendSyncHandle,
}

pub mod entities {
    pub mod prelude;

    pub mod ad_accounts;
    pub mod campaign_comments;
    pub mod campaigns;
    pub mod clients;
    pub mod daily_spends;
    pub mod sync_status;
}

pub mod services {
    pub mod aggregator;
    pub mod analytics;
    pub mod balance;
    pub mod ledger;
    pub mod read_cache;
    pub mod spend_sync;
    pub mod sync_status;
}

pub mod handlers;
pub mod jobs;
pub mod models;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use tokio::time::Duration;

    use crate::services::read_cache::ReadCache;
    use crate::services::spend_sync::{self, SpendApplier};
    use crate::AppState;

    struct NoopApplier;

    #[async_trait::async_trait]
    impl SpendApplier for NoopApplier {
        async fn apply(
            &self,
            _campaign_id: i32,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }
    }

    /// State over a disconnected database, for exercising request
    /// validation paths that never reach a query.
    pub(crate) fn noop_state() -> AppState {
        AppState {
            db: sea_orm::DatabaseConnection::default(),
            cache: ReadCache::new(60),
            spend_sync: spend_sync::spawn(Arc::new(NoopApplier), Duration::from_millis(10)),
        }
    }
}
