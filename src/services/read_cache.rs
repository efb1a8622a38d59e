//! Read-model cache for campaign views.
//!
//! Campaign detail and list responses are cached briefly and explicitly
//! invalidated by every campaign mutation and by the spend synchronizer,
//! so other views pick up a freshly synchronized total promptly.

use std::time::Duration;

use moka::future::Cache;

use crate::models::campaign::CampaignResponse;

/// Single key for the campaign list entry
const LIST_KEY: u8 = 0;

#[derive(Clone)]
pub struct ReadCache {
    campaign: Cache<i32, CampaignResponse>,
    campaign_list: Cache<u8, Vec<CampaignResponse>>,
}

impl ReadCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            campaign: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
            campaign_list: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    pub async fn get_campaign(&self, id: i32) -> Option<CampaignResponse> {
        self.campaign.get(&id).await
    }

    pub async fn put_campaign(&self, response: CampaignResponse) {
        self.campaign.insert(response.id, response).await;
    }

    pub async fn get_campaign_list(&self) -> Option<Vec<CampaignResponse>> {
        self.campaign_list.get(&LIST_KEY).await
    }

    pub async fn put_campaign_list(&self, list: Vec<CampaignResponse>) {
        self.campaign_list.insert(LIST_KEY, list).await;
    }

    /// Drop both the campaign's detail entry and the list
    pub async fn invalidate_campaign(&self, id: i32) {
        self.campaign.invalidate(&id).await;
        self.campaign_list.invalidate(&LIST_KEY).await;
    }

    /// Drop every cached read model
    pub async fn invalidate_all(&self) {
        self.campaign.invalidate_all();
        self.campaign_list.invalidate_all();
    }
}
