pub use super::ad_accounts::Entity as AdAccounts;
pub use super::campaign_comments::Entity as CampaignComments;
pub use super::campaigns::Entity as Campaigns;
pub use super::clients::Entity as Clients;
pub use super::daily_spends::Entity as DailySpends;
pub use super::sync_status::Entity as SyncStatus;
