//! Campaign analytics rollup grouped by ad account.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{campaigns, daily_spends, prelude::*};
use crate::models::analytics::{AccountRollup, AnalyticsResponse};

/// Parsed analytics filters; all optional, ANDed together.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollupFilters {
    pub ad_account_id: Option<i32>,
    pub campaign_id: Option<i32>,
    /// Date filters scope *ledger activity*, not the campaign's own
    /// start date: "campaigns that spent money in this window".
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RollupFilters {
    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// Produce the grouped financial summary for the given filters
pub async fn rollup(
    db: &DatabaseConnection,
    filters: RollupFilters,
) -> Result<AnalyticsResponse, Box<dyn std::error::Error + Send + Sync>> {
    let mut query = Campaigns::find();
    if let Some(ad_account_id) = filters.ad_account_id {
        query = query.filter(campaigns::Column::AdAccountId.eq(ad_account_id));
    }
    if let Some(campaign_id) = filters.campaign_id {
        query = query.filter(campaigns::Column::Id.eq(campaign_id));
    }
    let campaigns = query.all(db).await?;

    let accounts = AdAccounts::find().all(db).await?;
    let account_names: HashMap<i32, String> = accounts
        .into_iter()
        .map(|account| (account.id, account.account_name))
        .collect();

    // With a date range active, spend comes from the windowed ledger
    // sum instead of the denormalized campaign total
    let windowed_sums = if filters.has_date_range() {
        let campaign_ids: Vec<i32> = campaigns.iter().map(|c| c.id).collect();
        Some(windowed_ledger_sums(db, &campaign_ids, filters.start_date, filters.end_date).await?)
    } else {
        None
    };

    Ok(build_rollup(
        &campaigns,
        &account_names,
        windowed_sums.as_ref(),
    ))
}

/// Per-campaign ledger totals inside an inclusive date range
async fn windowed_ledger_sums(
    db: &DatabaseConnection,
    campaign_ids: &[i32],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<HashMap<i32, Decimal>, Box<dyn std::error::Error + Send + Sync>> {
    if campaign_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = DailySpends::find()
        .filter(daily_spends::Column::CampaignId.is_in(campaign_ids.to_vec()));
    if let Some(from) = start_date {
        query = query.filter(daily_spends::Column::Date.gte(from));
    }
    if let Some(to) = end_date {
        query = query.filter(daily_spends::Column::Date.lte(to));
    }

    let mut sums: HashMap<i32, Decimal> = HashMap::new();
    for row in query.all(db).await? {
        *sums.entry(row.campaign_id).or_insert(Decimal::ZERO) += row.amount;
    }
    Ok(sums)
}

/// Pure grouping step over already-fetched rows.
///
/// `windowed_sums` replaces each campaign's denormalized spend when a
/// date filter is active; a campaign absent from the map spent nothing
/// in the window. Budgets are never date-scoped. Groups come out
/// ordered by ad account id, so a fixed input always yields the same
/// rollup.
pub fn build_rollup(
    campaigns: &[campaigns::Model],
    account_names: &HashMap<i32, String>,
    windowed_sums: Option<&HashMap<i32, Decimal>>,
) -> AnalyticsResponse {
    let mut groups: BTreeMap<i32, AccountRollup> = BTreeMap::new();

    for campaign in campaigns {
        let spend = match windowed_sums {
            Some(sums) => sums.get(&campaign.id).copied().unwrap_or(Decimal::ZERO),
            None => campaign.spend,
        };

        let group = groups
            .entry(campaign.ad_account_id)
            .or_insert_with(|| AccountRollup {
                ad_account_id: campaign.ad_account_id,
                account_name: account_names
                    .get(&campaign.ad_account_id)
                    .cloned()
                    .unwrap_or_default(),
                total_spend: Decimal::ZERO,
                total_budget: Decimal::ZERO,
                available_balance: Decimal::ZERO,
                campaign_count: 0,
            });

        group.total_spend += spend;
        group.total_budget += campaign.budget;
        group.campaign_count += 1;
    }

    let mut grand_total_spend = Decimal::ZERO;
    let mut grand_total_budget = Decimal::ZERO;
    for group in groups.values_mut() {
        group.available_balance = group.total_budget - group.total_spend;
        grand_total_spend += group.total_spend;
        grand_total_budget += group.total_budget;
    }

    AnalyticsResponse {
        per_account: groups.into_values().collect(),
        grand_total_spend,
        grand_total_budget,
        total_campaigns: campaigns.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn campaign(id: i32, ad_account_id: i32, spend: Decimal, budget: Decimal) -> campaigns::Model {
        campaigns::Model {
            id,
            name: format!("campaign-{}", id),
            ad_account_id,
            client_id: None,
            status: "active".to_string(),
            budget,
            spend,
            start_date: None,
            is_synced: false,
            external_ref: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn names() -> HashMap<i32, String> {
        HashMap::from([(10, "Account X".to_string()), (20, "Account Y".to_string())])
    }

    #[test]
    fn groups_by_ad_account_with_grand_totals() {
        let campaigns = vec![
            campaign(1, 10, dec!(100), dec!(200)),
            campaign(2, 10, dec!(50), dec!(100)),
            campaign(3, 20, dec!(10), dec!(50)),
        ];

        let result = build_rollup(&campaigns, &names(), None);

        assert_eq!(result.per_account.len(), 2);

        let x = &result.per_account[0];
        assert_eq!(x.ad_account_id, 10);
        assert_eq!(x.total_spend, dec!(150));
        assert_eq!(x.total_budget, dec!(300));
        assert_eq!(x.available_balance, dec!(150));
        assert_eq!(x.campaign_count, 2);

        let y = &result.per_account[1];
        assert_eq!(y.ad_account_id, 20);
        assert_eq!(y.total_spend, dec!(10));
        assert_eq!(y.total_budget, dec!(50));
        assert_eq!(y.available_balance, dec!(40));
        assert_eq!(y.campaign_count, 1);

        assert_eq!(result.grand_total_spend, dec!(160));
        assert_eq!(result.grand_total_budget, dec!(350));
        assert_eq!(result.total_campaigns, 3);
    }

    #[test]
    fn date_window_zeroes_spend_but_not_budget() {
        let campaigns = vec![
            campaign(1, 10, dec!(100), dec!(200)),
            campaign(2, 10, dec!(50), dec!(100)),
        ];

        // A range that excludes all ledger activity
        let empty_window = HashMap::new();
        let result = build_rollup(&campaigns, &names(), Some(&empty_window));

        let x = &result.per_account[0];
        assert_eq!(x.total_spend, dec!(0));
        assert_eq!(x.total_budget, dec!(300));
        assert_eq!(x.available_balance, dec!(300));
    }

    #[test]
    fn windowed_sums_override_denormalized_spend() {
        let campaigns = vec![
            campaign(1, 10, dec!(100), dec!(200)),
            campaign(2, 10, dec!(50), dec!(100)),
        ];
        let window = HashMap::from([(1, dec!(25))]);

        let result = build_rollup(&campaigns, &names(), Some(&window));

        // Campaign 1 contributes its windowed 25; campaign 2 spent
        // nothing in the window
        assert_eq!(result.per_account[0].total_spend, dec!(25));
    }

    #[test]
    fn empty_input_yields_empty_rollup() {
        let result = build_rollup(&[], &HashMap::new(), None);
        assert!(result.per_account.is_empty());
        assert_eq!(result.grand_total_spend, dec!(0));
        assert_eq!(result.total_campaigns, 0);
    }

    #[test]
    fn groups_come_out_in_account_order() {
        let campaigns = vec![
            campaign(1, 20, dec!(1), dec!(10)),
            campaign(2, 10, dec!(2), dec!(10)),
        ];
        let result = build_rollup(&campaigns, &names(), None);
        let ids: Vec<i32> = result.per_account.iter().map(|g| g.ad_account_id).collect();
        assert_eq!(ids, vec![10, 20]);
    }
}
