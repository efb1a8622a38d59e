//! Spend calendar endpoints: the daily-spend ledger behind the
//! campaign detail calendar grid.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use sea_orm::EntityTrait;

use crate::entities::prelude::*;
use crate::handlers::{bad_request, db_error, internal_error, not_found};
use crate::models::daily_spend::{
    DailySpendEntry, DailySpendListResponse, DailySpendQuery, UpsertDailySpendRequest,
};
use crate::models::ErrorResponse;
use crate::services::aggregator::{self, SPEND_WINDOW_DAYS};
use crate::services::ledger;
use crate::AppState;

/// GET /api/campaigns/{id}/daily-spends
pub async fn list_daily_spends(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
    Query(params): Query<DailySpendQuery>,
) -> Result<Json<DailySpendListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let from = parse_bound(params.from.as_deref(), "from")?;
    let to = parse_bound(params.to.as_deref(), "to")?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(bad_request("'from' must be before or equal to 'to'"));
        }
    }

    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?;
    if campaign.is_none() {
        return Err(not_found(format!("Campaign {} not found", campaign_id)));
    }

    let entries = ledger::list_entries(&state.db, campaign_id, from, to)
        .await
        .map_err(internal_error)?;

    let today = Utc::now().date_naive();
    let window_total = aggregator::total_for_window(&state.db, campaign_id, today, SPEND_WINDOW_DAYS)
        .await
        .map_err(internal_error)?;

    let entries = entries
        .iter()
        .map(|entry| {
            let flags = ledger::editability_window(today, entry.date);
            DailySpendEntry {
                date: entry.date,
                amount: entry.amount,
                editable: flags.editable,
                has_input_controls: flags.has_input_controls,
            }
        })
        .collect();

    Ok(Json(DailySpendListResponse {
        entries,
        window_total,
        window_days: SPEND_WINDOW_DAYS,
    }))
}

/// POST /api/campaigns/{id}/daily-spends
///
/// Upserts the spend for one calendar day and nudges the spend
/// synchronizer. Validation happens before any write.
pub async fn upsert_daily_spend(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<UpsertDailySpendRequest>,
) -> Result<Json<DailySpendEntry>, (StatusCode, Json<ErrorResponse>)> {
    ledger::validate_amount(payload.amount).map_err(bad_request)?;
    let date = ledger::normalize_date(&payload.date).map_err(bad_request)?;

    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?;
    if campaign.is_none() {
        return Err(not_found(format!("Campaign {} not found", campaign_id)));
    }

    let stored = ledger::upsert_entry(&state.db, campaign_id, date, payload.amount)
        .await
        .map_err(internal_error)?;

    // Debounced: rapid edits coalesce into a single campaign update
    state.spend_sync.notify(campaign_id);

    let today = Utc::now().date_naive();
    let flags = ledger::editability_window(today, stored.date);

    Ok(Json(DailySpendEntry {
        date: stored.date,
        amount: stored.amount,
        editable: flags.editable,
        has_input_controls: flags.has_input_controls,
    }))
}

fn parse_bound(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<NaiveDate>, (StatusCode, Json<ErrorResponse>)> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request(format!("Invalid {} date '{}'. Use YYYY-MM-DD", name, s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::noop_state;

    fn test_app() -> Router {
        Router::new()
            .route("/api/campaigns/{id}/daily-spends", get(list_daily_spends))
            .route("/api/campaigns/{id}/daily-spends", post(upsert_daily_spend))
            .with_state(noop_state())
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_before_any_write() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns/1/daily-spends")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"date":"2026-06-01","amount":"-5"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("non-negative"));
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns/1/daily-spends")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"date":"01/06/2026","amount":"5"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("Invalid date"));
    }

    #[tokio::test]
    async fn malformed_query_bound_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/campaigns/1/daily-spends?from=2026/06/01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/campaigns/1/daily-spends?from=2026-06-10&to=2026-06-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
