//! Campaign analytics rollup endpoint.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use crate::handlers::{bad_request, internal_error};
use crate::models::analytics::{AnalyticsQuery, AnalyticsResponse};
use crate::models::ErrorResponse;
use crate::services::analytics::{self, RollupFilters};
use crate::AppState;

/// GET /api/campaigns/analytics
pub async fn campaign_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let filters = parse_filters(&params)?;

    if let (Some(start), Some(end)) = (filters.start_date, filters.end_date) {
        if start > end {
            return Err(bad_request("startDate must be before or equal to endDate"));
        }
    }

    let response = analytics::rollup(&state.db, filters)
        .await
        .map_err(internal_error)?;

    Ok(Json(response))
}

/// Turn raw query strings into typed filters. Absent and empty
/// parameters both mean "no filter".
fn parse_filters(
    params: &AnalyticsQuery,
) -> Result<RollupFilters, (StatusCode, Json<ErrorResponse>)> {
    Ok(RollupFilters {
        ad_account_id: parse_id(params.ad_account_id.as_deref(), "adAccountId")?,
        campaign_id: parse_id(params.campaign_id.as_deref(), "campaignId")?,
        start_date: parse_date(params.start_date.as_deref(), "startDate")?,
        end_date: parse_date(params.end_date.as_deref(), "endDate")?,
    })
}

fn parse_id(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<i32>, (StatusCode, Json<ErrorResponse>)> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i32>()
            .map(Some)
            .map_err(|_| bad_request(format!("Invalid {} '{}'", name, s))),
    }
}

fn parse_date(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<NaiveDate>, (StatusCode, Json<ErrorResponse>)> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request(format!("Invalid {} format. Use YYYY-MM-DD", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::noop_state;

    fn test_app() -> Router {
        Router::new()
            .route("/api/campaigns/analytics", get(campaign_analytics))
            .with_state(noop_state())
    }

    #[test]
    fn empty_parameters_mean_no_filter() {
        let filters = parse_filters(&AnalyticsQuery {
            ad_account_id: Some("".to_string()),
            campaign_id: None,
            start_date: Some("".to_string()),
            end_date: None,
        })
        .unwrap();

        assert!(filters.ad_account_id.is_none());
        assert!(filters.campaign_id.is_none());
        assert!(filters.start_date.is_none());
        assert!(filters.end_date.is_none());
    }

    #[test]
    fn populated_parameters_parse() {
        let filters = parse_filters(&AnalyticsQuery {
            ad_account_id: Some("7".to_string()),
            campaign_id: Some("42".to_string()),
            start_date: Some("2026-01-01".to_string()),
            end_date: Some("2026-01-31".to_string()),
        })
        .unwrap();

        assert_eq!(filters.ad_account_id, Some(7));
        assert_eq!(filters.campaign_id, Some(42));
        assert_eq!(
            filters.start_date,
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[tokio::test]
    async fn invalid_date_format_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/campaigns/analytics?startDate=2026/01/01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("Invalid startDate format"));
    }

    #[tokio::test]
    async fn invalid_account_id_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/campaigns/analytics?adAccountId=not-a-number")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/campaigns/analytics?startDate=2026-02-01&endDate=2026-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
