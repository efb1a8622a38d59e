//! Campaign CRUD and read models.
//!
//! Read models carry the campaign-scoped available balance; the
//! denormalized `spend` column is read-only here (see spend_sync).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Order, QueryOrder, Set,
};

use crate::entities::{campaigns, prelude::*};
use crate::handlers::{bad_request, db_error, not_found};
use crate::models::campaign::{
    CampaignListResponse, CampaignResponse, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::models::ErrorResponse;
use crate::services::balance;
use crate::AppState;

pub(crate) const VALID_STATUSES: [&str; 4] = ["active", "paused", "completed", "draft"];

fn validate_status(status: &str) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(bad_request(format!(
            "Invalid status '{}'. Expected one of: {}",
            status,
            VALID_STATUSES.join(", ")
        )))
    }
}

fn parse_start_date(raw: &str) -> Result<NaiveDate, (StatusCode, Json<ErrorResponse>)> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid startDate '{}'. Use YYYY-MM-DD", raw)))
}

pub(crate) fn build_campaign_response(
    campaign: &campaigns::Model,
    spend_limit: Decimal,
) -> CampaignResponse {
    let available_balance = balance::campaign_scoped_balance(spend_limit, campaign.spend);

    CampaignResponse {
        id: campaign.id,
        name: campaign.name.clone(),
        ad_account_id: campaign.ad_account_id,
        client_id: campaign.client_id,
        status: campaign.status.clone(),
        budget: campaign.budget,
        spend: campaign.spend,
        available_balance,
        overspent: balance::is_overspent(available_balance),
        start_date: campaign.start_date,
        is_synced: campaign.is_synced,
        external_ref: campaign.external_ref.clone(),
        created_at: campaign.created_at,
        updated_at: campaign.updated_at,
    }
}

async fn account_spend_limits(
    db: &DatabaseConnection,
) -> Result<HashMap<i32, Decimal>, (StatusCode, Json<ErrorResponse>)> {
    let accounts = AdAccounts::find().all(db).await.map_err(db_error)?;
    Ok(accounts
        .into_iter()
        .map(|account| (account.id, account.spend_limit))
        .collect())
}

/// GET /api/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignListResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(cached) = state.cache.get_campaign_list().await {
        return Ok(Json(CampaignListResponse { campaigns: cached }));
    }

    let campaigns = Campaigns::find()
        .order_by(campaigns::Column::Id, Order::Asc)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    let limits = account_spend_limits(&state.db).await?;

    let responses: Vec<CampaignResponse> = campaigns
        .iter()
        .map(|campaign| {
            let spend_limit = limits
                .get(&campaign.ad_account_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            build_campaign_response(campaign, spend_limit)
        })
        .collect();

    state.cache.put_campaign_list(responses.clone()).await;

    Ok(Json(CampaignListResponse {
        campaigns: responses,
    }))
}

/// GET /api/campaigns/{id}
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
) -> Result<Json<CampaignResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(cached) = state.cache.get_campaign(campaign_id).await {
        return Ok(Json(cached));
    }

    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Campaign {} not found", campaign_id)))?;

    let spend_limit = AdAccounts::find_by_id(campaign.ad_account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .map(|account| account.spend_limit)
        .unwrap_or(Decimal::ZERO);

    let response = build_campaign_response(&campaign, spend_limit);
    state.cache.put_campaign(response.clone()).await;

    Ok(Json(response))
}

/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), (StatusCode, Json<ErrorResponse>)> {
    if payload.name.trim().is_empty() {
        return Err(bad_request("Campaign name cannot be empty"));
    }

    let status = payload.status.unwrap_or_else(|| "draft".to_string());
    validate_status(&status)?;

    let start_date = payload
        .start_date
        .as_deref()
        .map(parse_start_date)
        .transpose()?;

    if let Some(budget) = payload.budget {
        if budget < Decimal::ZERO {
            return Err(bad_request("Budget must be non-negative"));
        }
    }

    let account = AdAccounts::find_by_id(payload.ad_account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| bad_request(format!("Ad account {} not found", payload.ad_account_id)))?;

    if let Some(client_id) = payload.client_id {
        let client = Clients::find_by_id(client_id)
            .one(&state.db)
            .await
            .map_err(db_error)?;
        if client.is_none() {
            return Err(bad_request(format!("Client {} not found", client_id)));
        }
    }

    let now = Utc::now().naive_utc();
    let new_campaign = campaigns::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        ad_account_id: Set(payload.ad_account_id),
        client_id: Set(payload.client_id),
        status: Set(status),
        budget: Set(payload.budget.unwrap_or(Decimal::ZERO)),
        spend: Set(Decimal::ZERO),
        start_date: Set(start_date),
        is_synced: Set(payload.is_synced.unwrap_or(false)),
        external_ref: Set(payload.external_ref),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    };

    let created = new_campaign.insert(&state.db).await.map_err(db_error)?;

    state.cache.invalidate_campaign(created.id).await;

    tracing::info!("Created campaign {} ('{}')", created.id, created.name);

    Ok((
        StatusCode::CREATED,
        Json(build_campaign_response(&created, account.spend_limit)),
    ))
}

/// PUT /api/campaigns/{id}
///
/// `spend` is not an accepted field: only the synchronizer writes it.
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<CampaignResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(status) = payload.status.as_deref() {
        validate_status(status)?;
    }
    let start_date = payload
        .start_date
        .as_deref()
        .map(parse_start_date)
        .transpose()?;
    if let Some(budget) = payload.budget {
        if budget < Decimal::ZERO {
            return Err(bad_request("Budget must be non-negative"));
        }
    }

    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Campaign {} not found", campaign_id)))?;

    let target_account_id = payload.ad_account_id.unwrap_or(campaign.ad_account_id);
    let account = AdAccounts::find_by_id(target_account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| bad_request(format!("Ad account {} not found", target_account_id)))?;

    if let Some(client_id) = payload.client_id {
        let client = Clients::find_by_id(client_id)
            .one(&state.db)
            .await
            .map_err(db_error)?;
        if client.is_none() {
            return Err(bad_request(format!("Client {} not found", client_id)));
        }
    }

    let mut active: campaigns::ActiveModel = campaign.into();
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(bad_request("Campaign name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(ad_account_id) = payload.ad_account_id {
        active.ad_account_id = Set(ad_account_id);
    }
    if let Some(client_id) = payload.client_id {
        active.client_id = Set(Some(client_id));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(budget) = payload.budget {
        active.budget = Set(budget);
    }
    if let Some(date) = start_date {
        active.start_date = Set(Some(date));
    }
    active.updated_at = Set(Some(Utc::now().naive_utc()));

    let updated = active.update(&state.db).await.map_err(db_error)?;

    state.cache.invalidate_campaign(campaign_id).await;

    Ok(Json(build_campaign_response(&updated, account.spend_limit)))
}

/// DELETE /api/campaigns/{id}
///
/// Ledger entries and comments cascade with the campaign.
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Campaign {} not found", campaign_id)))?;

    campaign.delete(&state.db).await.map_err(db_error)?;

    state.cache.invalidate_campaign(campaign_id).await;

    tracing::info!("Deleted campaign {}", campaign_id);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::Request,
        routing::{post, put},
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::noop_state;

    fn test_app() -> Router {
        Router::new()
            .route("/api/campaigns", post(create_campaign))
            .route("/api/campaigns/{id}", put(update_campaign))
            .with_state(noop_state())
    }

    #[tokio::test]
    async fn create_rejects_unknown_status() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name":"Spring push","adAccountId":1,"status":"archived"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("Invalid status"));
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"   ","adAccountId":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_malformed_start_date() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name":"Spring push","adAccountId":1,"startDate":"06/01/2026"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_rejects_negative_budget() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/campaigns/1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"budget":"-100"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn update_payload_has_no_spend_field() {
        // A client sending `spend` gets it silently dropped; the
        // denormalized total is writable only by the synchronizer
        let parsed: UpdateCampaignRequest =
            serde_json::from_str(r#"{"spend":"9999","name":"n"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("n"));
    }

    #[test]
    fn status_list_is_closed() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
        assert!(validate_status("deleted").is_err());
    }
}
