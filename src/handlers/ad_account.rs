//! Ad account CRUD.
//!
//! Read models carry the account-scoped available balance
//! (spend_limit - total_spend), which is a different quantity from the
//! campaign-scoped balance shown on campaign cards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{ad_accounts, campaigns, prelude::*};
use crate::handlers::{bad_request, db_error, not_found};
use crate::models::ad_account::{
    AdAccountListResponse, AdAccountResponse, CreateAdAccountRequest, UpdateAdAccountRequest,
};
use crate::models::ErrorResponse;
use crate::services::balance;
use crate::AppState;

fn build_account_response(account: &ad_accounts::Model) -> AdAccountResponse {
    let available_balance =
        balance::account_scoped_balance(account.spend_limit, account.total_spend);

    AdAccountResponse {
        id: account.id,
        platform: account.platform.clone(),
        account_name: account.account_name.clone(),
        spend_limit: account.spend_limit,
        total_spend: account.total_spend,
        available_balance,
        overspent: balance::is_overspent(available_balance),
        client_id: account.client_id,
        created_at: account.created_at,
    }
}

/// GET /api/ad-accounts
pub async fn list_ad_accounts(
    State(state): State<AppState>,
) -> Result<Json<AdAccountListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let accounts = AdAccounts::find()
        .order_by(ad_accounts::Column::Id, Order::Asc)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(AdAccountListResponse {
        ad_accounts: accounts.iter().map(build_account_response).collect(),
    }))
}

/// GET /api/ad-accounts/{id}
pub async fn get_ad_account(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
) -> Result<Json<AdAccountResponse>, (StatusCode, Json<ErrorResponse>)> {
    let account = AdAccounts::find_by_id(account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Ad account {} not found", account_id)))?;

    Ok(Json(build_account_response(&account)))
}

/// POST /api/ad-accounts
pub async fn create_ad_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdAccountRequest>,
) -> Result<(StatusCode, Json<AdAccountResponse>), (StatusCode, Json<ErrorResponse>)> {
    if payload.platform.trim().is_empty() {
        return Err(bad_request("Platform cannot be empty"));
    }
    if payload.account_name.trim().is_empty() {
        return Err(bad_request("Account name cannot be empty"));
    }
    if payload.spend_limit < Decimal::ZERO {
        return Err(bad_request("Spend limit must be non-negative"));
    }
    if let Some(total_spend) = payload.total_spend {
        if total_spend < Decimal::ZERO {
            return Err(bad_request("Total spend must be non-negative"));
        }
    }

    if let Some(client_id) = payload.client_id {
        let client = Clients::find_by_id(client_id)
            .one(&state.db)
            .await
            .map_err(db_error)?;
        if client.is_none() {
            return Err(bad_request(format!("Client {} not found", client_id)));
        }
    }

    let new_account = ad_accounts::ActiveModel {
        platform: Set(payload.platform.trim().to_string()),
        account_name: Set(payload.account_name.trim().to_string()),
        spend_limit: Set(payload.spend_limit),
        total_spend: Set(payload.total_spend.unwrap_or(Decimal::ZERO)),
        client_id: Set(payload.client_id),
        created_at: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
    };

    let created = new_account.insert(&state.db).await.map_err(db_error)?;

    Ok((StatusCode::CREATED, Json(build_account_response(&created))))
}

/// PUT /api/ad-accounts/{id}
pub async fn update_ad_account(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
    Json(payload): Json<UpdateAdAccountRequest>,
) -> Result<Json<AdAccountResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(spend_limit) = payload.spend_limit {
        if spend_limit < Decimal::ZERO {
            return Err(bad_request("Spend limit must be non-negative"));
        }
    }
    if let Some(total_spend) = payload.total_spend {
        if total_spend < Decimal::ZERO {
            return Err(bad_request("Total spend must be non-negative"));
        }
    }

    let account = AdAccounts::find_by_id(account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Ad account {} not found", account_id)))?;

    if let Some(client_id) = payload.client_id {
        let client = Clients::find_by_id(client_id)
            .one(&state.db)
            .await
            .map_err(db_error)?;
        if client.is_none() {
            return Err(bad_request(format!("Client {} not found", client_id)));
        }
    }

    let mut active: ad_accounts::ActiveModel = account.into();
    if let Some(platform) = payload.platform {
        active.platform = Set(platform);
    }
    if let Some(account_name) = payload.account_name {
        active.account_name = Set(account_name);
    }
    if let Some(spend_limit) = payload.spend_limit {
        active.spend_limit = Set(spend_limit);
    }
    if let Some(total_spend) = payload.total_spend {
        active.total_spend = Set(total_spend);
    }
    if let Some(client_id) = payload.client_id {
        active.client_id = Set(Some(client_id));
    }

    let updated = active.update(&state.db).await.map_err(db_error)?;

    // Spend limits feed the campaign-scoped balances too
    state.cache.invalidate_all().await;

    Ok(Json(build_account_response(&updated)))
}

/// DELETE /api/ad-accounts/{id}
pub async fn delete_ad_account(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let account = AdAccounts::find_by_id(account_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Ad account {} not found", account_id)))?;

    let campaign_count = Campaigns::find()
        .filter(campaigns::Column::AdAccountId.eq(account_id))
        .count(&state.db)
        .await
        .map_err(db_error)?;

    if campaign_count > 0 {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!(
                    "Ad account {} still has {} campaigns",
                    account_id, campaign_count
                ),
            }),
        ));
    }

    account.delete(&state.db).await.map_err(db_error)?;

    Ok(StatusCode::NO_CONTENT)
}
