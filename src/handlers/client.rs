//! Client CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Order, QueryOrder, Set};

use crate::entities::{clients, prelude::*};
use crate::handlers::{bad_request, db_error, not_found};
use crate::models::client::{
    ClientListResponse, ClientResponse, CreateClientRequest, UpdateClientRequest,
};
use crate::models::ErrorResponse;
use crate::AppState;

fn build_client_response(client: &clients::Model) -> ClientResponse {
    ClientResponse {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        company: client.company.clone(),
        created_at: client.created_at,
    }
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ClientListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let clients = Clients::find()
        .order_by(clients::Column::Id, Order::Asc)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(ClientListResponse {
        clients: clients.iter().map(build_client_response).collect(),
    }))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> Result<Json<ClientResponse>, (StatusCode, Json<ErrorResponse>)> {
    let client = Clients::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Client {} not found", client_id)))?;

    Ok(Json(build_client_response(&client)))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), (StatusCode, Json<ErrorResponse>)> {
    if payload.name.trim().is_empty() {
        return Err(bad_request("Client name cannot be empty"));
    }

    let new_client = clients::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email),
        phone: Set(payload.phone),
        company: Set(payload.company),
        created_at: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
    };

    let created = new_client.insert(&state.db).await.map_err(db_error)?;

    Ok((StatusCode::CREATED, Json(build_client_response(&created))))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, (StatusCode, Json<ErrorResponse>)> {
    let client = Clients::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Client {} not found", client_id)))?;

    let mut active: clients::ActiveModel = client.into();
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(bad_request("Client name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(company) = payload.company {
        active.company = Set(Some(company));
    }

    let updated = active.update(&state.db).await.map_err(db_error)?;

    Ok(Json(build_client_response(&updated)))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let client = Clients::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Client {} not found", client_id)))?;

    client.delete(&state.db).await.map_err(db_error)?;

    Ok(StatusCode::NO_CONTENT)
}
