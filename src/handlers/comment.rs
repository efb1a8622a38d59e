//! Campaign comment log: an ordered sequence of (timestamp, author,
//! text) records owned by the campaign.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set};

use crate::entities::{campaign_comments, prelude::*};
use crate::handlers::{bad_request, db_error, not_found};
use crate::models::comment::{CommentListResponse, CommentResponse, CreateCommentRequest};
use crate::models::ErrorResponse;
use crate::AppState;

fn build_comment_response(comment: &campaign_comments::Model) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        campaign_id: comment.campaign_id,
        author: comment.author.clone(),
        body: comment.body.clone(),
        created_at: comment.created_at,
    }
}

/// GET /api/campaigns/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
) -> Result<Json<CommentListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?;
    if campaign.is_none() {
        return Err(not_found(format!("Campaign {} not found", campaign_id)));
    }

    let comments = CampaignComments::find()
        .filter(campaign_comments::Column::CampaignId.eq(campaign_id))
        .order_by(campaign_comments::Column::CreatedAt, Order::Asc)
        .order_by(campaign_comments::Column::Id, Order::Asc)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(CommentListResponse {
        comments: comments.iter().map(build_comment_response).collect(),
    }))
}

/// POST /api/campaigns/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), (StatusCode, Json<ErrorResponse>)> {
    if payload.author.trim().is_empty() {
        return Err(bad_request("Comment author cannot be empty"));
    }
    if payload.body.trim().is_empty() {
        return Err(bad_request("Comment body cannot be empty"));
    }

    let campaign = Campaigns::find_by_id(campaign_id)
        .one(&state.db)
        .await
        .map_err(db_error)?;
    if campaign.is_none() {
        return Err(not_found(format!("Campaign {} not found", campaign_id)));
    }

    let new_comment = campaign_comments::ActiveModel {
        campaign_id: Set(campaign_id),
        author: Set(payload.author.trim().to_string()),
        body: Set(payload.body.trim().to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let created = new_comment.insert(&state.db).await.map_err(db_error)?;

    Ok((
        StatusCode::CREATED,
        Json(build_comment_response(&created)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::noop_state;

    fn test_app() -> Router {
        Router::new()
            .route("/api/campaigns/{id}/comments", post(create_comment))
            .with_state(noop_state())
    }

    #[tokio::test]
    async fn blank_comment_body_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns/1/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"author":"dana","body":"   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("body cannot be empty"));
    }

    #[tokio::test]
    async fn blank_author_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/campaigns/1/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"author":"","body":"looks good"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
