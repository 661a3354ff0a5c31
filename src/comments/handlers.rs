use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CommentWithUser, CommentsListResponse, CreateCommentRequest};
use super::repo::{self, Comment};
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::ownership::ensure_owner;
use crate::posts::repo as posts_repo;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // the path id names a post for GET/POST and a comment for DELETE,
    // mirroring the public API shape
    Router::new().route(
        "/:id",
        get(list_comments).post(create_comment).delete(delete_comment),
    )
}

#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let body = payload.comment.trim();
    if body.is_empty() {
        return Err(ApiError::Validation("Comment is required".into()));
    }

    if posts_repo::find_by_id(&state.db, post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }

    let comment = repo::create(&state.db, post_id, auth.id, body).await?;
    info!(comment_id = %comment.id, %post_id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<CommentsListResponse>, ApiError> {
    let rows = repo::list_by_post(&state.db, post_id).await?;
    let comments: Vec<CommentWithUser> = rows.into_iter().map(Into::into).collect();
    Ok(Json(CommentsListResponse {
        count: comments.len(),
        comments,
    }))
}

#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Comment>, ApiError> {
    let deleted = repo::delete_owned(&state.db, comment_id, auth.id).await?;
    let comment = ensure_owner(deleted, auth.id)?;
    info!(comment_id = %comment.id, "comment deleted");
    Ok(Json(comment))
}
