use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreatePostRequest, LikeResponse, Pagination, PostWithAuthor, PostsListResponse, SearchQuery,
    UpdatePostRequest,
};
use super::repo::{self, Post};
use crate::auth::extractors::AuthUser;
use crate::bookmarks::repo::{self as bookmarks_repo, Bookmark};
use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::ownership::ensure_owner;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/search", get(search_posts))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/like", post(toggle_like))
        .route("/:id/bookmark", post(bookmark_post))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }
    if payload.content.is_empty() {
        return Err(ApiError::Validation("Content is required".into()));
    }

    let post = repo::create(&state.db, auth.id, title, &payload.content, &payload.tags).await?;
    info!(post_id = %post.id, author_id = %auth.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<PostsListResponse>, ApiError> {
    let rows = repo::list_published(&state.db, p.limit, p.offset).await?;
    let posts: Vec<PostWithAuthor> = rows.into_iter().map(Into::into).collect();
    Ok(Json(PostsListResponse {
        count: posts.len(),
        posts,
    }))
}

#[instrument(skip(state))]
pub async fn search_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PostsListResponse>, ApiError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::Validation("Search query is required".into()));
    }

    let likes = q.parse::<i32>().ok();
    let rows = repo::search_published(&state.db, q, likes).await?;
    let posts: Vec<PostWithAuthor> = rows.into_iter().map(Into::into).collect();
    Ok(Json(PostsListResponse {
        count: posts.len(),
        posts,
    }))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostWithAuthor>, ApiError> {
    let row = repo::find_with_author(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let updated = repo::update_owned(
        &state.db,
        id,
        auth.id,
        payload.title.as_deref(),
        payload.content.as_deref(),
        payload.tags.as_deref(),
        payload.is_published,
    )
    .await?;
    let post = ensure_owner(updated, auth.id)?;
    info!(post_id = %post.id, "post updated");
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let deleted = repo::delete_owned(&state.db, id, auth.id).await?;
    let post = ensure_owner(deleted, auth.id)?;
    info!(post_id = %post.id, "post deleted");
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    if repo::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }

    let (likes, liked) = match repo::toggle_like(&state.db, id, auth.id).await {
        Ok(result) => result,
        // the post vanished between the check and the toggle
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(ApiError::NotFound("Post not found".into()))
        }
        Err(sqlx::Error::RowNotFound) => return Err(ApiError::NotFound("Post not found".into())),
        Err(e) => return Err(e.into()),
    };
    Ok(Json(LikeResponse { likes, liked }))
}

#[instrument(skip(state))]
pub async fn bookmark_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let bookmark = match bookmarks_repo::create(&state.db, auth.id, id).await {
        Ok(b) => b,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("Already bookmarked".into()));
        }
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(ApiError::NotFound("Post not found".into()));
        }
        Err(e) => return Err(e.into()),
    };
    info!(post_id = %id, user_id = %auth.id, "post bookmarked");
    Ok((StatusCode::CREATED, Json(bookmark)))
}
