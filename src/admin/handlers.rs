use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::dto::StatsResponse;
use super::repo;
use crate::auth::extractors::AuthUser;
use crate::bookmarks::repo as bookmarks_repo;
use crate::comments::repo as comments_repo;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

/// Read-only counters over the existing collections.
#[instrument(skip(state))]
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let total_users = repo::count_users(&state.db).await?;
    let total_posts = repo::count_posts(&state.db).await?;
    let total_comments = comments_repo::count(&state.db).await?;
    let total_bookmarks = bookmarks_repo::count(&state.db).await?;

    Ok(Json(StatsResponse {
        total_users,
        total_posts,
        total_comments,
        total_bookmarks,
    }))
}
