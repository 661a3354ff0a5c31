use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{
    BookmarkItem, BookmarksListResponse, ChangePasswordRequest, UpdateProfileRequest,
};
use crate::auth::extractors::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::auth::PublicUser;
use crate::bookmarks::repo as bookmarks_repo;
use crate::error::{is_unique_violation, ApiError};
use crate::state::AppState;
use crate::validate::is_valid_email;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/update", put(update_profile))
        .route("/change-password", put(change_password))
        .route("/bookmarks", get(list_bookmarks))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let name = payload.name.as_deref().map(str::trim);
    if let Some(name) = name {
        if name.len() < 2 {
            return Err(ApiError::Validation("Name must be at least 2 characters".into()));
        }
    }

    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase());
    if let Some(email) = email.as_deref() {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
    }

    let updated = match User::update_profile(&state.db, auth.id, name, email.as_deref()).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };
    let user = updated.ok_or_else(|| ApiError::Unauthenticated("User not found".into()))?;
    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if payload.new_password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    let user = User::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("User not found".into()))?;

    if !verify_password(&payload.old_password, &user.password_hash)? {
        warn!(user_id = %user.id, "change password with wrong old password");
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    User::set_password(&state.db, user.id, &hash).await?;
    info!(user_id = %user.id, "password changed");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BookmarksListResponse>, ApiError> {
    let rows = bookmarks_repo::list_by_user(&state.db, auth.id).await?;
    let bookmarks: Vec<BookmarkItem> = rows.into_iter().map(Into::into).collect();
    Ok(Json(BookmarksListResponse {
        count: bookmarks.len(),
        bookmarks,
    }))
}
