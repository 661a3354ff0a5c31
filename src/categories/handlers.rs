use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CategoriesListResponse, CreateCategoryRequest};
use super::repo::{self, Category};
use crate::auth::extractors::AuthUser;
use crate::error::{is_unique_violation, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".into()));
    }

    if repo::find_by_name(&state.db, name).await?.is_some() {
        return Err(ApiError::Conflict("Category already exists".into()));
    }

    // the unique index backstops the check above under concurrent creation
    let category = match repo::create(&state.db, name, payload.description.as_deref()).await {
        Ok(c) => c,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("Category already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };
    info!(category_id = %category.id, user_id = %auth.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesListResponse>, ApiError> {
    let categories = repo::list_all(&state.db).await?;
    Ok(Json(CategoriesListResponse {
        count: categories.len(),
        categories,
    }))
}
