use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{build_prompt, GenerateRequest, GenerateResponse};
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/generate-blog", post(generate_blog))
}

#[instrument(skip(state, payload))]
pub async fn generate_blog(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let topic = payload.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::Validation("Topic is required".into()));
    }

    let prompt = build_prompt(topic, payload.word_count, payload.tone.as_deref());
    let content = state.generator.generate(&prompt).await?;
    Ok(Json(GenerateResponse { content }))
}
