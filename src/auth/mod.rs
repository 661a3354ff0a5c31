use axum::Router;

use crate::state::AppState;

mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub use dto::PublicUser;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
