use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::CommentWithUserRow;
use crate::auth::PublicUser;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: String,
}

/// Comment with its author populated, as returned by the per-post listing.
#[derive(Debug, Serialize)]
pub struct CommentWithUser {
    pub id: Uuid,
    pub comment: String,
    pub post_id: Uuid,
    pub user: PublicUser,
    pub created_at: OffsetDateTime,
}

impl From<CommentWithUserRow> for CommentWithUser {
    fn from(row: CommentWithUserRow) -> Self {
        Self {
            id: row.id,
            comment: row.comment,
            post_id: row.post_id,
            user: PublicUser {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentsListResponse {
    pub count: usize,
    pub comments: Vec<CommentWithUser>,
}
