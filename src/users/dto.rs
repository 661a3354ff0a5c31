use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::PublicUser;
use crate::bookmarks::repo::BookmarkWithPostRow;

/// Partial profile update; absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct BookmarkedPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct BookmarkItem {
    pub id: Uuid,
    pub post: BookmarkedPost,
    pub created_at: OffsetDateTime,
}

impl From<BookmarkWithPostRow> for BookmarkItem {
    fn from(row: BookmarkWithPostRow) -> Self {
        Self {
            id: row.id,
            post: BookmarkedPost {
                id: row.post_id,
                title: row.post_title,
                content: row.post_content,
                tags: row.post_tags,
                author: PublicUser {
                    id: row.author_id,
                    name: row.author_name,
                    email: row.author_email,
                },
            },
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarksListResponse {
    pub count: usize,
    pub bookmarks: Vec<BookmarkItem>,
}
