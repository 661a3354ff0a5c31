use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Bookmark joined with its post and the post's author, for listing.
#[derive(Debug, FromRow)]
pub struct BookmarkWithPostRow {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub post_id: Uuid,
    pub post_title: String,
    pub post_content: String,
    pub post_tags: Vec<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
}

/// The unique (user_id, post_id) constraint is the duplicate guard; callers
/// map its violation to a conflict.
pub async fn create(db: &PgPool, user_id: Uuid, post_id: Uuid) -> sqlx::Result<Bookmark> {
    sqlx::query_as::<_, Bookmark>(
        r#"
        INSERT INTO bookmarks (user_id, post_id)
        VALUES ($1, $2)
        RETURNING id, user_id, post_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(db)
    .await
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<BookmarkWithPostRow>> {
    sqlx::query_as::<_, BookmarkWithPostRow>(
        r#"
        SELECT b.id, b.created_at,
               p.id AS post_id, p.title AS post_title, p.content AS post_content,
               p.tags AS post_tags,
               u.id AS author_id, u.name AS author_name, u.email AS author_email
        FROM bookmarks b
        JOIN posts p ON p.id = b.post_id
        JOIN users u ON u.id = p.author_id
        WHERE b.user_id = $1
        ORDER BY b.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT count(*) FROM bookmarks")
        .fetch_one(db)
        .await
}
