use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::ownership::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

#[derive(Debug, FromRow)]
pub struct CommentWithUserRow {
    pub id: Uuid,
    pub comment: String,
    pub post_id: Uuid,
    pub created_at: OffsetDateTime,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
}

pub async fn create(
    db: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    comment: &str,
) -> sqlx::Result<Comment> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, comment)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, user_id, comment, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(comment)
    .fetch_one(db)
    .await
}

pub async fn list_by_post(db: &PgPool, post_id: Uuid) -> sqlx::Result<Vec<CommentWithUserRow>> {
    sqlx::query_as::<_, CommentWithUserRow>(
        r#"
        SELECT c.id, c.comment, c.post_id, c.created_at,
               u.id AS user_id, u.name AS user_name, u.email AS user_email
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await
}

/// Conditional delete scoped to the commenter; no row means missing or foreign.
pub async fn delete_owned(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<Option<Comment>> {
    sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments
        WHERE id = $1 AND user_id = $2
        RETURNING id, post_id, user_id, comment, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT count(*) FROM comments")
        .fetch_one(db)
        .await
}
