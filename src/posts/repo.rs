use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::ownership::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub likes: i32,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

/// Flat join row; `dto::PostWithAuthor` nests the author for the wire.
#[derive(Debug, FromRow)]
pub struct PostWithAuthorRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub likes: i32,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
}

const WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.content, p.tags, p.likes, p.is_published,
           p.created_at, p.updated_at,
           u.id AS author_id, u.name AS author_name, u.email AS author_email
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub async fn create(
    db: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
    tags: &[String],
) -> sqlx::Result<Post> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, title, content, tags)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, title, content, tags, likes, is_published,
                  created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(content)
    .bind(tags)
    .fetch_one(db)
    .await
}

pub async fn list_published(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<PostWithAuthorRow>> {
    sqlx::query_as::<_, PostWithAuthorRow>(&format!(
        r#"
        {WITH_AUTHOR}
        WHERE p.is_published
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn find_with_author(db: &PgPool, id: Uuid) -> sqlx::Result<Option<PostWithAuthorRow>> {
    sqlx::query_as::<_, PostWithAuthorRow>(&format!(
        r#"
        {WITH_AUTHOR}
        WHERE p.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Post>> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, tags, likes, is_published,
               created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Published posts matching the query in title, content or any tag; when the
/// query parses as a number, posts with exactly that many likes also match.
pub async fn search_published(
    db: &PgPool,
    query: &str,
    likes: Option<i32>,
) -> sqlx::Result<Vec<PostWithAuthorRow>> {
    let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
    sqlx::query_as::<_, PostWithAuthorRow>(&format!(
        r#"
        {WITH_AUTHOR}
        WHERE p.is_published
          AND (p.title ILIKE $1
               OR p.content ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(p.tags) AS tag WHERE tag ILIKE $1)
               OR p.likes = $2)
        ORDER BY p.created_at DESC
        "#
    ))
    .bind(pattern)
    .bind(likes)
    .fetch_all(db)
    .await
}

/// Conditional update scoped to the owner; no row means missing or foreign.
pub async fn update_owned(
    db: &PgPool,
    id: Uuid,
    author_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
    tags: Option<&[String]>,
    is_published: Option<bool>,
) -> sqlx::Result<Option<Post>> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($3, title),
            content = COALESCE($4, content),
            tags = COALESCE($5, tags),
            is_published = COALESCE($6, is_published),
            updated_at = now()
        WHERE id = $1 AND author_id = $2
        RETURNING id, author_id, title, content, tags, likes, is_published,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(author_id)
    .bind(title)
    .bind(content)
    .bind(tags)
    .bind(is_published)
    .fetch_optional(db)
    .await
}

pub async fn delete_owned(db: &PgPool, id: Uuid, author_id: Uuid) -> sqlx::Result<Option<Post>> {
    sqlx::query_as::<_, Post>(
        r#"
        DELETE FROM posts
        WHERE id = $1 AND author_id = $2
        RETURNING id, author_id, title, content, tags, likes, is_published,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(author_id)
    .fetch_optional(db)
    .await
}

/// Flips the caller's membership in the liked-by set and moves the counter in
/// the same transaction. The insert-or-conflict decides the direction, so two
/// concurrent toggles by the same user serialize on the membership row and net
/// to a single deterministic toggle; the counter only moves when a membership
/// row actually changed.
pub async fn toggle_like(db: &PgPool, post_id: Uuid, user_id: Uuid) -> sqlx::Result<(i32, bool)> {
    let mut tx = db.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO post_likes (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let (likes, liked) = if inserted == 1 {
        let likes: i32 =
            sqlx::query_scalar("UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;
        (likes, true)
    } else {
        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed == 1 {
            let likes: i32 = sqlx::query_scalar(
                "UPDATE posts SET likes = likes - 1 WHERE id = $1 RETURNING likes",
            )
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;
            (likes, false)
        } else {
            // a concurrent request removed the membership first
            let likes: i32 = sqlx::query_scalar("SELECT likes FROM posts WHERE id = $1")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;
            (likes, false)
        }
    };

    tx.commit().await?;
    Ok((likes, liked))
}
