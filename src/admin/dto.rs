use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_comments: i64,
    pub total_bookmarks: i64,
}
