use serde::{Deserialize, Serialize};

use super::repo::Category;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesListResponse {
    pub count: usize,
    pub categories: Vec<Category>,
}
