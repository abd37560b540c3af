//! Category and tag operations.

use crate::client::ApiClient;
use inkpress_types::{Category, NewCategory, NewTag, Tag};
use tracing::error;

impl ApiClient {
    /// List all categories, alphabetical.
    pub async fn get_categories(&self) -> Vec<Category> {
        let url = format!("{}?select=*&order=name.asc", self.rest_url("categories"));
        match self.fetch_rows(&url, "fetch categories").await {
            Ok(categories) => categories,
            Err(err) => {
                error!(error = %err, "Error fetching categories");
                Vec::new()
            }
        }
    }

    /// List all tags, alphabetical.
    pub async fn get_tags(&self) -> Vec<Tag> {
        let url = format!("{}?select=*&order=name.asc", self.rest_url("tags"));
        match self.fetch_rows(&url, "fetch tags").await {
            Ok(tags) => tags,
            Err(err) => {
                error!(error = %err, "Error fetching tags");
                Vec::new()
            }
        }
    }

    /// Insert a category and return the persisted row.
    pub async fn create_category(&self, category: &NewCategory) -> Option<Category> {
        match self
            .insert_returning("categories", category, "create category")
            .await
        {
            Ok(category) => category,
            Err(err) => {
                error!(error = %err, "Error creating category");
                None
            }
        }
    }

    /// Insert a tag and return the persisted row.
    pub async fn create_tag(&self, tag: &NewTag) -> Option<Tag> {
        match self.insert_returning("tags", tag, "create tag").await {
            Ok(tag) => tag,
            Err(err) => {
                error!(error = %err, "Error creating tag");
                None
            }
        }
    }
}
