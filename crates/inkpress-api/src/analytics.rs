//! Post analytics operations.
//!
//! Analytics rows are denormalized counters maintained store-side; the
//! dashboard reads them as-is and never reconciles them against the live
//! count queries used elsewhere.

use crate::client::{encode_component, ApiClient};
use inkpress_types::PostAnalytics;
use tracing::error;

impl ApiClient {
    /// List the analytics rows for an author's posts, newest first.
    pub async fn get_post_analytics(&self, author_id: &str) -> Vec<PostAnalytics> {
        let url = format!(
            "{}?author_id=eq.{}&select=*&order=created_at.desc",
            self.rest_url("post_analytics"),
            encode_component(author_id)
        );
        match self.fetch_rows(&url, "fetch post analytics").await {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, author_id, "Error fetching post analytics");
                Vec::new()
            }
        }
    }
}
