//! Comment operations.

use crate::client::{encode_component, ApiClient};
use inkpress_types::{Comment, CommentWithAuthor, NewComment};
use tracing::error;

impl ApiClient {
    fn comments_by_post_url(&self, post_id: &str) -> String {
        format!(
            "{}?post_id=eq.{}&is_approved=eq.true&select=*,author:profiles(*)&order=created_at.asc",
            self.rest_url("comments"),
            encode_component(post_id)
        )
    }

    /// List a post's approved comments with their authors, oldest first.
    pub async fn get_comments_by_post(&self, post_id: &str) -> Vec<CommentWithAuthor> {
        let url = self.comments_by_post_url(post_id);
        match self.fetch_rows(&url, "fetch comments").await {
            Ok(comments) => comments,
            Err(err) => {
                error!(error = %err, post_id, "Error fetching comments");
                Vec::new()
            }
        }
    }

    /// Insert a comment and return the persisted row.
    pub async fn create_comment(&self, comment: &NewComment) -> Option<Comment> {
        match self
            .insert_returning("comments", comment, "create comment")
            .await
        {
            Ok(comment) => comment,
            Err(err) => {
                error!(error = %err, "Error creating comment");
                None
            }
        }
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, comment_id: &str) -> bool {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url("comments"),
            encode_component(comment_id)
        );
        match self.delete_where(&url, "delete comment").await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, comment_id, "Error deleting comment");
                false
            }
        }
    }
}
