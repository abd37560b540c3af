//! Like, bookmark, and follow operations.
//!
//! Toggles are check-then-act: read the membership row for the (actor,
//! target) pair, delete it when present, insert it when absent. There is no
//! conditional write at this layer, so two concurrent toggles for the same
//! pair can double-insert or miss a delete; single-caller double-toggle is
//! idempotent.

use crate::client::{encode_component, ApiClient};
use crate::posts::{id_list, POST_WITH_AUTHOR};
use inkpress_types::{NewBookmark, NewFollow, NewLike, PostWithAuthor};
use serde::Deserialize;
use tracing::error;

/// What a toggle does given the membership it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// No row observed: insert one.
    Set,
    /// Row observed: delete it.
    Unset,
}

impl ToggleAction {
    /// Decide the action from observed membership.
    pub fn for_membership(present: bool) -> Self {
        if present {
            ToggleAction::Unset
        } else {
            ToggleAction::Set
        }
    }

    /// The membership state after this action succeeds.
    pub fn resulting_membership(self) -> bool {
        matches!(self, ToggleAction::Set)
    }
}

#[derive(Deserialize)]
struct MembershipRow {
    id: String,
}

#[derive(Deserialize)]
struct BookmarkRow {
    post_id: String,
}

impl ApiClient {
    fn pair_url(&self, table: &str, key_a: (&str, &str), key_b: (&str, &str)) -> String {
        format!(
            "{}?{}=eq.{}&{}=eq.{}&select=id&limit=1",
            self.rest_url(table),
            key_a.0,
            encode_component(key_a.1),
            key_b.0,
            encode_component(key_b.1)
        )
    }

    async fn membership_row(
        &self,
        table: &str,
        key_a: (&str, &str),
        key_b: (&str, &str),
        context: &'static str,
    ) -> Option<MembershipRow> {
        let url = self.pair_url(table, key_a, key_b);
        match self.fetch_maybe_single(&url, context).await {
            Ok(row) => row,
            Err(err) => {
                error!(error = %err, table, "Error checking membership");
                None
            }
        }
    }

    async fn delete_row_by_id(&self, table: &'static str, id: &str) -> bool {
        let url = format!("{}?id=eq.{}", self.rest_url(table), encode_component(id));
        match self.delete_where(&url, "delete membership row").await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, table, "Error deleting membership row");
                false
            }
        }
    }

    /// Toggle a like for (user, post). Returns success.
    pub async fn toggle_like(&self, user_id: &str, post_id: &str) -> bool {
        let existing = self
            .membership_row("likes", ("user_id", user_id), ("post_id", post_id), "check like")
            .await;

        match existing {
            Some(row) => self.delete_row_by_id("likes", &row.id).await,
            None => {
                let body = NewLike {
                    user_id: user_id.to_string(),
                    post_id: post_id.to_string(),
                };
                match self.insert_minimal("likes", &body, "insert like").await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "Error inserting like");
                        false
                    }
                }
            }
        }
    }

    /// Toggle a bookmark for (user, post). Returns success.
    pub async fn toggle_bookmark(&self, user_id: &str, post_id: &str) -> bool {
        let existing = self
            .membership_row(
                "bookmarks",
                ("user_id", user_id),
                ("post_id", post_id),
                "check bookmark",
            )
            .await;

        match existing {
            Some(row) => self.delete_row_by_id("bookmarks", &row.id).await,
            None => {
                let body = NewBookmark {
                    user_id: user_id.to_string(),
                    post_id: post_id.to_string(),
                };
                match self.insert_minimal("bookmarks", &body, "insert bookmark").await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "Error inserting bookmark");
                        false
                    }
                }
            }
        }
    }

    /// Toggle a follow edge for (follower, following). Returns success.
    pub async fn toggle_follow(&self, follower_id: &str, following_id: &str) -> bool {
        let existing = self
            .membership_row(
                "follows",
                ("follower_id", follower_id),
                ("following_id", following_id),
                "check follow",
            )
            .await;

        match existing {
            Some(row) => self.delete_row_by_id("follows", &row.id).await,
            None => {
                let body = NewFollow {
                    follower_id: follower_id.to_string(),
                    following_id: following_id.to_string(),
                };
                match self.insert_minimal("follows", &body, "insert follow").await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "Error inserting follow");
                        false
                    }
                }
            }
        }
    }

    /// List a user's bookmarked posts (published only), most recently
    /// bookmarked first.
    pub async fn get_bookmarked_posts(&self, user_id: &str, limit: u32) -> Vec<PostWithAuthor> {
        let bookmarks_url = format!(
            "{}?user_id=eq.{}&select=post_id&order=created_at.desc&limit={}",
            self.rest_url("bookmarks"),
            encode_component(user_id),
            limit
        );
        let bookmarks: Vec<BookmarkRow> = match self
            .fetch_rows(&bookmarks_url, "fetch bookmarks")
            .await
        {
            Ok(bookmarks) => bookmarks,
            Err(err) => {
                error!(error = %err, user_id, "Error fetching bookmarks");
                return Vec::new();
            }
        };
        if bookmarks.is_empty() {
            return Vec::new();
        }

        let post_ids: Vec<String> = bookmarks.into_iter().map(|row| row.post_id).collect();
        let posts_url = format!(
            "{}?id=in.({})&status=eq.published&{}",
            self.rest_url("posts"),
            id_list(&post_ids),
            POST_WITH_AUTHOR
        );
        match self.fetch_rows(&posts_url, "fetch bookmarked posts").await {
            Ok(posts) => posts,
            Err(err) => {
                error!(error = %err, user_id, "Error fetching bookmarked posts");
                Vec::new()
            }
        }
    }

    /// Count a post's likes. Zero on failure.
    pub async fn get_like_count(&self, post_id: &str) -> u64 {
        let url = format!(
            "{}?post_id=eq.{}&select=*",
            self.rest_url("likes"),
            encode_component(post_id)
        );
        match self.count_exact(&url, "count likes").await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, post_id, "Error counting likes");
                0
            }
        }
    }

    /// Whether the user has liked the post. False on failure.
    pub async fn is_post_liked(&self, user_id: &str, post_id: &str) -> bool {
        self.membership_row("likes", ("user_id", user_id), ("post_id", post_id), "check like")
            .await
            .is_some()
    }

    /// Whether the user has bookmarked the post. False on failure.
    pub async fn is_post_bookmarked(&self, user_id: &str, post_id: &str) -> bool {
        self.membership_row(
            "bookmarks",
            ("user_id", user_id),
            ("post_id", post_id),
            "check bookmark",
        )
        .await
        .is_some()
    }

    /// Count a user's followers. Zero on failure.
    pub async fn get_follower_count(&self, user_id: &str) -> u64 {
        let url = format!(
            "{}?following_id=eq.{}&select=*",
            self.rest_url("follows"),
            encode_component(user_id)
        );
        match self.count_exact(&url, "count followers").await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, user_id, "Error counting followers");
                0
            }
        }
    }

    /// Count how many profiles a user follows. Zero on failure.
    pub async fn get_following_count(&self, user_id: &str) -> u64 {
        let url = format!(
            "{}?follower_id=eq.{}&select=*",
            self.rest_url("follows"),
            encode_component(user_id)
        );
        match self.count_exact(&url, "count following").await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, user_id, "Error counting following");
                0
            }
        }
    }

    /// Whether follower follows following. False on failure.
    pub async fn is_following(&self, follower_id: &str, following_id: &str) -> bool {
        self.membership_row(
            "follows",
            ("follower_id", follower_id),
            ("following_id", following_id),
            "check follow",
        )
        .await
        .is_some()
    }
}
