//! Post operations.

use crate::client::{encode_component, ApiClient};
use inkpress_types::{NewPost, Post, PostPatch, PostWithAuthor};
use serde::Deserialize;
use tracing::{error, warn};

/// Column projection for a post joined with its author.
pub(crate) const POST_WITH_AUTHOR: &str = "select=*,author:profiles(*)";

/// Which posts a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostScope {
    /// Only published posts (the public feed).
    #[default]
    Published,
    /// Every status; relies on the store's row policies to restrict
    /// visibility to the author's own rows.
    All,
}

#[derive(Deserialize)]
struct CategoryId {
    id: String,
}

#[derive(Deserialize)]
struct PostCategoryRow {
    post_id: String,
}

/// Build the `or=` filter for a free-text search across title, content, and
/// excerpt. Case-insensitive substring match; the needle is encoded so it
/// cannot break out of the filter grammar.
fn search_filter(query: &str) -> String {
    let needle = encode_component(query);
    format!(
        "or=(title.ilike.*{needle}*,content.ilike.*{needle}*,excerpt.ilike.*{needle}*)"
    )
}

/// Build an `in.(...)` list from row ids.
pub(crate) fn id_list(ids: &[String]) -> String {
    ids.iter()
        .map(|id| encode_component(id))
        .collect::<Vec<_>>()
        .join(",")
}

impl ApiClient {
    fn posts_listing_url(&self, limit: u32, offset: u32, scope: PostScope) -> String {
        let mut url = format!(
            "{}?{}&order=published_at.desc&limit={}&offset={}",
            self.rest_url("posts"),
            POST_WITH_AUTHOR,
            limit,
            offset
        );
        if scope == PostScope::Published {
            url.push_str("&status=eq.published");
        }
        url
    }

    fn search_posts_url(&self, query: &str, limit: u32) -> String {
        format!(
            "{}?{}&status=eq.published&{}&order=published_at.desc&limit={}",
            self.rest_url("posts"),
            POST_WITH_AUTHOR,
            search_filter(query),
            limit
        )
    }

    /// List posts with their authors, newest publication first.
    pub async fn get_posts(&self, limit: u32, offset: u32, scope: PostScope) -> Vec<PostWithAuthor> {
        let url = self.posts_listing_url(limit, offset, scope);
        match self.fetch_rows(&url, "fetch posts").await {
            Ok(posts) => posts,
            Err(err) => {
                error!(error = %err, "Error fetching posts");
                Vec::new()
            }
        }
    }

    /// Fetch a post (with author) by slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<PostWithAuthor> {
        let url = format!(
            "{}?slug=eq.{}&{}&limit=1",
            self.rest_url("posts"),
            encode_component(slug),
            POST_WITH_AUTHOR
        );
        match self.fetch_maybe_single(&url, "fetch post").await {
            Ok(post) => post,
            Err(err) => {
                error!(error = %err, slug, "Error fetching post");
                None
            }
        }
    }

    /// Fetch a post (with author) by id.
    pub async fn get_post_by_id(&self, id: &str) -> Option<PostWithAuthor> {
        let url = format!(
            "{}?id=eq.{}&{}&limit=1",
            self.rest_url("posts"),
            encode_component(id),
            POST_WITH_AUTHOR
        );
        match self.fetch_maybe_single(&url, "fetch post").await {
            Ok(post) => post,
            Err(err) => {
                error!(error = %err, id, "Error fetching post");
                None
            }
        }
    }

    /// List an author's published posts, newest publication first.
    pub async fn get_posts_by_author(&self, author_id: &str, limit: u32) -> Vec<PostWithAuthor> {
        let url = format!(
            "{}?author_id=eq.{}&status=eq.published&{}&order=published_at.desc&limit={}",
            self.rest_url("posts"),
            encode_component(author_id),
            POST_WITH_AUTHOR,
            limit
        );
        match self.fetch_rows(&url, "fetch posts by author").await {
            Ok(posts) => posts,
            Err(err) => {
                error!(error = %err, author_id, "Error fetching posts by author");
                Vec::new()
            }
        }
    }

    /// List the published posts filed under a category slug.
    ///
    /// Resolves the category, then its join rows, then the posts; an empty
    /// category (or a failure at any step) yields an empty list.
    pub async fn get_posts_by_category(
        &self,
        category_slug: &str,
        limit: u32,
    ) -> Vec<PostWithAuthor> {
        let category_url = format!(
            "{}?slug=eq.{}&select=id&limit=1",
            self.rest_url("categories"),
            encode_component(category_slug)
        );
        let category: CategoryId = match self
            .fetch_maybe_single(&category_url, "fetch category")
            .await
        {
            Ok(Some(category)) => category,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(error = %err, category_slug, "Error fetching category");
                return Vec::new();
            }
        };

        let join_url = format!(
            "{}?category_id=eq.{}&select=post_id",
            self.rest_url("post_categories"),
            encode_component(&category.id)
        );
        let joins: Vec<PostCategoryRow> = match self
            .fetch_rows(&join_url, "fetch post categories")
            .await
        {
            Ok(joins) => joins,
            Err(err) => {
                error!(error = %err, category_slug, "Error fetching post categories");
                return Vec::new();
            }
        };
        if joins.is_empty() {
            return Vec::new();
        }

        let post_ids: Vec<String> = joins.into_iter().map(|row| row.post_id).collect();
        let posts_url = format!(
            "{}?id=in.({})&status=eq.published&{}&order=published_at.desc&limit={}",
            self.rest_url("posts"),
            id_list(&post_ids),
            POST_WITH_AUTHOR,
            limit
        );
        match self.fetch_rows(&posts_url, "fetch posts by category").await {
            Ok(posts) => posts,
            Err(err) => {
                error!(error = %err, category_slug, "Error fetching posts by category");
                Vec::new()
            }
        }
    }

    /// Free-text search over published posts (title, content, excerpt),
    /// newest publication first. No ranking beyond recency.
    pub async fn search_posts(&self, query: &str, limit: u32) -> Vec<PostWithAuthor> {
        let url = self.search_posts_url(query, limit);
        match self.fetch_rows(&url, "search posts").await {
            Ok(posts) => posts,
            Err(err) => {
                error!(error = %err, "Error searching posts");
                Vec::new()
            }
        }
    }

    /// Insert a post and return the persisted row.
    pub async fn create_post(&self, post: &NewPost) -> Option<Post> {
        match self.insert_returning("posts", post, "create post").await {
            Ok(post) => post,
            Err(err) => {
                error!(error = %err, "Error creating post");
                None
            }
        }
    }

    /// Apply a partial update to a post and return the updated row.
    pub async fn update_post(&self, post_id: &str, updates: &PostPatch) -> Option<Post> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url("posts"),
            encode_component(post_id)
        );
        match self.update_returning(&url, updates, "update post").await {
            Ok(post) => post,
            Err(err) => {
                error!(error = %err, post_id, "Error updating post");
                None
            }
        }
    }

    /// Delete a post.
    pub async fn delete_post(&self, post_id: &str) -> bool {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url("posts"),
            encode_component(post_id)
        );
        match self.delete_where(&url, "delete post").await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, post_id, "Error deleting post");
                false
            }
        }
    }

    /// Record a view through the store-side counter function.
    ///
    /// Fire-and-forget: a failed increment only logs.
    pub async fn increment_post_views(&self, post_id: &str) {
        let body = serde_json::json!({ "post_uuid": post_id });
        if let Err(err) = self.rpc("increment_post_views", &body, "increment post views").await {
            warn!(error = %err, post_id, "Error incrementing post views");
        }
    }

    /// Count an author's published posts. Zero on failure.
    pub async fn get_post_count_by_author(&self, author_id: &str) -> u64 {
        let url = format!(
            "{}?author_id=eq.{}&status=eq.published&select=*",
            self.rest_url("posts"),
            encode_component(author_id)
        );
        match self.count_exact(&url, "count posts").await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, author_id, "Error counting posts");
                0
            }
        }
    }
}
