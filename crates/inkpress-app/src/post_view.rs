//! Post detail flow: the post with its author, threaded comments, and the
//! viewer's engagement state.

use crate::threading::thread_comments;
use inkpress_api::ApiClient;
use inkpress_types::{Comment, CommentWithAuthor, NewComment, PostWithAuthor, Profile};
use thiserror::Error;
use tracing::debug;

/// View model for the post detail screen.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: PostWithAuthor,
    /// Approved comments, threaded by reply.
    pub comments: Vec<CommentWithAuthor>,
    pub like_count: u64,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    /// Premium post and the viewer's tier does not unlock it.
    pub premium_locked: bool,
}

/// Why a comment submission was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommentError {
    #[error("comment content is required")]
    EmptyContent,
    #[error("the comment could not be saved")]
    Failed,
}

/// Whether the viewer's tier (or authorship) unlocks a premium post.
fn premium_locked(post: &PostWithAuthor, viewer: Option<&Profile>) -> bool {
    if !post.post.is_premium {
        return false;
    }
    match viewer {
        Some(profile) => {
            profile.id != post.post.author_id
                && !profile.subscription_tier.unlocks_premium()
                && !profile.role.can_publish()
        }
        None => true,
    }
}

/// Load the post detail screen for `slug`.
///
/// Returns `None` when the post cannot be fetched (the page treats this as
/// not-found). A successful fetch records a view through the store-side
/// counter, then gathers comments, the like count, and — only with a
/// viewer — the viewer's like/bookmark membership, all concurrently.
pub async fn load(client: &ApiClient, slug: &str, viewer: Option<&Profile>) -> Option<PostView> {
    let post = client.get_post_by_slug(slug).await?;

    client.increment_post_views(&post.post.id).await;

    let (comments, like_count, is_liked, is_bookmarked) = tokio::join!(
        client.get_comments_by_post(&post.post.id),
        client.get_like_count(&post.post.id),
        async {
            match viewer {
                Some(profile) => client.is_post_liked(&profile.id, &post.post.id).await,
                None => false,
            }
        },
        async {
            match viewer {
                Some(profile) => client.is_post_bookmarked(&profile.id, &post.post.id).await,
                None => false,
            }
        },
    );

    let locked = premium_locked(&post, viewer);
    Some(PostView {
        post,
        comments: thread_comments(comments),
        like_count,
        is_liked,
        is_bookmarked,
        premium_locked: locked,
    })
}

/// Submit a comment (optionally a reply). Content must be non-empty after
/// trimming.
pub async fn submit_comment(
    client: &ApiClient,
    viewer: &Profile,
    post_id: &str,
    parent_id: Option<String>,
    content: &str,
) -> Result<Comment, CommentError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(CommentError::EmptyContent);
    }

    let comment = NewComment {
        post_id: post_id.to_string(),
        author_id: viewer.id.clone(),
        parent_id,
        content: content.to_string(),
    };
    client
        .create_comment(&comment)
        .await
        .ok_or(CommentError::Failed)
}

/// Whether the viewer may delete a comment: its author, or an admin.
pub fn can_delete_comment(viewer: &Profile, comment: &Comment) -> bool {
    comment.author_id == viewer.id || viewer.role == inkpress_types::UserRole::Admin
}

/// Delete a comment after checking the viewer's permission.
pub async fn delete_comment(client: &ApiClient, viewer: &Profile, comment: &Comment) -> bool {
    if !can_delete_comment(viewer, comment) {
        debug!(comment_id = %comment.id, "Viewer may not delete this comment");
        return false;
    }
    client.delete_comment(&comment.id).await
}

/// Toggle the viewer's like. The view model is only updated after the store
/// confirms, so a failed toggle leaves it untouched.
pub async fn toggle_like(client: &ApiClient, viewer_id: &str, view: &mut PostView) -> bool {
    if !client.toggle_like(viewer_id, &view.post.post.id).await {
        return false;
    }
    if view.is_liked {
        view.is_liked = false;
        view.like_count = view.like_count.saturating_sub(1);
    } else {
        view.is_liked = true;
        view.like_count += 1;
    }
    true
}

/// Toggle the viewer's bookmark, confirm-then-update like the like toggle.
pub async fn toggle_bookmark(client: &ApiClient, viewer_id: &str, view: &mut PostView) -> bool {
    if !client.toggle_bookmark(viewer_id, &view.post.post.id).await {
        return false;
    }
    view.is_bookmarked = !view.is_bookmarked;
    true
}
