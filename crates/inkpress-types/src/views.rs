//! Denormalized view variants: entities merged with joined or aggregate data
//! for display.

use crate::{Category, Comment, Post, Profile, Tag};
use serde::{Deserialize, Serialize};

/// A post joined with its author, as returned by
/// `select=*,author:profiles(*)`. Engagement fields are filled in by
/// follow-up count/membership queries when a page needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
}

/// A comment joined with its author. `replies` is never on the wire; it is
/// assembled client-side from `parent_id` links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Profile,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentWithAuthor>,
}

/// A profile merged with aggregate counts from the composite fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWithStats {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}
