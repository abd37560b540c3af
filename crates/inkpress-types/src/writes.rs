//! Insert and update payloads. Optional fields are skipped when absent so
//! the store's column defaults apply.

use crate::PostStatus;
use serde::Serialize;
use std::collections::HashMap;

/// Payload for inserting a post.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub author_id: String,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    pub reading_time: u32,
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<Vec<String>>,
}

/// Partial update for a post; only present fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

/// Partial update for a profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<HashMap<String, String>>,
}

/// Payload for inserting a comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub post_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub content: String,
}

/// Payload for inserting a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for inserting a tag.
#[derive(Debug, Clone, Serialize)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

/// Payload for inserting a like membership row.
#[derive(Debug, Clone, Serialize)]
pub struct NewLike {
    pub user_id: String,
    pub post_id: String,
}

/// Payload for inserting a bookmark membership row.
#[derive(Debug, Clone, Serialize)]
pub struct NewBookmark {
    pub user_id: String,
    pub post_id: String,
}

/// Payload for inserting a follow edge.
#[derive(Debug, Clone, Serialize)]
pub struct NewFollow {
    pub follower_id: String,
    pub following_id: String,
}

/// Payload for the newsletter subscribe operation.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubscriber {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
