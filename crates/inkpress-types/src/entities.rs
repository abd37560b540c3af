//! Persisted entities, field-for-field with the remote store's tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role assigned to a profile; gates write capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Guest,
    Subscriber,
    Creator,
    Admin,
}

impl UserRole {
    /// Whether this role may author posts.
    pub fn can_publish(self) -> bool {
        matches!(self, UserRole::Creator | UserRole::Admin)
    }
}

/// Paid tier attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Premium,
    Vip,
}

impl SubscriptionTier {
    /// Whether this tier unlocks premium posts.
    pub fn unlocks_premium(self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }
}

/// Billing state of a subscription row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
    PastDue,
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    Refunded,
}

/// Newsletter subscriber state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    Active,
    Unsubscribed,
    Bounced,
}

/// A user profile. Usernames are unique store-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub subscription_tier: SubscriptionTier,
    pub subscription_expires_at: Option<String>,
    pub stripe_customer_id: Option<String>,
    #[serde(default)]
    pub social_links: HashMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A post. Slugs are unique store-side; published posts carry a non-null
/// `published_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<String>,
    pub scheduled_for: Option<String>,
    pub reading_time: u32,
    pub view_count: u64,
    pub is_premium: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

/// A category; related to posts through a join table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// A tag; related to posts through a join table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: String,
}

/// A comment. `parent_id` self-references for reply threads; only approved
/// comments are readable by non-owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub is_approved: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A like membership row; at most one per (user, post) pair by toggle
/// semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub user_id: String,
    pub post_id: String,
    pub created_at: String,
}

/// A bookmark membership row; same pairing rule as likes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub post_id: String,
    pub created_at: String,
}

/// A follow edge between two profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: String,
}

/// A recurring subscription row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub tier: SubscriptionTier,
    pub stripe_subscription_id: Option<String>,
    pub stripe_price_id: Option<String>,
    pub status: SubscriptionStatus,
    pub current_period_start: Option<String>,
    pub current_period_end: Option<String>,
    pub cancel_at_period_end: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A line item inside an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A checkout order. `user_id` is null for guest checkout; `total_amount`
/// consistency with the items is not validated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub stripe_session_id: Option<String>,
    pub stripe_payment_intent_id: Option<String>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A newsletter subscriber row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub status: SubscriberStatus,
    pub subscribed_at: String,
    pub unsubscribed_at: Option<String>,
}

/// Denormalized per-post counters; the remote store's aggregation is the
/// source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAnalytics {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub bookmark_count: u64,
    pub share_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization_snake_case() {
        assert_eq!(serde_json::to_string(&UserRole::Creator).unwrap(), "\"creator\"");
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::PastDue).unwrap(),
            "\"past_due\""
        );
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_role_publish_gate() {
        assert!(UserRole::Creator.can_publish());
        assert!(UserRole::Admin.can_publish());
        assert!(!UserRole::Subscriber.can_publish());
        assert!(!UserRole::Guest.can_publish());
    }

    #[test]
    fn test_tier_premium_unlock() {
        assert!(!SubscriptionTier::Free.unlocks_premium());
        assert!(SubscriptionTier::Basic.unlocks_premium());
        assert!(SubscriptionTier::Premium.unlocks_premium());
        assert!(SubscriptionTier::Vip.unlocks_premium());
    }

    #[test]
    fn test_profile_deserializes_without_social_links() {
        let json = r#"{
            "id": "user-1",
            "username": "ada",
            "email": null,
            "full_name": null,
            "bio": null,
            "avatar_url": null,
            "role": "creator",
            "subscription_tier": "premium",
            "subscription_expires_at": null,
            "stripe_customer_id": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.username, "ada");
        assert!(profile.social_links.is_empty());
    }

    #[test]
    fn test_post_status_roundtrip() {
        for (status, wire) in [
            (PostStatus::Draft, "\"draft\""),
            (PostStatus::Scheduled, "\"scheduled\""),
            (PostStatus::Published, "\"published\""),
            (PostStatus::Archived, "\"archived\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let parsed: PostStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_item_skips_absent_image() {
        let item = OrderItem {
            name: "Premium Subscription".to_string(),
            price: 9.99,
            quantity: 1,
            image_url: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("image_url"));
        assert!(json.contains("9.99"));
    }
}
