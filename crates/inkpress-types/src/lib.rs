//! Domain types for the inkpress platform.
//!
//! These are the wire shapes exchanged with the remote store's table API.
//! The client holds only transient, request-scoped copies; every row is
//! owned and persisted remotely. Timestamps stay RFC 3339 strings on the
//! wire and row IDs are server-assigned UUIDs carried as opaque strings.

mod authoring;
mod entities;
mod views;
mod writes;

pub use authoring::{estimate_reading_time, slugify, WORDS_PER_MINUTE};
pub use entities::{
    Bookmark, Category, Comment, Follow, Like, NewsletterSubscriber, Order, OrderItem,
    OrderStatus, Post, PostAnalytics, PostStatus, Profile, SubscriberStatus, Subscription,
    SubscriptionStatus, SubscriptionTier, Tag, UserRole,
};
pub use views::{CommentWithAuthor, PostWithAuthor, ProfileWithStats};
pub use writes::{
    NewBookmark, NewCategory, NewComment, NewFollow, NewLike, NewPost, NewSubscriber, NewTag,
    PostPatch, ProfilePatch,
};
