//! Create-post flow: authorization, validation, and derivation of the
//! insert payload.

use chrono::{DateTime, Utc};
use inkpress_api::ApiClient;
use inkpress_types::{estimate_reading_time, slugify, NewPost, Post, PostStatus, Profile};
use thiserror::Error;

/// Editable create-post form state.
///
/// The slug tracks the title until the author edits it by hand; the SEO
/// title mirrors the title the same way.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: String,
    pub is_premium: bool,
    pub seo_title: String,
    pub seo_description: String,
    slug_customized: bool,
}

impl PostDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the title, re-deriving the slug and SEO title unless the
    /// author customized them.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if !self.slug_customized {
            self.slug = slugify(&self.title);
        }
        self.seo_title = self.title.clone();
    }

    /// Override the derived slug.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.slug_customized = true;
    }

    /// Estimated reading time of the current content.
    pub fn reading_time(&self) -> u32 {
        estimate_reading_time(&self.content)
    }
}

/// How the author is submitting the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    SaveDraft,
    Publish,
}

/// Why a submission was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CreatePostError {
    #[error("creator access is required to create posts")]
    NotAuthorized,
    #[error("a title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error("the post could not be saved")]
    Failed,
}

/// Gate the flow: only creators and admins may author posts.
pub fn authorize(profile: Option<&Profile>) -> Result<(), CreatePostError> {
    match profile {
        Some(profile) if profile.role.can_publish() => Ok(()),
        _ => Err(CreatePostError::NotAuthorized),
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate the draft and build the insert payload.
///
/// Publishing stamps `published_at` with `now`; saving a draft leaves it
/// null. Reading time is derived from the content.
pub fn build_new_post(
    draft: &PostDraft,
    author_id: &str,
    submission: Submission,
    now: DateTime<Utc>,
) -> Result<NewPost, CreatePostError> {
    if draft.title.trim().is_empty() {
        return Err(CreatePostError::MissingTitle);
    }
    if draft.content.trim().is_empty() {
        return Err(CreatePostError::MissingContent);
    }

    let (status, published_at) = match submission {
        Submission::Publish => (PostStatus::Published, Some(now.to_rfc3339())),
        Submission::SaveDraft => (PostStatus::Draft, None),
    };

    Ok(NewPost {
        author_id: author_id.to_string(),
        title: draft.title.trim().to_string(),
        slug: draft.slug.clone(),
        content: Some(draft.content.clone()),
        excerpt: optional(&draft.excerpt),
        cover_image: optional(&draft.cover_image),
        status,
        published_at,
        scheduled_for: None,
        reading_time: draft.reading_time(),
        is_premium: draft.is_premium,
        seo_title: optional(&draft.seo_title),
        seo_description: optional(&draft.seo_description),
        seo_keywords: None,
    })
}

/// Submit the draft: authorize, validate, insert.
pub async fn submit(
    client: &ApiClient,
    profile: &Profile,
    draft: &PostDraft,
    submission: Submission,
) -> Result<Post, CreatePostError> {
    authorize(Some(profile))?;
    let payload = build_new_post(draft, &profile.id, submission, Utc::now())?;
    client
        .create_post(&payload)
        .await
        .ok_or(CreatePostError::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_types::{SubscriptionTier, UserRole};

    fn profile(role: UserRole) -> Profile {
        Profile {
            id: "user-1".to_string(),
            username: "ada".to_string(),
            email: None,
            full_name: None,
            bio: None,
            avatar_url: None,
            role,
            subscription_tier: SubscriptionTier::Free,
            subscription_expires_at: None,
            stripe_customer_id: None,
            social_links: Default::default(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn valid_draft() -> PostDraft {
        let mut draft = PostDraft::new();
        draft.set_title("Hello, World! 2024");
        draft.content = "word ".repeat(450);
        draft
    }

    #[test]
    fn test_authorize_requires_creator_or_admin() {
        assert!(authorize(Some(&profile(UserRole::Creator))).is_ok());
        assert!(authorize(Some(&profile(UserRole::Admin))).is_ok());
        assert_eq!(
            authorize(Some(&profile(UserRole::Subscriber))),
            Err(CreatePostError::NotAuthorized)
        );
        assert_eq!(authorize(None), Err(CreatePostError::NotAuthorized));
    }

    #[test]
    fn test_title_drives_slug_until_customized() {
        let mut draft = PostDraft::new();
        draft.set_title("Hello, World! 2024");
        assert_eq!(draft.slug, "hello-world-2024");
        assert_eq!(draft.seo_title, "Hello, World! 2024");

        draft.set_slug("my-own-slug");
        draft.set_title("Another Title");
        assert_eq!(draft.slug, "my-own-slug");
        assert_eq!(draft.seo_title, "Another Title");
    }

    #[test]
    fn test_publish_stamps_published_at() {
        let now = Utc::now();
        let post = build_new_post(&valid_draft(), "user-1", Submission::Publish, now).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now.to_rfc3339()));
    }

    #[test]
    fn test_draft_leaves_published_at_null() {
        let post =
            build_new_post(&valid_draft(), "user-1", Submission::SaveDraft, Utc::now()).unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn test_reading_time_derived_from_content() {
        let post =
            build_new_post(&valid_draft(), "user-1", Submission::Publish, Utc::now()).unwrap();
        assert_eq!(post.reading_time, 3);
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        let mut draft = valid_draft();
        draft.title = "   ".to_string();
        let err = build_new_post(&draft, "user-1", Submission::Publish, Utc::now()).unwrap_err();
        assert_eq!(err, CreatePostError::MissingTitle);

        let mut draft = valid_draft();
        draft.content = "\n\t".to_string();
        let err = build_new_post(&draft, "user-1", Submission::Publish, Utc::now()).unwrap_err();
        assert_eq!(err, CreatePostError::MissingContent);
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let post =
            build_new_post(&valid_draft(), "user-1", Submission::Publish, Utc::now()).unwrap();
        assert!(post.excerpt.is_none());
        assert!(post.cover_image.is_none());
        assert!(post.seo_description.is_none());
        // seo_title mirrors the title
        assert_eq!(post.seo_title.as_deref(), Some("Hello, World! 2024"));
    }
}
