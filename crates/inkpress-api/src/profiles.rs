//! Profile operations.

use crate::client::{encode_component, ApiClient};
use inkpress_types::{Profile, ProfilePatch, ProfileWithStats};
use tracing::error;

impl ApiClient {
    fn profile_by_id_url(&self, user_id: &str) -> String {
        format!(
            "{}?id=eq.{}&select=*&limit=1",
            self.rest_url("profiles"),
            encode_component(user_id)
        )
    }

    fn profile_by_username_url(&self, username: &str) -> String {
        format!(
            "{}?username=eq.{}&select=*&limit=1",
            self.rest_url("profiles"),
            encode_component(username)
        )
    }

    /// Fetch a profile by user id.
    pub async fn get_profile(&self, user_id: &str) -> Option<Profile> {
        match self
            .fetch_maybe_single(&self.profile_by_id_url(user_id), "fetch profile")
            .await
        {
            Ok(profile) => profile,
            Err(err) => {
                error!(error = %err, user_id, "Error fetching profile");
                None
            }
        }
    }

    /// Fetch a profile by username, merged with its aggregate counts.
    ///
    /// The three count queries run concurrently after the base read.
    pub async fn get_profile_by_username(&self, username: &str) -> Option<ProfileWithStats> {
        let profile: Profile = match self
            .fetch_maybe_single(&self.profile_by_username_url(username), "fetch profile")
            .await
        {
            Ok(Some(profile)) => profile,
            Ok(None) => return None,
            Err(err) => {
                error!(error = %err, username, "Error fetching profile");
                return None;
            }
        };

        let (post_count, follower_count, following_count) = tokio::join!(
            self.get_post_count_by_author(&profile.id),
            self.get_follower_count(&profile.id),
            self.get_following_count(&profile.id),
        );

        Some(ProfileWithStats {
            profile,
            post_count,
            follower_count,
            following_count,
            is_following: None,
        })
    }

    /// Apply a partial update to a profile and return the updated row.
    pub async fn update_profile(&self, user_id: &str, updates: &ProfilePatch) -> Option<Profile> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url("profiles"),
            encode_component(user_id)
        );

        match self.update_returning(&url, updates, "update profile").await {
            Ok(profile) => profile,
            Err(err) => {
                error!(error = %err, user_id, "Error updating profile");
                None
            }
        }
    }

    /// List profiles, newest first.
    pub async fn get_all_profiles(&self, limit: u32) -> Vec<Profile> {
        let url = format!(
            "{}?select=*&order=created_at.desc&limit={}",
            self.rest_url("profiles"),
            limit
        );

        match self.fetch_rows(&url, "fetch profiles").await {
            Ok(profiles) => profiles,
            Err(err) => {
                error!(error = %err, "Error fetching profiles");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_by_id_url() {
        let client = ApiClient::new("https://test.supabase.co", "key");
        assert_eq!(
            client.profile_by_id_url("user-1"),
            "https://test.supabase.co/rest/v1/profiles?id=eq.user-1&select=*&limit=1"
        );
    }

    #[test]
    fn test_profile_by_username_url_encodes_value() {
        let client = ApiClient::new("https://test.supabase.co", "key");
        let url = client.profile_by_username_url("ada,lovelace");
        assert!(url.contains("username=eq.ada%2Clovelace"));
    }
}
