//! Analytics dashboard flow.

use inkpress_api::ApiClient;
use inkpress_types::{PostAnalytics, PostWithAuthor};

/// How many of the author's posts the dashboard lists.
pub const DASHBOARD_POST_LIMIT: u32 = 20;

/// Totals across the author's analytics rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub post_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

/// The analytics dashboard's data.
#[derive(Debug, Clone)]
pub struct AnalyticsDashboard {
    pub posts: Vec<PostWithAuthor>,
    pub analytics: Vec<PostAnalytics>,
    pub summary: AnalyticsSummary,
}

/// Reduce analytics rows into dashboard totals.
pub fn summarize(post_count: usize, analytics: &[PostAnalytics]) -> AnalyticsSummary {
    AnalyticsSummary {
        post_count,
        total_views: analytics.iter().map(|row| row.view_count).sum(),
        total_likes: analytics.iter().map(|row| row.like_count).sum(),
        total_comments: analytics.iter().map(|row| row.comment_count).sum(),
    }
}

/// Load the dashboard for an author: their published posts and analytics
/// rows, fetched concurrently, with totals reduced client-side.
pub async fn load(client: &ApiClient, author_id: &str) -> AnalyticsDashboard {
    let (posts, analytics) = tokio::join!(
        client.get_posts_by_author(author_id, DASHBOARD_POST_LIMIT),
        client.get_post_analytics(author_id),
    );

    let summary = summarize(posts.len(), &analytics);
    AnalyticsDashboard {
        posts,
        analytics,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(views: u64, likes: u64, comments: u64) -> PostAnalytics {
        PostAnalytics {
            id: "row".to_string(),
            post_id: "post".to_string(),
            author_id: "author".to_string(),
            view_count: views,
            like_count: likes,
            comment_count: comments,
            bookmark_count: 0,
            share_count: 0,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_summarize_totals() {
        let rows = vec![row(100, 10, 3), row(50, 5, 2), row(0, 0, 0)];
        let summary = summarize(3, &rows);
        assert_eq!(summary.post_count, 3);
        assert_eq!(summary.total_views, 150);
        assert_eq!(summary.total_likes, 15);
        assert_eq!(summary.total_comments, 5);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(0, &[]);
        assert_eq!(summary, AnalyticsSummary::default());
    }
}
