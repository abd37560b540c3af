//! Home feed flow.

use inkpress_api::{ApiClient, PostScope};
use inkpress_types::{Category, PostWithAuthor};

/// Posts per feed page.
pub const FEED_PAGE_SIZE: u32 = 20;

/// The home screen's data: the published feed plus the category strip.
#[derive(Debug, Clone)]
pub struct HomeView {
    pub posts: Vec<PostWithAuthor>,
    pub categories: Vec<Category>,
}

/// Load the home feed. The posts and categories fetches run concurrently;
/// either degrades to empty independently.
pub async fn load(client: &ApiClient) -> HomeView {
    let (posts, categories) = tokio::join!(
        client.get_posts(FEED_PAGE_SIZE, 0, PostScope::Published),
        client.get_categories(),
    );

    HomeView { posts, categories }
}

/// Load a later feed page.
pub async fn load_page(client: &ApiClient, page: u32) -> Vec<PostWithAuthor> {
    client
        .get_posts(FEED_PAGE_SIZE, page * FEED_PAGE_SIZE, PostScope::Published)
        .await
}
