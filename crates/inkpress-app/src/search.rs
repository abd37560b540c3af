//! Search flow.

use inkpress_api::ApiClient;
use inkpress_types::PostWithAuthor;

/// Maximum results per search.
pub const SEARCH_LIMIT: u32 = 20;

/// A completed search: the trimmed query and its matches.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<PostWithAuthor>,
}

/// Run a search. A blank query performs no remote call and returns `None`.
pub async fn run(client: &ApiClient, raw_query: &str) -> Option<SearchResults> {
    let query = raw_query.trim();
    if query.is_empty() {
        return None;
    }

    let results = client.search_posts(query, SEARCH_LIMIT).await;
    Some(SearchResults {
        query: query.to_string(),
        results,
    })
}
