//! Authoring helpers used by the create-post flow.

/// Assumed reading speed for the reading-time estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Derive a URL slug from a title.
///
/// Lowercases everything, collapses each run of non-alphanumeric characters
/// into a single hyphen, and strips leading/trailing hyphens.
///
/// ```
/// use inkpress_types::slugify;
/// assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Estimate reading time in minutes: ceil(word count / 200), minimum 1.
///
/// Words are split on whitespace; an empty or all-whitespace body still
/// reports one minute.
pub fn estimate_reading_time(content: &str) -> u32 {
    let word_count = content.split_whitespace().count() as u32;
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}
