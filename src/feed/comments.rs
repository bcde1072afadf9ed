use crate::config::Config;
use crate::feed::fetcher::fetch_page;
use crate::feed::parser::FeedEntry;

/// Fetches the comment feed for a single post.
///
/// Comments are strictly optional: a missing post id returns empty without
/// touching the network, and the fallible fetch result is discarded here so
/// that a dead or malformed comment feed can never abort post processing.
/// Entries are returned in feed order, which Blogger emits chronologically.
pub async fn fetch_comments(
    client: &reqwest::Client,
    config: &Config,
    post_id: Option<&str>,
) -> Vec<FeedEntry> {
    let Some(post_id) = post_id else {
        return Vec::new();
    };

    let url = config.comments_feed_url(post_id);
    match fetch_page(client, &url).await {
        Ok(page) => page.entries,
        Err(e) => {
            println!("  Error fetching comments for {post_id}: {e}");
            Vec::new()
        }
    }
}
