use crate::config::Config;
use crate::feed::fetcher::fetch_page;
use crate::feed::parser::FeedEntry;
use std::collections::HashSet;
use url::Url;

/// Hard cap on pages walked in one run. A well-formed Blogger feed terminates
/// by omitting the `next` link; the cap only guards against a feed that keeps
/// handing out fresh URLs forever.
const MAX_PAGES: usize = 1_000;

/// Why a feed walk stopped.
#[derive(Debug, PartialEq, Eq)]
enum Termination {
    /// The last page carried no `next` link.
    Exhausted,
    /// A page fetch failed; everything accumulated so far is kept.
    FetchFailed,
    /// The `next` link could not be parsed as a URL.
    BadNextLink,
    /// The feed pointed back at a URL already visited this run.
    RepeatedUrl,
    /// MAX_PAGES reached.
    PageCapReached,
}

/// Walks every page of the posts feed and returns all entries in feed order.
///
/// A fetch failure aborts the walk and returns what has been accumulated so
/// far; it is never an error upward. The configured politeness delay is
/// slept before each page fetch after the first.
pub async fn fetch_all_posts(client: &reqwest::Client, config: &Config) -> Vec<FeedEntry> {
    let (posts, termination) = walk(client, config, config.posts_feed_url()).await;
    tracing::debug!(posts = posts.len(), ?termination, "Feed walk finished");
    posts
}

async fn walk(
    client: &reqwest::Client,
    config: &Config,
    start_url: String,
) -> (Vec<FeedEntry>, Termination) {
    let mut posts: Vec<FeedEntry> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut url = start_url;

    for page_no in 0.. {
        if page_no >= MAX_PAGES {
            tracing::warn!(pages = MAX_PAGES, "Page cap reached, stopping feed walk");
            return (posts, Termination::PageCapReached);
        }
        if !visited.insert(url.clone()) {
            tracing::warn!(url = %url, "Feed repeated a page URL, stopping feed walk");
            return (posts, Termination::RepeatedUrl);
        }
        if page_no > 0 {
            tokio::time::sleep(config.request_delay()).await;
        }

        println!("Fetching: {url}");
        let page = match fetch_page(client, &url).await {
            Ok(page) => page,
            Err(e) => {
                println!("Error fetching feed: {e}");
                return (posts, Termination::FetchFailed);
            }
        };

        let count = page.entries.len();
        posts.extend(page.entries);
        println!("  Found {count} entries (total: {})", posts.len());

        match page.next {
            None => return (posts, Termination::Exhausted),
            Some(next) => {
                if Url::parse(&next).is_err() {
                    tracing::warn!(url = %next, "Unparseable next link, stopping feed walk");
                    return (posts, Termination::BadNextLink);
                }
                url = next;
            }
        }
    }
    unreachable!("loop exits via termination conditions")
}
