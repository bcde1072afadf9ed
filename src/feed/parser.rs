use anyhow::Result;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use regex::Regex;
use std::sync::OnceLock;

/// One fetched batch of entries plus pagination metadata.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    /// URL of the next page, taken from the first link with `rel="next"`.
    pub next: Option<String>,
}

/// One item in a syndication feed: a post or a comment, depending on
/// which feed endpoint it came from.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub id: String,
    pub title: Option<String>,
    /// `None` when the feed carried no timestamp or one that failed to parse.
    pub published: Option<DateTime<Utc>>,
    pub author: Option<String>,
    /// Raw HTML. The structured content block wins over the summary fallback.
    pub html: Option<String>,
}

pub fn parse_page(bytes: &[u8]) -> Result<FeedPage> {
    let feed = parser::parse(bytes)?;

    let next = feed
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("next"))
        .map(|l| l.href.clone());

    let entries: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| t.content);
            let published = entry.published.or(entry.updated);
            let author = entry.authors.into_iter().next().map(|p| p.name);
            let html = entry
                .content
                .and_then(|c| c.body)
                .or_else(|| entry.summary.map(|s| s.content));

            FeedEntry {
                id: entry.id,
                title,
                published,
                author,
                html,
            }
        })
        .collect();

    Ok(FeedPage { entries, next })
}

/// Derives the numeric post identifier from a Blogger entry id such as
/// `tag:blogger.com,1999:blog-123.post-4567890`. Returns the digits
/// following the `post-` marker, or `None` when the marker is absent.
pub fn extract_post_id(entry_id: &str) -> Option<&str> {
    static POST_ID: OnceLock<Regex> = OnceLock::new();
    let re = POST_ID.get_or_init(|| Regex::new(r"post-(\d+)").expect("valid post id pattern"));
    re.captures(entry_id)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
