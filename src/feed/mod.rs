//! Feed discovery and retrieval for the archive pipeline.
//!
//! Everything network-facing lives here:
//!
//! - **Parsing**: Convert Atom/RSS XML into [`FeedPage`] values ([`parser`])
//! - **Fetching**: One-shot HTTP retrieval with timeout and size cap ([`fetcher`])
//! - **Pagination**: Walk every page of the posts feed ([`paginator`])
//! - **Comments**: Best-effort per-post comment feed retrieval ([`comments`])
//!
//! The same [`FeedEntry`] record is used for posts and comments; which fields
//! are populated depends on the endpoint the entry came from.

mod comments;
mod fetcher;
mod paginator;
mod parser;

pub use comments::fetch_comments;
pub use fetcher::{fetch_page, FetchError};
pub use paginator::fetch_all_posts;
pub use parser::{extract_post_id, parse_page, FeedEntry, FeedPage};
