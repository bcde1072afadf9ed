//! blogmirror: one-shot archiver for a Blogger blog.
//!
//! Walks the blog's paginated Atom posts feed, fetches each post's comment
//! feed, and writes a tree of human-readable Markdown files:
//!
//! ```text
//! <output_dir>/<year>/<YYYY-MM-DD-HH-MM>[-<slug>]/index.md
//! <output_dir>/<year>/<YYYY-MM-DD-HH-MM>[-<slug>]/comments.md
//! ```
//!
//! Execution is fully sequential with a fixed politeness delay between
//! requests. There is no persistent state: every run overwrites its output.

pub mod archive;
pub mod config;
pub mod feed;
