//! The archive pipeline: walk the posts feed, then map each post to a
//! directory of rendered Markdown documents.
//!
//! The module is organized into two submodules plus the orchestrator:
//!
//! - [`layout`] - Deterministic output paths derived from timestamp and title
//! - [`render`] - HTML→Markdown rendering of post and comment documents
//!
//! Failures are contained at the per-post boundary: one bad post is logged
//! and skipped, and the batch always runs to completion.

mod layout;
mod render;

pub use layout::{folder_name, post_dir, slugify, SLUG_MAX_LEN};
pub use render::{render_comments, render_post};

use crate::config::Config;
use crate::feed::{self, FeedEntry};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Runs the whole export: fetch every post, then write each one out.
///
/// Returns the number of posts whose primary document was written. Per-post
/// failures (bad timestamp, I/O error, dead comment feed) never abort the
/// batch; only a failure to create the output root itself is fatal.
pub async fn run(config: &Config, client: &reqwest::Client) -> Result<usize> {
    println!("Fetching all posts from the blog...");
    let posts = feed::fetch_all_posts(client, config).await;
    println!("\nTotal posts found: {}", posts.len());

    if posts.is_empty() {
        println!("No posts found. Exiting.");
        return Ok(0);
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    println!("\nProcessing posts...");
    let total = posts.len();
    let mut written = 0;
    for (i, entry) in posts.iter().enumerate() {
        let label: String = entry
            .title
            .as_deref()
            .unwrap_or("(untitled)")
            .chars()
            .take(50)
            .collect();
        println!("[{}/{}] {}", i + 1, total, label);

        match process_post(config, client, entry).await {
            Ok(Some(dir)) => {
                written += 1;
                println!("  -> {}", dir.display());
            }
            Ok(None) => {} // skipped, reason already printed
            Err(e) => println!("  Error: {e:#}"),
        }
    }

    println!("\nDone! Posts saved to {}", config.output_dir.display());
    Ok(written)
}

/// Processes one post end to end: resolve its folder, write index.md, then
/// best-effort fetch its comments and write comments.md when any exist.
///
/// Returns `Ok(None)` when the post carries no usable timestamp; such posts
/// are skipped before any directory is created.
async fn process_post(
    config: &Config,
    client: &reqwest::Client,
    entry: &FeedEntry,
) -> Result<Option<PathBuf>> {
    let Some(published) = entry.published else {
        println!("  Skipping post with invalid date");
        return Ok(None);
    };

    let title = entry.title.as_deref().unwrap_or("");
    let dir = layout::post_dir(&config.output_dir, &published, title);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let index_path = dir.join("index.md");
    fs::write(&index_path, render::render_post(entry))
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    if let Some(post_id) = feed::extract_post_id(&entry.id) {
        tokio::time::sleep(config.request_delay()).await;
        let comments = feed::fetch_comments(client, config, Some(post_id)).await;
        if !comments.is_empty() {
            let comments_path = dir.join("comments.md");
            fs::write(&comments_path, render::render_comments(&comments))
                .with_context(|| format!("Failed to write {}", comments_path.display()))?;
        }
    }

    Ok(Some(dir))
}
