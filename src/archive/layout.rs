use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Slugs are capped at this many characters.
pub const SLUG_MAX_LEN: usize = 50;

/// Reduces free text to a filesystem-safe slug: lowercased, runs of anything
/// outside `[a-z0-9]` collapsed to single hyphens, capped at [`SLUG_MAX_LEN`],
/// no leading or trailing hyphen. Non-ASCII characters are treated as
/// separators, so an all-symbol or all-CJK title slugs to the empty string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len().min(SLUG_MAX_LEN));
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    // Slug is pure ASCII, so byte truncation is char-safe
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derives the post's folder name: `YYYY-MM-DD-HH-MM[-<slug>]`.
///
/// The slug suffix is omitted when the title is empty, whitespace-only, or
/// slugs to nothing. Two posts sharing the same minute and title map to the
/// same folder and the last writer wins; the feed is trusted not to do this.
pub fn folder_name(published: &DateTime<Utc>, title: &str) -> String {
    let prefix = published.format("%Y-%m-%d-%H-%M").to_string();
    let slug = slugify(title.trim());
    if slug.is_empty() {
        prefix
    } else {
        format!("{prefix}-{slug}")
    }
}

/// Resolves the output directory for one post: `<root>/<year>/<folder_name>`.
pub fn post_dir(output_root: &Path, published: &DateTime<Utc>, title: &str) -> PathBuf {
    output_root
        .join(published.format("%Y").to_string())
        .join(folder_name(published, title))
}
