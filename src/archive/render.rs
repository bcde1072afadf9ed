use crate::feed::FeedEntry;
use htmd::HtmlToMarkdown;

/// Converts raw HTML to Markdown, dropping script and style subtrees.
/// Empty input yields empty output; a conversion failure is logged and
/// treated the same way so one broken body cannot sink its post.
fn html_to_markdown(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .build();
    match converter.convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!(error = %e, "HTML conversion failed, emitting empty body");
            String::new()
        }
    }
}

/// Renders a post's primary document (index.md): an optional `# <title>`
/// heading, then the trimmed Markdown body and a trailing newline.
pub fn render_post(entry: &FeedEntry) -> String {
    let title = entry.title.as_deref().unwrap_or("").trim();
    let body = html_to_markdown(entry.html.as_deref().unwrap_or(""));

    let mut doc = String::new();
    if !title.is_empty() {
        doc.push_str("# ");
        doc.push_str(title);
        doc.push_str("\n\n");
    }
    doc.push_str(body.trim());
    doc.push('\n');
    doc
}

/// Renders a post's comments document (comments.md).
///
/// One `## <author> - <YYYY-MM-DD HH:MM>` section per comment, in fetch
/// order, separated (not terminated) by `---` rules. A nameless author
/// becomes "Anonymous"; a comment with no usable timestamp gets a bare
/// author heading.
pub fn render_comments(comments: &[FeedEntry]) -> String {
    let mut doc = String::from("# Comments\n\n");

    for (i, comment) in comments.iter().enumerate() {
        let author = comment
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("Anonymous");

        match comment.published {
            Some(ts) => {
                doc.push_str(&format!("## {author} - {}\n\n", ts.format("%Y-%m-%d %H:%M")));
            }
            None => {
                doc.push_str(&format!("## {author}\n\n"));
            }
        }

        doc.push_str(html_to_markdown(comment.html.as_deref().unwrap_or("")).trim());
        doc.push_str("\n\n");

        if i + 1 < comments.len() {
            doc.push_str("---\n\n");
        }
    }

    doc
}
