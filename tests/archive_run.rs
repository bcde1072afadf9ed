//! End-to-end tests for the archive orchestrator: mock feed in, Markdown
//! tree out.
//!
//! Each test stands up its own wiremock server and writes into its own
//! temporary output directory, so tests are fully isolated and can run in
//! parallel.

use blogmirror::archive;
use blogmirror::config::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POSTS_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:blogger.com,1999:blog-42</id>
  <title>Test Blog</title>
  <updated>2021-05-01T10:00:00Z</updated>
  <entry>
    <id>tag:blogger.com,1999:blog-42.post-4567</id>
    <title>Hello World</title>
    <published>2021-05-01T10:30:00Z</published>
    <updated>2021-05-01T10:30:00Z</updated>
    <author><name>Alice</name></author>
    <content type="html">&lt;p&gt;First post body.&lt;/p&gt;</content>
  </entry>
</feed>"#;

const COMMENTS_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:blogger.com,1999:blog-42.post-4567.comments</id>
  <title>Comments on: Hello World</title>
  <updated>2021-05-03T12:00:00Z</updated>
  <entry>
    <id>tag:blogger.com,1999:blog-42.post-8001</id>
    <published>2021-05-02T09:00:00Z</published>
    <updated>2021-05-02T09:00:00Z</updated>
    <author><name>Bob</name></author>
    <content type="html">&lt;p&gt;Great post!&lt;/p&gt;</content>
  </entry>
  <entry>
    <id>tag:blogger.com,1999:blog-42.post-8002</id>
    <published>2021-05-03T12:00:00Z</published>
    <updated>2021-05-03T12:00:00Z</updated>
    <content type="html">&lt;p&gt;Thanks for sharing.&lt;/p&gt;</content>
  </entry>
</feed>"#;

const UNDATED_POSTS_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:blogger.com,1999:blog-42</id>
  <title>Test Blog</title>
  <updated>2021-05-01T10:00:00Z</updated>
  <entry>
    <id>tag:blogger.com,1999:blog-42.post-4567</id>
    <title>Undated Post</title>
    <published>not-a-date</published>
    <content type="html">&lt;p&gt;Body.&lt;/p&gt;</content>
  </entry>
</feed>"#;

const EMPTY_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:blogger.com,1999:blog-42</id>
  <title>Test Blog</title>
  <updated>2021-05-01T10:00:00Z</updated>
</feed>"#;

fn test_config(server: &MockServer, output: &TempDir) -> Config {
    Config {
        feed_base: format!("{}/feeds", server.uri()),
        output_dir: output.path().join("posts"),
        page_size: 25,
        request_delay_ms: 0,
    }
}

async fn mount_posts_feed(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/feeds/posts/default"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[tokio::test]
async fn test_post_with_comments_writes_both_documents() {
    let server = MockServer::start().await;
    mount_posts_feed(&server, POSTS_FEED).await;
    Mock::given(method("GET"))
        .and(path("/feeds/4567/comments/default"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMMENTS_FEED))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = test_config(&server, &output);
    let client = reqwest::Client::new();

    let written = archive::run(&config, &client).await.unwrap();
    assert_eq!(written, 1);

    let post_dir = config
        .output_dir
        .join("2021")
        .join("2021-05-01-10-30-hello-world");

    let index = std::fs::read_to_string(post_dir.join("index.md")).unwrap();
    assert!(index.starts_with("# Hello World\n\n"));
    assert!(index.contains("First post body."));
    assert!(index.ends_with('\n'));

    let comments = std::fs::read_to_string(post_dir.join("comments.md")).unwrap();
    assert!(comments.starts_with("# Comments\n\n"));
    assert!(comments.contains("## Bob - 2021-05-02 09:00"));
    // Nameless second commenter falls back to Anonymous
    assert!(comments.contains("## Anonymous - 2021-05-03 12:00"));
    // Exactly one separator between the two comments, none after the last
    assert_eq!(comments.matches("---").count(), 1);
    assert!(!comments.trim_end().ends_with("---"));
}

#[tokio::test]
async fn test_comment_feed_failure_still_writes_post() {
    let server = MockServer::start().await;
    mount_posts_feed(&server, POSTS_FEED).await;
    Mock::given(method("GET"))
        .and(path("/feeds/4567/comments/default"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = test_config(&server, &output);
    let client = reqwest::Client::new();

    let written = archive::run(&config, &client).await.unwrap();
    assert_eq!(written, 1);

    let post_dir = config
        .output_dir
        .join("2021")
        .join("2021-05-01-10-30-hello-world");
    assert!(post_dir.join("index.md").exists());
    assert!(!post_dir.join("comments.md").exists());
}

// ============================================================================
// Skip Behavior
// ============================================================================

#[tokio::test]
async fn test_unparseable_date_skips_post_entirely() {
    let server = MockServer::start().await;
    mount_posts_feed(&server, UNDATED_POSTS_FEED).await;

    let output = TempDir::new().unwrap();
    let config = test_config(&server, &output);
    let client = reqwest::Client::new();

    let written = archive::run(&config, &client).await.unwrap();
    assert_eq!(written, 0);

    // The output root exists, but no post directory was created under it
    let entries: Vec<_> = std::fs::read_dir(&config.output_dir)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_empty_feed_is_clean_success() {
    let server = MockServer::start().await;
    mount_posts_feed(&server, EMPTY_FEED).await;

    let output = TempDir::new().unwrap();
    let config = test_config(&server, &output);
    let client = reqwest::Client::new();

    let written = archive::run(&config, &client).await.unwrap();
    assert_eq!(written, 0);
    // Nothing is created for an empty feed, not even the output root
    assert!(!config.output_dir.exists());
}

#[tokio::test]
async fn test_unreachable_feed_is_clean_success() {
    let output = TempDir::new().unwrap();
    let config = Config {
        feed_base: "http://127.0.0.1:1/feeds".to_string(),
        output_dir: output.path().join("posts"),
        page_size: 25,
        request_delay_ms: 0,
    };
    let client = reqwest::Client::new();

    let written = archive::run(&config, &client).await.unwrap();
    assert_eq!(written, 0);
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_rerun_produces_byte_identical_output() {
    let server = MockServer::start().await;
    mount_posts_feed(&server, POSTS_FEED).await;
    Mock::given(method("GET"))
        .and(path("/feeds/4567/comments/default"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMMENTS_FEED))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = test_config(&server, &output);
    let client = reqwest::Client::new();

    archive::run(&config, &client).await.unwrap();

    let post_dir = config
        .output_dir
        .join("2021")
        .join("2021-05-01-10-30-hello-world");
    let index_first = std::fs::read(post_dir.join("index.md")).unwrap();
    let comments_first = std::fs::read(post_dir.join("comments.md")).unwrap();

    archive::run(&config, &client).await.unwrap();

    assert_eq!(std::fs::read(post_dir.join("index.md")).unwrap(), index_first);
    assert_eq!(
        std::fs::read(post_dir.join("comments.md")).unwrap(),
        comments_first
    );
}
