//! Integration tests for `DocumentClient::fetch`.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use compintel_sources::{DocumentClient, SourceError};

const ABOUT_PAGE: &str = r#"<!doctype html>
<html><head>
  <title>About Acme</title>
  <meta property="og:image" content="/static/team.jpg">
</head><body>
  <nav>Home | About</nav>
  <p>Acme Corp has built dependable anvils, rockets and roller skates since 1949.</p>
  <p>Our workshops serve customers on every continent.</p>
</body></html>"#;

fn client() -> DocumentClient {
    DocumentClient::new(reqwest::Client::new())
}

#[tokio::test]
async fn fetch_parses_html_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ABOUT_PAGE, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let section = client()
        .fetch(&format!("{}/about", server.uri()))
        .await
        .expect("page should parse");

    assert_eq!(section.title, "About Acme");
    assert!(section.text.starts_with("Acme Corp has built dependable anvils"));
    assert!(section.text.contains('\n'));
    assert!(!section.text.contains("Home | About"));
    assert_eq!(
        section.top_image,
        Some(format!("{}/static/team.jpg", server.uri()))
    );
}

#[tokio::test]
async fn fetch_rejects_non_html_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "html"})))
        .mount(&server)
        .await;

    let err = client().fetch(&server.uri()).await.unwrap_err();
    match err {
        SourceError::NotADocument { content_type, .. } => {
            assert!(content_type.contains("json"), "got: {content_type}");
        }
        other => panic!("expected NotADocument, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_404_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client()
        .fetch(&format!("{}/our-company", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn fetch_invalid_url_is_http_error() {
    let err = client().fetch("not a url").await.unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
}
