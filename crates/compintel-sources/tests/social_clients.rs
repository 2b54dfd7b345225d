//! Integration tests for the Bluesky and Mastodon timeline clients.

use compintel_core::{Engagement, MastodonAccount};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use compintel_sources::{BlueskyClient, MastodonClient, SourceError};

fn feed_item(rkey: &str, text: &str, likes: u64) -> serde_json::Value {
    json!({
        "post": {
            "uri": format!("at://did:plc:abc123/app.bsky.feed.post/{rkey}"),
            "cid": "bafy",
            "author": {"handle": "acme.bsky.social"},
            "record": {"$type": "app.bsky.feed.post", "text": text, "createdAt": "2026-10-01T12:00:00Z"},
            "likeCount": likes,
            "repostCount": 1,
            "replyCount": 0
        }
    })
}

// ---------------------------------------------------------------------------
// Bluesky
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bluesky_follows_cursor_until_count_reached() {
    let server = MockServer::start().await;

    // Second page first: the cursor-specific mock must take precedence.
    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [feed_item("p3", "third", 3), feed_item("p4", "fourth", 4)],
            "cursor": "page-3"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .and(query_param("actor", "acme.bsky.social"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [feed_item("p1", "first", 1), feed_item("p2", "second", 2)],
            "cursor": "page-2"
        })))
        .mount(&server)
        .await;

    let client = BlueskyClient::with_base_url(reqwest::Client::new(), &server.uri()).unwrap();
    let posts = client.author_feed("acme.bsky.social", 3).await.unwrap();

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].text, "first");
    assert_eq!(posts[2].text, "third");
    assert_eq!(
        posts[0].url.as_deref(),
        Some("https://bsky.app/profile/acme.bsky.social/post/p1")
    );
    assert_eq!(
        posts[1].engagement,
        Engagement::Bluesky {
            likes: 2,
            reposts: 1,
            replies: 0
        }
    );
}

#[tokio::test]
async fn bluesky_stops_when_cursor_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [feed_item("only", "only post", 0)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BlueskyClient::with_base_url(reqwest::Client::new(), &server.uri()).unwrap();
    let posts = client.author_feed("acme.bsky.social", 200).await.unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn bluesky_unknown_actor_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "InvalidRequest",
            "message": "Profile not found"
        })))
        .mount(&server)
        .await;

    let client = BlueskyClient::with_base_url(reqwest::Client::new(), &server.uri()).unwrap();
    let err = client.author_feed("nobody.bsky.social", 10).await.unwrap_err();
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 400, .. }));
}

// ---------------------------------------------------------------------------
// Mastodon
// ---------------------------------------------------------------------------

fn account() -> MastodonAccount {
    MastodonAccount::parse("@acme@mastodon.example", "mastodon.social").expect("valid account")
}

#[tokio::test]
async fn mastodon_looks_up_account_then_pages_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .and(query_param("acct", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "username": "acme"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/42/statuses"))
        .and(query_param("max_id", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/42/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "10", "created_at": "2026-10-03T08:00:00.000Z",
             "content": "<p>New <a href=\"https://acme.example\">catalogue</a> is live</p>",
             "url": "https://mastodon.example/@acme/10",
             "favourites_count": 5, "reblogs_count": 2, "replies_count": 1,
             "tags": [{"name": "anvils", "url": "https://mastodon.example/tags/anvils"}],
             "mentions": [{"id": "7", "acct": "wile@desert.example", "username": "wile"}]},
            {"id": "9", "created_at": "2026-10-02T08:00:00.000Z", "content": "<p>Hello fediverse</p>",
             "url": null, "favourites_count": 0, "reblogs_count": 0, "replies_count": 0}
        ])))
        .mount(&server)
        .await;

    let client = MastodonClient::with_base_url(reqwest::Client::new(), &server.uri()).unwrap();
    let posts = client.statuses(&account(), 200).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].text, "New catalogue is live");
    assert_eq!(
        posts[0].engagement,
        Engagement::Mastodon {
            favourites: 5,
            reblogs: 2,
            replies: 1
        }
    );
    assert_eq!(posts[0].hashtags, vec!["anvils"]);
    assert_eq!(posts[0].mentions, vec!["wile@desert.example"]);
    assert!(posts[1].url.is_none());
    assert!(posts[1].hashtags.is_empty());
}

#[tokio::test]
async fn mastodon_unknown_account_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Record not found"})))
        .mount(&server)
        .await;

    let client = MastodonClient::with_base_url(reqwest::Client::new(), &server.uri()).unwrap();
    let err = client.statuses(&account(), 20).await.unwrap_err();
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 404, .. }));
}
