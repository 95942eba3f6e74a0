mod common;

use std::time::Duration;

use common::{list_page, TestEnvironment};
use pocketbase_client::{
    CancellationToken, Context, Error, ListOptions, PocketBaseClient, QueryOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[tokio::test]
async fn test_malformed_error_body_uses_status_line() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("content-type", "application/json")
                .set_body_string("invalid json response"),
        )
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get_record(&Context::background(), "posts", "test-id", QueryOptions::new())
        .await
        .unwrap_err();

    let api = err.as_api().expect("still an API error");
    assert_eq!(api.status, 500);
    assert_eq!(api.message, "Internal Server Error");
    assert!(api.data.is_empty());
}

#[tokio::test]
async fn test_empty_error_body_uses_status_line() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.as_api().unwrap().message, "Bad Gateway");
}

#[tokio::test]
async fn test_invalid_success_body_is_a_decode_error() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    assert!(err.as_api().is_none());
}

#[tokio::test]
async fn test_connection_failure_is_a_local_error() {
    common::init_test_logging();
    // Nothing listens on the discard port.
    let client = PocketBaseClient::new("http://127.0.0.1:9");

    let err = client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Request(_)), "got {err:?}");
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_invalid_token_characters_fail_request_build() {
    common::init_test_logging();
    let env = TestEnvironment::with_token("bad\ntoken").await;

    let err = env
        .client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidHeader(_)), "got {err:?}");
    assert!(env.requests().await.is_empty());
}

#[tokio::test]
async fn test_invalid_base_url_fails_request_build() {
    common::init_test_logging();
    let client = PocketBaseClient::new("not a url");

    let err = client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RequestBuild(_)), "got {err:?}");
    assert!(err.to_string().starts_with("failed to create request"));
    assert!(err.as_api().is_none());
}

#[tokio::test]
async fn test_deadline_aborts_slow_request() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "x"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&env.server)
        .await;

    let ctx = Context::with_timeout(Duration::from_millis(100));
    let err = env
        .client
        .get_record(&ctx, "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded), "got {err:?}");
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "x"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&env.server)
        .await;

    let token = CancellationToken::new();
    let ctx = Context::with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = env
        .client
        .get_record(&ctx, "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled), "got {err:?}");
}

#[tokio::test]
async fn test_already_cancelled_context_sends_nothing() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    let ctx = Context::background();
    ctx.cancel();

    let err = env
        .client
        .get_all_records(&ctx, "posts", ListOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(env.requests().await.is_empty());
}

/// Serves page 1 and cancels the caller's context while doing so.
struct CancelAfterFirstPage(CancellationToken);

impl Respond for CancelAfterFirstPage {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.0.cancel();
        ResponseTemplate::new(200).set_body_json(list_page(1, 1, 3, 1, 1))
    }
}

#[tokio::test]
async fn test_cancellation_stops_pagination() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;
    let token = CancellationToken::new();

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("page", "1"))
        .respond_with(CancelAfterFirstPage(token.clone()))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page(2, 1, 3, 2, 1)))
        .expect(0)
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get_all_records(
            &Context::with_cancellation(token),
            "posts",
            ListOptions::new().per_page(1),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_transport_timeout() {
    common::init_test_logging();
    let server = MockServer::start().await;
    let client = PocketBaseClient::builder(server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "x"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client
        .get_record(&Context::background(), "posts", "x", QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
}
