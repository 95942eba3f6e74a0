#![allow(dead_code)]

use std::sync::Once;

use pocketbase_client::{PocketBaseClient, Record};
use serde_json::{json, Value};
use wiremock::{MockServer, Request};

/// A mock PocketBase server plus a client pointed at it.
pub struct TestEnvironment {
    pub server: MockServer,
    pub client: PocketBaseClient,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let client = PocketBaseClient::new(server.uri());
        Self { server, client }
    }

    /// Environment whose client already holds `token`.
    pub async fn with_token(token: &str) -> Self {
        let env = Self::new().await;
        env.client.set_token(token);
        env
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }

    pub async fn single_request(&self) -> Request {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .map(|value| value.to_str().expect("header is ascii"))
}

pub fn query<'a>(request: &'a Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Build a [`Record`] from a JSON object literal.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A list response page with `count` items whose ids start at `first_id`.
pub fn list_page(page: u32, per_page: u32, total_pages: u32, first_id: u32, count: u32) -> Value {
    let items: Vec<Value> = (first_id..first_id + count)
        .map(|id| json!({"id": format!("rec{id}"), "title": format!("Post {id}")}))
        .collect();
    json!({
        "page": page,
        "perPage": per_page,
        "totalItems": items.len(),
        "totalPages": total_pages,
        "items": items
    })
}

pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}
