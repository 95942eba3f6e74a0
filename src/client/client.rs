use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{
    auth::{token_preview, TokenStore},
    config::ClientBuilder,
    context::Context,
    error::Result,
};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "pocketbase-go/1.0";

/// Async client for a PocketBase server.
///
/// The client is cheap to share: wrap it in an `Arc` and call it from any
/// number of tasks. Its only mutable state is the auth token.
#[derive(Debug)]
pub struct PocketBaseClient {
    pub(crate) base_url: String,
    pub(crate) http: Client,
    pub(crate) user_agent: String,
    pub(crate) auth: TokenStore,
}

impl PocketBaseClient {
    /// Client with a default HTTP transport and user agent.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_parts(
            base_url.into(),
            Client::new(),
            DEFAULT_USER_AGENT.to_string(),
            String::new(),
        )
    }

    /// Start configuring a client; see [`ClientBuilder`].
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub(crate) fn from_parts(
        base_url: String,
        http: Client,
        user_agent: String,
        token: String,
    ) -> Self {
        let base_url = match base_url.strip_suffix('/') {
            Some(trimmed) => trimmed.to_string(),
            None => base_url,
        };
        Self {
            base_url,
            http,
            user_agent,
            auth: TokenStore::new(token),
        }
    }

    /// Base URL with one trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Replace the auth token used for subsequent requests, e.g. a token
    /// stored from an earlier session or returned by
    /// [`impersonate`](Self::impersonate).
    pub fn set_token(&self, token: impl Into<String>) {
        self.auth.set(token.into());
    }

    /// Current auth token, `None` when no token is set.
    pub fn token(&self) -> Option<String> {
        self.auth.get()
    }

    pub fn clear_token(&self) {
        self.auth.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_set()
    }

    pub fn token_preview(&self) -> Option<String> {
        self.auth.get().map(|t| token_preview(&t))
    }

    /// Call an arbitrary endpoint (path plus optional query string) and
    /// decode the JSON response into `R`.
    ///
    /// Useful for endpoints this crate has no dedicated method for. Auth,
    /// headers and error mapping behave exactly as for the typed methods.
    pub async fn send<R: DeserializeOwned>(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<R> {
        self.request(ctx, method, endpoint, body.into()).await
    }

    /// Like [`send`](Self::send) for calls whose response body is not
    /// needed. A 2xx body is discarded without being parsed.
    pub async fn send_no_content(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<()> {
        self.request_no_content(ctx, method, endpoint, body.into()).await
    }
}
