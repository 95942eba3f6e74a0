//! Authentication handling for the PocketBase API.
//!
//! The client keeps one auth token, shared by every request it sends. The
//! token lives in a [`TokenStore`] guarded by a reader/writer lock, so calls
//! running concurrently on a shared client always see a whole token, never a
//! partially replaced one.
//!
//! Tokens are sent verbatim in the `Authorization` header, without a
//! `Bearer` prefix, as PocketBase expects.

use std::sync::{PoisonError, RwLock};

use reqwest::Method;
use tracing::{debug, info, warn};

use crate::client::client::PocketBaseClient;
use crate::client::context::Context;
use crate::client::error::Result;
use crate::client::options::{with_query, QueryOptions};
use crate::client::transport::Body;
use crate::client::types::{
    AuthResponse, ImpersonateRequest, ImpersonateResponse, ImpersonateResult,
    PasswordAuthRequest, Record,
};

/// Collection holding PocketBase superuser accounts.
pub const SUPERUSERS_COLLECTION: &str = "_superusers";

/// Guarded storage for the current auth token.
#[derive(Debug, Default)]
pub(crate) struct TokenStore {
    token: RwLock<String>,
}

impl TokenStore {
    pub fn new(token: String) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    /// Current token, `None` when unset or empty.
    pub fn get(&self) -> Option<String> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        if token.is_empty() {
            None
        } else {
            Some(token.clone())
        }
    }

    pub fn set(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn clear(&self) {
        self.set(String::new());
    }

    pub fn is_set(&self) -> bool {
        !self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

/// First characters of a token, safe to log.
pub(crate) fn token_preview(token: &str) -> String {
    format!("{}...", token.chars().take(10).collect::<String>())
}

impl PocketBaseClient {
    /// Authenticate a record of an auth collection with its identity
    /// (username or email) and password.
    ///
    /// On success the returned token replaces the client's current token and
    /// the authenticated record is returned. On failure the current token is
    /// left untouched.
    ///
    /// ```no_run
    /// # use pocketbase_client::{Context, PocketBaseClient};
    /// # async fn example() -> pocketbase_client::Result<()> {
    /// let client = PocketBaseClient::new("http://localhost:8090");
    /// let ctx = Context::background();
    /// let user = client
    ///     .authenticate_with_password(&ctx, "users", "user@example.com", "password123")
    ///     .await?;
    /// println!("Authenticated user: {}", user["email"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authenticate_with_password(
        &self,
        ctx: &Context,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<Record> {
        info!("Attempting authentication for {} in collection {}", identity, collection);

        let endpoint = format!("/api/collections/{}/auth-with-password", collection);
        let body = Body::json(&PasswordAuthRequest { identity, password })?;

        let resp: AuthResponse = self
            .request(ctx, Method::POST, &endpoint, body)
            .await
            .inspect_err(|e| warn!("Authentication failed for {}: {}", identity, e))?;

        self.auth.set(resp.token);
        info!("Authentication successful for {}", identity);
        if let Some(token) = self.auth.get() {
            debug!("Received token: {}", token_preview(&token));
        }

        Ok(resp.record)
    }

    /// Authenticate against the `_superusers` collection.
    pub async fn authenticate_as_superuser(
        &self,
        ctx: &Context,
        email: &str,
        password: &str,
    ) -> Result<Record> {
        self.authenticate_with_password(ctx, SUPERUSERS_COLLECTION, email, password)
            .await
    }

    /// Mint a non-refreshable token for another record. Requires the client
    /// to hold a superuser token; the service enforces this.
    ///
    /// `duration_secs` sets the token lifetime. Zero or negative values leave
    /// the request body empty so the collection's default lifetime applies.
    ///
    /// The client's own token is not changed.
    pub async fn impersonate(
        &self,
        ctx: &Context,
        collection: &str,
        record_id: &str,
        duration_secs: i64,
        options: QueryOptions,
    ) -> Result<ImpersonateResult> {
        let endpoint = with_query(
            format!("/api/collections/{}/impersonate/{}", collection, record_id),
            &options.query_pairs(),
        );

        let body = if duration_secs > 0 {
            Body::json(&ImpersonateRequest {
                duration: duration_secs,
            })?
        } else {
            Body::Empty
        };

        let resp: ImpersonateResponse = self.request(ctx, Method::POST, &endpoint, body).await?;
        debug!("Impersonating {}/{}: {}", collection, record_id, token_preview(&resp.token));

        Ok(ImpersonateResult {
            token: resp.token,
            record: resp.record,
        })
    }
}
