//! Type definitions for the PocketBase API.
//!
//! Records are schema-less on the client side: a [`Record`] is simply a JSON
//! object whose shape depends on the collection schema and on the `fields` /
//! `expand` parameters of the query that produced it.
//!
//! The remaining types in this module describe the JSON envelopes returned by
//! the service. Most of them are crate-private and only exist to be decoded
//! and projected into the public return types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single PocketBase record, keyed by field name.
///
/// Server-managed fields (`id`, `created`, `updated`, `collectionId`, ...)
/// appear alongside the collection's own fields. Related records requested
/// through `expand` are inlined under the `expand` key.
pub type Record = serde_json::Map<String, Value>;

/// Request payload for the `auth-with-password` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct PasswordAuthRequest<'a> {
    /// Username or email, depending on the collection's identity fields
    pub identity: &'a str,
    pub password: &'a str,
}

/// Response envelope of `auth-with-password`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub record: Record,
}

/// Request payload for the `impersonate` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ImpersonateRequest {
    /// Token lifetime in seconds
    pub duration: i64,
}

/// Response envelope of `impersonate`.
#[derive(Debug, Deserialize)]
pub(crate) struct ImpersonateResponse {
    pub token: String,
    pub record: Record,
}

/// Result of a successful impersonation.
///
/// The token is *not* applied to the client that performed the call; hand it
/// to [`PocketBaseClient::set_token`](crate::PocketBaseClient::set_token) on
/// whichever client should act as the impersonated record.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpersonateResult {
    /// Non-refreshable auth token minted for the impersonated record
    pub token: String,
    /// The impersonated record
    pub record: Record,
}

/// One page of a record listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub items: Vec<Record>,
}

/// Error envelope returned with non-2xx responses.
///
/// Every field is optional on the wire; missing values are filled in from the
/// HTTP status line when building the [`ApiError`](crate::ApiError).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<HashMap<String, Value>>,
}
