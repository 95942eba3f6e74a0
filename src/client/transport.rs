//! The request pipeline shared by every API call.
//!
//! A call is built either as JSON or as `multipart/form-data`, then sent and
//! checked by the same code path: non-2xx answers become [`ApiError`]s and
//! successful bodies are decoded into the caller's shape.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::client::client::PocketBaseClient;
use crate::client::context::Context;
use crate::client::error::{ApiError, Error, Result};
use crate::client::files::{encode_parts, into_form, FileUploadOptions};
use crate::client::options::with_query;

/// Payload of a single API call.
#[derive(Debug)]
pub(crate) enum Body {
    /// No request body at all
    Empty,
    Json(Value),
    /// Sent as multipart; the bundle's `expand`/`fields` go on the URL
    Files(FileUploadOptions),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Body::Json)
            .map_err(Error::Marshal)
    }
}

impl From<Option<Value>> for Body {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Body::Empty, Body::Json)
    }
}

impl PocketBaseClient {
    /// Send one call and decode the 2xx body into `R`.
    pub(crate) async fn request<R: DeserializeOwned>(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Body,
    ) -> Result<R> {
        let bytes = self.execute(ctx, method, endpoint, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Failed to parse response from {}: {}", endpoint, e);
            Error::Decode(e)
        })
    }

    /// Send one call whose successful body is ignored.
    pub(crate) async fn request_no_content(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Body,
    ) -> Result<()> {
        self.execute(ctx, method, endpoint, body).await.map(|_| ())
    }

    async fn execute(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Body,
    ) -> Result<Vec<u8>> {
        ctx.run(async {
            let request = match body {
                Body::Files(uploads) => self.multipart_request(method, endpoint, uploads).await?,
                other => self.json_request(method, endpoint, other)?,
            };
            self.dispatch(request).await
        })
        .await
    }

    fn json_request(&self, method: Method, endpoint: &str, body: Body) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut headers = self.common_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = self.http.request(method, &url).headers(headers);
        Ok(match body {
            Body::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(Error::Marshal)?;
                request.body(bytes)
            }
            _ => request,
        })
    }

    async fn multipart_request(
        &self,
        method: Method,
        endpoint: &str,
        uploads: FileUploadOptions,
    ) -> Result<RequestBuilder> {
        let url = with_query(
            format!("{}{}", self.base_url, endpoint),
            &uploads.query.query_pairs(),
        );
        debug!("{} {} (multipart, {} uploads)", method, url, uploads.uploads.len());

        let parts = encode_parts(uploads).await?;
        trace!("multipart body has {} parts", parts.len());

        // reqwest sets the boundary content type for the form itself.
        Ok(self
            .http
            .request(method, &url)
            .headers(self.common_headers()?)
            .multipart(into_form(parts)))
    }

    fn common_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        if let Some(token) = self.auth.get() {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&token)?);
        }
        Ok(headers)
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| {
            warn!("Network error talking to {}: {}", self.base_url, e);
            Error::from(e)
        })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            // An unreadable error body still yields an API error.
            let body = response.bytes().await.unwrap_or_default();
            let err = ApiError::from_response(status, &body);
            warn!("Request failed with status {}: {}", err.status, err.message);
            return Err(Error::Api(err));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
