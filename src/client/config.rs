//! Client configuration.
//!
//! ```no_run
//! use std::time::Duration;
//! use pocketbase_client::PocketBaseClient;
//!
//! # fn example() -> pocketbase_client::Result<()> {
//! let client = PocketBaseClient::builder("http://localhost:8090")
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;

use crate::client::client::{PocketBaseClient, DEFAULT_USER_AGENT};
use crate::client::error::{Error, Result};

/// Which HTTP transport the client will use. Only the last choice counts.
#[derive(Debug)]
enum Transport {
    Default,
    Custom(Client),
    Timeout(Duration),
}

/// Builder for [`PocketBaseClient`].
///
/// [`http_client`](Self::http_client) and [`timeout`](Self::timeout) both
/// pick the transport, so whichever is called last wins.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    transport: Transport,
    user_agent: String,
    token: String,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: Transport::Default,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: String::new(),
        }
    }

    /// Use a preconfigured reqwest client (proxies, TLS, pooling, ...).
    pub fn http_client(mut self, client: Client) -> Self {
        self.transport = Transport::Custom(client);
        self
    }

    /// Use a fresh HTTP client with this total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = Transport::Timeout(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Start with an existing auth token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn build(self) -> Result<PocketBaseClient> {
        let http = match self.transport {
            Transport::Default => Client::new(),
            Transport::Custom(client) => client,
            Transport::Timeout(timeout) => Client::builder()
                .timeout(timeout)
                .build()
                .map_err(Error::Build)?,
        };

        Ok(PocketBaseClient::from_parts(
            self.base_url,
            http,
            self.user_agent,
            self.token,
        ))
    }
}
