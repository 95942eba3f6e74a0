//! # PocketBase HTTP Client
//!
//! This module provides an async client for the PocketBase REST API: password
//! and superuser authentication, impersonation, record reads and writes, and
//! file uploads.
//!
//! ## Modules
//!
//! - [`client`] - The client itself, token access and custom calls
//! - [`config`] - Builder for transport, timeout and user agent settings
//! - [`auth`] - Token storage and authentication endpoints
//! - [`records`] - Record CRUD and paginated listing
//! - [`files`] - File upload directives and multipart encoding
//! - [`options`] - Query parameters for single-record and list requests
//! - [`context`] - Per-call cancellation and deadlines
//! - [`error`] - Error taxonomy
//! - [`types`] - Record type and response envelopes
//!
//! ## Quick Start
//!
//! ```no_run
//! use pocketbase_client::{Context, ListOptions, PocketBaseClient};
//!
//! # async fn example() -> pocketbase_client::Result<()> {
//! let client = PocketBaseClient::new("http://localhost:8090");
//! let ctx = Context::background();
//!
//! client
//!     .authenticate_with_password(&ctx, "users", "user@example.com", "password123")
//!     .await?;
//!
//! let posts = client
//!     .get_all_records(&ctx, "posts", ListOptions::new().sort("-created"))
//!     .await?;
//! println!("Found {} posts", posts.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod options;
pub mod records;
mod transport;
pub mod types;

pub use auth::SUPERUSERS_COLLECTION;
pub use client::{PocketBaseClient, DEFAULT_USER_AGENT};
pub use config::ClientBuilder;
pub use context::Context;
pub use error::{ApiError, Error, Result};
pub use files::{FileData, FileUpload, FileUploadOptions};
pub use options::{ListOptions, QueryOptions, DEFAULT_PER_PAGE};
pub use types::{ImpersonateResult, Record};
