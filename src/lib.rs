//! # PocketBase Client Library
//!
//! Typed async bindings for the [PocketBase](https://pocketbase.io) REST API.
//!
//! The [`client`] module contains everything: the [`PocketBaseClient`],
//! its configuration builder, query and upload options, and the error types.
//! The most common items are re-exported at the crate root.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pocketbase_client::{Context, PocketBaseClient, QueryOptions};
//!
//! # async fn example() -> pocketbase_client::Result<()> {
//! let client = PocketBaseClient::new("http://localhost:8090");
//! let ctx = Context::background();
//!
//! client
//!     .authenticate_as_superuser(&ctx, "admin@example.com", "secret")
//!     .await?;
//!
//! let post = client
//!     .get_record(&ctx, "posts", "RECORD_ID", QueryOptions::new().expand(["author"]))
//!     .await?;
//! println!("Post title: {}", post["title"]);
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{
    ApiError, ClientBuilder, Context, Error, FileData, FileUpload, FileUploadOptions,
    ImpersonateResult, ListOptions, PocketBaseClient, QueryOptions, Record, Result,
    DEFAULT_PER_PAGE, DEFAULT_USER_AGENT, SUPERUSERS_COLLECTION,
};
pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
