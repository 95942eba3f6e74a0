//! Record CRUD operations.

use reqwest::Method;
use tracing::debug;

use crate::client::client::PocketBaseClient;
use crate::client::context::Context;
use crate::client::error::Result;
use crate::client::files::FileUploadOptions;
use crate::client::options::{with_query, ListOptions, QueryOptions};
use crate::client::transport::Body;
use crate::client::types::{ListResponse, Record};

fn records_path(collection: &str) -> String {
    format!("/api/collections/{}/records", collection)
}

fn record_path(collection: &str, record_id: &str) -> String {
    format!("/api/collections/{}/records/{}", collection, record_id)
}

impl PocketBaseClient {
    /// Fetch a single record by id.
    ///
    /// A missing record fails with an API error for which
    /// [`Error::is_not_found`](crate::Error::is_not_found) is true.
    pub async fn get_record(
        &self,
        ctx: &Context,
        collection: &str,
        record_id: &str,
        options: QueryOptions,
    ) -> Result<Record> {
        let endpoint = with_query(record_path(collection, record_id), &options.query_pairs());
        self.request(ctx, Method::GET, &endpoint, Body::Empty).await
    }

    /// Fetch every record of a collection, following pagination.
    ///
    /// Pages are requested one after another starting at page 1 until the
    /// server's `totalPages` is reached, and their items are concatenated in
    /// order. Any failed page fails the whole call.
    ///
    /// If `options.page` is greater than 1, only that page is fetched and
    /// returned. An explicit page 1 still walks every page.
    pub async fn get_all_records(
        &self,
        ctx: &Context,
        collection: &str,
        options: ListOptions,
    ) -> Result<Vec<Record>> {
        if options.page > 1 {
            let resp = self.list_page(ctx, collection, &options, options.page).await?;
            return Ok(resp.items);
        }

        let mut records = Vec::new();
        let mut page = 1;
        loop {
            ctx.check()?;
            let resp = self.list_page(ctx, collection, &options, page).await?;
            debug!(
                "Fetched page {}/{} of {} ({} items, {} per page, {} total)",
                resp.page,
                resp.total_pages,
                collection,
                resp.items.len(),
                resp.per_page,
                resp.total_items
            );
            records.extend(resp.items);

            if page >= resp.total_pages {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn list_page(
        &self,
        ctx: &Context,
        collection: &str,
        options: &ListOptions,
        page: u32,
    ) -> Result<ListResponse> {
        let endpoint = with_query(records_path(collection), &options.query_pairs(page));
        self.request(ctx, Method::GET, &endpoint, Body::Empty).await
    }

    /// Create a record from `record`'s fields and return it as stored,
    /// including the server-assigned `id`, `created` and `updated`.
    pub async fn create_record(
        &self,
        ctx: &Context,
        collection: &str,
        record: &Record,
        options: QueryOptions,
    ) -> Result<Record> {
        let endpoint = with_query(records_path(collection), &options.query_pairs());
        self.request(ctx, Method::POST, &endpoint, Body::json(record)?)
            .await
    }

    /// Patch the given fields of an existing record and return the result.
    pub async fn update_record(
        &self,
        ctx: &Context,
        collection: &str,
        record_id: &str,
        record: &Record,
        options: QueryOptions,
    ) -> Result<Record> {
        let endpoint = with_query(record_path(collection, record_id), &options.query_pairs());
        self.request(ctx, Method::PATCH, &endpoint, Body::json(record)?)
            .await
    }

    /// [`create_record`](Self::create_record) with file fields, sent as
    /// `multipart/form-data`.
    ///
    /// ```no_run
    /// # use pocketbase_client::{Context, FileData, FileUpload, FileUploadOptions, PocketBaseClient};
    /// # async fn example(client: &PocketBaseClient) -> pocketbase_client::Result<()> {
    /// let mut data = pocketbase_client::Record::new();
    /// data.insert("title".into(), "My Document".into());
    ///
    /// let created = client
    ///     .create_record_with_files(
    ///         &Context::background(),
    ///         "documents",
    ///         FileUploadOptions::new()
    ///             .form_data(data)
    ///             .upload(FileUpload::new("file", vec![FileData::from_bytes("a.txt", "hi")])),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_record_with_files(
        &self,
        ctx: &Context,
        collection: &str,
        uploads: FileUploadOptions,
    ) -> Result<Record> {
        self.request(ctx, Method::POST, &records_path(collection), Body::Files(uploads))
            .await
    }

    /// [`update_record`](Self::update_record) with file fields. Use
    /// [`FileUpload::append`](crate::FileUpload::append) to keep existing
    /// files and [`FileUpload::delete`](crate::FileUpload::delete) to remove
    /// some of them.
    pub async fn update_record_with_files(
        &self,
        ctx: &Context,
        collection: &str,
        record_id: &str,
        uploads: FileUploadOptions,
    ) -> Result<Record> {
        self.request(
            ctx,
            Method::PATCH,
            &record_path(collection, record_id),
            Body::Files(uploads),
        )
        .await
    }
}
