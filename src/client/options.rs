//! Query parameters for record requests.
//!
//! [`QueryOptions`] covers single-record calls (get, create, update,
//! impersonate) and [`ListOptions`] covers list calls. Both are plain
//! builders: each setter replaces the previous value, and an unset option is
//! left out of the query string entirely.

/// Page size PocketBase uses when none is given.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// `expand` / `fields` parameters for single-record requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Relation fields to inline under the record's `expand` key
    pub expand: Vec<String>,
    /// Fields to return; empty means all fields
    pub fields: Vec<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![];
        if !self.expand.is_empty() {
            params.push(("expand", self.expand.join(",")));
        }
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        params
    }
}

/// Paging, sorting and filtering for list requests.
///
/// A `page` greater than 1 makes
/// [`get_all_records`](crate::PocketBaseClient::get_all_records) fetch only
/// that page instead of walking the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    /// Items per page; 0 leaves the choice to the server
    pub per_page: u32,
    /// Sort expression, e.g. `-created,title`
    pub sort: Option<String>,
    /// Filter expression, e.g. `status = "published" && views > 10`
    pub filter: Option<String>,
    pub expand: Vec<String>,
    pub fields: Vec<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            filter: None,
            expand: vec![],
            fields: vec![],
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn expand<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Query parameters for fetching `page` with these options.
    pub(crate) fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string())];
        if self.per_page > 0 {
            params.push(("perPage", self.per_page.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sort", sort.to_string()));
        }
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            params.push(("filter", filter.to_string()));
        }
        if !self.expand.is_empty() {
            params.push(("expand", self.expand.join(",")));
        }
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        params
    }
}

/// Append `params` to `endpoint` as a percent-encoded query string.
pub(crate) fn with_query(mut endpoint: String, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint;
    }

    let encoded: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    endpoint.push('?');
    endpoint.push_str(&encoded.join("&"));
    tracing::trace!(%endpoint, "rendered query string");
    endpoint
}
