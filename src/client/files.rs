//! File uploads and multipart encoding.
//!
//! PocketBase accepts file fields through `multipart/form-data`. The field
//! name carries the operation:
//!
//! - `avatar` replaces the field's files,
//! - `avatar+` appends to the existing files,
//! - `avatar-` (one value per file name) removes existing files.
//!
//! Encoding happens in two steps. [`encode_parts`] turns a
//! [`FileUploadOptions`] into an ordered list of [`FormPart`]s, reading every
//! file source to the end, and [`into_form`] hands those parts to reqwest.

use std::fmt;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::client::error::{Error, Result};
use crate::client::options::QueryOptions;
use crate::client::types::Record;

enum FileSource {
    Bytes(Vec<u8>),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

/// A file to attach to a record field.
pub struct FileData {
    filename: String,
    size: Option<u64>,
    source: FileSource,
}

impl fmt::Debug for FileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            FileSource::Bytes(_) => "bytes",
            FileSource::Reader(_) => "reader",
        };
        f.debug_struct("FileData")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .field("source", &source)
            .finish()
    }
}

impl FileData {
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            filename: filename.into(),
            size: Some(bytes.len() as u64),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Stream the file contents from `reader` when the request is built.
    pub fn from_reader<R>(filename: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            filename: filename.into(),
            size: None,
            source: FileSource::Reader(Box::new(reader)),
        }
    }

    /// Open a file on disk; the upload name is the path's file name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let metadata = file.metadata().await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            filename,
            size: Some(metadata.len()),
            source: FileSource::Reader(Box::new(file)),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Size in bytes, when known up front.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    async fn read_all(self) -> std::io::Result<Vec<u8>> {
        match self.source {
            FileSource::Bytes(bytes) => Ok(bytes),
            FileSource::Reader(mut reader) => {
                let mut buf = Vec::with_capacity(self.size.unwrap_or(0) as usize);
                reader.read_to_end(&mut buf).await?;
                Ok(buf)
            }
        }
    }
}

/// Upload directive for one file field.
#[derive(Debug)]
pub struct FileUpload {
    pub field: String,
    pub files: Vec<FileData>,
    /// Add to the existing files instead of replacing them
    pub append: bool,
    /// Names of existing files to remove from the field
    pub delete: Vec<String>,
}

impl FileUpload {
    pub fn new(field: impl Into<String>, files: Vec<FileData>) -> Self {
        Self {
            field: field.into(),
            files,
            append: false,
            delete: vec![],
        }
    }

    pub fn append(mut self) -> Self {
        self.append = true;
        self
    }

    pub fn delete<I, S>(mut self, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delete = filenames.into_iter().map(Into::into).collect();
        self
    }

    /// Form key the files are written under.
    fn file_key(&self) -> String {
        if self.append {
            format!("{}+", self.field)
        } else {
            self.field.clone()
        }
    }
}

/// Body of a create/update call that carries files.
#[derive(Debug, Default)]
pub struct FileUploadOptions {
    /// Upload directives, encoded in this order
    pub uploads: Vec<FileUpload>,
    /// Regular (non-file) record fields
    pub data: Record,
    pub query: QueryOptions,
}

impl FileUploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_data(mut self, data: Record) -> Self {
        self.data = data;
        self
    }

    pub fn upload(mut self, upload: FileUpload) -> Self {
        self.uploads.push(upload);
        self
    }

    pub fn expand<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = self.query.expand(relations);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = self.query.fields(fields);
        self
    }
}

/// One entry of a multipart body, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

/// Form value for a regular record field. Strings are sent as-is, numbers and
/// booleans in their JSON spelling, anything else as a JSON document.
fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten the upload bundle into multipart entries.
///
/// Record fields come first, then each upload directive in caller order:
/// its `<field>-` deletions, then its files under `<field>` or `<field>+`.
pub(crate) async fn encode_parts(options: FileUploadOptions) -> Result<Vec<FormPart>> {
    let mut parts = Vec::with_capacity(options.data.len());

    for (key, value) in &options.data {
        parts.push(FormPart::Text {
            name: key.clone(),
            value: form_value(value),
        });
    }

    for upload in options.uploads {
        let delete_key = format!("{}-", upload.field);
        for filename in &upload.delete {
            parts.push(FormPart::Text {
                name: delete_key.clone(),
                value: filename.clone(),
            });
        }

        let key = upload.file_key();
        for file in upload.files {
            let filename = file.filename.clone();
            let bytes = file.read_all().await.map_err(|source| Error::Multipart {
                field: key.clone(),
                source,
            })?;
            trace!(field = %key, %filename, len = bytes.len(), "encoded file part");
            parts.push(FormPart::File {
                name: key.clone(),
                filename,
                bytes,
            });
        }
    }

    Ok(parts)
}

pub(crate) fn into_form(parts: Vec<FormPart>) -> Form {
    parts.into_iter().fold(Form::new(), |form, part| match part {
        FormPart::Text { name, value } => form.text(name, value),
        FormPart::File {
            name,
            filename,
            bytes,
        } => form.part(name, Part::bytes(bytes).file_name(filename)),
    })
}
