//! Drop-folder transfer boundary.
//!
//! Encoded files are delivered to a remote drop folder. The transport itself
//! lives behind [`RemoteFolder`]; whatever goes wrong underneath, callers only
//! ever see a [`TransferError`].

mod local;
mod settings;

use std::path::Path;

use thiserror::Error;

pub use local::LocalFolder;
pub use settings::TransferSettings;

/// Any failure of the transfer layer: connection, authentication, host key,
/// or file system.
#[derive(Debug, Error)]
#[error("transfer failed: {message}")]
pub struct TransferError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransferError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying transport error.
    pub fn wrap<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for TransferError {
    fn from(err: std::io::Error) -> Self {
        Self::wrap(err.to_string(), err)
    }
}

/// What to upload.
#[derive(Debug, Clone, Copy)]
pub enum UploadSource<'a> {
    /// A local file; its file name is used when no destination name is given.
    Path(&'a Path),
    /// In-memory content; a destination name is mandatory.
    Bytes(&'a [u8]),
}

impl UploadSource<'_> {
    /// Destination file name: the explicit one, or the source path's name.
    pub fn destination_name(&self, explicit: Option<&str>) -> Result<String, TransferError> {
        if let Some(name) = explicit {
            return Ok(name.to_string());
        }
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    TransferError::new(format!("{} has no file name", path.display()))
                }),
            Self::Bytes(_) => Err(TransferError::new(
                "must provide a filename when uploading in-memory content",
            )),
        }
    }
}

/// A folder on the receiving side that files can be put into and read back.
pub trait RemoteFolder {
    /// Upload `source` into `folder` as `name` (see [`UploadSource::destination_name`]).
    fn upload(
        &self,
        source: UploadSource<'_>,
        folder: &str,
        name: Option<&str>,
    ) -> Result<(), TransferError>;

    /// File names in `folder`, sorted.
    fn list(&self, folder: &str) -> Result<Vec<String>, TransferError>;

    fn download(&self, folder: &str, name: &str) -> Result<Vec<u8>, TransferError>;
}
