//! Errors from loading a network definition.

use netdef_error_reporting::NetdefError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be read at all
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not acceptable YAML
    #[error(transparent)]
    Invalid(#[from] NetdefError),
}

impl Error {
    /// The formatted error, if this is a document error.
    pub fn as_netdef(&self) -> Option<&NetdefError> {
        match self {
            Error::Invalid(e) => Some(e),
            Error::Read { .. } => None,
        }
    }
}
