//! The unit of parsing: source text plus the path it came from.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// One network definition being parsed.
///
/// The path is kept so semantic errors can reopen the file for context
/// after the text has been parsed; it is `None` for in-memory input.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: Option<PathBuf>,
    content: String,
}

impl SourceUnit {
    /// Read a definition from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read as UTF-8 text.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Read source");
        Ok(Self {
            path: Some(path.to_path_buf()),
            content,
        })
    }

    /// Wrap text that is already in memory.
    pub fn from_text(content: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Display name used in syntax errors.
    pub fn name(&self) -> Option<String> {
        self.path.as_ref().map(|p| p.display().to_string())
    }
}
