//! The formatted error value and its stable numeric identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Groups related error kinds.
///
/// The discriminants are part of the wire format of [`NetdefError::error_code`]
/// and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ErrorDomain {
    /// Failures while reading the document or resolving a located node
    Parser = 1,
    /// Validation failures without a usable source location
    Validation = 2,
}

/// What kind of failure an error describes.
///
/// | kind               | domain       | code |
/// |--------------------|--------------|------|
/// | `InvalidYaml`      | `Parser`     | 0    |
/// | `InvalidConfig`    | `Parser`     | 1    |
/// | `ConfigGeneric`    | `Validation` | 0    |
/// | `ConfigValidation` | `Validation` | 1    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The document is not well-formed YAML
    InvalidYaml,
    /// A semantic error located at a node of a known file
    InvalidConfig,
    /// A semantic error in a known file, without a node location
    ConfigValidation,
    /// A semantic error with neither file nor location
    ConfigGeneric,
}

impl ErrorKind {
    pub fn domain(self) -> ErrorDomain {
        match self {
            ErrorKind::InvalidYaml | ErrorKind::InvalidConfig => ErrorDomain::Parser,
            ErrorKind::ConfigValidation | ErrorKind::ConfigGeneric => ErrorDomain::Validation,
        }
    }

    /// The code within [`ErrorKind::domain`].
    pub fn code(self) -> u32 {
        match self {
            ErrorKind::InvalidYaml => 0,
            ErrorKind::InvalidConfig => 1,
            ErrorKind::ConfigGeneric => 0,
            ErrorKind::ConfigValidation => 1,
        }
    }

    /// Domain in the high 32 bits, code in the low 32 bits.
    pub fn error_code(self) -> u64 {
        ((self.domain() as u64) << 32) | u64::from(self.code())
    }
}

/// A fully formatted error.
///
/// Built in one piece by the functions in [`crate::report`]; its `Display`
/// output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct NetdefError {
    kind: ErrorKind,
    message: String,
}

impl NetdefError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn domain(&self) -> ErrorDomain {
        self.kind.domain()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Combined domain and code, stable across process boundaries.
    pub fn error_code(&self) -> u64 {
        self.kind.error_code()
    }

    /// Copy the message into `buf` as a NUL-terminated string.
    ///
    /// At most `buf.len() - 1` message bytes are copied, cut back to a UTF-8
    /// character boundary, followed by a terminating NUL. Returns the number
    /// of bytes written including the terminator, which never exceeds
    /// `buf.len()`. An empty buffer is left untouched.
    pub fn copy_message(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };

        let mut len = self.message.len().min(room);
        while !self.message.is_char_boundary(len) {
            len -= 1;
        }

        buf[..len].copy_from_slice(&self.message.as_bytes()[..len]);
        buf[len] = 0;
        len + 1
    }

    /// Render as a JSON value for machine consumers.
    ///
    /// ```
    /// use netdef_error_reporting::{ErrorKind, NetdefError};
    ///
    /// let err = NetdefError::new(ErrorKind::ConfigValidation, "net.yaml: Error in network definition: bad value");
    /// let json = err.to_json();
    /// assert_eq!(json["kind"], "ConfigValidation");
    /// assert_eq!(json["error_code"], 0x2_0000_0001_u64);
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        json!({
            "kind": self.kind,
            "domain": self.domain(),
            "code": self.kind.code(),
            "error_code": self.error_code(),
            "message": self.message,
        })
    }
}

/// Release the error held in `slot`, if any.
pub fn clear(slot: &mut Option<NetdefError>) {
    *slot = None;
}
