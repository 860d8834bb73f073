//! Error reporting for network definition parsing.
//!
//! This crate turns a failed parse into a single located message:
//!
//! ```text
//! net.yaml:3:5: Invalid YAML: tabs are not allowed for indent:
//!     	dhcp4: true
//!     ^
//! ```
//!
//! # Architecture
//!
//! - [`caret`]: renders the `^` marker under the offending column
//! - [`context`]: extracts the offending source line, either from the
//!   tokenizer's in-memory scan window or by reopening the source file
//! - [`scan`]: the tokenizer state consumed when classifying syntax errors
//! - [`report`]: picks a message template and builds the [`NetdefError`]
//! - [`error`]: the error value, its kind and the stable numeric error code
//!
//! # Example
//!
//! ```
//! use netdef_error_reporting::{ErrorKind, semantic_error};
//!
//! let err = semantic_error(None, None, "bad value");
//! assert_eq!(err.kind(), ErrorKind::ConfigGeneric);
//! assert_eq!(err.message(), "Error in network definition: bad value");
//! ```

pub mod caret;
pub mod context;
pub mod error;
pub mod macros;
pub mod report;
pub mod scan;

pub use caret::render_caret;
pub use context::{buffer_context, buffer_line, file_context, file_line};
pub use error::{ErrorDomain, ErrorKind, NetdefError, clear};
pub use report::{
    UNNAMED_FILE, classify, invalid_yaml, report_semantic_error, report_syntax_error,
    semantic_error, syntax_error,
};
pub use scan::{Mark, ParserState, ScanState, ScanWindow, SyntaxProblem};
