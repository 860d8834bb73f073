//! Building located error messages.
//!
//! Syntax errors render as
//!
//! ```text
//! <file>:<line>:<col>: Invalid YAML: <reason>:
//! <source line>
//! <spaces>^
//! ```
//!
//! and semantic errors on a located node as
//!
//! ```text
//! <file>:<line>:<col>: Error in network definition: <msg>
//! <source line>
//! <spaces>^
//! ```
//!
//! Tooling parses these messages, so the layout is fixed.

use crate::context::{buffer_context, file_context};
use crate::error::{ErrorKind, NetdefError};
use crate::scan::{Mark, ParserState, ScanState, ScanWindow, SyntaxProblem};
use std::fmt::Display;
use std::path::Path;

/// Name used for syntax errors when the source has no file name.
pub const UNNAMED_FILE: &str = "(unnamed file)";

const SEMANTIC_PREFIX: &str = "Error in network definition";

/// Pick the diagnostic for a syntax failure from the tokenizer state.
///
/// Checked in order: a tab in the lookahead, then a space or end of input
/// with no buffered token (reported as an alias), then a parser waiting for
/// a block mapping key, then the tokenizer's own problem text.
///
/// The alias case is a heuristic: that lookahead shape is what alias syntax
/// leaves behind in this tokenizer, but nothing checks for an alias token.
pub fn classify(scan: &ScanState<'_>) -> SyntaxProblem {
    let lookahead = scan.lookahead();

    if lookahead == Some(b'\t') {
        SyntaxProblem::TabIndent
    } else if matches!(lookahead, Some(b' ' | b'\0') | None) && !scan.token_available {
        SyntaxProblem::AliasUnsupported
    } else if scan.state == ParserState::BlockMappingKey {
        SyntaxProblem::InconsistentIndentation
    } else {
        SyntaxProblem::Other(scan.problem.to_string())
    }
}

/// Build an `InvalidYaml` error for a given problem at `mark`.
///
/// The context line is cut from `window` and the caret placed at
/// `mark.column`. `source_name` falls back to [`UNNAMED_FILE`].
pub fn invalid_yaml(
    problem: &SyntaxProblem,
    source_name: Option<&str>,
    window: &ScanWindow<'_>,
    mark: Mark,
) -> NetdefError {
    let name = source_name.unwrap_or(UNNAMED_FILE);
    let context = buffer_context(window, mark.column);

    tracing::debug!(file = name, line = mark.line, column = mark.column, %problem, "invalid YAML");

    NetdefError::new(
        ErrorKind::InvalidYaml,
        format!("{name}:{mark}: Invalid YAML: {problem}:\n{context}"),
    )
}

/// Build the error for a tokenizer failure.
pub fn syntax_error(scan: &ScanState<'_>, source_name: Option<&str>) -> NetdefError {
    invalid_yaml(&classify(scan), source_name, &scan.window, scan.problem_mark)
}

/// Build the error for a semantic failure.
///
/// The severity follows from what is known about the location:
///
/// - a node mark and a source path: `InvalidConfig`, with the offending line
///   reread from `source_path` and a caret under the node
/// - only a source path: `ConfigValidation`, no context
/// - neither: `ConfigGeneric`
///
/// If the file cannot be reread the located message is kept without its
/// context lines.
pub fn semantic_error(
    source_path: Option<&Path>,
    mark: Option<Mark>,
    message: impl Display,
) -> NetdefError {
    match (source_path, mark) {
        (Some(path), Some(mark)) => {
            let mut text = format!(
                "{}:{mark}: {SEMANTIC_PREFIX}: {message}",
                path.display()
            );
            match file_context(path, mark.line, mark.column) {
                Ok(context) => {
                    text.push('\n');
                    text.push_str(&context);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Could not reread source for error context"
                    );
                }
            }
            tracing::debug!(path = %path.display(), line = mark.line, column = mark.column, "invalid config");
            NetdefError::new(ErrorKind::InvalidConfig, text)
        }
        (Some(path), None) => NetdefError::new(
            ErrorKind::ConfigValidation,
            format!("{}: {SEMANTIC_PREFIX}: {message}", path.display()),
        ),
        (None, _) => NetdefError::new(
            ErrorKind::ConfigGeneric,
            format!("{SEMANTIC_PREFIX}: {message}"),
        ),
    }
}

/// Store `error` unless the slot already holds one.
fn set_error(slot: &mut Option<NetdefError>, error: NetdefError) {
    if let Some(existing) = slot.as_ref() {
        tracing::warn!(
            existing = %existing,
            discarded = %error,
            "Error slot already set, keeping the first error"
        );
    } else {
        *slot = Some(error);
    }
}

/// Report a tokenizer failure into `slot`.
///
/// Always returns `false` so callers can `return report_syntax_error(...)`
/// from a parse step.
pub fn report_syntax_error(
    scan: &ScanState<'_>,
    source_name: Option<&str>,
    slot: &mut Option<NetdefError>,
) -> bool {
    set_error(slot, syntax_error(scan, source_name));
    false
}

/// Report a semantic failure into `slot`. Always returns `false`.
///
/// See [`semantic_error`] for how the location decides the error kind. The
/// [`report_semantic!`](crate::report_semantic) macro accepts format
/// arguments directly.
pub fn report_semantic_error(
    source_path: Option<&Path>,
    mark: Option<Mark>,
    message: impl Display,
    slot: &mut Option<NetdefError>,
) -> bool {
    set_error(slot, semantic_error(source_path, mark, message));
    false
}
