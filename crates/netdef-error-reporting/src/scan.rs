//! Tokenizer state consumed when reporting syntax errors.
//!
//! The tokenizer owns all of this; the reporting code only borrows it for
//! the duration of one call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text (0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Mark {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Mark {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Mark {
    /// Formats as the 1-based `line:column` pair shown to users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The tokenizer's lookahead window at the moment of failure.
///
/// `bytes` covers the window from its first to its last valid byte; it is
/// not guaranteed to hold the whole file. `current` is the index of the next
/// unconsumed byte and may equal `bytes.len()` when input is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct ScanWindow<'a> {
    bytes: &'a [u8],
    current: usize,
}

impl<'a> ScanWindow<'a> {
    /// Create a window positioned at `current`, clamped to the window length.
    pub fn new(bytes: &'a [u8], current: usize) -> Self {
        Self {
            bytes,
            current: current.min(bytes.len()),
        }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// The next unconsumed byte, or `None` at the end of the window.
    pub fn lookahead(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }
}

/// Parser sub-states the classifier can distinguish.
///
/// Only [`ParserState::BlockMappingKey`] changes the diagnostic. The others
/// are what `netdef-yaml` can tell apart from the scanner's problem text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParserState {
    /// Expecting the start of the next document
    DocumentStart,
    /// Expecting a mapping key inside a block mapping
    BlockMappingKey,
    BlockSequenceEntry,
    FlowNode,
    #[default]
    Unknown,
}

/// Snapshot of tokenizer state at a syntax failure.
#[derive(Debug, Clone)]
pub struct ScanState<'a> {
    /// Raw lookahead window
    pub window: ScanWindow<'a>,
    /// Whether a scanned token is buffered and waiting for the parser
    pub token_available: bool,
    /// Parser sub-state when the failure happened
    pub state: ParserState,
    /// Human-readable problem description from the tokenizer
    pub problem: &'a str,
    /// Where the problem was detected
    pub problem_mark: Mark,
}

impl<'a> ScanState<'a> {
    pub fn new(window: ScanWindow<'a>, problem: &'a str, problem_mark: Mark) -> Self {
        Self {
            window,
            token_available: false,
            state: ParserState::Unknown,
            problem,
            problem_mark,
        }
    }

    pub fn with_token_available(mut self, token_available: bool) -> Self {
        self.token_available = token_available;
        self
    }

    pub fn with_state(mut self, state: ParserState) -> Self {
        self.state = state;
        self
    }

    pub fn lookahead(&self) -> Option<u8> {
        self.window.lookahead()
    }
}

/// The reason shown after `Invalid YAML:` in a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxProblem {
    TabIndent,
    AliasUnsupported,
    InconsistentIndentation,
    /// Any other problem, shown with the tokenizer's own wording
    Other(String),
}

impl fmt::Display for SyntaxProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxProblem::TabIndent => f.write_str("tabs are not allowed for indent"),
            SyntaxProblem::AliasUnsupported => f.write_str("aliases are not supported"),
            SyntaxProblem::InconsistentIndentation => f.write_str("inconsistent indentation"),
            SyntaxProblem::Other(problem) => f.write_str(problem),
        }
    }
}
