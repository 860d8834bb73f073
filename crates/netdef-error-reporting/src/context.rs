//! Context line extraction.
//!
//! Two sources are supported. Syntax errors come with the tokenizer's scan
//! window still in memory, so the line is cut out of that window. Semantic
//! errors are raised on already-parsed nodes, after the tokenizer's stream
//! may be gone, so the source file is reopened and read up to the node's line.

use crate::caret::render_caret;
use crate::scan::ScanWindow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Extract the line containing the window's current position.
///
/// The window is never modified; the result is an owned copy with no
/// embedded newline. Invalid UTF-8 is replaced rather than rejected.
pub fn buffer_line(window: &ScanWindow<'_>) -> String {
    let bytes = window.bytes();
    let current = window.current();

    let start = bytes[..current]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let end = bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |nl| start + nl);

    let line = &bytes[start..end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// The window's current line followed by a caret line pointing at `column`.
pub fn buffer_context(window: &ScanWindow<'_>, column: usize) -> String {
    let mut out = buffer_line(window);
    out.push('\n');
    render_caret(&mut out, column);
    out
}

/// Reopen `path` and return its 0-indexed line `line_number`.
///
/// Reads `line_number + 1` lines sequentially. If the file ends first, the
/// last line that was read is returned (empty for an empty file). Invalid
/// UTF-8 anywhere in the file is replaced rather than rejected.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn file_line(path: &Path, line_number: usize) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    let mut next = Vec::new();

    for _ in 0..=line_number {
        next.clear();
        if reader.read_until(b'\n', &mut next)? == 0 {
            break;
        }
        std::mem::swap(&mut line, &mut next);
    }

    let line = line.strip_suffix(b"\n").unwrap_or(&line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Ok(String::from_utf8_lossy(line).into_owned())
}

/// Line `line_number` of `path` followed by a caret line pointing at `column`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn file_context(path: &Path, line_number: usize, column: usize) -> io::Result<String> {
    let mut out = file_line(path, line_number)?;
    out.push('\n');
    render_caret(&mut out, column);
    Ok(out)
}
