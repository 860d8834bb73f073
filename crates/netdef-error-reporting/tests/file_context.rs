//! File-backed context extraction and located semantic errors.

use netdef_error_reporting::{ErrorKind, Mark, file_context, file_line, semantic_error};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const NETWORK: &str = "\
network:
  version: 2
  ethernets:
    eth0:
      dhcp4: true
";

fn write_source(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_file_line_first_line() {
    let file = write_source(NETWORK);
    assert_eq!(file_line(file.path(), 0).unwrap(), "network:");
}

#[test]
fn test_file_line_zero_based() {
    let file = write_source(NETWORK);
    assert_eq!(file_line(file.path(), 1).unwrap(), "  version: 2");
    assert_eq!(file_line(file.path(), 4).unwrap(), "      dhcp4: true");
}

#[test]
fn test_file_line_past_end_degrades_to_last_line() {
    let file = write_source(NETWORK);
    assert_eq!(file_line(file.path(), 5).unwrap(), "      dhcp4: true");
    assert_eq!(file_line(file.path(), 500).unwrap(), "      dhcp4: true");
}

#[test]
fn test_file_line_empty_file() {
    let file = write_source("");
    assert_eq!(file_line(file.path(), 3).unwrap(), "");
}

#[test]
fn test_file_line_crlf() {
    let file = write_source("a: 1\r\nb: 2\r\n");
    assert_eq!(file_line(file.path(), 1).unwrap(), "b: 2");
}

#[test]
fn test_file_line_skips_invalid_utf8_on_earlier_line() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\xff\xfe: x\nb: 2\n").unwrap();
    file.flush().unwrap();

    assert_eq!(file_line(file.path(), 1).unwrap(), "b: 2");
}

#[test]
fn test_file_line_replaces_invalid_utf8() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"a: 1\nb: \xff\n").unwrap();
    file.flush().unwrap();

    assert_eq!(file_line(file.path(), 1).unwrap(), "b: \u{FFFD}");
}

#[test]
fn test_semantic_error_keeps_context_after_invalid_utf8() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"# \xe9t\xe9\nnetwork:\n  bogus: 1\n").unwrap();
    file.flush().unwrap();
    let path = file.path();

    let err = semantic_error(Some(path), Some(Mark::new(2, 2)), "unknown key 'bogus'");

    assert_eq!(
        err.message(),
        format!(
            "{}:3:3: Error in network definition: unknown key 'bogus'\n  bogus: 1\n  ^",
            path.display()
        )
    );
}

#[test]
fn test_file_line_missing_file() {
    let err = file_line(Path::new("/nonexistent/netdef/missing.yaml"), 0).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_file_context_caret() {
    let file = write_source(NETWORK);
    assert_eq!(
        file_context(file.path(), 2, 2).unwrap(),
        "  ethernets:\n  ^"
    );
}

#[test]
fn test_semantic_error_at_first_node() {
    let file = write_source(NETWORK);
    let path = file.path();

    let err = semantic_error(Some(path), Some(Mark::new(0, 0)), "unknown key 'foo'");

    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert_eq!(
        err.message(),
        format!(
            "{}:1:1: Error in network definition: unknown key 'foo'\nnetwork:\n^",
            path.display()
        )
    );
}

#[test]
fn test_semantic_error_nested_node() {
    let file = write_source(NETWORK);
    let path = file.path();

    let err = semantic_error(Some(path), Some(Mark::new(4, 13)), "invalid boolean value 'true'");

    let expected = format!(
        "{}:5:14: Error in network definition: invalid boolean value 'true'\n      dhcp4: true\n             ^",
        path.display()
    );
    assert_eq!(err.message(), expected);
    assert!(err.message().ends_with('^'));
}
