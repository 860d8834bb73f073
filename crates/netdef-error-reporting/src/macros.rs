//! Macros for reporting errors with format arguments.

/// Report a semantic error with `format!`-style arguments.
///
/// Expands to [`report_semantic_error`](crate::report_semantic_error) and
/// therefore always evaluates to `false`.
///
/// # Example
///
/// ```
/// use netdef_error_reporting::{ErrorKind, report_semantic};
/// use std::path::Path;
///
/// let mut slot = None;
/// let key = "foo";
/// let ok = report_semantic!(&mut slot, Some(Path::new("net.yaml")), None, "unknown key '{}'", key);
/// assert!(!ok);
///
/// let err = slot.unwrap();
/// assert_eq!(err.kind(), ErrorKind::ConfigValidation);
/// assert_eq!(err.message(), "net.yaml: Error in network definition: unknown key 'foo'");
/// ```
#[macro_export]
macro_rules! report_semantic {
    ($slot:expr, $path:expr, $mark:expr, $($arg:tt)+) => {
        $crate::report_semantic_error($path, $mark, format_args!($($arg)+), $slot)
    };
}
