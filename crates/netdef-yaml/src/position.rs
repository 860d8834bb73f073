//! Converting scanner positions into byte offsets and marks.
//!
//! The scanner counts positions in characters. Scan windows are bytes and
//! marks are line/column pairs, so both conversions live here.

use netdef_error_reporting::Mark;

/// Character indices at which each line of a source starts.
#[derive(Debug, Clone)]
pub struct LineStarts {
    starts: Vec<usize>,
}

impl LineStarts {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .chars()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// The mark of a character index.
    pub fn mark(&self, char_index: usize) -> Mark {
        let line = self.starts.partition_point(|&start| start <= char_index) - 1;
        Mark::new(line, char_index - self.starts[line])
    }
}

/// Resolve a character index into a byte offset and a mark.
///
/// Indices past the end resolve to the end of the source.
pub fn resolve_char_index(source: &str, char_index: usize) -> (usize, Mark) {
    let mut mark = Mark::default();
    let mut offset = source.len();

    for (i, (byte, ch)) in source.char_indices().enumerate() {
        if i == char_index {
            offset = byte;
            break;
        }
        if ch == '\n' {
            mark.line += 1;
            mark.column = 0;
        } else {
            mark.column += 1;
        }
    }

    (offset, mark)
}

/// The mark of a byte offset, which must lie on a character boundary.
pub fn mark_at_byte(source: &str, offset: usize) -> Mark {
    let before = &source[..offset];
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    Mark::new(
        before.matches('\n').count(),
        before[line_start..].chars().count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_start() {
        assert_eq!(resolve_char_index("a: 1", 0), (0, Mark::new(0, 0)));
    }

    #[test]
    fn test_resolve_second_line() {
        let source = "a: 1\nb: 2";
        assert_eq!(resolve_char_index(source, 5), (5, Mark::new(1, 0)));
        assert_eq!(resolve_char_index(source, 8), (8, Mark::new(1, 3)));
    }

    #[test]
    fn test_resolve_multibyte() {
        // "é" is one character but two bytes
        let source = "é: x\nb";
        assert_eq!(resolve_char_index(source, 3), (4, Mark::new(0, 3)));
        assert_eq!(resolve_char_index(source, 5), (6, Mark::new(1, 0)));
    }

    #[test]
    fn test_resolve_past_end() {
        let source = "a\nbc";
        assert_eq!(resolve_char_index(source, 4), (4, Mark::new(1, 2)));
        assert_eq!(resolve_char_index(source, 99), (4, Mark::new(1, 2)));
    }

    #[test]
    fn test_mark_at_byte() {
        let source = "é: 1\n\tb: 2";
        assert_eq!(mark_at_byte(source, 0), Mark::new(0, 0));
        assert_eq!(mark_at_byte(source, 3), Mark::new(0, 2));
        assert_eq!(mark_at_byte(source, 6), Mark::new(1, 0));
        assert_eq!(mark_at_byte(source, 7), Mark::new(1, 1));
    }

    #[test]
    fn test_line_starts_agree_with_resolve() {
        let source = "network:\n  é: 2\n\n  x: [1]\n";
        let lines = LineStarts::new(source);
        for i in 0..source.chars().count() {
            assert_eq!(lines.mark(i), resolve_char_index(source, i).1, "index {i}");
        }
    }
}
