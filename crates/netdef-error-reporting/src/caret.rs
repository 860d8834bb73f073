//! Caret marker rendering.

/// Append `column` spaces followed by a single `^` to `out`.
///
/// The caller decides whether a newline follows. Columns past the end of the
/// rendered line are accepted and simply place the caret further right.
pub fn render_caret(out: &mut String, column: usize) {
    out.reserve(column + 1);
    out.extend(std::iter::repeat_n(' ', column));
    out.push('^');
}
