//! Line splitting shared by the file reader and in-memory filtering.
//!
//! `\n`, `\r\n` and a lone `\r` all end a line. A terminator at the very end
//! of the input does not start another (empty) line.

/// Splits one `\n`-delimited segment, as returned by `read_until(b'\n')`,
/// into the lines it holds. A segment without a trailing `\n` is the tail of
/// the input.
pub fn split_segment(segment: &str) -> impl Iterator<Item = &str> {
    let body = segment.strip_suffix('\n').unwrap_or(segment);
    let body = body.strip_suffix('\r').unwrap_or(body);

    // an empty segment only occurs at end of input and holds no line
    let skip_all = segment.is_empty();
    body.split('\r').filter(move |_| !skip_all)
}

/// Splits a whole text into lines, without terminators.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n').flat_map(split_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        split_lines(text).collect()
    }

    #[test]
    fn test_lf_and_crlf() {
        assert_eq!(lines("a\nb\r\nc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_final_newline() {
        assert_eq!(lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_lone_carriage_return() {
        assert_eq!(lines("a\rb\n"), vec!["a", "b"]);
        assert_eq!(lines("a\r"), vec!["a"]);
        assert_eq!(lines("a\r\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_lines_are_kept() {
        assert_eq!(lines("\n\na\n"), vec!["", "", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(lines("").is_empty());
        assert!(split_segment("").next().is_none());
    }
}
