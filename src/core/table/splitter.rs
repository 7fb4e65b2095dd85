//! Row splitting that keeps inline code spans intact
//!
//! A pipe inside a balanced backtick span (`` `a|b` ``) is cell content, not
//! a column separator. Everything here works on byte offsets: the delimiter,
//! the backtick and the backslash are all ASCII, so every offset we slice at
//! is a char boundary.

/// Column delimiter
pub const DELIMITER: char = '|';

const BACKTICK: u8 = b'`';

/// Split one table row into raw (untrimmed) cells.
///
/// With `border` set, one leading and one trailing pipe are removed first
/// when present.
pub fn split_row(row: &str, border: bool) -> Vec<&str> {
    let mut row = row;
    if border {
        if let Some(stripped) = row.strip_prefix(DELIMITER) {
            row = stripped;
        }
        if let Some(stripped) = row.strip_suffix(DELIMITER) {
            row = stripped;
        }
    }
    split(row)
}

/// Split on every delimiter that is not inside an inline code span.
///
/// Falls back to a naive split when the backticks cannot pair up.
pub fn split(row: &str) -> Vec<&str> {
    if has_unpaired_backticks(row) {
        log::debug!("unpaired backticks, splitting naively: {:?}", row);
        return row.split(DELIMITER).collect();
    }

    let bytes = row.as_bytes();
    let mut cells = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'|' => {
                cells.push(&row[start..i]);
                i += 1;
                start = i;
            }
            BACKTICK => {
                i = match match_code_span(row, i) {
                    Some(end) => end,
                    None => skip_literal_backticks(row, i),
                };
            }
            _ => i += 1,
        }
    }
    cells.push(&row[start..]);
    cells
}

/// Odd number of unescaped backticks: no well-formed code span is possible
pub fn has_unpaired_backticks(row: &str) -> bool {
    let total = row.matches('`').count();
    let escaped = row.matches("\\`").count();
    (total - escaped) % 2 == 1
}

/// Match an inline code span starting at byte offset `pos`.
///
/// The opening run is the maximal run of backticks at `pos` and must not be
/// escaped. The span closes at the next run of exactly the same length, with
/// at least one byte of content in between. Returns the byte offset just past
/// the closing run.
pub fn match_code_span(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&BACKTICK) {
        return None;
    }
    if pos > 0 && bytes[pos - 1] == b'\\' {
        return None;
    }

    let open_end = run_end(bytes, pos);
    let width = open_end - pos;

    let mut i = open_end;
    while i < bytes.len() {
        if bytes[i] == BACKTICK {
            let close_end = run_end(bytes, i);
            if close_end - i == width {
                return Some(close_end);
            }
            i = close_end;
        } else {
            i += 1;
        }
    }
    None
}

/// Where scanning resumes after a backtick at `pos` that opens no span.
///
/// An escaped backtick is skipped alone, so a backtick right after it can
/// still open a span. An unmatched unescaped run is literal text as a whole.
pub fn skip_literal_backticks(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    if pos > 0 && bytes[pos - 1] == b'\\' {
        pos + 1
    } else {
        run_end(bytes, pos)
    }
}

/// End of the backtick run starting at `pos`
fn run_end(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while end < bytes.len() && bytes[end] == BACKTICK {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        assert_eq!(split_row("a | b | c", false), vec!["a ", " b ", " c"]);
        assert_eq!(split_row("| a | b |", true), vec![" a ", " b "]);
    }

    #[test]
    fn test_border_pipe_may_be_missing() {
        assert_eq!(split_row("| a | b", true), vec![" a ", " b"]);
        assert_eq!(split_row("a | b |", true), vec!["a ", " b "]);
    }

    #[test]
    fn test_border_pipes_kept_without_border() {
        assert_eq!(split_row("| a |", false), vec!["", " a ", ""]);
    }

    #[test]
    fn test_no_delimiter_is_single_cell() {
        assert_eq!(split_row("just text", false), vec!["just text"]);
        assert_eq!(split_row("", false), vec![""]);
    }

    #[test]
    fn test_code_span_protects_delimiter() {
        assert_eq!(split_row("`a|b` | c", false), vec!["`a|b` ", " c"]);
        assert_eq!(
            split_row("| ``x | `y` | z`` | w |", true),
            vec![" ``x | `y` | z`` ", " w "]
        );
    }

    #[test]
    fn test_escaped_backtick_does_not_open_span() {
        // `\`` is escaped, so the count of real backticks is 2 and the span
        // opens at the second one
        assert_eq!(
            split_row(r"\` a | `b|c`", false),
            vec![r"\` a ", " `b|c`"]
        );
    }

    #[test]
    fn test_escaped_backtick_before_code_span() {
        assert_eq!(split_row(r"\``a|b` | c", false), vec![r"\``a|b` ", " c"]);
        assert_eq!(skip_literal_backticks(r"\``a", 1), 2);
        assert_eq!(skip_literal_backticks("``a", 0), 2);
    }

    #[test]
    fn test_unpaired_backticks_fall_back() {
        assert!(has_unpaired_backticks("`a|b"));
        assert!(!has_unpaired_backticks(r"\`a|b"));
        assert_eq!(split_row("`a|b", false), vec!["`a", "b"]);
    }

    #[test]
    fn test_unmatched_even_run_is_literal() {
        // The double run has no closing partner; the single ones pair up
        assert_eq!(
            split_row("`` a | b ` c|d `", false),
            vec!["`` a ", " b ` c|d `"]
        );
        assert!(!has_unpaired_backticks("``a|b``"));
        assert_eq!(split_row("``a|b``", false), vec!["``a|b``"]);
    }

    #[test]
    fn test_match_code_span_offsets() {
        assert_eq!(match_code_span("`x` rest", 0), Some(3));
        assert_eq!(match_code_span("``x`y`` rest", 0), Some(7));
        assert_eq!(match_code_span("``", 0), None);
        assert_eq!(match_code_span("a`b`", 0), None);
        assert_eq!(match_code_span(r"\`b`", 1), None);
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(split_row("| é | `ü|ö` |", true), vec![" é ", " `ü|ö` "]);
    }

    #[test]
    fn test_round_trip_without_code() {
        let line = "| alpha | beta |  | gamma |";
        let cells = split_row(line, true);
        assert_eq!(format!("|{}|", cells.join("|")), line);
    }
}
