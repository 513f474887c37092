//! Input surface conventions (§6): splitting raw caller input into logical
//! lines, stripping comments, and discarding blank lines before any of the
//! format/grammar modules see the text.

/// Split `input` into non-empty logical lines: strip a `#`-prefixed or
/// inline comment from each physical line (never inside a quoted region or
/// a field-code bracket), trim, and drop lines that end up empty.
pub fn preprocess(input: &str) -> Vec<String> {
    input
        .split(['\n', '\r'])
        .map(strip_comment)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_comment(line: &str) -> &str {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut i = 0;
    while i < n {
        let c = chars[i];
        if c == '"' || c == '\'' {
            let quote = c;
            i += 1;
            while i < n && chars[i] != quote {
                i += 1;
            }
            if i < n {
                i += 1;
            }
            if i < n && chars[i] == '[' {
                while i < n && chars[i] != ']' {
                    i += 1;
                }
                if i < n {
                    i += 1;
                }
            }
            continue;
        }
        if c == '#' {
            let byte_idx: usize = chars[..i].iter().map(|c| c.len_utf8()).sum();
            return &line[..byte_idx];
        }
        i += 1;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whole_line_comments() {
        let lines = preprocess("# just a comment\n\"cancer\" AND \"treatment\"");
        assert_eq!(lines, vec!["\"cancer\" AND \"treatment\""]);
    }

    #[test]
    fn strips_inline_comments() {
        let lines = preprocess("\"cancer\" AND \"treatment\" # narrows to oncology");
        assert_eq!(lines, vec!["\"cancer\" AND \"treatment\""]);
    }

    #[test]
    fn does_not_strip_hash_inside_quotes() {
        let lines = preprocess("\"covid#19\" AND treatment");
        assert_eq!(lines, vec!["\"covid#19\" AND treatment"]);
    }

    #[test]
    fn blank_lines_are_discarded() {
        let lines = preprocess("\n\n   \n\"cancer\"\n\n");
        assert_eq!(lines, vec!["\"cancer\""]);
    }

    #[test]
    fn carriage_returns_are_handled() {
        let lines = preprocess("\"a\"\r\nAND\r\n\"b\"");
        assert_eq!(lines, vec!["\"a\"", "AND", "\"b\""]);
    }
}
