//! Placeholder scanning over SQLite SQL text.

#[derive(Clone, Copy)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Bracketed,
    LineComment,
    BlockComment,
}

fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

fn starts_named_parameter(bytes: &[u8], idx: usize) -> bool {
    bytes
        .get(idx + 1)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Count anonymous `?` placeholders outside literals and comments.
///
/// Returns `None` when the text uses numbered (`?1`) or named (`:a`, `@a`, `$a`) parameters,
/// whose binding count cannot be read off the placeholder count.
#[must_use]
pub fn count_placeholders(sql: &str) -> Option<usize> {
    let bytes = sql.as_bytes();
    let mut state = State::Normal;
    let mut count = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'[' => state = State::Bracketed,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'?' => {
                    if bytes.get(idx + 1).is_some_and(u8::is_ascii_digit) {
                        return None;
                    }
                    count += 1;
                }
                b':' | b'@' | b'$' if starts_named_parameter(bytes, idx) => return None,
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bare_placeholders() {
        assert_eq!(count_placeholders("UPDATE people SET name=? WHERE name=?;"), Some(2));
        assert_eq!(count_placeholders("SELECT * FROM people;"), Some(0));
    }

    #[test]
    fn skips_literals_and_comments() {
        let sql = "select '?', \"a?\", [b?] -- ?\n/* ? */ from t where a = ?";
        assert_eq!(count_placeholders(sql), Some(1));
    }

    #[test]
    fn numbered_or_named_parameters_are_not_counted() {
        assert_eq!(count_placeholders("select * from t where a = ?1"), None);
        assert_eq!(count_placeholders("select * from t where a = :name"), None);
    }
}
