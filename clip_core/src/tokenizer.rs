//! In-place, quote and escape aware word splitter.
//!
//! A line is a byte slice terminated by the first NUL or by the end of the slice. Tokens are
//! compacted where they stand: quotes and escaping backslashes are dropped, the token is
//! NUL-terminated when there is room, and the rest of the line is returned as a separate slice.

/// Cut the next word off `line`.
///
/// Leading spaces are skipped. Outside quotes an unescaped space ends the word and is consumed with it, so the
/// remainder starts right after that single space. `"` toggles quoting and `\` makes the next byte
/// literal. Neither is kept. The returned word is empty once the line is exhausted.
pub fn next_token(line: &mut [u8]) -> (&mut [u8], &mut [u8]) {
    let end = line_len(line);
    let mut pos = 0;
    while pos < end && line[pos] == b' ' {
        pos += 1;
    }

    let start = pos;
    let mut len = 0;
    let mut escaped = false;
    let mut quoted = false;

    while pos < end {
        let ch = line[pos];
        pos += 1;

        if !quoted && !escaped && ch == b' ' {
            break;
        }
        if !escaped && ch == b'\\' {
            escaped = true;
            continue;
        }
        if !escaped && ch == b'"' {
            quoted = !quoted;
            continue;
        }

        escaped = false;
        line[start + len] = ch;
        len += 1;
    }

    if start + len < pos {
        line[start + len] = 0;
    }

    let (head, rest) = line.split_at_mut(pos);
    (&mut head[start..start + len], rest)
}

/// Length of the text in `line`, up to the first NUL.
pub fn line_len(line: &[u8]) -> usize {
    line.iter().position(|&b| b == 0).unwrap_or(line.len())
}

/// The text in `line`, up to the first NUL.
pub fn line_text(line: &[u8]) -> &[u8] {
    &line[..line_len(line)]
}
