//! Parsing of the metadata lines that surround diff content:
//! `diff --git` paths, `@@` hunk ranges, and mode fields.

use tracing::warn;

/// Line ranges declared by a hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct HunkRange {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
}

/// Parse a `@@ -L[,n] +R[,n] @@ [context]` line.
///
/// Never fails: a missing or malformed `-` range starts at 0, and a missing or
/// malformed `+` range mirrors the `-` range. Counts default to 1.
pub(super) fn parse_hunk_header(line: &str) -> HunkRange {
    let ranges = line.trim_start_matches('@').trim_start();
    let ranges = match ranges.find("@@") {
        Some(end) => &ranges[..end],
        None => ranges,
    };
    let mut parts = ranges.split_whitespace();

    let (old_start, old_count) = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .and_then(parse_range)
        .unwrap_or((0, 1));
    let (new_start, new_count) = match parts.next().and_then(|p| p.strip_prefix('+')).and_then(parse_range) {
        Some(range) => range,
        None => {
            warn!(header = %line, "unparsable new-file range in hunk header, mirroring old range");
            (old_start, old_count)
        }
    };

    HunkRange {
        old_start,
        old_count,
        new_start,
        new_count,
    }
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, count) = match range.split_once(',') {
        Some((start, count)) => (start, count.parse().ok()?),
        None => (range, 1),
    };
    Some((start.parse().ok()?, count))
}

/// Extract the old and new paths from the remainder of a `diff --git ` line.
///
/// Handles quoted paths and strips the `a/` and `b/` prefixes. When the line
/// cannot be split the whole remainder is used for both names.
pub(super) fn parse_git_header_paths(rest: &str) -> (String, String) {
    let rest = rest.trim_end();

    let (old, new) = if rest.starts_with('"') {
        match unquote(rest) {
            Some((old, tail)) => (old, path_token(tail.trim_start())),
            None => (rest.to_string(), rest.to_string()),
        }
    } else {
        match split_unquoted(rest) {
            Some((old, tail)) => (old.to_string(), path_token(tail)),
            None => (rest.to_string(), rest.to_string()),
        }
    };

    (strip_side_prefix(&old, "a/"), strip_side_prefix(&new, "b/"))
}

/// Decode a path that may be quoted, as found after `rename from ` etc.
pub(super) fn path_token(token: &str) -> String {
    if token.starts_with('"') {
        if let Some((path, _)) = unquote(token) {
            return path;
        }
    }
    token.to_string()
}

/// Split `a/<old> b/<new>` where `<old>` is unquoted.
fn split_unquoted(rest: &str) -> Option<(&str, &str)> {
    // Identical names split cleanly down the middle, even with " b/" inside.
    if rest.len() % 2 == 1 {
        let mid = rest.len() / 2;
        if rest.is_char_boundary(mid) && rest.as_bytes()[mid] == b' ' {
            let (old, new) = (&rest[..mid], &rest[mid + 1..]);
            if old.strip_prefix("a/").is_some() && old.get(2..) == new.get(2..) {
                return Some((old, new));
            }
        }
    }
    if let Some(pos) = rest.find(" b/") {
        return Some((&rest[..pos], &rest[pos + 1..]));
    }
    rest.rfind(" \"").map(|pos| (&rest[..pos], &rest[pos + 1..]))
}

fn strip_side_prefix(path: &str, prefix: &str) -> String {
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

/// Decode a C-style quoted string at the start of `input`.
///
/// Returns the decoded value and the text after the closing quote, or `None`
/// when the quote is never closed.
pub(super) fn unquote(input: &str) -> Option<(String, &str)> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let value = String::from_utf8_lossy(&out).into_owned();
                return Some((value, &input[i + 1..]));
            }
            b'\\' if i + 1 < bytes.len() => {
                let escaped = bytes[i + 1];
                i += 2;
                match escaped {
                    b'\\' => out.push(b'\\'),
                    b'"' => out.push(b'"'),
                    b't' => out.push(b'\t'),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'v' => out.push(0x0b),
                    b'0'..=b'7' => {
                        // Up to three octal digits encode one raw byte.
                        let mut value = u32::from(escaped - b'0');
                        let mut digits = 1;
                        while digits < 3 && i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
                            value = value * 8 + u32::from(bytes[i] - b'0');
                            i += 1;
                            digits += 1;
                        }
                        out.push((value & 0xff) as u8);
                    }
                    other => {
                        out.push(b'\\');
                        out.push(other);
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    None
}

/// Parse an octal mode field such as `100644`.
pub(super) fn parse_mode(field: &str) -> Option<u32> {
    u32::from_str_radix(field.trim(), 8).ok()
}
