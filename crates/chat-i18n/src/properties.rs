#![forbid(unsafe_code)]

//! Reader for Java-style `.properties` language files.
//!
//! Supports the subset found in game language files:
//! - `\n`, `\r\n`, and lone `\r` line terminators
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key: value`, and `key value` separators
//! - backslash line continuation (leading whitespace of the next line dropped)
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes (a surrogate pair spelled as
//!   two escapes decodes to one character); any other escaped character
//!   stands for itself
//!
//! Later duplicates of a key replace earlier ones.

use std::str::Chars;

use crate::error::{I18nError, Result};

const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

/// Parse properties text into `(key, value)` pairs in file order.
pub fn parse_properties(input: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    let mut lines = Lines { rest: input }.enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let trimmed = raw.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        entries.push((unescape(key, line_no)?, unescape(value, line_no)?));
    }

    Ok(entries)
}

/// Physical lines ended by `\n`, `\r\n`, or a lone `\r`.
struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(pos) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..pos];
        let terminator = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[pos + terminator..];
        Some(line)
    }
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;
    for (pos, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some(pos);
                break;
            }
            c if WHITESPACE.contains(&c) => {
                split = Some(pos);
                break;
            }
            _ => {}
        }
    }

    let Some(pos) = split else {
        return (line, "");
    };
    let key = &line[..pos];
    let mut rest = line[pos..].trim_start_matches(WHITESPACE);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(WHITESPACE);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the hex digits after `\u`. A high surrogate must be followed by a
/// `\uXXXX` low surrogate; unpaired halves are errors.
fn unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char> {
    let malformed = |chars: &Chars<'_>| {
        let shown: String = chars.as_str().chars().take(4).collect();
        I18nError::properties(line, format!("malformed \\u escape: \\u{shown}"))
    };

    let high = hex_unit(chars).ok_or_else(|| malformed(&*chars))?;
    let mut units = vec![high];
    if (0xD800..0xDC00).contains(&high) {
        let mut ahead = chars.clone();
        if ahead.next() == Some('\\')
            && ahead.next() == Some('u')
            && let Some(low) = hex_unit(&mut ahead)
        {
            units.push(low);
            *chars = ahead;
        }
    }

    let mut decoded = char::decode_utf16(units.iter().copied());
    match (decoded.next(), decoded.next()) {
        (Some(Ok(ch)), None) => Ok(ch),
        _ => Err(I18nError::properties(
            line,
            format!("unpaired surrogate in \\u escape: \\u{high:04X}"),
        )),
    }
}

/// Consume exactly four hex digits as one UTF-16 code unit.
fn hex_unit(chars: &mut Chars<'_>) -> Option<u16> {
    let hex = chars.as_str().get(..4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let unit = u16::from_str_radix(hex, 16).ok()?;
    chars.nth(3);
    Some(unit)
}
