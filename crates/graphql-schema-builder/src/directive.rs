//! Per-field directives carried by struct tags.
//!
//! A struct tag is a space separated list of `key:"value"` pairs. The value stored under the
//! directive key decides what happens to the field: nothing, `-` to drop it, or a new name.

use crate::BuildError;

/// What to do with a struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDirective {
    Keep,
    Skip,
    Rename(String),
}

impl FieldDirective {
    pub fn from_tag(tag: &str, key: &str) -> Result<Self, BuildError> {
        let values = parse_field_tag(tag, key)?;
        let first = values.into_iter().next().unwrap_or_default();

        Ok(match first.as_str() {
            "" => FieldDirective::Keep,
            "-" => FieldDirective::Skip,
            _ => FieldDirective::Rename(first),
        })
    }
}

/// Comma separated values stored under `key`. An absent key gives a single empty value.
///
/// The whole tag must be well formed, not only the entry being looked up.
pub fn parse_field_tag(tag: &str, key: &str) -> Result<Vec<String>, BuildError> {
    let malformed = || BuildError::MalformedDirective {
        tag: tag.to_owned(),
        key: key.to_owned(),
    };

    let mut found = None;
    for entry in TagEntries::new(tag) {
        let (name, quoted) = entry.ok_or_else(malformed)?;
        if found.is_none() && name == key {
            found = Some(unquote(quoted).ok_or_else(malformed)?);
        }
    }

    Ok(found.unwrap_or_default().split(',').map(str::to_owned).collect())
}

/// Iterates over `(key, quoted value)` pairs, yielding `None` once on a syntax error.
struct TagEntries<'a> {
    rest: &'a str,
    failed: bool,
}

impl<'a> TagEntries<'a> {
    fn new(tag: &'a str) -> Self {
        TagEntries {
            rest: tag,
            failed: false,
        }
    }
}

impl<'a> Iterator for TagEntries<'a> {
    type Item = Option<(&'a str, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.rest = self.rest.trim_start_matches(' ');
        if self.rest.is_empty() {
            return None;
        }

        let bytes = self.rest.as_bytes();

        // Keys are made of printable characters other than colons and quotes.
        let key_len = bytes
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if key_len == 0 || bytes.get(key_len) != Some(&b':') || bytes.get(key_len + 1) != Some(&b'"') {
            self.failed = true;
            return Some(None);
        }

        let value_start = key_len + 1;
        let mut idx = value_start + 1;
        while idx < bytes.len() && bytes[idx] != b'"' {
            if bytes[idx] == b'\\' {
                idx += 1;
            }
            idx += 1;
        }
        if idx >= bytes.len() {
            self.failed = true;
            return Some(None);
        }

        let key = &self.rest[..key_len];
        let quoted = &self.rest[value_start..=idx];
        self.rest = &self.rest[idx + 1..];

        Some(Some((key, quoted)))
    }
}

/// Remove the surrounding double quotes and resolve escapes.
///
/// `\x` and octal escapes produce raw bytes, so the decoded value must still be valid UTF-8.
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => (),
            '\n' => return None,
            c => {
                push_char(&mut out, c);
                continue;
            }
        }

        let unescaped = match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            'x' => {
                out.push(u8::try_from(digits(&mut chars, 2, 16)?).ok()?);
                continue;
            }
            first @ '0'..='7' => {
                let value = first.to_digit(8)? * 64 + digits(&mut chars, 2, 8)?;
                out.push(u8::try_from(value).ok()?);
                continue;
            }
            'u' => char::from_u32(digits(&mut chars, 4, 16)?)?,
            'U' => char::from_u32(digits(&mut chars, 8, 16)?)?,
            _ => return None,
        };
        push_char(&mut out, unescaped);
    }

    String::from_utf8(out).ok()
}

fn digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    (0..count).try_fold(0, |value, _| Some(value * radix + chars.next()?.to_digit(radix)?))
}

fn push_char(out: &mut Vec<u8>, c: char) {
    out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
}
