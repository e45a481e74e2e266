//! Struct tag parsing.
//!
//! Go struct tags follow the `key:"value" key2:"value2"` convention; the
//! `json` value is a name optionally followed by comma-separated options,
//! e.g. `json:"size,omitempty"` or `json:",inline"`.

use regex::Regex;
use std::sync::LazyLock;

/// One `key:"value"` pair, anchored at the start of the remaining input.
static RE_TAG_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^\s:"]+):"((?:[^"\\]|\\.)*)""#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed struct tag at byte {offset}: {tag:?}")]
pub struct TagError {
    pub tag: String,
    pub offset: usize,
}

/// A parsed struct tag: ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    pairs: Vec<(String, String)>,
}

impl StructTag {
    /// Parse tag content (without the surrounding backquotes).
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let mut pairs = Vec::new();
        let mut rest = raw.trim_start();

        while !rest.is_empty() {
            let caps = RE_TAG_PAIR.captures(rest).ok_or_else(|| TagError {
                tag: raw.to_string(),
                offset: raw.len() - rest.len(),
            })?;
            pairs.push((caps[1].to_string(), unescape(&caps[2])));
            rest = rest[caps[0].len()..].trim_start();
        }

        Ok(Self { pairs })
    }

    /// Value of the first pair with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `json` entry, if the tag has one.
    pub fn json(&self) -> Option<JsonTag> {
        self.get("json").map(JsonTag::from_value)
    }
}

/// The `json` tag split into name and options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonTag {
    /// Serialized name; `None` when the name segment is empty.
    pub name: Option<String>,
    pub options: Vec<String>,
}

impl JsonTag {
    pub fn from_value(value: &str) -> Self {
        let mut parts = value.split(',');
        let name = parts
            .next()
            .filter(|n| !n.is_empty())
            .map(|n| n.to_string());
        let options = parts
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();
        Self { name, options }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_inline(&self) -> bool {
        self.has_option("inline")
    }

    pub fn omits_empty(&self) -> bool {
        self.has_option("omitempty")
    }
}

/// Resolve the backslash escapes of a Go interpreted string.
///
/// Covers the single-character escapes, `\xHH`, octal `\ooo`, `\uHHHH`
/// and `\UHHHHHHHH`. Byte escapes that do not form valid UTF-8 are
/// replaced; an unknown or truncated escape is kept as written.
pub fn unescape(s: &str) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('\\') {
        out.extend_from_slice(rest[..pos].as_bytes());
        let escape = &rest[pos + 1..];
        let (decoded, used) = decode_escape(escape);
        match decoded {
            Some(bytes) => out.extend_from_slice(&bytes),
            None => {
                out.push(b'\\');
                out.extend_from_slice(escape[..used].as_bytes());
            }
        }
        rest = &escape[used..];
    }
    out.extend_from_slice(rest.as_bytes());
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode the escape following a backslash. Returns the bytes (or `None`
/// when the escape is invalid) and how much of `escape` it consumed.
fn decode_escape(escape: &str) -> (Option<Vec<u8>>, usize) {
    let Some(c) = escape.chars().next() else {
        return (None, 0);
    };
    let simple = match c {
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0c),
        'n' => Some(b'\n'),
        'r' => Some(b'\r'),
        't' => Some(b'\t'),
        'v' => Some(0x0b),
        '\\' | '\'' | '"' => Some(c as u8),
        _ => None,
    };
    if let Some(byte) = simple {
        return (Some(vec![byte]), 1);
    }
    match c {
        'x' => consumed(hex_digits(escape, 2).map(|v| vec![v as u8]), 3),
        'u' => consumed(hex_digits(escape, 4).and_then(char_bytes), 5),
        'U' => consumed(hex_digits(escape, 8).and_then(char_bytes), 9),
        '0'..='7' => {
            let digits = escape.get(..3).filter(|d| d.bytes().all(|b| (b'0'..=b'7').contains(&b)));
            match digits.and_then(|d| u32::from_str_radix(d, 8).ok()).filter(|v| *v <= 0xff) {
                Some(v) => (Some(vec![v as u8]), 3),
                None => (None, 1),
            }
        }
        _ => (None, c.len_utf8()),
    }
}

/// On failure only the escape letter is consumed.
fn consumed(decoded: Option<Vec<u8>>, len: usize) -> (Option<Vec<u8>>, usize) {
    match decoded {
        Some(bytes) => (Some(bytes), len),
        None => (None, 1),
    }
}

fn hex_digits(escape: &str, count: usize) -> Option<u32> {
    let digits = escape.get(1..=count)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn char_bytes(code: u32) -> Option<Vec<u8>> {
    let c = char::from_u32(code)?;
    Some(c.to_string().into_bytes())
}
