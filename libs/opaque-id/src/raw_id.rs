//! The identifier carried inside an opaque ID.

use serde::{Deserialize, Serialize};

/// A raw identifier: either text or a signed 64-bit integer.
///
/// Integers round-trip exactly across the full `i64` range. On decode, the id
/// field becomes [`RawId::Int`] only when it is the canonical decimal form of
/// an `i64`; anything else (`"12a"`, `"007"`, `"+5"`, `"1.5"`, `""`) stays text.
/// This is narrower than the JavaScript `isNaN` check older tokens were read
/// with, which also turned `"1.5"`, `"007"`, `" 12"` and `""` into numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Interprets a decoded id field, coercing canonical integers.
    pub fn from_field(field: &str) -> Self {
        match parse_canonical_i64(field) {
            Some(n) => RawId::Int(n),
            None => RawId::Text(field.to_string()),
        }
    }

    /// Returns the text value, if this is a text id.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawId::Text(s) => Some(s),
            RawId::Int(_) => None,
        }
    }

    /// Returns the integer value, if this is a numeric id.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawId::Int(n) => Some(*n),
            RawId::Text(_) => None,
        }
    }

    /// Returns true for numeric ids.
    pub fn is_numeric(&self) -> bool {
        matches!(self, RawId::Int(_))
    }
}

fn parse_canonical_i64(field: &str) -> Option<i64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if field == "-0" {
        return None;
    }
    field.parse().ok()
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        RawId::Text(s)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}

impl From<&String> for RawId {
    fn from(s: &String) -> Self {
        RawId::Text(s.clone())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawId {
                fn from(n: $t) -> Self {
                    RawId::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl PartialEq<str> for RawId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for RawId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for RawId {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}
