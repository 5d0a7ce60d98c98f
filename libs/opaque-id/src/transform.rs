//! Textual transform between raw strings and transport-safe tokens.
//!
//! Tokens are padded base64. The standard alphabet (`+/`) is the default
//! because existing tokens use it; the URL-safe alphabet (`-_`) can be
//! selected through [`CodecConfig`](crate::CodecConfig).
//!
//! Two decoders are provided:
//! - [`decode`] is strict: bad characters, bad padding or non-UTF-8 output fail.
//! - [`decode_lenient`] is total: it skips anything it cannot use and always
//!   returns a best-effort string.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE},
        DecodePaddingMode,
    },
    Engine as _,
};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

const LENIENT_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_CONFIG);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_CONFIG);

/// Base64 alphabet used for tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    /// RFC 4648 standard alphabet (`+`, `/`), padded.
    #[default]
    Standard,
    /// RFC 4648 URL-safe alphabet (`-`, `_`), padded.
    UrlSafe,
}

impl Alphabet {
    /// Encodes raw bytes into a token.
    pub fn encode(self, raw: impl AsRef<[u8]>) -> String {
        self.engine().encode(raw)
    }

    /// Strictly decodes a token back into a UTF-8 string.
    pub fn decode(self, token: &str) -> Result<String, DecodeError> {
        let bytes = self.engine().decode(token)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Decodes a token without ever failing.
    ///
    /// Characters outside the alphabet (and padding) are skipped, a dangling
    /// final character is dropped, and invalid UTF-8 is replaced.
    pub fn decode_lenient(self, token: &str) -> String {
        let mut usable: Vec<u8> = token.bytes().filter(|b| self.contains(*b)).collect();
        if usable.len() % 4 == 1 {
            usable.pop();
        }

        let bytes = self.lenient_engine().decode(&usable).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the snake_case name of the alphabet.
    pub fn as_str(self) -> &'static str {
        match self {
            Alphabet::Standard => "standard",
            Alphabet::UrlSafe => "url_safe",
        }
    }

    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Alphabet::Standard => &STANDARD,
            Alphabet::UrlSafe => &URL_SAFE,
        }
    }

    fn lenient_engine(self) -> &'static GeneralPurpose {
        match self {
            Alphabet::Standard => &LENIENT_STANDARD,
            Alphabet::UrlSafe => &LENIENT_URL_SAFE,
        }
    }

    fn contains(self, b: u8) -> bool {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => true,
            b'+' | b'/' => self == Alphabet::Standard,
            b'-' | b'_' => self == Alphabet::UrlSafe,
            _ => false,
        }
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base64-encodes a string with the standard alphabet.
pub fn encode(raw: impl AsRef<[u8]>) -> String {
    Alphabet::Standard.encode(raw)
}

/// Base64-decodes a token produced by [`encode`].
pub fn decode(token: &str) -> Result<String, DecodeError> {
    Alphabet::Standard.decode(token)
}

/// Base64-decodes any string, returning best-effort output for malformed input.
pub fn decode_lenient(token: &str) -> String {
    Alphabet::Standard.decode_lenient(token)
}
