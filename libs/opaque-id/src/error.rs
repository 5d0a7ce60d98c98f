//! Error types for opaque ID decoding and validation.

use thiserror::Error;

/// Errors surfaced by the opaque ID codec.
///
/// Every failure of [`decode_id`](crate::decode_id) and
/// [`get_id_metadata`](crate::get_id_metadata) is one of these two kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpaqueIdError {
    /// The token is not a well-formed opaque ID.
    ///
    /// `type_label` only feeds the message; it does not change classification.
    #[error("{}", invalid_id_message(.type_label.as_deref()))]
    InvalidId { type_label: Option<String> },

    /// The token is well-formed but tagged with a different type.
    #[error("Expected {expected} ID, got {actual} ID")]
    InvalidIdType { expected: String, actual: String },
}

fn invalid_id_message(type_label: Option<&str>) -> String {
    match type_label {
        Some(label) => format!("Invalid {label} ID"),
        None => "Invalid ID".to_string(),
    }
}

impl OpaqueIdError {
    /// Builds an `InvalidId` error, treating an empty label as no label.
    pub fn invalid_id(type_label: Option<&str>) -> Self {
        OpaqueIdError::InvalidId {
            type_label: type_label
                .filter(|label| !label.is_empty())
                .map(str::to_string),
        }
    }

    /// Builds an `InvalidIdType` error.
    pub fn invalid_id_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        OpaqueIdError::InvalidIdType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns true if the token itself was malformed.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, OpaqueIdError::InvalidId { .. })
    }

    /// Returns true if the token carried an unexpected type tag.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, OpaqueIdError::InvalidIdType { .. })
    }

    /// The type the caller asked for, if known.
    pub fn expected_type(&self) -> Option<&str> {
        match self {
            OpaqueIdError::InvalidId { type_label } => type_label.as_deref(),
            OpaqueIdError::InvalidIdType { expected, .. } => Some(expected),
        }
    }

    /// The type tag found in the token. Only set on type mismatches.
    pub fn actual_type(&self) -> Option<&str> {
        match self {
            OpaqueIdError::InvalidId { .. } => None,
            OpaqueIdError::InvalidIdType { actual, .. } => Some(actual),
        }
    }
}

/// Errors from the strict textual transform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token is not valid base64 for the configured alphabet.
    #[error("invalid base64: {0}")]
    Base64(String),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded token is not valid UTF-8: {0}")]
    Utf8(String),
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        DecodeError::Base64(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DecodeError::Utf8(err.to_string())
    }
}
