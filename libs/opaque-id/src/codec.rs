//! Encoding and decoding of opaque IDs.
//!
//! A token is the textual transform of the serialized form
//! `type|id[|metadata]` (see [`framing`](crate::framing)). The free functions
//! in this module use the standard alphabet; build a [`Codec`] to pick another.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::OpaqueIdError;
use crate::framing;
use crate::raw_id::RawId;
use crate::transform::Alphabet;

/// Structured metadata attached to an opaque ID.
pub type Metadata = serde_json::Map<String, Value>;

/// Codec configuration, built or deserialized by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Base64 alphabet for tokens.
    pub alphabet: Alphabet,
}

/// Encoder/decoder for opaque ID tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codec {
    alphabet: Alphabet,
}

impl Codec {
    /// Codec using the standard base64 alphabet.
    pub const STANDARD: Codec = Codec {
        alphabet: Alphabet::Standard,
    };

    /// Creates a codec from configuration.
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self {
            alphabet: config.alphabet,
        }
    }

    /// Returns the alphabet used for tokens.
    pub const fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Encodes an id, its type tag and optional metadata into a token.
    ///
    /// An empty `type_tag` marks the ID as untyped. Metadata, when given, is
    /// always written (an empty map included), so it stays distinguishable
    /// from no metadata.
    pub fn encode_id(
        &self,
        id: impl Into<RawId>,
        type_tag: &str,
        metadata: Option<&Metadata>,
    ) -> String {
        let id = id.into().to_string();
        let metadata = metadata.map(|m| Value::Object(m.clone()).to_string());
        let serialized = framing::join(type_tag, &id, metadata.as_deref());
        self.alphabet.encode(serialized)
    }

    /// Decodes a token into its raw id.
    ///
    /// With `expected_type` set, the token's type tag must match it exactly.
    /// With `None`, any type tag is accepted.
    pub fn decode_id(
        &self,
        token: &str,
        expected_type: Option<&str>,
    ) -> Result<RawId, OpaqueIdError> {
        let decoded = self.alphabet.decode(token).map_err(|err| {
            debug!(%err, ?expected_type, "rejecting undecodable opaque ID");
            OpaqueIdError::invalid_id(expected_type)
        })?;

        let fields = framing::split(&decoded);
        let Some(id) = fields.id else {
            debug!(?expected_type, "rejecting opaque ID without delimiter");
            return Err(OpaqueIdError::invalid_id(expected_type));
        };

        if let Some(expected) = expected_type {
            if fields.type_tag != expected {
                debug!(expected, actual = %fields.type_tag, "opaque ID type mismatch");
                return Err(OpaqueIdError::invalid_id_type(expected, fields.type_tag));
            }
        }

        Ok(RawId::from_field(&id))
    }

    /// Returns the token's type tag, or `None` for untyped IDs.
    ///
    /// Malformed tokens are decoded leniently and never rejected.
    pub fn get_id_type(&self, token: &str) -> Option<String> {
        let decoded = self.alphabet.decode_lenient(token);
        let type_tag = framing::split(&decoded).type_tag;
        (!type_tag.is_empty()).then_some(type_tag)
    }

    /// Returns the token's metadata, if any.
    ///
    /// The type tag is always checked against `expected_type`; pass `""` to
    /// expect an untyped ID.
    pub fn get_id_metadata(
        &self,
        token: &str,
        expected_type: &str,
    ) -> Result<Option<Metadata>, OpaqueIdError> {
        let decoded = self.alphabet.decode(token).map_err(|err| {
            debug!(%err, expected_type, "rejecting undecodable opaque ID");
            OpaqueIdError::invalid_id(Some(expected_type))
        })?;

        let fields = framing::split(&decoded);
        if fields.type_tag != expected_type {
            debug!(expected = expected_type, actual = %fields.type_tag, "opaque ID type mismatch");
            return Err(OpaqueIdError::invalid_id_type(expected_type, fields.type_tag));
        }

        let Some(raw) = fields.metadata.filter(|m| !m.is_empty()) else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(other) => {
                debug!(expected_type, kind = json_kind(&other), "opaque ID metadata is not an object");
                Err(OpaqueIdError::invalid_id(Some(expected_type)))
            }
            Err(err) => {
                debug!(%err, expected_type, "opaque ID metadata is not valid JSON");
                Err(OpaqueIdError::invalid_id(Some(expected_type)))
            }
        }
    }

    /// Like [`get_id_metadata`](Self::get_id_metadata), deserializing into `T`.
    pub fn get_id_metadata_as<T: DeserializeOwned>(
        &self,
        token: &str,
        expected_type: &str,
    ) -> Result<Option<T>, OpaqueIdError> {
        let Some(map) = self.get_id_metadata(token, expected_type)? else {
            return Ok(None);
        };

        serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(|err| {
                debug!(%err, expected_type, "opaque ID metadata has unexpected shape");
                OpaqueIdError::invalid_id(Some(expected_type))
            })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Encodes an opaque ID with the standard alphabet.
///
/// See [`Codec::encode_id`].
pub fn encode_id(id: impl Into<RawId>, type_tag: &str, metadata: Option<&Metadata>) -> String {
    Codec::STANDARD.encode_id(id, type_tag, metadata)
}

/// Decodes an opaque ID with the standard alphabet.
///
/// See [`Codec::decode_id`].
pub fn decode_id(token: &str, expected_type: Option<&str>) -> Result<RawId, OpaqueIdError> {
    Codec::STANDARD.decode_id(token, expected_type)
}

/// Returns an opaque ID's type tag.
pub fn get_id_type(token: &str) -> Option<String> {
    Codec::STANDARD.get_id_type(token)
}

/// Returns an opaque ID's metadata, checking its type tag.
///
/// See [`Codec::get_id_metadata`].
pub fn get_id_metadata(
    token: &str,
    expected_type: &str,
) -> Result<Option<Metadata>, OpaqueIdError> {
    Codec::STANDARD.get_id_metadata(token, expected_type)
}

/// Returns an opaque ID's metadata deserialized into `T`.
pub fn get_id_metadata_as<T: DeserializeOwned>(
    token: &str,
    expected_type: &str,
) -> Result<Option<T>, OpaqueIdError> {
    Codec::STANDARD.get_id_metadata_as(token, expected_type)
}
