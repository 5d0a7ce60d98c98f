//! # opaque-id
//!
//! Reversible opaque ID tokens for exposing internal identifiers.
//!
//! ## Design Principles
//!
//! - A token packs a type tag, a raw id (text or integer) and optional metadata
//! - Tokens are a transparent encoding, not encryption: anyone can decode them
//! - Every call is pure and stateless; no global mutable state
//! - Decoding failures are always one of two kinds: malformed or wrong type
//!
//! ## Token Format
//!
//! A token is the base64 encoding of `{type}|{id}` or `{type}|{id}|{metadata}`,
//! where `metadata` is a JSON object. An empty type means "untyped".
//!
//! Examples (standard alphabet):
//! - `fDEyMzQ1` is the untyped integer id `12345`
//! - `VHlwZXxhYmM=` is the id `abc` of type `Type`
//!
//! ## Type Checking
//!
//! [`decode_id`] only checks the type tag when an expected type is given.
//! [`get_id_metadata`] always checks it, and an empty expected type means
//! the token must be untyped.

mod codec;
mod error;
pub mod framing;
mod macros;
mod raw_id;
pub mod transform;

pub use codec::{
    decode_id, encode_id, get_id_metadata, get_id_metadata_as, get_id_type, Codec, CodecConfig,
    Metadata,
};
pub use error::{DecodeError, OpaqueIdError};
pub use raw_id::RawId;
pub use transform::{decode, decode_lenient, encode, Alphabet};

#[doc(hidden)]
pub use serde as __serde;
