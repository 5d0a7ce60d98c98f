//! Macros for defining typed opaque IDs.

/// Macro to define an opaque ID type bound to a single type tag.
///
/// This generates a newtype wrapper around [`RawId`](crate::RawId) with:
/// - A `TYPE` constant
/// - `new()` from any accepted raw id
/// - `encode()` / `encode_with_metadata()` to produce a token
/// - `parse()` to decode a token, rejecting other type tags
/// - `metadata()` to read a token's metadata for this type
/// - `Display` (the token) and `FromStr` implementations
/// - `Serialize` and `Deserialize` as the token string
///
/// # Example
///
/// ```ignore
/// define_opaque_id!(UserId, "User");
///
/// let token = UserId::new(42).encode();
/// let parsed: UserId = token.parse()?;
/// assert_eq!(parsed.raw(), &RawId::Int(42));
/// ```
#[macro_export]
macro_rules! define_opaque_id {
    ($name:ident, $type_tag:literal) => {
        /// An opaque ID for this entity type.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::RawId);

        impl $name {
            /// The type tag embedded in tokens of this type.
            pub const TYPE: &'static str = $type_tag;

            /// Wraps a raw id.
            #[must_use]
            pub fn new(id: impl Into<$crate::RawId>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying raw id.
            #[must_use]
            pub const fn raw(&self) -> &$crate::RawId {
                &self.0
            }

            /// Consumes the ID, returning the raw id.
            #[must_use]
            pub fn into_raw(self) -> $crate::RawId {
                self.0
            }

            /// Encodes the ID as a token.
            #[must_use]
            pub fn encode(&self) -> String {
                $crate::encode_id(self.0.clone(), Self::TYPE, None)
            }

            /// Encodes the ID as a token carrying metadata.
            #[must_use]
            pub fn encode_with_metadata(&self, metadata: &$crate::Metadata) -> String {
                $crate::encode_id(self.0.clone(), Self::TYPE, Some(metadata))
            }

            /// Parses a token, requiring this type's tag.
            pub fn parse(token: &str) -> Result<Self, $crate::OpaqueIdError> {
                $crate::decode_id(token, Some(Self::TYPE)).map(Self)
            }

            /// Reads a token's metadata, requiring this type's tag.
            pub fn metadata(
                token: &str,
            ) -> Result<Option<$crate::Metadata>, $crate::OpaqueIdError> {
                $crate::get_id_metadata(token, Self::TYPE)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.encode())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::OpaqueIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for $crate::RawId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(&self.encode())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let s = <String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err($crate::__serde::de::Error::custom)
            }
        }
    };
}
