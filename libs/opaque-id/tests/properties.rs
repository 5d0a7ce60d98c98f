//! Property tests for the opaque ID codec.

use opaque_id::{
    decode, decode_id, encode, encode_id, framing, get_id_metadata, get_id_type, Metadata,
    OpaqueIdError, RawId,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn metadata_strategy() -> impl Strategy<Value = Metadata> {
    prop::collection::btree_map("[a-z|]{1,8}", any::<i64>(), 0..4).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, json!(value)))
            .collect()
    })
}

proptest! {
    #[test]
    fn transform_roundtrip(s in any::<String>()) {
        prop_assert_eq!(decode(&encode(&s)).unwrap(), s);
    }

    #[test]
    fn text_id_roundtrip(id in "[^0-9-].*", type_tag in any::<String>()) {
        let token = encode_id(id.as_str(), &type_tag, None);
        prop_assert_eq!(decode_id(&token, Some(type_tag.as_str())).unwrap(), RawId::Text(id));
    }

    #[test]
    fn arbitrary_string_id_survives_framing(id in any::<String>(), type_tag in any::<String>()) {
        let token = encode_id(id.as_str(), &type_tag, None);
        let decoded = decode_id(&token, Some(type_tag.as_str())).unwrap();
        prop_assert_eq!(decoded.to_string(), id);
    }

    #[test]
    fn numeric_id_roundtrip(n in any::<i64>()) {
        let decoded = decode_id(&encode_id(n, "", None), None).unwrap();
        prop_assert_eq!(decoded, RawId::Int(n));
    }

    #[test]
    fn no_expected_type_never_mismatches(id in any::<String>(), type_tag in any::<String>()) {
        let token = encode_id(id.as_str(), &type_tag, None);
        prop_assert!(decode_id(&token, None).is_ok());
    }

    #[test]
    fn type_tag_reported(id in any::<String>(), type_tag in any::<String>()) {
        let token = encode_id(id.as_str(), &type_tag, None);
        let expected = (!type_tag.is_empty()).then_some(type_tag);
        prop_assert_eq!(get_id_type(&token), expected);
    }

    #[test]
    fn metadata_roundtrip(
        id in any::<String>(),
        type_tag in any::<String>(),
        metadata in metadata_strategy(),
    ) {
        let token = encode_id(id.as_str(), &type_tag, Some(&metadata));
        prop_assert_eq!(get_id_metadata(&token, &type_tag).unwrap(), Some(metadata));
        prop_assert_eq!(decode_id(&token, Some(type_tag.as_str())).unwrap().to_string(), id);
    }

    #[test]
    fn mismatched_type_is_classified(id in any::<String>(), actual in "[A-Z][a-z]{0,6}") {
        let token = encode_id(id.as_str(), &actual, None);
        let expected = format!("{actual}X");
        let err = decode_id(&token, Some(expected.as_str())).unwrap_err();
        prop_assert_eq!(err, OpaqueIdError::invalid_id_type(expected, actual));
    }

    #[test]
    fn undecodable_tokens_are_invalid_id(token in any::<String>(), expected in prop::option::of("[A-Za-z]{0,6}")) {
        prop_assume!(decode(&token).is_err());
        let err = decode_id(&token, expected.as_deref()).unwrap_err();
        let label = expected.filter(|label| !label.is_empty());
        prop_assert_eq!(err, OpaqueIdError::InvalidId { type_label: label });
    }

    #[test]
    fn undelimited_tokens_are_invalid_id(raw in "[^|\\\\]*", expected in prop::option::of("[A-Za-z]{0,6}")) {
        let err = decode_id(&encode(&raw), expected.as_deref()).unwrap_err();
        let label = expected.filter(|label| !label.is_empty());
        prop_assert_eq!(err, OpaqueIdError::InvalidId { type_label: label });
    }

    #[test]
    fn get_id_type_is_total(token in any::<String>()) {
        let _ = get_id_type(&token);
    }

    #[test]
    fn framing_roundtrip(type_tag in any::<String>(), id in any::<String>(), tail in prop::option::of(any::<String>())) {
        let serialized = framing::join(&type_tag, &id, tail.as_deref());
        let fields = framing::split(&serialized);
        prop_assert_eq!(fields.type_tag, type_tag);
        prop_assert_eq!(fields.id, Some(id));
        prop_assert_eq!(fields.metadata, tail.as_deref());
    }
}

#[test]
fn metadata_with_nested_values_roundtrips() {
    let Value::Object(metadata) = json!({
        "name": "Test",
        "number": 1234,
        "tags": ["a|b", "c\\d"],
        "nested": { "ok": true, "none": null }
    }) else {
        unreachable!()
    };

    let token = encode_id("x", "Type", Some(&metadata));
    assert_eq!(get_id_metadata(&token, "Type").unwrap(), Some(metadata));
}

#[test]
fn untyped_metadata_lookup_defaults() {
    assert_eq!(get_id_metadata(&encode_id("x", "", None), "").unwrap(), None);
}
