use odem_types::{ErrorKind, OdemError, PropertyType};
use proptest::prelude::*;
use std::str::FromStr;

// ── Tags ─────────────────────────────────────────────────────────

#[test]
fn tags_roundtrip_through_from_str() {
    for t in PropertyType::ALL {
        assert_eq!(PropertyType::from_str(t.as_str()).unwrap(), t);
        assert_eq!(t.to_string(), t.as_str());
    }
}

#[test]
fn tags_are_lower_case_names() {
    let tags: Vec<_> = PropertyType::ALL.iter().map(PropertyType::as_str).collect();
    assert_eq!(tags, ["integer", "float", "bool", "string", "array", "entity"]);
}

#[test]
fn empty_tag_is_configuration_error() {
    let err = "".parse::<PropertyType>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn unknown_tag_is_unsupported() {
    let err = "Integer".parse::<PropertyType>().unwrap_err();
    assert!(matches!(err, OdemError::UnsupportedType(ref t) if t == "Integer"));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_as_tag() {
    let json = serde_json::to_string(&PropertyType::Entity).unwrap();
    assert_eq!(json, "\"entity\"");
}

#[test]
fn deserializes_from_tag() {
    let t: PropertyType = serde_json::from_str("\"array\"").unwrap();
    assert_eq!(t, PropertyType::Array);
    assert!(serde_json::from_str::<PropertyType>("\"decimal\"").is_err());
}

proptest! {
    /// Only the six tags parse; everything else is rejected
    #[test]
    fn arbitrary_tags_parse_only_if_known(tag in "[a-z]{1,10}") {
        let known = PropertyType::ALL.iter().any(|t| t.as_str() == tag);
        prop_assert_eq!(tag.parse::<PropertyType>().is_ok(), known);
    }
}
