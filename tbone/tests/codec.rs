use std::collections::BTreeMap;

use proptest::prelude::*;
use tbone::{
    bumpalo::Bump,
    codec::{assemble, assemble_set, disassemble},
    entities::{from_html5_entities, to_html5_entities},
    AttributeError, AttributeSet, Attributes, IntoAttributes, QuoteHandling,
};

fn attribute_map() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    prop::collection::btree_map(
        "[a-z][a-z0-9-]{0,8}",
        prop::option::of("[a-zA-Z0-9_./:-]([a-zA-Z0-9 _./:-]{0,14}[a-zA-Z0-9_./:-])?"),
        0..6,
    )
}

fn to_set<'bump>(bump: &'bump Bump, map: &BTreeMap<String, Option<String>>) -> AttributeSet<'bump> {
    AttributeSet::from_iter_in(
        bump,
        map.iter()
            .map(|(key, value)| (key.as_str(), value.as_deref())),
    )
}

proptest! {
    #[test]
    fn decode_recovers_encoded_set(map in attribute_map()) {
        let bump = Bump::new();
        let set = to_set(&bump, &map);
        let encoded = assemble_set(&set);
        let decoded = disassemble(&bump, &encoded, QuoteHandling::Strict).unwrap();
        prop_assert_eq!(decoded, set);
    }

    #[test]
    fn permissive_decode_never_fails(input in "[ a-z=\"'\\\\]{0,24}") {
        let bump = Bump::new();
        prop_assert!(disassemble(&bump, &input, QuoteHandling::Permissive).is_ok());
    }

    #[test]
    fn entity_normalization_is_stable(text in "[a-zA-Z \u{2018}\u{2019}\u{201C}\u{201D}\u{2026}\u{2013}\u{2014}\u{A9}]{0,24}") {
        let encoded = to_html5_entities(&text);
        prop_assert_eq!(to_html5_entities(&encoded), encoded.clone());
        prop_assert_eq!(from_html5_entities(&encoded), text);
    }
}

#[test]
fn test_encode_examples() {
    let bump = Bump::new();

    assert_eq!(assemble(&Attributes::Absent), "");
    assert_eq!(
        assemble(&[("checked", None), ("id", Some("mything"))].into_attributes(&bump)),
        r#" checked id="mything""#
    );
    assert_eq!(
        assemble(&r#"class="myclass""#.into_attributes(&bump)),
        r#" class="myclass""#
    );
}

#[test]
fn test_decode_reads_both_quote_styles() {
    let bump = Bump::new();
    let set = disassemble(
        &bump,
        r#"class="myclass" id='fred' title="it's here""#,
        QuoteHandling::Strict,
    )
    .unwrap();

    assert_eq!(set.value("class"), Some("myclass"));
    assert_eq!(set.value("id"), Some("fred"));
    assert_eq!(set.value("title"), Some("it's here"));
}

#[test]
fn test_strict_and_permissive_disagree_on_malformed_input() {
    let bump = Bump::new();
    let input = r#"id="me" class="open"#;

    let permissive = disassemble(&bump, input, QuoteHandling::Permissive).unwrap();
    assert_eq!(permissive.len(), 1);
    assert_eq!(permissive.value("id"), Some("me"));

    let error = disassemble(&bump, input, QuoteHandling::Strict).unwrap_err();
    assert!(error.is_malformed());
    assert!(matches!(error, AttributeError::UnclosedQuote { quote: '"', .. }));
}

#[cfg(feature = "json")]
mod json {
    use serde_json::json;
    use tbone::{
        bumpalo::Bump,
        codec::{assemble_json, disassemble_json},
        AttributeError, QuoteHandling,
    };

    #[test]
    fn test_encode_dynamic_values() {
        assert_eq!(assemble_json(&json!(null)).unwrap(), "");
        assert_eq!(
            assemble_json(&json!({"checked": null, "id": "mything"})).unwrap(),
            r#" checked id="mything""#
        );
        assert_eq!(
            assemble_json(&json!(r#"class="myclass""#)).unwrap(),
            r#" class="myclass""#
        );
        assert_eq!(
            assemble_json(&json!({"tabindex": 3, "hidden": true, "disabled": false})).unwrap(),
            r#" tabindex="3" hidden"#
        );
    }

    #[test]
    fn test_encode_rejects_uninterpretable_values() {
        assert_eq!(
            assemble_json(&json!(42)),
            Err(AttributeError::InvalidAttributeInput { found: "a number" })
        );
        assert!(matches!(
            assemble_json(&json!({"class": ["a", "b"]})),
            Err(AttributeError::InvalidAttributeInput { found: "an array" })
        ));
    }

    #[test]
    fn test_decode_rejects_non_strings() {
        let bump = Bump::new();
        assert!(matches!(
            disassemble_json(&bump, &json!({"id": "x"}), QuoteHandling::Permissive),
            Err(AttributeError::InvalidAttributeInput { found: "an object" })
        ));
    }
}
