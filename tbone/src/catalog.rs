//! The static table of known tags and how each one is serialized.
//!
//! The tag lists themselves are generated alongside the [`Markup`](crate::Markup)
//! constructors in [`crate::builder`], so every tag with a constructor is
//! catalogued and vice versa.

use crate::builder::{PAIRED_TAGS, VOID_TAGS};

/// How an element is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TagPolicy {
    /// Opening and closing tag; an empty element renders as `<tag></tag>`.
    Paired,
    /// Like [`TagPolicy::Paired`], except that an element with no children and
    /// no attributes renders as a lone opening tag. Only `p` uses this.
    OpenWhenEmpty,
    /// Self-closing (`<tag />`); children are never rendered.
    Void,
    /// Paired, preceded by the configured doctype declaration and a newline.
    /// Only `html` uses this.
    Document,
}

impl TagPolicy {
    /// Returns `true` if the element renders as a self-closing tag.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// One entry of the tag catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// The lowercase tag name.
    pub name: &'static str,
    /// How the tag is serialized.
    pub policy: TagPolicy,
    /// The attribute that a bare attribute string (one without `=`) is
    /// assigned to, such as `href` for `a`.
    pub default_attribute: Option<&'static str>,
}

const HREF_TAGS: &[&str] = &["a", "area", "base", "link"];
const SRC_TAGS: &[&str] = &[
    "audio", "embed", "iframe", "img", "script", "source", "track", "video",
];

fn policy_for(name: &'static str, void: bool) -> TagPolicy {
    match name {
        "html" => TagPolicy::Document,
        "p" => TagPolicy::OpenWhenEmpty,
        _ if void => TagPolicy::Void,
        _ => TagPolicy::Paired,
    }
}

fn default_attribute_for(name: &str) -> Option<&'static str> {
    if HREF_TAGS.contains(&name) {
        Some("href")
    } else if SRC_TAGS.contains(&name) {
        Some("src")
    } else if name == "object" {
        Some("data")
    } else {
        None
    }
}

/// Look up a tag in the catalog. Names are matched ASCII case-insensitively.
pub fn lookup(name: &str) -> Option<TagEntry> {
    let (name, void) = PAIRED_TAGS
        .iter()
        .map(|tag| (*tag, false))
        .chain(VOID_TAGS.iter().map(|tag| (*tag, true)))
        .find(|(tag, _)| tag.eq_ignore_ascii_case(name))?;
    Some(TagEntry {
        name,
        policy: policy_for(name, void),
        default_attribute: default_attribute_for(name),
    })
}

/// The serialization policy of a tag. Tags missing from the catalog are [`TagPolicy::Paired`].
pub fn policy(name: &str) -> TagPolicy {
    lookup(name).map_or(TagPolicy::Paired, |entry| entry.policy)
}

/// The default attribute of a tag, if it has one.
pub fn default_attribute(name: &str) -> Option<&'static str> {
    lookup(name).and_then(|entry| entry.default_attribute)
}

/// Iterate over every catalogued tag, paired tags first.
pub fn entries() -> impl Iterator<Item = TagEntry> {
    PAIRED_TAGS
        .iter()
        .chain(VOID_TAGS.iter())
        .filter_map(|name| lookup(name))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("div", TagPolicy::Paired)]
    #[case("title", TagPolicy::Paired)]
    #[case("p", TagPolicy::OpenWhenEmpty)]
    #[case("html", TagPolicy::Document)]
    #[case("br", TagPolicy::Void)]
    #[case("img", TagPolicy::Void)]
    #[case("link", TagPolicy::Void)]
    #[case("input", TagPolicy::Void)]
    #[case("meta", TagPolicy::Void)]
    #[case("hr", TagPolicy::Void)]
    #[case("BR", TagPolicy::Void)]
    #[case("frame", TagPolicy::Void)]
    #[case("del", TagPolicy::Paired)]
    #[case("hgroup", TagPolicy::Paired)]
    #[case("my-widget", TagPolicy::Paired)]
    fn test_policy(#[case] name: &str, #[case] expected: TagPolicy) {
        assert_eq!(policy(name), expected);
    }

    #[rstest]
    #[case("a", Some("href"))]
    #[case("link", Some("href"))]
    #[case("img", Some("src"))]
    #[case("script", Some("src"))]
    #[case("object", Some("data"))]
    #[case("div", None)]
    fn test_default_attribute(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(default_attribute(name), expected);
    }

    #[test]
    fn test_lookup_returns_canonical_name() {
        let entry = lookup("DIV").unwrap();
        assert_eq!(entry.name, "div");
        assert!(lookup("not-a-tag").is_none());
    }

    #[test]
    fn test_no_tag_is_both_void_and_paired() {
        for tag in VOID_TAGS {
            assert!(!PAIRED_TAGS.contains(tag), "{tag} is catalogued twice");
        }
    }

    #[test]
    fn test_entries_cover_both_tables() {
        assert_eq!(entries().count(), PAIRED_TAGS.len() + VOID_TAGS.len());
        assert!(entries().filter(|e| e.policy.is_void()).count() == VOID_TAGS.len());
    }

    #[test]
    fn test_every_default_attribute_tag_is_catalogued() {
        for tag in HREF_TAGS.iter().chain(SRC_TAGS) {
            assert!(lookup(tag).is_some(), "{tag} is not catalogued");
        }
    }
}
