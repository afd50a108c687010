//! Normalization of typographic characters to and from named HTML5 entities.
//!
//! Text pasted from word processors tends to carry curly quotes, dashes and
//! other punctuation in a mix of encodings: the raw character, a stray
//! Windows-1252 code point, or a numeric character reference. Each entry of
//! the [table](ENTITIES) lists every encoding that is normalized to its named
//! entity by [`to_html5_entities`], and back to the character by
//! [`from_html5_entities`].
//!
//! ```
//! use tbone::entities::{from_html5_entities, to_html5_entities};
//!
//! assert_eq!(to_html5_entities("Fred\u{2019}s Car"), "Fred&rsquo;s Car");
//! assert_eq!(from_html5_entities("Fred&rsquo;s Car"), "Fred\u{2019}s Car");
//! ```

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// One normalizable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    /// The named reference, e.g. `&rsquo;`.
    pub reference: &'static str,
    /// The character the reference decodes to.
    pub character: &'static str,
    /// Every spelling that is replaced by the reference or the character.
    pub encodings: &'static [&'static str],
}

/// The substitution table, in the order substitutions are applied.
///
/// Plain `"` and `'` are not among the encodings of `&quot;` and `&apos;`;
/// they pass through [`to_html5_entities`] unchanged.
pub const ENTITIES: &[Entity] = &[
    Entity {
        reference: "&NewLine;",
        character: "\n",
        encodings: &["\n", "\r", "\u{0C}", "\u{2028}", "&NewLine;"],
    },
    Entity {
        reference: "&quot;",
        character: "\"",
        encodings: &["&#34;", "&amp;quot;", "&quot;"],
    },
    Entity {
        reference: "&apos;",
        character: "'",
        encodings: &["&amp;apos;", "&#39;", "&apos;"],
    },
    Entity {
        reference: "&acute;",
        character: "\u{B4}",
        encodings: &["&#180;", "\u{B4}", "&acute;"],
    },
    Entity {
        reference: "&sbquo;",
        character: "\u{201A}",
        encodings: &["\u{82}", "&#130;", "\u{201A}", "&#8218;", "&sbquo;"],
    },
    Entity {
        reference: "&bdquo;",
        character: "\u{201E}",
        encodings: &["\u{84}", "&#132;", "\u{201E}", "&#8222;", "&bdquo;"],
    },
    Entity {
        reference: "&hellip;",
        character: "\u{2026}",
        encodings: &["\u{85}", "&#133;", "\u{2026}", "&#8230;", "&hellip;"],
    },
    Entity {
        reference: "&dagger;",
        character: "\u{2020}",
        encodings: &["\u{86}", "&#134;", "\u{2020}", "&#8224;", "&dagger;"],
    },
    Entity {
        reference: "&Dagger;",
        character: "\u{2021}",
        encodings: &["\u{87}", "&#135;", "\u{2021}", "&#8225;", "&Dagger;"],
    },
    Entity {
        reference: "&lsquo;",
        character: "\u{2018}",
        encodings: &["\u{91}", "\u{2018}", "&#145;", "&#8216;", "&lsquo;"],
    },
    Entity {
        reference: "&rsquo;",
        character: "\u{2019}",
        encodings: &["\u{92}", "\u{2019}", "&#146;", "&#8217;", "&rsquo;"],
    },
    Entity {
        reference: "&ldquo;",
        character: "\u{201C}",
        encodings: &["\u{93}", "\u{201C}", "&#147;", "&#8220;", "&ldquo;"],
    },
    Entity {
        reference: "&rdquo;",
        character: "\u{201D}",
        encodings: &["\u{94}", "&#148;", "\u{201D}", "&#8221;", "&rdquo;"],
    },
    Entity {
        reference: "&bull;",
        character: "\u{2022}",
        encodings: &["\u{95}", "&#149;", "\u{2022}", "&#8226;", "&bull;"],
    },
    Entity {
        reference: "&ndash;",
        character: "\u{2013}",
        encodings: &["\u{96}", "&#150;", "\u{2013}", "&#8211;", "&ndash;"],
    },
    Entity {
        reference: "&mdash;",
        character: "\u{2014}",
        encodings: &["\u{97}", "&#151;", "\u{2014}", "&#8212;", "&mdash;"],
    },
    Entity {
        reference: "&copy;",
        character: "\u{A9}",
        encodings: &["\u{A9}", "&#169;", "&copy;"],
    },
    Entity {
        reference: "&nbsp;",
        character: "\u{A0}",
        encodings: &["\u{A0}", "&#160;", "&nbsp;"],
    },
    Entity {
        reference: "&laquo;",
        character: "\u{AB}",
        encodings: &["\u{AB}", "&#171;", "&laquo;"],
    },
    Entity {
        reference: "&raquo;",
        character: "\u{BB}",
        encodings: &["\u{BB}", "&#187;", "&raquo;"],
    },
];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ENTITIES
        .iter()
        .map(|entity| {
            let alternation = entity
                .encodings
                .iter()
                .map(|encoding| regex::escape(encoding))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&alternation).expect("entity encodings form a valid alternation")
        })
        .collect()
});

static FONT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<font[^>]*>|</font\s*>").expect("font tag pattern is valid")
});

fn substitute(s: &str, replacement: impl Fn(&Entity) -> &'static str) -> String {
    let mut output = s.to_owned();
    for (entity, pattern) in ENTITIES.iter().zip(PATTERNS.iter()) {
        if pattern.is_match(&output) {
            output = pattern
                .replace_all(&output, NoExpand(replacement(entity)))
                .into_owned();
        }
    }
    output
}

/// Replace every known encoding of a typographic character with its named entity.
///
/// Line breaks become `&NewLine;`. Plain `"` and `'` are left alone.
pub fn to_html5_entities(s: &str) -> String {
    substitute(s, |entity| entity.reference)
}

/// Replace every known encoding of a typographic character, including its
/// named entity, with the character itself.
pub fn from_html5_entities(s: &str) -> String {
    substitute(s, |entity| entity.character)
}

/// Remove `<font>` opening and closing tags, keeping their content.
pub fn strip_font_tags(s: &str) -> String {
    FONT_TAG.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Hello World!", "Hello World!")]
    #[case("\u{201C}Hello World!\u{201D}", "&ldquo;Hello World!&rdquo;")]
    #[case("Fred\u{B4}s Car", "Fred&acute;s Car")]
    #[case("Fred\u{2019}s Car", "Fred&rsquo;s Car")]
    #[case("this is\nanother line.", "this is&NewLine;another line.")]
    #[case("&\nthat was it.", "&&NewLine;that was it.")]
    fn test_entity_vectors(#[case] plain: &str, #[case] encoded: &str) {
        assert_eq!(to_html5_entities(plain), encoded);
        assert_eq!(from_html5_entities(encoded), plain);
    }

    #[rstest]
    #[case("Fred&#8217;s Car", "Fred&rsquo;s Car")]
    #[case("Fred\u{92}s Car", "Fred&rsquo;s Car")]
    #[case("wait\u{85}", "wait&hellip;")]
    #[case("1990&#150;2000", "1990&ndash;2000")]
    #[case("say &#34;hi&#34;", "say &quot;hi&quot;")]
    #[case("say \"hi\"", "say \"hi\"")]
    #[case("a\r\nb", "a&NewLine;&NewLine;b")]
    #[case("\u{A9} 2024", "&copy; 2024")]
    fn test_legacy_encodings_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_html5_entities(input), expected);
    }

    #[test]
    fn test_from_entities_decodes_numeric_references() {
        assert_eq!(from_html5_entities("&#8220;x&#8221;"), "\u{201C}x\u{201D}");
        assert_eq!(from_html5_entities("&quot;&apos;"), "\"'");
    }

    #[test]
    fn test_accented_letters_untouched() {
        assert_eq!(to_html5_entities("caf\u{E9} \u{E2}"), "caf\u{E9} \u{E2}");
    }

    #[rstest]
    #[case("big <font>red</font>", "big red")]
    #[case("big <font color=red>red</font> bus", "big red bus")]
    #[case(r#"big <font color="red">red</font> bus"#, "big red bus")]
    #[case(
        r#"big <font class='red-bus' id="test" style="margin: 30px;">red</font> bus"#,
        "big red bus"
    )]
    #[case("big <FONT SIZE=2>red</FONT> bus", "big red bus")]
    #[case("<footer>kept</footer>", "<footer>kept</footer>")]
    fn test_strip_font_tags(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_font_tags(input), expected);
    }

    #[test]
    fn test_table_references_are_own_encodings() {
        for entity in ENTITIES {
            assert!(entity.encodings.contains(&entity.reference), "{}", entity.reference);
        }
    }
}
