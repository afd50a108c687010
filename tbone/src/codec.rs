//! Converts attributes to and from their HTML text form.
//!
//! [`assemble`] renders [`Attributes`] as the text that follows a tag name
//! (` id="me" checked`), and [`disassemble`] reads such text back into an
//! [`AttributeSet`].
//!
//! ```
//! use tbone::{bumpalo::Bump, codec, QuoteHandling};
//!
//! let bump = Bump::new();
//! let set = codec::disassemble(&bump, r#"id="me" class='content' checked"#, QuoteHandling::Permissive).unwrap();
//! assert_eq!(set.value("class"), Some("content"));
//! assert_eq!(codec::assemble_set(&set), r#" id="me" class="content" checked"#);
//! ```

use std::fmt::{self, Write};

use bumpalo::Bump;

use crate::{util::trim, Attribute, AttributeError, AttributeSet, Attributes, QuoteHandling};

/// Render attributes as the text that follows a tag name.
///
/// The result is empty when there is nothing to emit and otherwise starts with
/// exactly one space. Values are trimmed but not escaped.
pub fn assemble(attributes: &Attributes) -> String {
    let mut output = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_attributes(&mut output, attributes);
    output
}

/// Render an attribute set as the text that follows a tag name.
pub fn assemble_set(set: &AttributeSet) -> String {
    let mut output = String::new();
    let _ = write_set(&mut output, set);
    output
}

/// Write attributes to a writer in the form produced by [`assemble`].
pub fn write_attributes(writer: &mut impl Write, attributes: &Attributes) -> fmt::Result {
    match attributes {
        Attributes::Absent => Ok(()),
        Attributes::Set(set) => write_set(writer, set),
        Attributes::Raw(raw) => {
            let raw = trim(raw.as_str());
            if raw.is_empty() {
                return Ok(());
            }
            write!(writer, " {raw}")
        }
    }
}

fn write_set(writer: &mut impl Write, set: &AttributeSet) -> fmt::Result {
    for Attribute { key, value } in set.iter() {
        match value {
            Some(value) => write!(writer, " {}=\"{}\"", key.as_str(), trim(value.as_str()))?,
            None => write!(writer, " {}", key.as_str())?,
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating attribute names up to the next `=` or quote.
    ScanKey,
    /// Seen `=`, waiting for the start of the value.
    AfterEquals,
    /// Inside a quoted value.
    InQuote {
        quote: char,
        open: usize,
        start: usize,
    },
    /// Inside an unquoted value, which runs to the next whitespace.
    InUnquoted { start: usize },
}

/// Parse attribute text (e.g. `class="myclass" id="fred"`) into an attribute set.
///
/// The input is trimmed first. Values may be wrapped in `"` or `'`; inside a
/// value, a backslash followed by the wrapping quote does not end the value
/// and is kept verbatim. Names not followed by `=` become boolean attributes.
///
/// A value that ends in a backslash cannot be read back: [`assemble`] writes
/// `title="a\"`, and the closing quote is taken as escaped. Such input is an
/// [`AttributeError::UnclosedQuote`] in strict mode and loses the value in
/// permissive mode.
///
/// ## Errors
///
/// With [`QuoteHandling::Strict`], an unterminated quote yields
/// [`AttributeError::UnclosedQuote`] and a trailing `name=` yields
/// [`AttributeError::MissingValue`]. With [`QuoteHandling::Permissive`] the
/// unfinished attribute is dropped and decoding never fails.
pub fn disassemble<'bump>(
    bump: &'bump Bump,
    s: &str,
    quote_handling: QuoteHandling,
) -> Result<AttributeSet<'bump>, AttributeError> {
    let input = trim(s);
    let mut set = AttributeSet::new_in(bump);
    let mut state = ScanState::ScanKey;
    let mut key_start = 0;
    let mut pending: Option<(&str, usize)> = None;

    let push_bare = |set: &mut AttributeSet<'bump>, segment: &str| {
        for name in segment.split_whitespace() {
            set.insert(Attribute::boolean(bump, name));
        }
    };

    let mut chars = input.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match state {
            ScanState::ScanKey => match c {
                '=' => {
                    let segment = &input[key_start..pos];
                    let (bare, key) = match segment.trim_end().rfind(char::is_whitespace) {
                        Some(split) => (&segment[..split], trim(&segment[split..])),
                        None => ("", trim(segment)),
                    };
                    push_bare(&mut set, bare);
                    pending = (!key.is_empty()).then_some((key, pos));
                    key_start = pos + 1;
                    state = ScanState::AfterEquals;
                }
                '"' | '\'' => {
                    push_bare(&mut set, &input[key_start..pos]);
                    pending = None;
                    state = ScanState::InQuote {
                        quote: c,
                        open: pos,
                        start: pos + 1,
                    };
                }
                _ => {}
            },
            ScanState::AfterEquals => match c {
                c if c.is_whitespace() => {}
                '"' | '\'' => {
                    state = ScanState::InQuote {
                        quote: c,
                        open: pos,
                        start: pos + 1,
                    };
                }
                _ => state = ScanState::InUnquoted { start: pos },
            },
            ScanState::InQuote { quote, start, .. } => {
                if c == '\\' && chars.peek().map(|&(_, next)| next) == Some(quote) {
                    chars.next();
                } else if c == quote {
                    insert_value(bump, &mut set, pending.take(), &input[start..pos]);
                    key_start = pos + 1;
                    state = ScanState::ScanKey;
                }
            }
            ScanState::InUnquoted { start } => {
                if c.is_whitespace() {
                    insert_value(bump, &mut set, pending.take(), &input[start..pos]);
                    key_start = pos + c.len_utf8();
                    state = ScanState::ScanKey;
                }
            }
        }
    }

    match state {
        ScanState::ScanKey => push_bare(&mut set, &input[key_start..]),
        ScanState::InUnquoted { start } => {
            insert_value(bump, &mut set, pending.take(), &input[start..]);
        }
        ScanState::AfterEquals => {
            if let Some((key, position)) = pending {
                if quote_handling == QuoteHandling::Strict {
                    return Err(AttributeError::MissingValue {
                        key: key.to_string(),
                        position,
                    });
                }
                tracing::warn!(key, position, "dropping attribute with no value after '='");
            }
        }
        ScanState::InQuote { quote, open, start } => {
            let partial_value = &input[start..];
            if quote_handling == QuoteHandling::Strict {
                return Err(AttributeError::UnclosedQuote {
                    quote,
                    position: open,
                    partial_value: partial_value.to_string(),
                });
            }
            tracing::warn!(
                key = pending.map(|(key, _)| key),
                %quote,
                position = open,
                partial_value,
                "dropping attribute with unclosed quote"
            );
        }
    }

    Ok(set)
}

fn insert_value<'bump>(
    bump: &'bump Bump,
    set: &mut AttributeSet<'bump>,
    pending: Option<(&str, usize)>,
    value: &str,
) {
    match pending {
        Some((key, _)) => {
            set.insert(Attribute::new(bump, key, value));
        }
        None => tracing::debug!(value, "ignoring attribute value without a name"),
    }
}

#[cfg(feature = "json")]
mod json {
    use bumpalo::collections::String as BumpString;
    use bumpalo::Bump;
    use serde_json::Value;

    use super::{assemble, disassemble};
    use crate::{Attribute, AttributeError, AttributeSet, Attributes, QuoteHandling};

    fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    impl<'bump> Attributes<'bump> {
        /// Interpret a dynamically-typed value as attributes.
        ///
        /// `null` means no attributes, a string is pre-formatted attribute text
        /// and an object is a mapping of names to values. Within a mapping,
        /// `null` and `true` produce a boolean attribute, `false` omits the
        /// attribute and numbers are written out as text.
        ///
        /// ## Errors
        ///
        /// Returns [`AttributeError::InvalidAttributeInput`] for any other kind of
        /// value, including arrays or objects nested inside a mapping.
        pub fn from_json(bump: &'bump Bump, value: &Value) -> Result<Self, AttributeError> {
            match value {
                Value::Null => Ok(Attributes::Absent),
                Value::String(s) => Ok(Attributes::Raw(BumpString::from_str_in(s, bump))),
                Value::Object(map) => {
                    let mut set = AttributeSet::new_in(bump);
                    for (key, value) in map {
                        match value {
                            Value::Null | Value::Bool(true) => {
                                set.insert(Attribute::boolean(bump, key));
                            }
                            Value::Bool(false) => {}
                            Value::String(s) => {
                                set.insert(Attribute::new(bump, key, s));
                            }
                            Value::Number(n) => {
                                set.insert(Attribute::new(bump, key, &n.to_string()));
                            }
                            other => {
                                return Err(AttributeError::InvalidAttributeInput {
                                    found: describe(other),
                                })
                            }
                        }
                    }
                    Ok(Attributes::Set(set))
                }
                other => Err(AttributeError::InvalidAttributeInput {
                    found: describe(other),
                }),
            }
        }
    }

    /// Render a dynamically-typed value as attribute text.
    ///
    /// See [`Attributes::from_json`] for how values are interpreted.
    pub fn assemble_json(value: &Value) -> Result<String, AttributeError> {
        let bump = Bump::new();
        let attributes = Attributes::from_json(&bump, value)?;
        Ok(assemble(&attributes))
    }

    /// Parse a dynamically-typed value holding attribute text.
    ///
    /// ## Errors
    ///
    /// Returns [`AttributeError::InvalidAttributeInput`] unless the value is a string,
    /// and otherwise the errors of [`disassemble`].
    pub fn disassemble_json<'bump>(
        bump: &'bump Bump,
        value: &Value,
        quote_handling: QuoteHandling,
    ) -> Result<AttributeSet<'bump>, AttributeError> {
        match value {
            Value::String(s) => disassemble(bump, s, quote_handling),
            other => Err(AttributeError::InvalidAttributeInput {
                found: describe(other),
            }),
        }
    }
}
#[cfg(feature = "json")]
pub use json::{assemble_json, disassemble_json};
