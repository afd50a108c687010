/// Error type for attribute assembly and disassembly failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// The input was of a kind that cannot be interpreted as attributes.
    ///
    /// Only dynamically-typed input (such as JSON) can produce this; the typed
    /// API rules it out at compile time.
    #[error("invalid attribute input: expected a string, a mapping or nothing, found {found}")]
    InvalidAttributeInput {
        /// A short description of what was found instead.
        found: &'static str,
    },

    /// A quoted attribute value was never closed.
    ///
    /// Only returned when decoding with [`QuoteHandling::Strict`](crate::QuoteHandling::Strict).
    #[error("unclosed quote '{quote}' at position {position} with partial value '{partial_value}'")]
    UnclosedQuote {
        /// The quote character that was not closed (either ' or ")
        quote: char,
        /// The position of the opening quote in the trimmed input
        position: usize,
        /// The partial attribute value that was read
        partial_value: String,
    },

    /// An attribute name was followed by `=` and then the end of the input.
    ///
    /// Only returned when decoding with [`QuoteHandling::Strict`](crate::QuoteHandling::Strict).
    #[error("attribute '{key}' at position {position} has no value after '='")]
    MissingValue {
        /// The attribute name
        key: String,
        /// The position of the `=` in the trimmed input
        position: usize,
    },
}

impl AttributeError {
    /// Returns `true` if the error came from a malformed attribute string rather
    /// than from an input of the wrong kind.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::UnclosedQuote { .. } | Self::MissingValue { .. })
    }
}
