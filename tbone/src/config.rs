//! Rendering and decoding options.

/// How the children of a paired element are wrapped in its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChildWrapping {
    /// Concatenate all children and wrap them in one open/close pair.
    #[default]
    Joined,
    /// Wrap every child in its own open/close pair, so `p("a", "b")` renders
    /// `<p>a</p><p>b</p>`.
    PerChild,
}

/// How the attribute decoder treats input that ends inside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuoteHandling {
    /// Drop the unfinished attribute and keep everything decoded before it.
    #[default]
    Permissive,
    /// Fail with [`AttributeError::UnclosedQuote`](crate::AttributeError::UnclosedQuote)
    /// or [`AttributeError::MissingValue`](crate::AttributeError::MissingValue).
    Strict,
}

/// The declaration written before a document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Doctype {
    /// `<!DOCTYPE html>`
    #[default]
    Html5,
    /// No declaration; the root renders like any other paired element.
    None,
}

impl Doctype {
    /// The declaration text, if any.
    pub fn declaration(&self) -> Option<&'static str> {
        match self {
            Doctype::Html5 => Some("<!DOCTYPE html>"),
            Doctype::None => None,
        }
    }
}

/// Options carried by a [`Markup`](crate::Markup) factory into every element it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// How children are wrapped.
    pub child_wrapping: ChildWrapping,
    /// How the decoder treats unterminated input.
    pub quote_handling: QuoteHandling,
    /// Whether [`ElementNode::render_mut`](crate::ElementNode::render_mut)
    /// clears the element after reading it.
    pub reset_on_render: bool,
    /// The declaration emitted before a document root.
    pub doctype: Doctype,
}

impl RenderConfig {
    /// Legacy rendering: every child is wrapped individually and
    /// [`render_mut`](crate::ElementNode::render_mut) clears the element.
    pub fn legacy() -> Self {
        Self {
            child_wrapping: ChildWrapping::PerChild,
            reset_on_render: true,
            ..Self::default()
        }
    }

    /// Set the [`ChildWrapping`] of this config.
    pub fn with_child_wrapping(mut self, child_wrapping: ChildWrapping) -> Self {
        self.child_wrapping = child_wrapping;
        self
    }

    /// Set the [`QuoteHandling`] of this config.
    pub fn with_quote_handling(mut self, quote_handling: QuoteHandling) -> Self {
        self.quote_handling = quote_handling;
        self
    }

    /// Set whether rendering through `render_mut` clears the element.
    pub fn with_reset_on_render(mut self, reset_on_render: bool) -> Self {
        self.reset_on_render = reset_on_render;
        self
    }

    /// Set the [`Doctype`] of this config.
    pub fn with_doctype(mut self, doctype: Doctype) -> Self {
        self.doctype = doctype;
        self
    }
}
