//! A factory for [`ElementNode`]s, with one constructor method per catalogued tag.

use bumpalo::collections::String as BumpString;
use bumpalo::Bump;

use crate::{
    codec, AttributeError, AttributeSet, Attributes, ElementNode, IntoAttributes, IntoContents,
    RenderConfig, TagPolicy,
};

/// Creates elements that allocate from a bump allocator and share one
/// [`RenderConfig`].
///
/// # Example
///
/// ```
/// use tbone::{bumpalo::Bump, Markup};
///
/// let bump = Bump::new();
/// let b = Markup::new(&bump);
/// let page = b.div((b.h1("Hello, World!"), b.br())).attr([("class", "container")]);
/// assert_eq!(
///     page.render(),
///     r#"<div class="container"><h1>Hello, World!</h1><br /></div>"#
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Markup<'bump> {
    bump: &'bump Bump,
    config: RenderConfig,
}
impl<'bump> Markup<'bump> {
    /// Create a new factory with the default configuration.
    pub fn new(bump: &'bump Bump) -> Self {
        Self::with_config(bump, RenderConfig::default())
    }

    /// Create a new factory with the given configuration.
    pub fn with_config(bump: &'bump Bump, config: RenderConfig) -> Self {
        Self { bump, config }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// The configuration given to every element this factory creates.
    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Create an unconfigured element.
    pub fn node(&self) -> ElementNode<'bump> {
        ElementNode::new_in(self.bump, self.config)
    }

    /// Create an element with an arbitrary tag name.
    ///
    /// Tags missing from the [catalog](crate::catalog) are rendered as paired tags.
    pub fn tag(&self, name: &str, children: impl IntoContents<'bump>) -> ElementNode<'bump> {
        self.node().tag(name, children)
    }

    /// Create attributes from anything that implements [`IntoAttributes`].
    pub fn attrs(&self, value: impl IntoAttributes<'bump>) -> Attributes<'bump> {
        value.into_attributes(self.bump)
    }

    /// Create a nameless element, which renders its content as-is.
    pub fn text(&self, text: &str) -> ElementNode<'bump> {
        self.node().append(text)
    }

    /// Create a nameless element holding `text` with HTML special characters escaped.
    pub fn escaped(&self, text: &str) -> ElementNode<'bump> {
        let escaped = html_escape::encode_text(text);
        self.node()
            .append(BumpString::from_str_in(escaped.as_ref(), self.bump))
    }

    /// Parse an attribute string using this factory's quote handling.
    ///
    /// See [`codec::disassemble`].
    pub fn parse_attributes(&self, input: &str) -> Result<AttributeSet<'bump>, AttributeError> {
        codec::disassemble(self.bump, input, self.config.quote_handling)
    }
}

macro_rules! paired_tags {
    ($($tag_ident:ident),*) => {
        impl<'bump> Markup<'bump> {
            $(
                #[doc = concat!("Create a `", stringify!($tag_ident), "` element with the given children.")]
                pub fn $tag_ident(&self, children: impl IntoContents<'bump>) -> ElementNode<'bump> {
                    self.tag(stringify!($tag_ident), children)
                }
            )*
        }
        /// Every catalogued tag that takes children.
        pub const PAIRED_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
paired_tags! {
    html, head, title, style, script, noscript, body,
    h1, h2, h3, h4, h5, h6, p, a,
    ul, ol, li, dl, dt, dd,
    table, caption, thead, tbody, tfoot, tr, th, td, colgroup,
    form, fieldset, legend, button, textarea, select, option, optgroup, label,
    pre, code, div, span, nav, header, footer, section, article, aside, main, menu, center,
    em, strong, small, sub, sup, b, i, u, s, q, blockquote, cite, abbr, address,
    iframe, object, audio, video, canvas, figure, figcaption,
    time, mark, details, summary, kbd, samp, var,
    del, ins, dfn, bdo, map, hgroup, big, tt, acronym, noframes
}

macro_rules! void_tags {
    ($($tag_ident:ident),*) => {
        impl<'bump> Markup<'bump> {
            $(
                #[doc = concat!("Create a self-closing `", stringify!($tag_ident), "` element.\n\nThe element stays self-closing if it is renamed with [`ElementNode::tag`].")]
                pub fn $tag_ident(&self) -> ElementNode<'bump> {
                    self.tag(stringify!($tag_ident), ()).with_policy(TagPolicy::Void)
                }
            )*
        }
        /// Every catalogued self-closing tag.
        pub const VOID_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
void_tags! {
    area, base, br, col, embed, hr, img, input, link, meta,
    param, source, track, wbr, frame
}
