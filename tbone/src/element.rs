use std::fmt::{self, Write};

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{
    catalog, codec, util::trim, Attributes, ChildWrapping, IntoAttributes, RenderConfig, TagPolicy,
};

/// Whether an [`ElementNode`] has been configured since it was created or last reset.
///
/// Rendering does not change the state: [`ElementNode::render`] leaves the
/// element as it was, and [`ElementNode::render_mut`] either does the same or
/// returns it to [`BuilderState::Unconfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Freshly created or reset; renders as an empty string.
    Unconfigured,
    /// A tag name, children, attributes or a policy override have been set.
    Configured,
}

/// One HTML element under construction.
///
/// An element is configured through the fluent [`Self::tag`] and [`Self::attr`]
/// methods and turned into markup with [`Self::render`] or its [`fmt::Display`]
/// implementation. Children are stored as already-rendered markup: passing an
/// element as a child of another renders it at that point.
///
/// Content is never escaped; use [`crate::Markup::escaped`] for text that must be.
///
/// # Example
///
/// ```
/// use tbone::{bumpalo::Bump, Markup};
///
/// let bump = Bump::new();
/// let b = Markup::new(&bump);
/// let list = b.ul((b.li("one"), b.li("two"))).attr([("class", "menu")]);
/// assert_eq!(list.render(), r#"<ul class="menu"><li>one</li><li>two</li></ul>"#);
/// ```
#[derive(Debug, Clone)]
pub struct ElementNode<'bump> {
    bump: &'bump Bump,
    name: BumpString<'bump>,
    children: BumpVec<'bump, BumpString<'bump>>,
    attributes: Attributes<'bump>,
    policy_override: Option<TagPolicy>,
    config: RenderConfig,
}

impl<'bump> ElementNode<'bump> {
    /// Create an unconfigured element.
    pub fn new_in(bump: &'bump Bump, config: RenderConfig) -> Self {
        Self {
            bump,
            name: BumpString::new_in(bump),
            children: BumpVec::new_in(bump),
            attributes: Attributes::Absent,
            policy_override: None,
            config,
        }
    }

    /// Set the tag name and append children.
    ///
    /// Calling this again replaces the tag name; children keep accumulating
    /// until the element is [reset](Self::reset).
    pub fn tag(mut self, name: &str, children: impl IntoContents<'bump>) -> Self {
        self.name = BumpString::from_str_in(name, self.bump);
        children.push_contents(self.bump, &mut self.children);
        self
    }

    /// Append children without changing the tag name.
    pub fn append(mut self, children: impl IntoContents<'bump>) -> Self {
        children.push_contents(self.bump, &mut self.children);
        self
    }

    /// Replace the attributes of the element wholesale.
    ///
    /// A string is used as pre-formatted attribute text. If the string has no
    /// `=` and the tag has a default attribute (such as `href` for `a`), the
    /// string becomes the value of that attribute instead.
    pub fn attr(mut self, attributes: impl IntoAttributes<'bump>) -> Self {
        self.attributes = attributes.into_attributes(self.bump);
        self
    }

    /// Replace the attributes of the element with a dynamically-typed value.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::AttributeError::InvalidAttributeInput`] if the value cannot
    /// be interpreted as attributes; see [`Attributes::from_json`].
    #[cfg(feature = "json")]
    pub fn try_attr(mut self, value: &serde_json::Value) -> Result<Self, crate::AttributeError> {
        self.attributes = Attributes::from_json(self.bump, value)?;
        Ok(self)
    }

    /// Override the catalog policy of the tag.
    pub fn with_policy(mut self, policy: TagPolicy) -> Self {
        self.policy_override = Some(policy);
        self
    }

    /// Replace the render configuration of this element.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The rendered children, in order.
    pub fn children(&self) -> &[BumpString<'bump>] {
        &self.children
    }

    /// The attributes as set by [`Self::attr`].
    pub fn attributes(&self) -> &Attributes<'bump> {
        &self.attributes
    }

    /// The render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The effective serialization policy: the override if one was set,
    /// otherwise the catalog policy of the tag name.
    pub fn policy(&self) -> TagPolicy {
        self.policy_override
            .unwrap_or_else(|| catalog::policy(self.name.as_str()))
    }

    /// Whether the element has been configured.
    pub fn state(&self) -> BuilderState {
        if self.name.is_empty()
            && self.children.is_empty()
            && self.attributes == Attributes::Absent
            && self.policy_override.is_none()
        {
            BuilderState::Unconfigured
        } else {
            BuilderState::Configured
        }
    }

    /// Clear the tag name, children, attributes and policy override.
    /// The render configuration is kept.
    pub fn reset(&mut self) {
        self.name.clear();
        self.children.clear();
        self.attributes = Attributes::Absent;
        self.policy_override = None;
    }

    /// Render the element to a string. The element is left unchanged.
    pub fn render(&self) -> String {
        let mut output = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_to(&mut output);
        output
    }

    /// Render the element to a string, then [reset](Self::reset) it if
    /// [`RenderConfig::reset_on_render`] is set.
    pub fn render_mut(&mut self) -> String {
        let output = self.render();
        if self.config.reset_on_render {
            self.reset();
        }
        output
    }

    /// Write the element to a writer.
    pub fn write_to(&self, writer: &mut impl Write) -> fmt::Result {
        let name = self.name.as_str();
        let policy = self.policy();
        tracing::trace!(tag = name, children = self.children.len(), ?policy, "rendering element");

        if name.is_empty() {
            for child in self.children.iter() {
                writer.write_str(child.as_str())?;
            }
            return Ok(());
        }

        if policy == TagPolicy::Document {
            if let Some(declaration) = self.config.doctype.declaration() {
                writeln!(writer, "{declaration}")?;
            }
        }

        if policy == TagPolicy::Void {
            if !self.children.is_empty() {
                tracing::debug!(
                    tag = name,
                    children = self.children.len(),
                    "discarding children of void element"
                );
            }
            write!(writer, "<{name}")?;
            self.write_attributes(writer)?;
            return write!(writer, " />");
        }

        if self.children.is_empty() {
            write!(writer, "<{name}")?;
            self.write_attributes(writer)?;
            if policy == TagPolicy::OpenWhenEmpty && self.attributes.is_blank() {
                return write!(writer, ">");
            }
            return write!(writer, "></{name}>");
        }

        match self.config.child_wrapping {
            ChildWrapping::Joined => {
                self.write_open(writer, name)?;
                for child in self.children.iter() {
                    writer.write_str(child.as_str())?;
                }
                write!(writer, "</{name}>")
            }
            ChildWrapping::PerChild => {
                for child in self.children.iter() {
                    self.write_open(writer, name)?;
                    write!(writer, "{}</{name}>", child.as_str())?;
                }
                Ok(())
            }
        }
    }

    fn write_open(&self, writer: &mut impl Write, name: &str) -> fmt::Result {
        write!(writer, "<{name}")?;
        self.write_attributes(writer)?;
        write!(writer, ">")
    }

    fn write_attributes(&self, writer: &mut impl Write) -> fmt::Result {
        if let Attributes::Raw(raw) = &self.attributes {
            let value = trim(raw.as_str());
            if !value.is_empty() && !value.contains('=') {
                if let Some(default) = catalog::default_attribute(self.name.as_str()) {
                    tracing::debug!(tag = self.name.as_str(), attribute = default, "applying default attribute");
                    return write!(writer, " {default}=\"{value}\"");
                }
            }
        }
        codec::write_attributes(writer, &self.attributes)
    }
}

impl fmt::Display for ElementNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Trait for types that can become one child of an [`ElementNode`].
///
/// Strings are taken verbatim; elements are rendered.
pub trait IntoContent<'bump> {
    /// Convert this value into child markup using the given bump allocator.
    fn into_content(self, bump: &'bump Bump) -> BumpString<'bump>;
}
impl<'bump> IntoContent<'bump> for &str {
    fn into_content(self, bump: &'bump Bump) -> BumpString<'bump> {
        BumpString::from_str_in(self, bump)
    }
}
impl<'bump> IntoContent<'bump> for String {
    fn into_content(self, bump: &'bump Bump) -> BumpString<'bump> {
        BumpString::from_str_in(&self, bump)
    }
}
impl<'bump> IntoContent<'bump> for &String {
    fn into_content(self, bump: &'bump Bump) -> BumpString<'bump> {
        BumpString::from_str_in(self, bump)
    }
}
impl<'bump> IntoContent<'bump> for BumpString<'bump> {
    fn into_content(self, _bump: &'bump Bump) -> BumpString<'bump> {
        self
    }
}
impl<'bump> IntoContent<'bump> for ElementNode<'bump> {
    fn into_content(self, bump: &'bump Bump) -> BumpString<'bump> {
        let mut content = BumpString::new_in(bump);
        let _ = self.write_to(&mut content);
        content
    }
}

/// Trait for types that supply zero or more children to an [`ElementNode`].
///
/// Implemented for single items, `()` (no children), `Option`, arrays and
/// vectors of items, and tuples of up to six items of mixed types.
pub trait IntoContents<'bump> {
    /// Append the children to `children`.
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>);
}

impl<'bump> IntoContents<'bump> for &str {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.push(self.into_content(bump));
    }
}
impl<'bump> IntoContents<'bump> for String {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.push(self.into_content(bump));
    }
}
impl<'bump> IntoContents<'bump> for &String {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.push(self.into_content(bump));
    }
}
impl<'bump> IntoContents<'bump> for BumpString<'bump> {
    fn push_contents(self, _bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.push(self);
    }
}
impl<'bump> IntoContents<'bump> for ElementNode<'bump> {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.push(self.into_content(bump));
    }
}

impl<'bump> IntoContents<'bump> for () {
    fn push_contents(self, _bump: &'bump Bump, _children: &mut BumpVec<'bump, BumpString<'bump>>) {}
}
impl<'bump, T: IntoContents<'bump>> IntoContents<'bump> for Option<T> {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        if let Some(contents) = self {
            contents.push_contents(bump, children);
        }
    }
}
impl<'bump, T: IntoContent<'bump>, const N: usize> IntoContents<'bump> for [T; N] {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.extend(self.into_iter().map(|c| c.into_content(bump)));
    }
}
impl<'bump, T: IntoContent<'bump>> IntoContents<'bump> for Vec<T> {
    fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
        children.extend(self.into_iter().map(|c| c.into_content(bump)));
    }
}

macro_rules! tuple_contents {
    ($($name:ident),+) => {
        impl<'bump, $($name: IntoContent<'bump>),+> IntoContents<'bump> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn push_contents(self, bump: &'bump Bump, children: &mut BumpVec<'bump, BumpString<'bump>>) {
                let ($($name,)+) = self;
                $(children.push($name.into_content(bump));)+
            }
        }
    };
}
tuple_contents!(A, B);
tuple_contents!(A, B, C);
tuple_contents!(A, B, C, D);
tuple_contents!(A, B, C, D, E);
tuple_contents!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Markup, QuoteHandling};

    #[test]
    fn test_unconfigured_renders_empty() {
        let bump = Bump::new();
        let node = ElementNode::new_in(&bump, RenderConfig::default());
        assert_eq!(node.state(), BuilderState::Unconfigured);
        assert_eq!(node.render(), "");
    }

    #[test]
    fn test_tag_accumulates_children() {
        let bump = Bump::new();
        let node = ElementNode::new_in(&bump, RenderConfig::default())
            .tag("span", "a")
            .tag("div", ("b", "c"));
        assert_eq!(node.name(), "div");
        let children: Vec<&str> = node.children().iter().map(|c| c.as_str()).collect();
        assert_eq!(children, ["a", "b", "c"]);
        assert_eq!(node.render(), "<div>abc</div>");
    }

    #[test]
    fn test_attr_replaces_wholesale() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let node = b
            .div(())
            .attr([("id", "me"), ("class", "content")])
            .attr([("title", "t")]);
        assert_eq!(node.render(), r#"<div title="t"></div>"#);
    }

    #[test]
    fn test_render_is_idempotent() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let node = b.p("Hello World").attr([("id", "me")]);
        assert_eq!(node.render(), node.render());
        assert_eq!(node.to_string(), r#"<p id="me">Hello World</p>"#);
    }

    #[test]
    fn test_render_mut_resets_when_configured() {
        let bump = Bump::new();
        let b = Markup::with_config(&bump, RenderConfig::legacy());
        let mut node = b.div("Hello World");
        assert_eq!(node.render_mut(), "<div>Hello World</div>");
        assert_eq!(node.state(), BuilderState::Unconfigured);
        assert_eq!(node.render_mut(), "");
    }

    #[test]
    fn test_render_mut_keeps_state_by_default() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let mut node = b.div("Hello World");
        assert_eq!(node.render_mut(), "<div>Hello World</div>");
        assert_eq!(node.render_mut(), "<div>Hello World</div>");
    }

    #[test]
    fn test_render_keeps_configured_state() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let mut node = b.div("x");
        let _ = node.render();
        assert_eq!(node.state(), BuilderState::Configured);
        let _ = node.render_mut();
        assert_eq!(node.state(), BuilderState::Configured);
    }

    #[test]
    fn test_reset_then_reuse() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let mut node = b.p("first").attr([("id", "me")]);
        node.reset();
        assert_eq!(node.state(), BuilderState::Unconfigured);
        let node = node.tag("br", ());
        assert_eq!(node.render(), "<br />");
    }

    #[test]
    fn test_empty_name_renders_children_bare() {
        let bump = Bump::new();
        let node = ElementNode::new_in(&bump, RenderConfig::default()).append("Hello World");
        assert_eq!(node.render(), "Hello World");
    }

    #[test]
    fn test_void_discards_children() {
        let bump = Bump::new();
        let node = ElementNode::new_in(&bump, RenderConfig::default()).tag("br", "ignored");
        assert_eq!(node.render(), "<br />");
    }

    #[test]
    fn test_policy_override() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        assert_eq!(b.tag("icon", ()).with_policy(TagPolicy::Void).render(), "<icon />");
        assert_eq!(b.br().with_policy(TagPolicy::Paired).render(), "<br></br>");
    }

    #[test]
    fn test_per_child_wrapping() {
        let bump = Bump::new();
        let config = RenderConfig::default().with_child_wrapping(ChildWrapping::PerChild);
        let node = ElementNode::new_in(&bump, config)
            .tag("li", ("one", "two"))
            .attr([("class", "x")]);
        assert_eq!(
            node.render(),
            r#"<li class="x">one</li><li class="x">two</li>"#
        );
    }

    #[test]
    fn test_default_attribute_shorthand() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        assert_eq!(
            b.a("here").attr("http://example.com").render(),
            r#"<a href="http://example.com">here</a>"#
        );
        assert_eq!(
            b.img().attr(" logo.png ").render(),
            r#"<img src="logo.png" />"#
        );
        assert_eq!(
            b.a("here").attr(r#"href="http://example.com""#).render(),
            r#"<a href="http://example.com">here</a>"#
        );
        assert_eq!(b.input().attr("checked").render(), "<input checked />");
    }

    #[test]
    fn test_display_in_format() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        assert_eq!(format!("[{}]", b.hr()), "[<hr />]");
    }

    #[test]
    fn test_optional_and_vec_contents() {
        let bump = Bump::new();
        let b = Markup::new(&bump);
        let items: Vec<ElementNode> = ["a", "b"].into_iter().map(|s| b.li(s)).collect();
        assert_eq!(b.ul(items).render(), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(b.div(None::<&str>).render(), "<div></div>");
        assert_eq!(b.div(Some("x")).render(), "<div>x</div>");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_try_attr() {
        use serde_json::json;

        let bump = Bump::new();
        let b = Markup::new(&bump);
        let node = b.div(()).try_attr(&json!({"id": "me"})).unwrap();
        assert_eq!(node.render(), r#"<div id="me"></div>"#);
        assert!(b.div(()).try_attr(&json!(42)).is_err());
    }

    #[test]
    fn test_config_is_carried() {
        let bump = Bump::new();
        let config = RenderConfig::default().with_quote_handling(QuoteHandling::Strict);
        let b = Markup::with_config(&bump, config);
        assert_eq!(b.div(()).config().quote_handling, QuoteHandling::Strict);
    }
}
