#![deny(missing_docs)]
//! A crate for assembling HTML markup strings from chained builder calls.
//!
//! Elements are created through a [`Markup`] factory, one method per tag, and
//! configured with [`ElementNode::tag`] and [`ElementNode::attr`]. Rendering an
//! element produces its markup; an element passed as the child of another is
//! rendered in place. Attribute text can be converted to and from structured
//! [`AttributeSet`]s with the [`codec`] module.
//!
//! All allocations are done through a bump allocator ([bumpalo::Bump]) which is
//! handed to the [`Markup`] factory.
//!
//! No escaping is performed unless explicitly requested with [`Markup::escaped`].
//!
//! # Example
//!
//! ```
//! use tbone::{bumpalo::Bump, Markup};
//!
//! let bump = Bump::new();
//! let b = Markup::new(&bump);
//! let page = b
//!     .html((
//!         b.head(b.title("Hello World")),
//!         b.body(b.div(b.p("Hi there")).attr([("class", "content")])),
//!     ))
//!     .attr([("lang", "en")]);
//! assert_eq!(
//!     page.render(),
//!     "<!DOCTYPE html>\n<html lang=\"en\"><head><title>Hello World</title></head>\
//!      <body><div class=\"content\"><p>Hi there</p></div></body></html>"
//! );
//! ```

pub mod builder;
pub use builder::Markup;

pub mod catalog;
pub use catalog::{TagEntry, TagPolicy};

pub mod codec;
pub mod entities;
pub mod util;

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{Attribute, AttributeSet, Attributes, IntoAttribute, IntoAttributes};

mod config;
pub use config::{ChildWrapping, Doctype, QuoteHandling, RenderConfig};

mod element;
pub use element::{BuilderState, ElementNode, IntoContent, IntoContents};

mod error;
pub use error::AttributeError;
