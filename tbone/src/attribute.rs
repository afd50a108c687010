use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A key-value pair for an HTML attribute.
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute. `None` renders the bare key (e.g. `checked`).
    pub value: Option<BumpString<'bump>>,
}

impl<'bump> Attribute<'bump> {
    /// Create a new attribute with a key and value.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: Some(BumpString::from_str_in(value, bump)),
        }
    }

    /// Create a boolean attribute (no value).
    pub fn boolean(bump: &'bump Bump, key: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: None,
        }
    }

    /// Create an attribute with an optional value.
    pub fn with_optional_value(bump: &'bump Bump, key: &str, value: Option<&str>) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: value.map(|v| BumpString::from_str_in(v, bump)),
        }
    }

    /// Get the value as a string slice, if present.
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.as_str())
    }
}

/// Trait for types that can be converted into an Attribute with a bump allocator.
pub trait IntoAttribute<'bump> {
    /// Convert this value into an Attribute using the given bump allocator.
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump>;
}
impl<'bump> IntoAttribute<'bump> for Attribute<'bump> {
    fn into_attribute(self, _bump: &'bump Bump) -> Attribute<'bump> {
        self
    }
}
impl<'bump> IntoAttribute<'bump> for &str {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::boolean(bump, self)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, &str) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, self.0, self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, self.0, &self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (String, &str) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, &self.0, self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (String, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, &self.0, &self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, Option<&str>) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::with_optional_value(bump, self.0, self.1)
    }
}

/// An ordered set of attributes in which each key appears at most once.
///
/// Iteration and rendering follow insertion order. Inserting a key that is
/// already present replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttributeSet<'bump> {
    attributes: BumpVec<'bump, Attribute<'bump>>,
}

impl<'bump> AttributeSet<'bump> {
    /// Create an empty set in the given bump allocator.
    pub fn new_in(bump: &'bump Bump) -> Self {
        Self {
            attributes: BumpVec::new_in(bump),
        }
    }

    /// Create a set from anything that converts into attributes.
    ///
    /// Later duplicates replace earlier ones.
    pub fn from_iter_in(
        bump: &'bump Bump,
        iter: impl IntoIterator<Item = impl IntoAttribute<'bump>>,
    ) -> Self {
        let mut set = Self::new_in(bump);
        for attribute in iter {
            set.insert(attribute.into_attribute(bump));
        }
        set
    }

    /// Insert an attribute, replacing the value of an existing attribute with the same key.
    ///
    /// Returns the replaced attribute, if any.
    pub fn insert(&mut self, attribute: Attribute<'bump>) -> Option<Attribute<'bump>> {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.key.as_str() == attribute.key.as_str())
        {
            Some(existing) => Some(std::mem::replace(existing, attribute)),
            None => {
                self.attributes.push(attribute);
                None
            }
        }
    }

    /// Remove the attribute with the given key.
    pub fn remove(&mut self, key: &str) -> Option<Attribute<'bump>> {
        let index = self.attributes.iter().position(|a| a.key.as_str() == key)?;
        Some(self.attributes.remove(index))
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Option<&Attribute<'bump>> {
        self.attributes.iter().find(|a| a.key.as_str() == key)
    }

    /// Look up the value of an attribute by key.
    ///
    /// Returns `None` both for a missing key and for a boolean attribute; use
    /// [`Self::contains_key`] to tell them apart.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|a| a.value_as_str())
    }

    /// Returns `true` if an attribute with this key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute<'bump>> {
        self.attributes.iter()
    }

    /// The attributes as a slice.
    pub fn as_slice(&self) -> &[Attribute<'bump>] {
        self.attributes.as_slice()
    }
}

impl<'a, 'bump> IntoIterator for &'a AttributeSet<'bump> {
    type Item = &'a Attribute<'bump>;
    type IntoIter = std::slice::Iter<'a, Attribute<'bump>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The attributes of an element: nothing, a structured set, or pre-formatted text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum Attributes<'bump> {
    /// No attributes.
    #[default]
    Absent,
    /// A structured attribute set.
    Set(AttributeSet<'bump>),
    /// Pre-formatted attribute text such as `class="x" id="y"`, emitted verbatim after trimming.
    Raw(BumpString<'bump>),
}

impl<'bump> Attributes<'bump> {
    /// Returns `true` if rendering these attributes would emit nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Attributes::Absent => true,
            Attributes::Set(set) => set.is_empty(),
            Attributes::Raw(raw) => raw.trim().is_empty(),
        }
    }

    /// Returns the structured set, if these are structured attributes.
    pub fn as_set(&self) -> Option<&AttributeSet<'bump>> {
        match self {
            Attributes::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the pre-formatted text, if these are raw attributes.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Attributes::Raw(raw) => Some(raw.as_str()),
            _ => None,
        }
    }
}

/// Trait for types that can be converted into [`Attributes`] with a bump allocator.
///
/// Strings become [`Attributes::Raw`]; arrays and vectors of anything
/// implementing [`IntoAttribute`] become an [`Attributes::Set`].
pub trait IntoAttributes<'bump> {
    /// Convert this value into attributes using the given bump allocator.
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump>;
}
impl<'bump> IntoAttributes<'bump> for Attributes<'bump> {
    fn into_attributes(self, _bump: &'bump Bump) -> Attributes<'bump> {
        self
    }
}
impl<'bump> IntoAttributes<'bump> for AttributeSet<'bump> {
    fn into_attributes(self, _bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Set(self)
    }
}
impl<'bump> IntoAttributes<'bump> for () {
    fn into_attributes(self, _bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Absent
    }
}
impl<'bump> IntoAttributes<'bump> for &str {
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Raw(BumpString::from_str_in(self, bump))
    }
}
impl<'bump> IntoAttributes<'bump> for String {
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Raw(BumpString::from_str_in(&self, bump))
    }
}
impl<'bump, T: IntoAttributes<'bump>> IntoAttributes<'bump> for Option<T> {
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump> {
        match self {
            Some(attributes) => attributes.into_attributes(bump),
            None => Attributes::Absent,
        }
    }
}
impl<'bump, A: IntoAttribute<'bump>, const N: usize> IntoAttributes<'bump> for [A; N] {
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Set(AttributeSet::from_iter_in(bump, self))
    }
}
impl<'bump, A: IntoAttribute<'bump>> IntoAttributes<'bump> for Vec<A> {
    fn into_attributes(self, bump: &'bump Bump) -> Attributes<'bump> {
        Attributes::Set(AttributeSet::from_iter_in(bump, self))
    }
}
