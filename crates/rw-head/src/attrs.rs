//! Attribute values, ordered attribute bags, and attribute rendering.

use std::borrow::Cow;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::escape::escape_attr;

/// A single attribute value.
///
/// Mirrors the loosely-typed values head descriptors carry in practice:
/// strings, numbers, booleans, and explicit nulls. Anything else coming from
/// a self-describing format (arrays, nested objects) is coerced to its JSON
/// text on deserialization.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl AttrValue {
    /// Whether the value counts as "set" for attribute checks.
    ///
    /// Empty text, zero, `false`, and null are all treated as unset, so
    /// `charset=""` does not count as declaring a charset.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Bool(b) => *b,
            Self::Null => false,
        }
    }

    /// Stringified value, or `None` for null.
    #[must_use]
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Int(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(f) => Some(Cow::Owned(format_float(*f))),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Null => None,
        }
    }

    /// Borrow the value as text when it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Format a float the way page authors expect to see it in markup.
///
/// Integral values drop the fractional part, zero is always `0`, and
/// magnitudes from `1e21` up or below `1e-6` switch to exponent notation
/// with an explicit sign (`1e+21`, `1.5e-7`).
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f.is_infinite() {
        let text = if f.is_sign_positive() { "Infinity" } else { "-Infinity" };
        return text.to_owned();
    }
    if f == 0.0 {
        return "0".to_owned();
    }

    let magnitude = f.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{f:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        };
    }
    f.to_string()
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Insertion-ordered attribute bag.
///
/// Keys are unique. Inserting an existing key replaces the value in place,
/// keeping the key's original position so rendered output stays stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether `name` is present with a truthy value.
    #[must_use]
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(AttrValue::is_truthy)
    }

    /// Whether `name` is a string equal to `expected`.
    #[must_use]
    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.get(name).and_then(AttrValue::as_str) == Some(expected)
    }

    /// Stringified value of the first truthy attribute among `names`.
    #[must_use]
    pub fn first_truthy(&self, names: &[&str]) -> Option<Cow<'_, str>> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| value.is_truthy())
            .and_then(AttrValue::to_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::new();
                while let Some((name, value)) = map.next_entry::<String, AttrValue>()? {
                    attrs.insert(name, value);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Render an attribute bag as a space-joined HTML attribute string.
///
/// - `true` renders as a bare attribute name, `false` is omitted
/// - null values are omitted
/// - everything else is stringified and escaped as `name="value"`
///
/// # Examples
///
/// ```
/// use rw_head::{Attributes, render_attributes};
///
/// let attrs = Attributes::new()
///     .with("async", true)
///     .with("defer", false)
///     .with("src", "/js/app.js?a=1&b=2");
/// assert_eq!(render_attributes(&attrs), r#"async src="/js/app.js?a=1&amp;b=2""#);
/// ```
pub fn render_attributes(attrs: &Attributes) -> String {
    let mut out = String::new();
    for (name, value) in attrs.iter() {
        let rendered = match value {
            AttrValue::Bool(true) => Cow::Borrowed(name),
            AttrValue::Bool(false) | AttrValue::Null => continue,
            other => match other.to_text() {
                Some(text) => Cow::Owned(format!(r#"{name}="{}""#, escape_attr(&text))),
                None => continue,
            },
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&rendered);
    }
    out
}
