//! Caller-facing head descriptors.
//!
//! A [`HeadDescriptor`] is one partial description of head content, usually
//! produced by one layer of a page (layout, page, component). Descriptors can
//! be built in code or loaded from JSON/YAML sidecar data:
//!
//! ```yaml
//! title: Getting Started
//! meta:
//!   - name: description
//!     content: First steps with RW
//! link:
//!   - rel: stylesheet
//!     href: /assets/app.css
//! script:
//!   - src: /assets/app.js
//!     defer: true
//!     priority: 15
//! jsonLd:
//!   "@type": TechArticle
//!   headline: Getting Started
//! ```
//!
//! Inside each entry the keys `innerHTML` and `priority` are control
//! metadata, lifted out of the attribute bag into [`HeadEntry`] fields, and a
//! `tagName` key is discarded.

use serde::Deserialize;

use crate::HeadError;
use crate::attrs::{AttrValue, Attributes};
use crate::json_ld::JsonLdBlock;

const INNER_HTML_KEY: &str = "innerHTML";
const PRIORITY_KEY: &str = "priority";
const TAG_NAME_KEY: &str = "tagName";

/// One repeatable head item: attributes plus control metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Attributes")]
pub struct HeadEntry {
    /// Markup attributes, in insertion order.
    pub attrs: Attributes,
    /// Raw element body for content-bearing kinds. Never escaped.
    pub inner_html: Option<String>,
    /// Explicit sort priority; bypasses the priority policy when set.
    pub priority: Option<i32>,
}

impl HeadEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insert.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    #[must_use]
    pub fn inner_html(mut self, body: impl Into<String>) -> Self {
        self.inner_html = Some(body.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<Attributes> for HeadEntry {
    fn from(mut attrs: Attributes) -> Self {
        let inner_html = attrs
            .remove(INNER_HTML_KEY)
            .and_then(|value| value.to_text().map(std::borrow::Cow::into_owned));
        let priority = attrs.remove(PRIORITY_KEY).and_then(priority_from_value);
        attrs.remove(TAG_NAME_KEY);

        Self {
            attrs,
            inner_html,
            priority,
        }
    }
}

/// Numeric priorities only; anything else is treated as unset.
#[allow(clippy::cast_possible_truncation)]
fn priority_from_value(value: AttrValue) -> Option<i32> {
    match value {
        AttrValue::Int(n) => Some(n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
        AttrValue::Float(f) if f.is_finite() => Some(f.floor() as i32),
        _ => None,
    }
}

/// Either a single value or an ordered sequence of values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into an ordered vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    /// Cloned items as an ordered vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item.clone()],
            Self::Many(items) => items.clone(),
        }
    }
}

/// One partial description of document-head content.
///
/// All fields are optional. An absent field means "nothing from this
/// descriptor", never "inherit".
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadDescriptor {
    pub title: Option<String>,
    pub base: Option<Vec<HeadEntry>>,
    pub meta: Option<Vec<HeadEntry>>,
    pub link: Option<Vec<HeadEntry>>,
    pub style: Option<Vec<HeadEntry>>,
    pub script: Option<Vec<HeadEntry>>,
    pub noscript: Option<Vec<HeadEntry>>,
    /// Structured data: one object or a list of objects.
    #[serde(rename = "jsonLd", alias = "json_ld")]
    pub json_ld: Option<OneOrMany<JsonLdBlock>>,
}

impl HeadDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn base(mut self, entry: HeadEntry) -> Self {
        self.base.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn meta(mut self, entry: HeadEntry) -> Self {
        self.meta.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn link(mut self, entry: HeadEntry) -> Self {
        self.link.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn style(mut self, entry: HeadEntry) -> Self {
        self.style.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn script(mut self, entry: HeadEntry) -> Self {
        self.script.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn noscript(mut self, entry: HeadEntry) -> Self {
        self.noscript.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Append a structured-data block.
    #[must_use]
    pub fn json_ld(mut self, block: JsonLdBlock) -> Self {
        self.json_ld = Some(match self.json_ld.take() {
            None => OneOrMany::One(block),
            Some(existing) => {
                let mut blocks = existing.into_vec();
                blocks.push(block);
                OneOrMany::Many(blocks)
            }
        });
        self
    }

    /// Parse a descriptor from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or not an object.
    pub fn from_json(content: &str) -> Result<Self, HeadError> {
        serde_json::from_str(content)
            .map_err(|e| HeadError::Parse(format!("Invalid head JSON: {e}")))
    }

    /// Parse a descriptor from YAML.
    ///
    /// Empty content yields an empty descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, HeadError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| HeadError::Parse(format!("Invalid head YAML: {e}")))
    }
}

/// Parse JSON holding either one descriptor or an array of descriptors.
///
/// # Errors
///
/// Returns an error if the JSON is malformed.
pub fn parse_descriptors_json(content: &str) -> Result<Vec<HeadDescriptor>, HeadError> {
    serde_json::from_str::<OneOrMany<HeadDescriptor>>(content)
        .map(OneOrMany::into_vec)
        .map_err(|e| HeadError::Parse(format!("Invalid head JSON: {e}")))
}

/// Parse YAML holding either one descriptor or a sequence of descriptors.
///
/// Empty content yields no descriptors.
///
/// # Errors
///
/// Returns an error if the YAML is malformed.
pub fn parse_descriptors_yaml(content: &str) -> Result<Vec<HeadDescriptor>, HeadError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str::<OneOrMany<HeadDescriptor>>(trimmed)
        .map(OneOrMany::into_vec)
        .map_err(|e| HeadError::Parse(format!("Invalid head YAML: {e}")))
}
