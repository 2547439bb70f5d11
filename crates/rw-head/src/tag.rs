//! Resolved head tags and their serialization.

use std::fmt;

use serde::Deserialize;

use crate::attrs::{Attributes, render_attributes};
use crate::descriptor::HeadEntry;

/// Element kinds a head fragment can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    Title,
    Base,
    Meta,
    Link,
    Style,
    Script,
    Noscript,
}

impl TagKind {
    /// Element name as written in markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Base => "base",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Style => "style",
            Self::Script => "script",
            Self::Noscript => "noscript",
        }
    }

    /// Void elements have no body and no closing tag.
    #[must_use]
    pub fn is_void(self) -> bool {
        matches!(self, Self::Base | Self::Meta | Self::Link)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How void elements are closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoidStyle {
    /// `<meta charset="UTF-8">`
    #[default]
    Html,
    /// `<meta charset="UTF-8" />`
    SelfClosing,
}

/// One head element awaiting priority resolution.
///
/// Control metadata (kind, body, priority) lives in named fields and never
/// in the attribute bag.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub kind: TagKind,
    pub attrs: Attributes,
    pub inner_html: Option<String>,
    pub priority: Option<i32>,
}

impl Tag {
    #[must_use]
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            attrs: Attributes::new(),
            inner_html: None,
            priority: None,
        }
    }

    /// Build a tag of `kind` from a descriptor entry.
    #[must_use]
    pub fn from_entry(kind: TagKind, entry: HeadEntry) -> Self {
        Self {
            kind,
            attrs: entry.attrs,
            inner_html: entry.inner_html,
            priority: entry.priority,
        }
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn with_inner_html(mut self, body: impl Into<String>) -> Self {
        self.inner_html = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A tag with a definite sort priority, ready for serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct PrioritizedTag {
    pub kind: TagKind,
    pub attrs: Attributes,
    pub inner_html: Option<String>,
    pub priority: i32,
}

impl PrioritizedTag {
    /// Render as a single HTML element.
    #[must_use]
    pub fn render(&self, void_style: VoidStyle) -> String {
        render_tag(self.kind, &self.attrs, self.inner_html.as_deref(), void_style)
    }
}

/// Render one element.
///
/// Void kinds get no body and no closing tag. Content kinds get their body
/// verbatim between open and close tags.
pub fn render_tag(
    kind: TagKind,
    attrs: &Attributes,
    inner_html: Option<&str>,
    void_style: VoidStyle,
) -> String {
    let name = kind.as_str();
    let attrs = render_attributes(attrs);
    let sep = if attrs.is_empty() { "" } else { " " };

    if kind.is_void() {
        match void_style {
            VoidStyle::Html => format!("<{name}{sep}{attrs}>"),
            VoidStyle::SelfClosing => format!("<{name}{sep}{attrs} />"),
        }
    } else {
        let body = inner_html.unwrap_or_default();
        format!("<{name}{sep}{attrs}>{body}</{name}>")
    }
}
