//! Sort priorities for head tags.
//!
//! Lower values render earlier. The title is the pivot at `0`: tags that
//! must precede it (charset, viewport, base, `http-equiv`) are negative,
//! everything else is positive. Tags carrying an explicit priority are never
//! passed to a policy.

use crate::attrs::AttrValue;
use crate::json_ld::JSON_LD_MIME;
use crate::tag::{PrioritizedTag, Tag, TagKind};

/// Strategy that assigns a priority to tags without an explicit one.
///
/// Implemented by [`DefaultPriority`] and by any `Fn(&Tag) -> i32`. A custom
/// policy replaces the default table entirely; it is not consulted as a
/// fallback.
///
/// A policy reads the tag and picks its priority. It cannot rewrite the
/// tag's attributes or body, which reach the output exactly as assembled.
pub trait PriorityPolicy {
    fn priority(&self, tag: &Tag) -> i32;
}

impl<F> PriorityPolicy for F
where
    F: Fn(&Tag) -> i32,
{
    fn priority(&self, tag: &Tag) -> i32 {
        self(tag)
    }
}

/// Built-in priority table keyed on tag kind and discriminating attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPriority;

impl PriorityPolicy for DefaultPriority {
    fn priority(&self, tag: &Tag) -> i32 {
        let attrs = &tag.attrs;
        match tag.kind {
            TagKind::Title => 0,
            TagKind::Base => -2,
            TagKind::Meta => {
                if attrs.is_truthy("charset") {
                    -4
                } else if attrs.is("name", "viewport") {
                    -3
                } else if attrs.is_truthy("http-equiv") {
                    -1
                } else {
                    100
                }
            }
            TagKind::Link => match attrs.get("rel").and_then(AttrValue::as_str) {
                Some("preconnect") => 10,
                Some("preload") => 60,
                Some("prefetch") => 80,
                Some("stylesheet") => 50,
                _ => 90,
            },
            TagKind::Style => {
                if tag
                    .inner_html
                    .as_deref()
                    .is_some_and(|css| css.contains("@import"))
                {
                    30
                } else {
                    51
                }
            }
            TagKind::Script => {
                if attrs.is("type", JSON_LD_MIME) {
                    105
                } else if attrs.is_truthy("async") {
                    20
                } else if attrs.is_truthy("defer") {
                    70
                } else {
                    40
                }
            }
            TagKind::Noscript => 110,
        }
    }
}

/// Give every tag a definite priority.
///
/// Explicit priorities pass through untouched; all other tags are asked of
/// `policy`.
pub fn resolve_priorities<P>(tags: Vec<Tag>, policy: &P) -> Vec<PrioritizedTag>
where
    P: PriorityPolicy + ?Sized,
{
    tags.into_iter()
        .map(|tag| {
            let priority = tag.priority.unwrap_or_else(|| policy.priority(&tag));
            PrioritizedTag {
                kind: tag.kind,
                attrs: tag.attrs,
                inner_html: tag.inner_html,
                priority,
            }
        })
        .collect()
}
