//! Head rendering pipeline.
//!
//! [`HeadRenderer`] runs normalize → merge → deduplicate → assemble →
//! prioritize → sort → serialize over a set of descriptors and returns the
//! finished fragment.

use std::fmt;
use std::sync::Arc;

use crate::HeadError;
use crate::attrs::Attributes;
use crate::descriptor::HeadDescriptor;
use crate::json_ld::JSON_LD_MIME;
use crate::merge::merge;
use crate::meta::dedupe_meta;
use crate::normalize::{NormalizedHead, normalize};
use crate::priority::{DefaultPriority, PriorityPolicy, resolve_priorities};
use crate::tag::{PrioritizedTag, Tag, TagKind, VoidStyle};

/// Charset declared when no descriptor supplies one.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Viewport content declared when no descriptor supplies a viewport meta.
pub const DEFAULT_VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Output options for [`HeadRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the injected `<meta charset>`.
    pub charset: String,
    /// Content of the injected `<meta name="viewport">`.
    pub viewport: String,
    /// Closing style for void elements.
    pub void_style: VoidStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_owned(),
            viewport: DEFAULT_VIEWPORT.to_owned(),
            void_style: VoidStyle::default(),
        }
    }
}

/// Borrowed renderer input: one descriptor or an ordered slice of them.
///
/// A single descriptor is the one-element case, so both shapes share one
/// code path.
#[derive(Clone, Copy, Debug)]
pub struct HeadInput<'a>(&'a [HeadDescriptor]);

impl<'a> HeadInput<'a> {
    #[must_use]
    pub fn descriptors(self) -> &'a [HeadDescriptor] {
        self.0
    }
}

impl<'a> From<&'a HeadDescriptor> for HeadInput<'a> {
    fn from(descriptor: &'a HeadDescriptor) -> Self {
        Self(std::slice::from_ref(descriptor))
    }
}

impl<'a> From<&'a [HeadDescriptor]> for HeadInput<'a> {
    fn from(descriptors: &'a [HeadDescriptor]) -> Self {
        Self(descriptors)
    }
}

impl<'a> From<&'a Vec<HeadDescriptor>> for HeadInput<'a> {
    fn from(descriptors: &'a Vec<HeadDescriptor>) -> Self {
        Self(descriptors.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [HeadDescriptor; N]> for HeadInput<'a> {
    fn from(descriptors: &'a [HeadDescriptor; N]) -> Self {
        Self(descriptors.as_slice())
    }
}

/// Composes head fragments from descriptors.
///
/// Holds only immutable configuration, so one renderer can serve concurrent
/// page renders.
///
/// # Example
///
/// ```
/// use rw_head::{HeadDescriptor, HeadEntry, HeadRenderer, Tag, TagKind};
///
/// let layout = HeadDescriptor::new()
///     .title("RW")
///     .link(HeadEntry::new().attr("rel", "stylesheet").attr("href", "/app.css"));
/// let page = HeadDescriptor::new().title("Getting Started");
///
/// let html = HeadRenderer::new().render(&[layout, page])?;
/// assert!(html.contains("<title>Getting Started</title>"));
///
/// // Replace the default priority table.
/// let renderer = HeadRenderer::new().with_priority(|tag: &Tag| match tag.kind {
///     TagKind::Title => -100,
///     _ => 0,
/// });
/// let html = renderer.render(&HeadDescriptor::new().title("Docs"))?;
/// assert!(html.starts_with("<title>Docs</title>"));
/// # Ok::<(), rw_head::HeadError>(())
/// ```
#[derive(Clone, Default)]
pub struct HeadRenderer {
    options: RenderOptions,
    policy: Option<Arc<dyn PriorityPolicy + Send + Sync>>,
}

impl HeadRenderer {
    /// Create a renderer with default options and the default priority table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default priority table for tags without an explicit priority.
    #[must_use]
    pub fn with_priority<P>(mut self, policy: P) -> Self
    where
        P: PriorityPolicy + Send + Sync + 'static,
    {
        self.policy = Some(Arc::new(policy));
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the merged head fragment.
    ///
    /// Tags are separated by a single newline, with no trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`HeadError::MissingTitle`] if no descriptor supplies a
    /// non-empty title, including when there are no descriptors at all.
    pub fn render<'a>(&self, input: impl Into<HeadInput<'a>>) -> Result<String, HeadError> {
        let tags = self.resolve(input)?;
        let html = tags
            .iter()
            .map(|tag| tag.render(self.options.void_style))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(html)
    }

    /// Run the pipeline up to serialization.
    ///
    /// Returns tags in final render order with definite priorities.
    ///
    /// # Errors
    ///
    /// Returns [`HeadError::MissingTitle`] under the same conditions as
    /// [`render`](Self::render).
    pub fn resolve<'a>(
        &self,
        input: impl Into<HeadInput<'a>>,
    ) -> Result<Vec<PrioritizedTag>, HeadError> {
        let descriptors = input.into().descriptors();
        let mut head = merge(descriptors.iter().map(normalize));

        if head.title.is_empty() {
            return Err(HeadError::MissingTitle);
        }

        head.meta = dedupe_meta(std::mem::take(&mut head.meta));
        if head.base.len() > 1 {
            tracing::trace!(dropped = head.base.len() - 1, "Keeping last base tag only");
            head.base.drain(..head.base.len() - 1);
        }

        let tags = self.assemble(head);
        let mut tags = match &self.policy {
            Some(policy) => resolve_priorities(tags, policy.as_ref()),
            None => resolve_priorities(tags, &DefaultPriority),
        };
        // Stable: equal priorities keep assembly order.
        tags.sort_by_key(|tag| tag.priority);

        tracing::debug!(
            descriptors = descriptors.len(),
            tags = tags.len(),
            "Rendered head"
        );
        Ok(tags)
    }

    /// Flatten a merged head into tags in assembly order.
    ///
    /// Order: base, meta, link, style, script, noscript, then the title, the
    /// default charset/viewport metas, and finally one script per
    /// structured-data block.
    fn assemble(&self, head: NormalizedHead) -> Vec<Tag> {
        let NormalizedHead {
            title,
            base,
            meta,
            link,
            style,
            script,
            noscript,
            json_ld,
        } = head;

        let mut tags = Vec::with_capacity(
            base.len()
                + meta.len()
                + link.len()
                + style.len()
                + script.len()
                + noscript.len()
                + json_ld.len()
                + 3,
        );
        for (kind, entries) in [
            (TagKind::Base, base),
            (TagKind::Meta, meta),
            (TagKind::Link, link),
            (TagKind::Style, style),
            (TagKind::Script, script),
            (TagKind::Noscript, noscript),
        ] {
            tags.extend(entries.into_iter().map(|entry| Tag::from_entry(kind, entry)));
        }

        tags.push(Tag::new(TagKind::Title).with_inner_html(title));

        let is_meta = |tag: &&Tag| tag.kind == TagKind::Meta;
        let has_charset = tags
            .iter()
            .filter(is_meta)
            .any(|tag| tag.attrs.is_truthy("charset"));
        let has_viewport = tags
            .iter()
            .filter(is_meta)
            .any(|tag| tag.attrs.is("name", "viewport"));

        if !has_charset {
            tracing::debug!(charset = %self.options.charset, "Injecting default charset");
            tags.push(
                Tag::new(TagKind::Meta)
                    .with_attrs(Attributes::new().with("charset", self.options.charset.as_str())),
            );
        }
        if !has_viewport {
            tracing::debug!(viewport = %self.options.viewport, "Injecting default viewport");
            tags.push(
                Tag::new(TagKind::Meta).with_attrs(
                    Attributes::new()
                        .with("name", "viewport")
                        .with("content", self.options.viewport.as_str()),
                ),
            );
        }

        tags.extend(json_ld.iter().map(|block| {
            Tag::new(TagKind::Script)
                .with_attrs(Attributes::new().with("type", JSON_LD_MIME))
                .with_inner_html(block.encode())
        }));

        tags
    }
}

impl fmt::Debug for HeadRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadRenderer")
            .field("options", &self.options)
            .field("custom_priority", &self.policy.is_some())
            .finish()
    }
}

/// Render a head fragment with default options and priorities.
///
/// # Errors
///
/// Returns [`HeadError::MissingTitle`] if no descriptor supplies a title.
pub fn render_head<'a>(input: impl Into<HeadInput<'a>>) -> Result<String, HeadError> {
    HeadRenderer::new().render(input)
}
