//! Deterministic HTML head composition.
//!
//! Layouts, pages and components each describe the head content they need
//! as a [`HeadDescriptor`]. [`HeadRenderer`] merges those descriptors into a
//! single `<head>` fragment that is deduplicated, ordered by priority, and
//! safe to embed verbatim.
//!
//! # Pipeline
//!
//! 1. Normalize each descriptor ([`normalize`])
//! 2. Merge in order: last title wins, collections concatenate ([`merge`])
//! 3. Deduplicate meta tags by identity and media variant ([`dedupe_meta`])
//! 4. Assemble tags, inject default charset/viewport and JSON-LD scripts
//! 5. Resolve priorities ([`PriorityPolicy`], [`DefaultPriority`])
//! 6. Stable sort and serialize, one tag per line
//!
//! # Example
//!
//! ```
//! use rw_head::{HeadDescriptor, HeadEntry, JsonLdBlock, render_head};
//!
//! let head = HeadDescriptor::new()
//!     .title("My Page")
//!     .meta(HeadEntry::new().attr("name", "description").attr("content", "My page description"))
//!     .link(HeadEntry::new().attr("rel", "stylesheet").attr("href", "/styles.css"))
//!     .script(HeadEntry::new().attr("src", "/script.js"))
//!     .json_ld(JsonLdBlock::new("WebPage").with("name", "My Page"));
//!
//! let html = render_head(&head)?;
//! assert_eq!(html.lines().next(), Some(r#"<meta charset="UTF-8">"#));
//! assert_eq!(html.lines().nth(2), Some("<title>My Page</title>"));
//! # Ok::<(), rw_head::HeadError>(())
//! ```

mod attrs;
mod descriptor;
mod error;
mod escape;
mod json_ld;
mod merge;
mod meta;
mod normalize;
mod priority;
mod renderer;
mod tag;

pub use attrs::{AttrValue, Attributes, render_attributes};
pub use descriptor::{
    HeadDescriptor, HeadEntry, OneOrMany, parse_descriptors_json, parse_descriptors_yaml,
};
pub use error::HeadError;
pub use escape::{escape_attr, escape_script_close};
pub use json_ld::{JSON_LD_MIME, JsonLdBlock, SCHEMA_CONTEXT};
pub use merge::merge;
pub use meta::{dedupe_meta, identity_key};
pub use normalize::{NormalizedHead, normalize};
pub use priority::{DefaultPriority, PriorityPolicy, resolve_priorities};
pub use renderer::{
    DEFAULT_CHARSET, DEFAULT_VIEWPORT, HeadInput, HeadRenderer, RenderOptions, render_head,
};
pub use tag::{PrioritizedTag, Tag, TagKind, VoidStyle, render_tag};
