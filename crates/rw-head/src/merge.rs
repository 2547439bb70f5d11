//! Folding normalized descriptors into one state.
//!
//! # Merge Rules
//!
//! - `title`: last non-empty value wins; empty titles never overwrite
//! - `base`, `meta`, `link`, `style`, `script`, `noscript`, `json_ld`:
//!   concatenated in descriptor order, then item order

use crate::normalize::NormalizedHead;

/// Merge descriptors in order.
///
/// An empty input yields an all-empty state, whose empty title is rejected
/// later in the pipeline.
#[must_use]
pub fn merge<I>(heads: I) -> NormalizedHead
where
    I: IntoIterator<Item = NormalizedHead>,
{
    heads
        .into_iter()
        .fold(NormalizedHead::default(), |mut merged, head| {
            if !head.title.is_empty() {
                merged.title = head.title;
            }
            merged.base.extend(head.base);
            merged.meta.extend(head.meta);
            merged.link.extend(head.link);
            merged.style.extend(head.style);
            merged.script.extend(head.script);
            merged.noscript.extend(head.noscript);
            merged.json_ld.extend(head.json_ld);
            merged
        })
}
