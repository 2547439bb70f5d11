//! Descriptor normalization.

use crate::descriptor::{HeadDescriptor, HeadEntry};
use crate::json_ld::JsonLdBlock;

/// A descriptor with every field populated.
///
/// Collections are empty rather than absent and the title is a definite
/// (possibly empty) string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedHead {
    pub title: String,
    pub base: Vec<HeadEntry>,
    pub meta: Vec<HeadEntry>,
    pub link: Vec<HeadEntry>,
    pub style: Vec<HeadEntry>,
    pub script: Vec<HeadEntry>,
    pub noscript: Vec<HeadEntry>,
    pub json_ld: Vec<JsonLdBlock>,
}

/// Normalize one descriptor into an independently owned state.
///
/// The caller's descriptor is cloned, never moved or mutated.
#[must_use]
pub fn normalize(descriptor: &HeadDescriptor) -> NormalizedHead {
    NormalizedHead {
        title: descriptor.title.clone().unwrap_or_default(),
        base: descriptor.base.clone().unwrap_or_default(),
        meta: descriptor.meta.clone().unwrap_or_default(),
        link: descriptor.link.clone().unwrap_or_default(),
        style: descriptor.style.clone().unwrap_or_default(),
        script: descriptor.script.clone().unwrap_or_default(),
        noscript: descriptor.noscript.clone().unwrap_or_default(),
        json_ld: descriptor
            .json_ld
            .as_ref()
            .map(|blocks| blocks.to_vec())
            .unwrap_or_default(),
    }
}
