//! Meta tag deduplication.
//!
//! A meta entry's identity is the first truthy value among `property`,
//! `name` and `http-equiv`. Entries sharing an identity are duplicates unless
//! their `media` differs, which lets responsive variants such as
//! `theme-color` for light and dark schemes coexist.

use std::collections::HashMap;

use crate::descriptor::HeadEntry;

const IDENTITY_KEYS: [&str; 3] = ["property", "name", "http-equiv"];
const VARIANT_KEY: &str = "media";

/// A run of entries sharing one identity key, one slot per media variant.
struct MetaGroup {
    variants: Vec<(String, HeadEntry)>,
}

impl MetaGroup {
    /// Store `entry` under `media`, replacing an earlier entry in place.
    fn put(&mut self, media: String, entry: HeadEntry) -> bool {
        if let Some((_, slot)) = self.variants.iter_mut().find(|(m, _)| *m == media) {
            *slot = entry;
            return true;
        }
        self.variants.push((media, entry));
        false
    }
}

/// Identity key of a meta entry, if it has one.
#[must_use]
pub fn identity_key(entry: &HeadEntry) -> Option<String> {
    entry
        .attrs
        .first_truthy(&IDENTITY_KEYS)
        .map(std::borrow::Cow::into_owned)
}

/// Collapse duplicate meta entries.
///
/// Keyless entries come first, in their original order. Keyed entries follow,
/// grouped by identity in order of each group's first occurrence; within a
/// group the last entry per media variant wins and variants keep the order
/// their media key first appeared in.
#[must_use]
pub fn dedupe_meta(entries: Vec<HeadEntry>) -> Vec<HeadEntry> {
    let total = entries.len();
    let mut keyless = Vec::new();
    let mut groups: Vec<MetaGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let Some(key) = identity_key(&entry) else {
            keyless.push(entry);
            continue;
        };
        let media = entry
            .attrs
            .first_truthy(&[VARIANT_KEY])
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_default();

        let index = *group_index.entry(key.clone()).or_insert_with(|| {
            groups.push(MetaGroup {
                variants: Vec::new(),
            });
            groups.len() - 1
        });
        if groups[index].put(media.clone(), entry) {
            tracing::trace!(key = %key, media = %media, "Replaced duplicate meta tag");
        }
    }

    let mut result = keyless;
    result.extend(
        groups
            .into_iter()
            .flat_map(|group| group.variants.into_iter().map(|(_, entry)| entry)),
    );

    if result.len() < total {
        tracing::debug!(
            before = total,
            after = result.len(),
            "Deduplicated meta tags"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> HeadEntry {
        pairs
            .iter()
            .fold(HeadEntry::new(), |entry, (k, v)| entry.attr(*k, *v))
    }

    fn contents(entries: &[HeadEntry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e.attrs.get("content").and_then(|v| v.as_str()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_last_duplicate_wins() {
        let result = dedupe_meta(vec![
            meta(&[("name", "description"), ("content", "first")]),
            meta(&[("name", "description"), ("content", "second")]),
        ]);
        assert_eq!(contents(&result), vec!["second"]);
    }

    #[test]
    fn test_identity_precedence() {
        let entry = meta(&[("name", "twitter:title"), ("property", "og:title")]);
        assert_eq!(identity_key(&entry).as_deref(), Some("og:title"));

        let entry = meta(&[("http-equiv", "refresh")]);
        assert_eq!(identity_key(&entry).as_deref(), Some("refresh"));

        let entry = meta(&[("property", ""), ("name", "author")]);
        assert_eq!(identity_key(&entry).as_deref(), Some("author"));

        assert_eq!(identity_key(&meta(&[("charset", "UTF-8")])), None);
    }

    #[test]
    fn test_property_and_name_do_not_collide_across_keys() {
        let result = dedupe_meta(vec![
            meta(&[("property", "og:title"), ("content", "a")]),
            meta(&[("name", "og:title"), ("content", "b")]),
        ]);
        // Same identity value, regardless of which attribute carried it.
        assert_eq!(contents(&result), vec!["b"]);
    }

    #[test]
    fn test_keyless_first_and_never_deduplicated() {
        let result = dedupe_meta(vec![
            meta(&[("name", "description"), ("content", "d")]),
            meta(&[("charset", "UTF-8"), ("content", "k1")]),
            meta(&[("content", "k2")]),
            meta(&[("content", "k2")]),
        ]);
        assert_eq!(contents(&result), vec!["k1", "k2", "k2", "d"]);
    }

    #[test]
    fn test_group_order_follows_first_occurrence() {
        let result = dedupe_meta(vec![
            meta(&[("name", "a"), ("content", "a1")]),
            meta(&[("name", "b"), ("content", "b1")]),
            meta(&[("name", "a"), ("content", "a2")]),
        ]);
        assert_eq!(contents(&result), vec!["a2", "b1"]);
    }

    #[test]
    fn test_media_variants_coexist() {
        let result = dedupe_meta(vec![
            meta(&[
                ("name", "theme-color"),
                ("media", "(prefers-color-scheme: light)"),
                ("content", "white"),
            ]),
            meta(&[
                ("name", "theme-color"),
                ("media", "(prefers-color-scheme: dark)"),
                ("content", "black"),
            ]),
            meta(&[
                ("name", "theme-color"),
                ("media", "(prefers-color-scheme: light)"),
                ("content", "ivory"),
            ]),
            meta(&[("name", "theme-color"), ("content", "grey")]),
        ]);
        assert_eq!(contents(&result), vec!["ivory", "black", "grey"]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let first = dedupe_meta(vec![
            meta(&[("content", "keyless")]),
            meta(&[("name", "description"), ("content", "one")]),
            meta(&[("property", "og:image"), ("content", "a.png")]),
            meta(&[("name", "description"), ("content", "two")]),
            meta(&[("name", "theme-color"), ("media", "print"), ("content", "x")]),
            meta(&[("name", "theme-color"), ("content", "y")]),
        ]);
        let second = dedupe_meta(first.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_numeric_identity_is_stringified() {
        let entry = HeadEntry::new().attr("name", 42).attr("content", "n");
        assert_eq!(identity_key(&entry).as_deref(), Some("42"));
    }
}
