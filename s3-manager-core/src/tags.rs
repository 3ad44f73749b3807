//! Tag set utilities: membership, merging, and command-line tag parsing.

use std::collections::HashSet;

use crate::document::{Tag, TagSet};
use crate::error::ConfigError;

/// Opts a bucket out of the `RequiredSecureTransport` statement.
pub const EXCEPTION_HTTPS: &str = "exception-https";
/// Opts a bucket out of the `RequiredEncryptedPutObject` statement.
pub const EXCEPTION_ENCRYPTION: &str = "exception-encryption";

/// Whether `tagset` has a tag matching `query`.
///
/// `query` is either `key` (any value matches) or `key:value` (exact value).
pub fn is_tag_present(query: &str, tagset: &TagSet) -> bool {
    match query.split_once(':') {
        Some((key, value)) => tagset
            .iter()
            .any(|tag| tag.key == key && tag.value == value),
        None => tagset.contains_key(query),
    }
}

/// Override tags first, then every base tag whose key the override lacks.
///
/// When a set repeats a key, its first occurrence wins, so the result never
/// holds two tags with the same key.
pub fn merge_tag_sets(overrides: &TagSet, base: &TagSet) -> TagSet {
    let mut seen = HashSet::new();
    let merged = overrides
        .iter()
        .chain(base.iter())
        .filter(|tag| seen.insert(tag.key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    TagSet(merged)
}

/// Apply explicitly given tags to `tagset`: matching keys get the new value
/// in place, unknown keys are appended in the given order.
pub fn upsert_tags(tagset: &mut TagSet, tags: &[Tag]) {
    for tag in tags {
        match tagset.0.iter_mut().find(|existing| existing.key == tag.key) {
            Some(existing) => existing.value = tag.value.clone(),
            None => tagset.0.push(tag.clone()),
        }
    }
}

/// Parse a `key:value` command-line tag. Only the first `:` separates, so
/// values may contain colons.
pub fn parse_tag_arg(arg: &str) -> Result<Tag, ConfigError> {
    match arg.split_once(':') {
        Some((key, value)) if !key.is_empty() => Ok(Tag::new(key, value)),
        _ => Err(ConfigError::InvalidTag(arg.to_string())),
    }
}
