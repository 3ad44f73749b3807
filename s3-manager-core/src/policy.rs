//! Policy merge engine.
//!
//! Appends the standard statements a bucket policy is missing. A statement is
//! identified by its `Sid`; the bucket's own statement always wins over a
//! standard one with the same `Sid`, and exception tags suppress the two
//! enforced security statements.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::document::{Statement, TagSet};
use crate::error::ConfigError;
use crate::placeholder::Placeholders;
use crate::tags::{is_tag_present, EXCEPTION_ENCRYPTION, EXCEPTION_HTTPS};

pub const REQUIRED_SECURE_TRANSPORT: &str = "RequiredSecureTransport";
pub const REQUIRED_ENCRYPTED_PUT_OBJECT: &str = "RequiredEncryptedPutObject";

/// The exception tag that suppresses the standard statement `sid`, if any.
pub fn exception_tag_for(sid: &str) -> Option<&'static str> {
    match sid {
        REQUIRED_SECURE_TRANSPORT => Some(EXCEPTION_HTTPS),
        REQUIRED_ENCRYPTED_PUT_OBJECT => Some(EXCEPTION_ENCRYPTION),
        _ => None,
    }
}

/// Merge `standard` statements into `effective`.
///
/// Statements of `effective` without a `Sid` are kept as they are; every
/// standard statement must carry one. Appended statements are rendered with
/// `placeholders`. Returns the number of statements appended.
pub fn merge_statements(
    effective: &mut Vec<Statement>,
    standard: &[Statement],
    tags: &TagSet,
    placeholders: &Placeholders,
) -> Result<usize, ConfigError> {
    let mut present = HashSet::new();
    for sid in effective.iter().filter_map(|s| s.sid.as_deref()) {
        if !present.insert(sid.to_string()) {
            return Err(ConfigError::MergeInput(format!(
                "bucket policy declares Sid {sid:?} more than once"
            )));
        }
    }

    let mut appended = 0;
    for (index, statement) in standard.iter().enumerate() {
        let sid = statement.sid.as_deref().ok_or_else(|| {
            ConfigError::MergeInput(format!("standard policy statement #{index} has no Sid"))
        })?;

        if present.contains(sid) {
            debug!(sid, "[POLICY] Bucket declares statement, keeping bucket version");
            continue;
        }
        if let Some(exception) = exception_tag_for(sid) {
            if is_tag_present(exception, tags) {
                info!(sid, exception, "[POLICY] Exception tag present, skipping statement");
                continue;
            }
        }

        effective.push(placeholders.render(statement)?);
        present.insert(sid.to_string());
        appended += 1;
    }

    Ok(appended)
}
