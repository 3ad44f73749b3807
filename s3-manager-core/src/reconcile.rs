//! Config assembler: combines a bucket override with the standard configuration.
//!
//! Every aspect follows the same rule (the bucket's own value if it declares
//! one, else the standard's), refined per aspect:
//!   - tags are merged key by key, and are resolved first because the policy
//!     merge consults them for exception tags;
//!   - the policy gains every standard statement it lacks (see [`crate::policy`]);
//!   - lifecycle rules always end up aborting stale multipart uploads.
//!
//! All values, whichever side they come from, are rendered through
//! [`Placeholders`] for the bucket being reconciled.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::{
    BucketConfig, LifecycleConfiguration, PolicyDocument, StandardConfig, TagSet, Tagging,
};
use crate::error::ConfigError;
use crate::placeholder::Placeholders;
use crate::policy::merge_statements;
use crate::tags::merge_tag_sets;

/// Produce the effective configuration for `bucket`.
///
/// Aspects are resolved in a fixed order: tags, security policy, lifecycle,
/// logging, analytics, metrics. Reconciling an already effective document
/// against the same standard returns it unchanged.
pub fn reconcile(
    bucket: &BucketConfig,
    standard: &StandardConfig,
    account_id: &str,
) -> Result<BucketConfig, ConfigError> {
    info!(bucket = %bucket.bucket_name, region = %bucket.region, "[RECONCILE] Evaluating bucket against standard configuration");
    let placeholders = Placeholders::for_bucket(&bucket.bucket_name, &bucket.region, account_id);
    let own = &bucket.settings;
    let mut effective = BucketConfig::new(bucket.bucket_name.clone(), bucket.region.clone());

    effective.settings.bucket_tags =
        reconcile_tags(own.bucket_tags.as_ref(), standard.bucket_tags.as_ref(), &placeholders)?;
    let tags = effective
        .settings
        .bucket_tags
        .as_ref()
        .map(|t| t.tag_set.clone())
        .unwrap_or_default();

    effective.settings.bucket_security_policy = reconcile_policy(
        own.bucket_security_policy.as_ref(),
        standard.bucket_security_policy.as_ref(),
        &tags,
        &placeholders,
    )?;

    effective.settings.life_cycle_rules = reconcile_lifecycle(
        own.life_cycle_rules.as_ref(),
        standard.life_cycle_rules.as_ref(),
        &placeholders,
    )?;

    effective.settings.logging_rules = select(
        own.logging_rules.as_ref(),
        standard.logging_rules.as_ref(),
        &placeholders,
    )?;
    effective.settings.bucket_analytics = select(
        own.bucket_analytics.as_ref(),
        standard.bucket_analytics.as_ref(),
        &placeholders,
    )?;
    effective.settings.bucket_metrics = select(
        own.bucket_metrics.as_ref(),
        standard.bucket_metrics.as_ref(),
        &placeholders,
    )?;

    info!(bucket = %effective.bucket_name, "[RECONCILE] Effective configuration assembled");
    debug!(?effective, "[RECONCILE] Effective configuration (full debug)");
    Ok(effective)
}

/// The bucket's value if declared, else the standard's, rendered.
pub fn select<T>(
    own: Option<&T>,
    standard: Option<&T>,
    placeholders: &Placeholders,
) -> Result<Option<T>, ConfigError>
where
    T: Serialize + DeserializeOwned,
{
    own.or(standard)
        .map(|value| placeholders.render(value))
        .transpose()
}

pub fn reconcile_tags(
    own: Option<&Tagging>,
    standard: Option<&Tagging>,
    placeholders: &Placeholders,
) -> Result<Option<Tagging>, ConfigError> {
    if own.is_none() && standard.is_none() {
        return Ok(None);
    }
    let empty = TagSet::default();
    let own_tags = own.map(|t| &t.tag_set).unwrap_or(&empty);
    let standard_tags = standard.map(|t| &t.tag_set).unwrap_or(&empty);
    let merged = merge_tag_sets(own_tags, standard_tags);
    debug!(
        own = own_tags.len(),
        standard = standard_tags.len(),
        merged = merged.len(),
        "[RECONCILE] Merged tag sets"
    );
    Ok(Some(placeholders.render(&Tagging { tag_set: merged })?))
}

/// The bucket's policy plus the standard statements it lacks. `None` when
/// nothing is left: S3 rejects a policy without statements.
pub fn reconcile_policy(
    own: Option<&PolicyDocument>,
    standard: Option<&PolicyDocument>,
    tags: &TagSet,
    placeholders: &Placeholders,
) -> Result<Option<PolicyDocument>, ConfigError> {
    let mut policy = match own {
        Some(policy) => placeholders.render(policy)?,
        None => PolicyDocument::empty(),
    };
    let standard_statements = standard.map(|p| p.statement.as_slice()).unwrap_or(&[]);
    let appended = merge_statements(&mut policy.statement, standard_statements, tags, placeholders)?;
    debug!(appended, total = policy.statement.len(), "[RECONCILE] Merged policy statements");

    if policy.statement.is_empty() {
        info!("[RECONCILE] No policy statements, omitting bucket-security-policy");
        return Ok(None);
    }
    Ok(Some(policy))
}

/// Select the lifecycle rules, then make sure the first rule aborts
/// incomplete multipart uploads, taking the setting from the standard's
/// first rule when it is missing.
pub fn reconcile_lifecycle(
    own: Option<&LifecycleConfiguration>,
    standard: Option<&LifecycleConfiguration>,
    placeholders: &Placeholders,
) -> Result<Option<LifecycleConfiguration>, ConfigError> {
    let Some(mut lifecycle) = select(own, standard, placeholders)? else {
        return Ok(None);
    };

    let standard_abort = standard
        .and_then(|s| s.rules.first())
        .and_then(|rule| rule.abort_incomplete_multipart_upload.as_ref());

    if let (Some(first), Some(abort)) = (lifecycle.rules.first_mut(), standard_abort) {
        if first.abort_incomplete_multipart_upload.is_none() {
            info!(
                days_after_initiation = abort.days_after_initiation,
                "[RECONCILE] Injecting AbortIncompleteMultipartUpload into first lifecycle rule"
            );
            first.abort_incomplete_multipart_upload = Some(placeholders.render(abort)?);
        }
    }

    Ok(Some(lifecycle))
}
