//! Bucket operations: create, update, logging bucket setup, and config retrieval.
//!
//! These drive a [`BucketManager`] with an effective configuration. Calls are
//! issued one at a time in a fixed order, and the first failure stops the
//! operation: aspects applied before it stay applied.
//!
//! # Major Types
//! - [`ApplyOptions`]: standard configs to reconcile against before applying
//! - [`ApplyReport`]: which aspects were set, plus the document that was applied
//!
//! # Entrypoints
//! - [`create_bucket`], [`update_bucket`], [`create_logging_bucket`], [`retrieve_config`]

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::contract::{
    BucketManager, ENTIRE_BUCKET_ANALYTICS_ID, ENTIRE_BUCKET_METRICS_ID, LOG_DELIVERY_WRITE_ACL,
};
use crate::document::{
    AbortIncompleteMultipartUpload, BucketConfig, LifecycleConfiguration, LifecycleExpiration,
    LifecycleRule, RuleStatus, StandardConfig, Tagging, Transition,
};
use crate::error::ConfigError;
use crate::placeholder::logging_bucket_name;
use crate::reconcile::reconcile;

/// Region S3 reports as "no location constraint".
pub const DEFAULT_REGION: &str = "us-east-1";

/// One managed aspect of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Policy,
    Lifecycle,
    Logging,
    Tags,
    Analytics,
    Metrics,
}

impl Aspect {
    /// The document key this aspect is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Policy => "bucket-security-policy",
            Aspect::Lifecycle => "life-cycle-rules",
            Aspect::Logging => "logging-rules",
            Aspect::Tags => "bucket-tags",
            Aspect::Analytics => "bucket-analytics",
            Aspect::Metrics => "bucket-metrics",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard configurations to reconcile against before applying.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions<'a> {
    /// Standard for the bucket itself. `None` applies the document as given.
    pub standard: Option<&'a StandardConfig>,
    /// Standard for a logging bucket created along the way.
    pub standard_log: Option<&'a StandardConfig>,
}

#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub bucket: String,
    /// Whether this operation created the bucket.
    pub created: bool,
    /// Aspects set on the bucket, in the order they were applied.
    pub applied: Vec<Aspect>,
    /// The document that was applied, after reconciliation.
    pub effective: BucketConfig,
}

#[derive(Debug, Clone)]
pub enum CreateOutcome {
    AlreadyExists,
    Created(ApplyReport),
}

/// Create the bucket described by `params` and apply its configuration.
///
/// An existing bucket is left untouched.
pub async fn create_bucket<M>(
    manager: &M,
    params: &BucketConfig,
    options: ApplyOptions<'_>,
) -> Result<CreateOutcome, ConfigError>
where
    M: BucketManager + ?Sized,
{
    let bucket = params.bucket_name.as_str();
    if bucket_exists(manager, bucket).await? {
        warn!(bucket, "[CREATE] Bucket already exists, nothing to do");
        return Ok(CreateOutcome::AlreadyExists);
    }

    info!(bucket, region = %params.region, "[CREATE] Creating bucket");
    manager
        .create_bucket(bucket, &params.region, None)
        .await
        .map_err(|e| ConfigError::collaborator("create_bucket", bucket, e))?;

    let mut report = update_bucket(manager, params, options).await?;
    report.created = true;
    Ok(CreateOutcome::Created(report))
}

/// Apply the configuration in `params` to an existing bucket, after
/// reconciling it against `options.standard` when given.
///
/// Only aspects present in the effective document are set. A document with
/// logging rules first makes sure the region's logging bucket exists.
pub async fn update_bucket<M>(
    manager: &M,
    params: &BucketConfig,
    options: ApplyOptions<'_>,
) -> Result<ApplyReport, ConfigError>
where
    M: BucketManager + ?Sized,
{
    let bucket = params.bucket_name.as_str();
    if !bucket_exists(manager, bucket).await? {
        error!(bucket, "[UPDATE] Bucket does not exist");
        return Err(ConfigError::BucketNotFound(bucket.to_string()));
    }
    info!(bucket, "[UPDATE] Updating bucket");

    let effective = match options.standard {
        Some(standard) => {
            let account = account_id(manager, bucket).await?;
            reconcile(params, standard, &account)?
        }
        None => params.clone(),
    };

    if effective.settings.logging_rules.is_some() {
        ensure_logging_bucket(manager, &effective.region, options.standard_log).await?;
    }

    let applied = apply_settings(manager, &effective).await?;
    info!(bucket, applied = applied.len(), "[UPDATE] Bucket updated");
    Ok(ApplyReport {
        bucket: bucket.to_string(),
        created: false,
        applied,
        effective,
    })
}

/// Create (if missing) and configure the logging bucket for `region`.
///
/// Without a standard log config the bucket gets [`default_logging_lifecycle`];
/// with one, the standard is reconciled for the logging bucket and applied.
pub async fn create_logging_bucket<M>(
    manager: &M,
    region: &str,
    standard_log: Option<&StandardConfig>,
) -> Result<ApplyReport, ConfigError>
where
    M: BucketManager + ?Sized,
{
    let account = account_id(manager, region).await?;
    let bucket = logging_bucket_name(&account, region);

    let created = if bucket_exists(manager, &bucket).await? {
        warn!(bucket = %bucket, "[LOGGING] Logging bucket already exists");
        false
    } else {
        info!(bucket = %bucket, region, "[LOGGING] Creating logging bucket");
        manager
            .create_bucket(&bucket, region, Some(LOG_DELIVERY_WRITE_ACL.to_string()))
            .await
            .map_err(|e| ConfigError::collaborator("create_bucket", &bucket, e))?;
        true
    };

    let params = BucketConfig::new(bucket.clone(), region);
    let effective = match standard_log {
        Some(standard) => reconcile(&params, standard, &account)?,
        None => {
            let mut config = params;
            config.settings.life_cycle_rules = Some(default_logging_lifecycle(&bucket));
            config
        }
    };

    let applied = apply_settings(manager, &effective).await?;
    Ok(ApplyReport {
        bucket,
        created,
        applied,
        effective,
    })
}

/// Build a configuration document from the live state of `bucket`.
/// Aspects the bucket does not have are left out.
pub async fn retrieve_config<M>(manager: &M, bucket: &str) -> Result<BucketConfig, ConfigError>
where
    M: BucketManager + ?Sized,
{
    info!(bucket, "[RETRIEVE] Pulling config for bucket");
    let region = manager
        .bucket_region(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_location", bucket, e))?;
    let region = if region.is_empty() {
        DEFAULT_REGION.to_string()
    } else {
        region
    };
    let mut config = BucketConfig::new(bucket, region);
    let settings = &mut config.settings;

    settings.life_cycle_rules = manager
        .get_bucket_lifecycle(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_lifecycle", bucket, e))?;
    if settings.life_cycle_rules.is_none() {
        info!(bucket, "[RETRIEVE] No lifecycle attached");
    }

    settings.bucket_security_policy = manager
        .get_bucket_policy(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_policy", bucket, e))?;
    if settings.bucket_security_policy.is_none() {
        info!(bucket, "[RETRIEVE] No bucket policy attached");
    }

    settings.logging_rules = manager
        .get_bucket_logging(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_logging", bucket, e))?
        .filter(|rules| rules.logging_enabled.is_some());
    if settings.logging_rules.is_none() {
        info!(bucket, "[RETRIEVE] No logging policy attached");
    }

    settings.bucket_tags = manager
        .get_bucket_tagging(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_tagging", bucket, e))?
        .map(|tag_set| Tagging { tag_set });
    if settings.bucket_tags.is_none() {
        info!(bucket, "[RETRIEVE] No tags attached");
    }

    settings.bucket_analytics = manager
        .get_bucket_analytics(bucket, ENTIRE_BUCKET_ANALYTICS_ID)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_analytics", bucket, e))?;
    if settings.bucket_analytics.is_none() {
        info!(bucket, "[RETRIEVE] No analytics config attached");
    }

    settings.bucket_metrics = manager
        .get_bucket_metrics(bucket, ENTIRE_BUCKET_METRICS_ID)
        .await
        .map_err(|e| ConfigError::collaborator("get_bucket_metrics", bucket, e))?;
    if settings.bucket_metrics.is_none() {
        info!(bucket, "[RETRIEVE] No metrics config attached");
    }

    debug!(?config, "[RETRIEVE] Retrieved config (full debug)");
    Ok(config)
}

/// Lifecycle for a logging bucket when no standard log config is supplied:
/// abort uploads after 7 days, archive, and expire after 400 days.
pub fn default_logging_lifecycle(bucket: &str) -> LifecycleConfiguration {
    LifecycleConfiguration {
        rules: vec![LifecycleRule {
            id: Some(bucket.to_string()),
            prefix: Some(String::new()),
            filter: None,
            status: RuleStatus::Enabled,
            expiration: Some(LifecycleExpiration {
                days: Some(400),
                ..Default::default()
            }),
            transitions: vec![
                Transition {
                    days: Some(90),
                    date: None,
                    storage_class: "GLACIER".to_string(),
                },
                Transition {
                    days: Some(30),
                    date: None,
                    storage_class: "STANDARD_IA".to_string(),
                },
            ],
            noncurrent_version_transitions: Vec::new(),
            noncurrent_version_expiration: None,
            abort_incomplete_multipart_upload: Some(AbortIncompleteMultipartUpload {
                days_after_initiation: 7,
            }),
        }],
    }
}

async fn ensure_logging_bucket<M>(
    manager: &M,
    region: &str,
    standard_log: Option<&StandardConfig>,
) -> Result<(), ConfigError>
where
    M: BucketManager + ?Sized,
{
    let account = account_id(manager, region).await?;
    let bucket = logging_bucket_name(&account, region);
    if bucket_exists(manager, &bucket).await? {
        debug!(bucket = %bucket, "[LOGGING] Logging bucket present");
        return Ok(());
    }
    create_logging_bucket(manager, region, standard_log).await?;
    Ok(())
}

/// Set every aspect present in `config`, in a fixed order.
async fn apply_settings<M>(manager: &M, config: &BucketConfig) -> Result<Vec<Aspect>, ConfigError>
where
    M: BucketManager + ?Sized,
{
    let bucket = config.bucket_name.as_str();
    let settings = &config.settings;
    let mut applied = Vec::new();

    if let Some(policy) = &settings.bucket_security_policy {
        info!(bucket, statements = policy.statement.len(), "[APPLY] Setting bucket policy");
        manager
            .put_bucket_policy(bucket, policy)
            .await
            .map_err(|e| ConfigError::collaborator("put_bucket_policy", bucket, e))?;
        applied.push(Aspect::Policy);
    }

    if let Some(lifecycle) = &settings.life_cycle_rules {
        info!(bucket, rules = lifecycle.rules.len(), "[APPLY] Setting lifecycle rules");
        manager
            .put_bucket_lifecycle(bucket, lifecycle)
            .await
            .map_err(|e| ConfigError::collaborator("put_bucket_lifecycle", bucket, e))?;
        applied.push(Aspect::Lifecycle);
    }

    if let Some(logging) = &settings.logging_rules {
        info!(bucket, "[APPLY] Setting logging rules");
        manager
            .put_bucket_logging(bucket, logging)
            .await
            .map_err(|e| ConfigError::collaborator("put_bucket_logging", bucket, e))?;
        applied.push(Aspect::Logging);
    }

    if let Some(tagging) = &settings.bucket_tags {
        let tags = tagging.tag_set.without_empty_values();
        if tags.is_empty() {
            warn!(bucket, "[APPLY] All tags have empty values, skipping tagging");
        } else {
            info!(bucket, tags = tags.len(), "[APPLY] Setting bucket tags");
            manager
                .put_bucket_tagging(bucket, &tags)
                .await
                .map_err(|e| ConfigError::collaborator("put_bucket_tagging", bucket, e))?;
            applied.push(Aspect::Tags);
        }
    }

    if let Some(analytics) = &settings.bucket_analytics {
        info!(bucket, id = %analytics.id, "[APPLY] Setting analytics configuration");
        manager
            .put_bucket_analytics(bucket, analytics)
            .await
            .map_err(|e| ConfigError::collaborator("put_bucket_analytics", bucket, e))?;
        applied.push(Aspect::Analytics);
    }

    if let Some(metrics) = &settings.bucket_metrics {
        info!(bucket, id = %metrics.id, "[APPLY] Setting metrics configuration");
        manager
            .put_bucket_metrics(bucket, metrics)
            .await
            .map_err(|e| ConfigError::collaborator("put_bucket_metrics", bucket, e))?;
        applied.push(Aspect::Metrics);
    }

    Ok(applied)
}

async fn bucket_exists<M>(manager: &M, bucket: &str) -> Result<bool, ConfigError>
where
    M: BucketManager + ?Sized,
{
    manager
        .bucket_exists(bucket)
        .await
        .map_err(|e| ConfigError::collaborator("bucket_exists", bucket, e))
}

// The account lookup is not bucket-scoped; `context` names what it was needed for.
async fn account_id<M>(manager: &M, context: &str) -> Result<String, ConfigError>
where
    M: BucketManager + ?Sized,
{
    manager
        .account_id()
        .await
        .map_err(|e| ConfigError::collaborator("get_account_identity", context, e))
}
