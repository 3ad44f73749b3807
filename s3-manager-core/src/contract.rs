//! # contract: the bucket configuration collaborator
//!
//! This module defines the single trait ([`BucketManager`]) through which the
//! core talks to the storage provider: account lookup, bucket existence and
//! creation, and one "set"/"get" pair per managed aspect.
//!
//! ## Interface
//! - Every `put_*` replaces the whole aspect; nothing is patched incrementally.
//! - Every `get_*` returns `Ok(None)` when the bucket has no such aspect
//!   configured. Only real failures are errors.
//! - Errors are boxed trait objects, passed through untouched; the core
//!   attaches the operation and bucket name (see [`crate::error::ConfigError::Collaborator`]).
//!
//! ## Mocking & Testing
//! The trait is annotated for `mockall`, so tests and downstream crates can use
//! `MockBucketManager` (exported with the `test-export-mocks` feature).

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::document::{
    AnalyticsConfiguration, LifecycleConfiguration, LoggingRules, MetricsConfiguration,
    PolicyDocument, TagSet,
};
use crate::error::BoxError;

/// Canned ACL granting the log delivery group write access.
pub const LOG_DELIVERY_WRITE_ACL: &str = "log-delivery-write";

/// Id under which bucket-wide analytics are stored and retrieved.
pub const ENTIRE_BUCKET_ANALYTICS_ID: &str = "EntireBucketAnalytics";
/// Id under which bucket-wide request metrics are stored and retrieved.
pub const ENTIRE_BUCKET_METRICS_ID: &str = "EntireBucket";

/// Trait for reading and writing bucket configuration on a storage provider.
///
/// Implemented by the AWS client in the CLI crate and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait BucketManager: Send + Sync {
    /// Account id of the calling identity.
    async fn account_id(&self) -> Result<String, BoxError>;

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError>;

    /// Create `bucket` in `region`, optionally with a canned ACL.
    async fn create_bucket(
        &self,
        bucket: &str,
        region: &str,
        acl: Option<String>,
    ) -> Result<(), BoxError>;

    /// Region the bucket lives in.
    async fn bucket_region(&self, bucket: &str) -> Result<String, BoxError>;

    async fn put_bucket_policy(&self, bucket: &str, policy: &PolicyDocument)
        -> Result<(), BoxError>;

    async fn put_bucket_lifecycle(
        &self,
        bucket: &str,
        lifecycle: &LifecycleConfiguration,
    ) -> Result<(), BoxError>;

    async fn put_bucket_logging(&self, bucket: &str, logging: &LoggingRules)
        -> Result<(), BoxError>;

    async fn put_bucket_tagging(&self, bucket: &str, tags: &TagSet) -> Result<(), BoxError>;

    async fn put_bucket_analytics(
        &self,
        bucket: &str,
        analytics: &AnalyticsConfiguration,
    ) -> Result<(), BoxError>;

    async fn put_bucket_metrics(
        &self,
        bucket: &str,
        metrics: &MetricsConfiguration,
    ) -> Result<(), BoxError>;

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<PolicyDocument>, BoxError>;

    async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
    ) -> Result<Option<LifecycleConfiguration>, BoxError>;

    async fn get_bucket_logging(&self, bucket: &str) -> Result<Option<LoggingRules>, BoxError>;

    async fn get_bucket_tagging(&self, bucket: &str) -> Result<Option<TagSet>, BoxError>;

    async fn get_bucket_analytics(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<Option<AnalyticsConfiguration>, BoxError>;

    async fn get_bucket_metrics(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<Option<MetricsConfiguration>, BoxError>;
}
