//! # AWS bucket manager
//!
//! [`AwsBucketManager`] implements the core [`BucketManager`] contract on top of
//! `aws-sdk-s3` (bucket calls) and `aws-sdk-sts` (account lookup).
//!
//! - Build it once per invocation with [`AwsBucketManager::from_profile`]; the profile and
//!   region fall back to the default AWS provider chain when not given.
//! - `get_*` calls map the "not configured" error codes S3 returns to `Ok(None)`.
//!   Every other SDK error is boxed and passed up unchanged.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ObjectOwnership,
};
use s3_manager_core::bucket::DEFAULT_REGION;
use s3_manager_core::contract::BucketManager;
use s3_manager_core::document::{
    AnalyticsConfiguration, LifecycleConfiguration, LoggingRules, MetricsConfiguration,
    PolicyDocument, TagSet,
};
use s3_manager_core::error::BoxError;
use tracing::{debug, info};

use crate::convert;

const NO_SUCH_BUCKET_POLICY: &str = "NoSuchBucketPolicy";
const NO_SUCH_LIFECYCLE_CONFIGURATION: &str = "NoSuchLifecycleConfiguration";
const NO_SUCH_TAG_SET: &str = "NoSuchTagSet";
const NO_SUCH_CONFIGURATION: &str = "NoSuchConfiguration";

pub struct AwsBucketManager {
    s3: aws_sdk_s3::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsBucketManager {
    pub async fn from_profile(profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let config = loader.load().await;
        info!(
            profile = profile.unwrap_or("default"),
            region = ?config.region(),
            "Initialized AWS clients"
        );
        Self::new(
            aws_sdk_s3::Client::new(&config),
            aws_sdk_sts::Client::new(&config),
        )
    }

    pub fn new(s3: aws_sdk_s3::Client, sts: aws_sdk_sts::Client) -> Self {
        Self { s3, sts }
    }
}

/// `Ok(None)` when the call failed only because the aspect is not configured.
fn missing_as_none<T, E, R>(
    result: Result<T, SdkError<E, R>>,
    missing_code: &str,
) -> Result<Option<T>, BoxError>
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match result {
        Ok(output) => Ok(Some(output)),
        Err(err) if err.code() == Some(missing_code) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl BucketManager for AwsBucketManager {
    async fn account_id(&self) -> Result<String, BoxError> {
        let identity = self.sts.get_caller_identity().send().await?;
        match identity.account() {
            Some(account) => Ok(account.to_string()),
            None => Err("caller identity has no account id".into()),
        }
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError> {
        match self.s3.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().map(|e| e.is_not_found()) == Some(true) => {
                debug!(bucket, "head_bucket returned NotFound");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        region: &str,
        acl: Option<String>,
    ) -> Result<(), BoxError> {
        // us-east-1 rejects an explicit location constraint.
        let location = (region != DEFAULT_REGION).then(|| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build()
        });
        // New buckets enforce bucket-owner ownership, which disables ACLs.
        let ownership = acl.as_ref().map(|_| ObjectOwnership::ObjectWriter);

        self.s3
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(location)
            .set_acl(acl.as_deref().map(BucketCannedAcl::from))
            .set_object_ownership(ownership)
            .send()
            .await?;
        info!(bucket, region, "Bucket created");
        Ok(())
    }

    async fn bucket_region(&self, bucket: &str) -> Result<String, BoxError> {
        let location = self.s3.get_bucket_location().bucket(bucket).send().await?;
        Ok(location
            .location_constraint()
            .map(|c| c.as_str().to_string())
            .unwrap_or_default())
    }

    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &PolicyDocument,
    ) -> Result<(), BoxError> {
        let policy = serde_json::to_string(policy)?;
        self.s3
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await?;
        Ok(())
    }

    async fn put_bucket_lifecycle(
        &self,
        bucket: &str,
        lifecycle: &LifecycleConfiguration,
    ) -> Result<(), BoxError> {
        self.s3
            .put_bucket_lifecycle_configuration()
            .bucket(bucket)
            .lifecycle_configuration(convert::to_sdk_lifecycle(lifecycle)?)
            .send()
            .await?;
        Ok(())
    }

    async fn put_bucket_logging(
        &self,
        bucket: &str,
        logging: &LoggingRules,
    ) -> Result<(), BoxError> {
        self.s3
            .put_bucket_logging()
            .bucket(bucket)
            .bucket_logging_status(convert::to_sdk_logging(logging)?)
            .send()
            .await?;
        Ok(())
    }

    async fn put_bucket_tagging(&self, bucket: &str, tags: &TagSet) -> Result<(), BoxError> {
        self.s3
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(convert::to_sdk_tagging(tags)?)
            .send()
            .await?;
        Ok(())
    }

    async fn put_bucket_analytics(
        &self,
        bucket: &str,
        analytics: &AnalyticsConfiguration,
    ) -> Result<(), BoxError> {
        self.s3
            .put_bucket_analytics_configuration()
            .bucket(bucket)
            .id(&analytics.id)
            .analytics_configuration(convert::to_sdk_analytics(analytics)?)
            .send()
            .await?;
        Ok(())
    }

    async fn put_bucket_metrics(
        &self,
        bucket: &str,
        metrics: &MetricsConfiguration,
    ) -> Result<(), BoxError> {
        self.s3
            .put_bucket_metrics_configuration()
            .bucket(bucket)
            .id(&metrics.id)
            .metrics_configuration(convert::to_sdk_metrics(metrics)?)
            .send()
            .await?;
        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<PolicyDocument>, BoxError> {
        let result = self.s3.get_bucket_policy().bucket(bucket).send().await;
        let Some(output) = missing_as_none(result, NO_SUCH_BUCKET_POLICY)? else {
            return Ok(None);
        };
        match output.policy() {
            Some(policy) => Ok(Some(serde_json::from_str(policy)?)),
            None => Ok(None),
        }
    }

    async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
    ) -> Result<Option<LifecycleConfiguration>, BoxError> {
        let result = self
            .s3
            .get_bucket_lifecycle_configuration()
            .bucket(bucket)
            .send()
            .await;
        match missing_as_none(result, NO_SUCH_LIFECYCLE_CONFIGURATION)? {
            Some(output) => Ok(Some(convert::from_sdk_lifecycle(output.rules())?)),
            None => Ok(None),
        }
    }

    async fn get_bucket_logging(&self, bucket: &str) -> Result<Option<LoggingRules>, BoxError> {
        let output = self.s3.get_bucket_logging().bucket(bucket).send().await?;
        Ok(Some(convert::from_sdk_logging(output.logging_enabled())))
    }

    async fn get_bucket_tagging(&self, bucket: &str) -> Result<Option<TagSet>, BoxError> {
        let result = self.s3.get_bucket_tagging().bucket(bucket).send().await;
        Ok(missing_as_none(result, NO_SUCH_TAG_SET)?
            .map(|output| convert::from_sdk_tags(output.tag_set())))
    }

    async fn get_bucket_analytics(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<Option<AnalyticsConfiguration>, BoxError> {
        let result = self
            .s3
            .get_bucket_analytics_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await;
        let Some(output) = missing_as_none(result, NO_SUCH_CONFIGURATION)? else {
            return Ok(None);
        };
        output
            .analytics_configuration()
            .map(convert::from_sdk_analytics)
            .transpose()
    }

    async fn get_bucket_metrics(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<Option<MetricsConfiguration>, BoxError> {
        let result = self
            .s3
            .get_bucket_metrics_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await;
        let Some(output) = missing_as_none(result, NO_SUCH_CONFIGURATION)? else {
            return Ok(None);
        };
        output
            .metrics_configuration()
            .map(convert::from_sdk_metrics)
            .transpose()
    }
}
