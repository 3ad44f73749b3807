//! Conversions between the YAML document model and `aws_sdk_s3` types.
//!
//! `to_sdk_*` build request payloads; `from_sdk_*` map responses back. Builders
//! with required members fail with a `BuildError`, surfaced as a boxed error.

use aws_sdk_s3::primitives::{DateTime, DateTimeFormat};
use aws_sdk_s3::types as sdk;
use s3_manager_core::document::{
    AbortIncompleteMultipartUpload, AnalyticsConfiguration, AnalyticsDataExport,
    AnalyticsDestination, AnalyticsS3Destination, ConfigurationFilter, FilterAndOperator,
    LifecycleConfiguration, LifecycleExpiration, LifecycleRule, LifecycleRuleAndOperator,
    LifecycleRuleFilter, LoggingEnabled, LoggingRules, MetricsConfiguration,
    NoncurrentVersionExpiration, NoncurrentVersionTransition, RuleStatus, StorageClassAnalysis,
    Tag, TagSet, Transition,
};
use s3_manager_core::error::BoxError;

fn parse_date(date: &str) -> Result<DateTime, BoxError> {
    Ok(DateTime::from_str(date, DateTimeFormat::DateTime)?)
}

fn format_date(date: &DateTime) -> Result<String, BoxError> {
    Ok(date.fmt(DateTimeFormat::DateTime)?)
}

pub fn to_sdk_tagging(tags: &TagSet) -> Result<sdk::Tagging, BoxError> {
    let tag_set = tags.iter().map(to_sdk_tag).collect::<Result<Vec<_>, _>>()?;
    Ok(sdk::Tagging::builder().set_tag_set(Some(tag_set)).build()?)
}

pub fn from_sdk_tags(tags: &[sdk::Tag]) -> TagSet {
    tags.iter().map(from_sdk_tag).collect::<Vec<_>>().into()
}

pub fn to_sdk_logging(logging: &LoggingRules) -> Result<sdk::BucketLoggingStatus, BoxError> {
    let enabled = match &logging.logging_enabled {
        Some(enabled) => Some(
            sdk::LoggingEnabled::builder()
                .target_bucket(&enabled.target_bucket)
                .target_prefix(&enabled.target_prefix)
                .build()?,
        ),
        None => None,
    };
    Ok(sdk::BucketLoggingStatus::builder()
        .set_logging_enabled(enabled)
        .build())
}

pub fn from_sdk_logging(enabled: Option<&sdk::LoggingEnabled>) -> LoggingRules {
    LoggingRules {
        logging_enabled: enabled.map(|e| LoggingEnabled {
            target_bucket: e.target_bucket().to_string(),
            target_prefix: e.target_prefix().to_string(),
        }),
    }
}

pub fn to_sdk_lifecycle(
    lifecycle: &LifecycleConfiguration,
) -> Result<sdk::BucketLifecycleConfiguration, BoxError> {
    let rules = lifecycle
        .rules
        .iter()
        .map(to_sdk_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sdk::BucketLifecycleConfiguration::builder()
        .set_rules(Some(rules))
        .build()?)
}

fn to_sdk_tag(tag: &Tag) -> Result<sdk::Tag, BoxError> {
    Ok(sdk::Tag::builder().key(&tag.key).value(&tag.value).build()?)
}

fn to_sdk_tags(tags: &[Tag]) -> Result<Option<Vec<sdk::Tag>>, BoxError> {
    if tags.is_empty() {
        return Ok(None);
    }
    Ok(Some(tags.iter().map(to_sdk_tag).collect::<Result<Vec<_>, _>>()?))
}

fn from_sdk_tag(tag: &sdk::Tag) -> Tag {
    Tag::new(tag.key(), tag.value())
}

fn to_sdk_rule_filter(filter: &LifecycleRuleFilter) -> Result<sdk::LifecycleRuleFilter, BoxError> {
    let and = match &filter.and {
        Some(and) => Some(
            sdk::LifecycleRuleAndOperator::builder()
                .set_prefix(and.prefix.clone())
                .set_tags(to_sdk_tags(&and.tags)?)
                .set_object_size_greater_than(and.object_size_greater_than)
                .set_object_size_less_than(and.object_size_less_than)
                .build(),
        ),
        None => None,
    };
    Ok(sdk::LifecycleRuleFilter::builder()
        .set_prefix(filter.prefix.clone())
        .set_tag(filter.tag.as_ref().map(to_sdk_tag).transpose()?)
        .set_object_size_greater_than(filter.object_size_greater_than)
        .set_object_size_less_than(filter.object_size_less_than)
        .set_and(and)
        .build())
}

fn from_sdk_rule_filter(filter: &sdk::LifecycleRuleFilter) -> LifecycleRuleFilter {
    LifecycleRuleFilter {
        prefix: filter.prefix().map(str::to_string),
        tag: filter.tag().map(from_sdk_tag),
        object_size_greater_than: filter.object_size_greater_than(),
        object_size_less_than: filter.object_size_less_than(),
        and: filter.and().map(|and| LifecycleRuleAndOperator {
            prefix: and.prefix().map(str::to_string),
            tags: and.tags().iter().map(from_sdk_tag).collect(),
            object_size_greater_than: and.object_size_greater_than(),
            object_size_less_than: and.object_size_less_than(),
        }),
    }
}

// `Prefix` on the rule itself is deprecated in favour of `Filter`, but S3 still
// accepts it and existing configs use it.
#[allow(deprecated)]
fn to_sdk_rule(rule: &LifecycleRule) -> Result<sdk::LifecycleRule, BoxError> {
    let status = match rule.status {
        RuleStatus::Enabled => sdk::ExpirationStatus::Enabled,
        RuleStatus::Disabled => sdk::ExpirationStatus::Disabled,
    };

    let expiration = match &rule.expiration {
        Some(expiration) => Some(
            sdk::LifecycleExpiration::builder()
                .set_days(expiration.days)
                .set_date(expiration.date.as_deref().map(parse_date).transpose()?)
                .set_expired_object_delete_marker(expiration.expired_object_delete_marker)
                .build(),
        ),
        None => None,
    };

    let transitions = rule
        .transitions
        .iter()
        .map(|t| {
            Ok(sdk::Transition::builder()
                .set_days(t.days)
                .set_date(t.date.as_deref().map(parse_date).transpose()?)
                .storage_class(sdk::TransitionStorageClass::from(t.storage_class.as_str()))
                .build())
        })
        .collect::<Result<Vec<_>, BoxError>>()?;

    let noncurrent_transitions = rule
        .noncurrent_version_transitions
        .iter()
        .map(|t| {
            sdk::NoncurrentVersionTransition::builder()
                .set_noncurrent_days(t.noncurrent_days)
                .set_newer_noncurrent_versions(t.newer_noncurrent_versions)
                .storage_class(sdk::TransitionStorageClass::from(t.storage_class.as_str()))
                .build()
        })
        .collect::<Vec<_>>();

    let builder = sdk::LifecycleRule::builder()
        .set_id(rule.id.clone())
        .set_prefix(rule.prefix.clone())
        .set_filter(rule.filter.as_ref().map(to_sdk_rule_filter).transpose()?)
        .status(status)
        .set_expiration(expiration)
        .set_noncurrent_version_expiration(rule.noncurrent_version_expiration.as_ref().map(|n| {
            sdk::NoncurrentVersionExpiration::builder()
                .set_noncurrent_days(n.noncurrent_days)
                .set_newer_noncurrent_versions(n.newer_noncurrent_versions)
                .build()
        }))
        .set_abort_incomplete_multipart_upload(rule.abort_incomplete_multipart_upload.as_ref().map(|a| {
            sdk::AbortIncompleteMultipartUpload::builder()
                .days_after_initiation(a.days_after_initiation)
                .build()
        }));
    let builder = if transitions.is_empty() {
        builder
    } else {
        builder.set_transitions(Some(transitions))
    };
    let builder = if noncurrent_transitions.is_empty() {
        builder
    } else {
        builder.set_noncurrent_version_transitions(Some(noncurrent_transitions))
    };
    Ok(builder.build()?)
}

pub fn from_sdk_lifecycle(rules: &[sdk::LifecycleRule]) -> Result<LifecycleConfiguration, BoxError> {
    let rules = rules
        .iter()
        .map(from_sdk_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LifecycleConfiguration { rules })
}

fn storage_class_name(class: Option<&sdk::TransitionStorageClass>) -> String {
    class.map(|c| c.as_str().to_string()).unwrap_or_default()
}

#[allow(deprecated)]
fn from_sdk_rule(rule: &sdk::LifecycleRule) -> Result<LifecycleRule, BoxError> {
    let status = match rule.status() {
        sdk::ExpirationStatus::Enabled => RuleStatus::Enabled,
        _ => RuleStatus::Disabled,
    };

    let expiration = match rule.expiration() {
        Some(e) => Some(LifecycleExpiration {
            days: e.days(),
            date: e.date().map(format_date).transpose()?,
            expired_object_delete_marker: e.expired_object_delete_marker(),
        }),
        None => None,
    };

    let transitions = rule
        .transitions()
        .iter()
        .map(|t| {
            Ok(Transition {
                days: t.days(),
                date: t.date().map(format_date).transpose()?,
                storage_class: storage_class_name(t.storage_class()),
            })
        })
        .collect::<Result<Vec<_>, BoxError>>()?;

    Ok(LifecycleRule {
        id: rule.id().map(str::to_string),
        prefix: rule.prefix().map(str::to_string),
        filter: rule.filter().map(from_sdk_rule_filter),
        status,
        expiration,
        transitions,
        noncurrent_version_transitions: rule
            .noncurrent_version_transitions()
            .iter()
            .map(|t| NoncurrentVersionTransition {
                noncurrent_days: t.noncurrent_days(),
                newer_noncurrent_versions: t.newer_noncurrent_versions(),
                storage_class: storage_class_name(t.storage_class()),
            })
            .collect(),
        noncurrent_version_expiration: rule
            .noncurrent_version_expiration()
            .map(|n| NoncurrentVersionExpiration {
                noncurrent_days: n.noncurrent_days(),
                newer_noncurrent_versions: n.newer_noncurrent_versions(),
            }),
        abort_incomplete_multipart_upload: rule
            .abort_incomplete_multipart_upload()
            .and_then(|a| a.days_after_initiation())
            .map(|days_after_initiation| AbortIncompleteMultipartUpload {
                days_after_initiation,
            }),
    })
}

/// The one member a configuration filter sets. S3 rejects filters with none or several.
enum FilterMember<'a> {
    Prefix(&'a str),
    Tag(&'a Tag),
    AccessPointArn(&'a str),
    And(&'a FilterAndOperator),
}

fn single_member(filter: &ConfigurationFilter) -> Result<FilterMember<'_>, BoxError> {
    let mut members = Vec::new();
    if let Some(prefix) = &filter.prefix {
        members.push(FilterMember::Prefix(prefix));
    }
    if let Some(tag) = &filter.tag {
        members.push(FilterMember::Tag(tag));
    }
    if let Some(arn) = &filter.access_point_arn {
        members.push(FilterMember::AccessPointArn(arn));
    }
    if let Some(and) = &filter.and {
        members.push(FilterMember::And(and));
    }
    match members.len() {
        1 => Ok(members.remove(0)),
        n => Err(format!("filter must set exactly one of Prefix, Tag, AccessPointArn or And, found {n}").into()),
    }
}

fn to_sdk_analytics_filter(filter: &ConfigurationFilter) -> Result<sdk::AnalyticsFilter, BoxError> {
    match single_member(filter)? {
        FilterMember::Prefix(prefix) => Ok(sdk::AnalyticsFilter::Prefix(prefix.to_string())),
        FilterMember::Tag(tag) => Ok(sdk::AnalyticsFilter::Tag(to_sdk_tag(tag)?)),
        FilterMember::And(and) if and.access_point_arn.is_none() => {
            Ok(sdk::AnalyticsFilter::And(
                sdk::AnalyticsAndOperator::builder()
                    .set_prefix(and.prefix.clone())
                    .set_tags(to_sdk_tags(&and.tags)?)
                    .build(),
            ))
        }
        FilterMember::AccessPointArn(_) | FilterMember::And(_) => {
            Err("AccessPointArn is not supported in an analytics filter".into())
        }
    }
}

fn from_sdk_analytics_filter(filter: &sdk::AnalyticsFilter) -> Result<ConfigurationFilter, BoxError> {
    match filter {
        sdk::AnalyticsFilter::Prefix(prefix) => Ok(ConfigurationFilter::prefix(prefix.clone())),
        sdk::AnalyticsFilter::Tag(tag) => Ok(ConfigurationFilter {
            tag: Some(from_sdk_tag(tag)),
            ..Default::default()
        }),
        sdk::AnalyticsFilter::And(and) => Ok(ConfigurationFilter {
            and: Some(FilterAndOperator {
                prefix: and.prefix().map(str::to_string),
                tags: and.tags().iter().map(from_sdk_tag).collect(),
                access_point_arn: None,
            }),
            ..Default::default()
        }),
        other => Err(format!("unsupported analytics filter: {other:?}").into()),
    }
}

fn to_sdk_metrics_filter(filter: &ConfigurationFilter) -> Result<sdk::MetricsFilter, BoxError> {
    Ok(match single_member(filter)? {
        FilterMember::Prefix(prefix) => sdk::MetricsFilter::Prefix(prefix.to_string()),
        FilterMember::Tag(tag) => sdk::MetricsFilter::Tag(to_sdk_tag(tag)?),
        FilterMember::AccessPointArn(arn) => sdk::MetricsFilter::AccessPointArn(arn.to_string()),
        FilterMember::And(and) => sdk::MetricsFilter::And(
            sdk::MetricsAndOperator::builder()
                .set_prefix(and.prefix.clone())
                .set_tags(to_sdk_tags(&and.tags)?)
                .set_access_point_arn(and.access_point_arn.clone())
                .build(),
        ),
    })
}

fn from_sdk_metrics_filter(filter: &sdk::MetricsFilter) -> Result<ConfigurationFilter, BoxError> {
    match filter {
        sdk::MetricsFilter::Prefix(prefix) => Ok(ConfigurationFilter::prefix(prefix.clone())),
        sdk::MetricsFilter::Tag(tag) => Ok(ConfigurationFilter {
            tag: Some(from_sdk_tag(tag)),
            ..Default::default()
        }),
        sdk::MetricsFilter::AccessPointArn(arn) => Ok(ConfigurationFilter {
            access_point_arn: Some(arn.clone()),
            ..Default::default()
        }),
        sdk::MetricsFilter::And(and) => Ok(ConfigurationFilter {
            and: Some(FilterAndOperator {
                prefix: and.prefix().map(str::to_string),
                tags: and.tags().iter().map(from_sdk_tag).collect(),
                access_point_arn: and.access_point_arn().map(str::to_string),
            }),
            ..Default::default()
        }),
        other => Err(format!("unsupported metrics filter: {other:?}").into()),
    }
}

pub fn to_sdk_analytics(
    analytics: &AnalyticsConfiguration,
) -> Result<sdk::AnalyticsConfiguration, BoxError> {
    let data_export = match &analytics.storage_class_analysis.data_export {
        Some(export) => {
            let s3 = &export.destination.s3_bucket_destination;
            let destination = sdk::AnalyticsS3BucketDestination::builder()
                .format(sdk::AnalyticsS3ExportFileFormat::from(s3.format.as_str()))
                .bucket(&s3.bucket)
                .set_bucket_account_id(s3.bucket_account_id.clone())
                .set_prefix(s3.prefix.clone())
                .build()?;
            Some(
                sdk::StorageClassAnalysisDataExport::builder()
                    .output_schema_version(sdk::StorageClassAnalysisSchemaVersion::from(
                        export.output_schema_version.as_str(),
                    ))
                    .destination(
                        sdk::AnalyticsExportDestination::builder()
                            .s3_bucket_destination(destination)
                            .build(),
                    )
                    .build()?,
            )
        }
        None => None,
    };

    Ok(sdk::AnalyticsConfiguration::builder()
        .id(&analytics.id)
        .set_filter(analytics.filter.as_ref().map(to_sdk_analytics_filter).transpose()?)
        .storage_class_analysis(
            sdk::StorageClassAnalysis::builder()
                .set_data_export(data_export)
                .build(),
        )
        .build()?)
}

pub fn from_sdk_analytics(
    analytics: &sdk::AnalyticsConfiguration,
) -> Result<AnalyticsConfiguration, BoxError> {
    let data_export = analytics
        .storage_class_analysis()
        .and_then(|s| s.data_export())
        .and_then(|export| {
            let s3 = export.destination()?.s3_bucket_destination()?;
            Some(AnalyticsDataExport {
                output_schema_version: export.output_schema_version().as_str().to_string(),
                destination: AnalyticsDestination {
                    s3_bucket_destination: AnalyticsS3Destination {
                        bucket: s3.bucket().to_string(),
                        bucket_account_id: s3.bucket_account_id().map(str::to_string),
                        format: s3.format().as_str().to_string(),
                        prefix: s3.prefix().map(str::to_string),
                    },
                },
            })
        });

    Ok(AnalyticsConfiguration {
        id: analytics.id().to_string(),
        filter: analytics.filter().map(from_sdk_analytics_filter).transpose()?,
        storage_class_analysis: StorageClassAnalysis { data_export },
    })
}

pub fn to_sdk_metrics(metrics: &MetricsConfiguration) -> Result<sdk::MetricsConfiguration, BoxError> {
    Ok(sdk::MetricsConfiguration::builder()
        .id(&metrics.id)
        .set_filter(metrics.filter.as_ref().map(to_sdk_metrics_filter).transpose()?)
        .build()?)
}

pub fn from_sdk_metrics(
    metrics: &sdk::MetricsConfiguration,
) -> Result<MetricsConfiguration, BoxError> {
    Ok(MetricsConfiguration {
        id: metrics.id().to_string(),
        filter: metrics.filter().map(from_sdk_metrics_filter).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use s3_manager_core::bucket::default_logging_lifecycle;

    #[test]
    fn default_logging_lifecycle_survives_sdk_conversion() {
        let lifecycle = default_logging_lifecycle("logs");
        let sdk_config = to_sdk_lifecycle(&lifecycle).unwrap();
        assert_eq!(from_sdk_lifecycle(sdk_config.rules()).unwrap(), lifecycle);
    }

    #[test]
    fn expiration_date_is_parsed() {
        let mut lifecycle = default_logging_lifecycle("logs");
        let expiration = lifecycle.rules[0].expiration.as_mut().unwrap();
        expiration.days = None;
        expiration.date = Some("2030-01-01T00:00:00Z".to_string());

        let sdk_config = to_sdk_lifecycle(&lifecycle).unwrap();
        let date = sdk_config.rules()[0].expiration().unwrap().date().unwrap();
        assert_eq!(date.secs(), 1_893_456_000);
    }

    #[test]
    fn malformed_date_is_an_error() {
        let mut lifecycle = default_logging_lifecycle("logs");
        lifecycle.rules[0].transitions[0].date = Some("next tuesday".to_string());
        assert!(to_sdk_lifecycle(&lifecycle).is_err());
    }

    #[test]
    fn metrics_prefix_filter_maps_to_enum() {
        let metrics = MetricsConfiguration {
            id: "Docs".to_string(),
            filter: Some(ConfigurationFilter::prefix("docs/")),
        };
        let sdk_metrics = to_sdk_metrics(&metrics).unwrap();
        assert_eq!(
            sdk_metrics.filter().and_then(|f| f.as_prefix().ok()).map(String::as_str),
            Some("docs/")
        );
        assert_eq!(from_sdk_metrics(&sdk_metrics).unwrap(), metrics);
    }

    fn scoped_rule() -> LifecycleRule {
        let mut rule = default_logging_lifecycle("scratch").rules.remove(0);
        rule.prefix = None;
        rule.filter = Some(LifecycleRuleFilter {
            and: Some(LifecycleRuleAndOperator {
                prefix: Some("tmp/".to_string()),
                tags: vec![Tag::new("scratch", "true"), Tag::new("team", "data")],
                object_size_greater_than: Some(1024),
                object_size_less_than: None,
            }),
            ..Default::default()
        });
        rule.noncurrent_version_transitions = vec![NoncurrentVersionTransition {
            noncurrent_days: Some(30),
            newer_noncurrent_versions: Some(2),
            storage_class: "GLACIER".to_string(),
        }];
        rule.noncurrent_version_expiration = Some(NoncurrentVersionExpiration {
            noncurrent_days: Some(90),
            newer_noncurrent_versions: None,
        });
        rule
    }

    #[test]
    fn scoped_lifecycle_rule_keeps_filter_and_noncurrent_transitions() {
        let lifecycle = LifecycleConfiguration {
            rules: vec![scoped_rule()],
        };
        let sdk_config = to_sdk_lifecycle(&lifecycle).unwrap();

        let sdk_rule = &sdk_config.rules()[0];
        let and = sdk_rule.filter().and_then(|f| f.and()).expect("And filter sent");
        assert_eq!(and.prefix(), Some("tmp/"));
        assert_eq!(and.tags().len(), 2);
        assert_eq!(and.object_size_greater_than(), Some(1024));
        assert_eq!(sdk_rule.noncurrent_version_transitions().len(), 1);

        assert_eq!(from_sdk_lifecycle(sdk_config.rules()).unwrap(), lifecycle);
    }

    #[test]
    fn tag_and_size_filters_survive_sdk_conversion() {
        let mut rule = scoped_rule();
        rule.filter = Some(LifecycleRuleFilter {
            tag: Some(Tag::new("scratch", "true")),
            ..Default::default()
        });
        let mut sized = scoped_rule();
        sized.id = Some("big-objects".to_string());
        sized.filter = Some(LifecycleRuleFilter {
            object_size_less_than: Some(4096),
            ..Default::default()
        });
        let lifecycle = LifecycleConfiguration {
            rules: vec![rule, sized],
        };

        let sdk_config = to_sdk_lifecycle(&lifecycle).unwrap();
        let tag = sdk_config.rules()[0].filter().and_then(|f| f.tag()).unwrap();
        assert_eq!((tag.key(), tag.value()), ("scratch", "true"));
        assert_eq!(from_sdk_lifecycle(sdk_config.rules()).unwrap(), lifecycle);
    }

    #[test]
    fn analytics_and_filter_survives_sdk_conversion() {
        let analytics = AnalyticsConfiguration {
            id: "Reports".to_string(),
            filter: Some(ConfigurationFilter {
                and: Some(FilterAndOperator {
                    prefix: Some("reports/".to_string()),
                    tags: vec![Tag::new("Stage", "prod")],
                    access_point_arn: None,
                }),
                ..Default::default()
            }),
            storage_class_analysis: StorageClassAnalysis::default(),
        };
        let sdk_analytics = to_sdk_analytics(&analytics).unwrap();
        assert!(sdk_analytics.filter().map(|f| f.is_and()).unwrap_or(false));
        assert_eq!(from_sdk_analytics(&sdk_analytics).unwrap(), analytics);
    }

    #[test]
    fn metrics_tag_and_access_point_filters_survive_sdk_conversion() {
        for filter in [
            ConfigurationFilter {
                tag: Some(Tag::new("Stage", "prod")),
                ..Default::default()
            },
            ConfigurationFilter {
                access_point_arn: Some("arn:aws:s3:eu-west-1:123456789012:accesspoint/ap".to_string()),
                ..Default::default()
            },
        ] {
            let metrics = MetricsConfiguration {
                id: "Scoped".to_string(),
                filter: Some(filter),
            };
            let sdk_metrics = to_sdk_metrics(&metrics).unwrap();
            assert_eq!(from_sdk_metrics(&sdk_metrics).unwrap(), metrics);
        }
    }

    #[test]
    fn configuration_filter_needs_exactly_one_member() {
        let ambiguous = MetricsConfiguration {
            id: "Ambiguous".to_string(),
            filter: Some(ConfigurationFilter {
                prefix: Some("a/".to_string()),
                tag: Some(Tag::new("k", "v")),
                ..Default::default()
            }),
        };
        assert!(to_sdk_metrics(&ambiguous).is_err());

        let empty = AnalyticsConfiguration {
            id: "Empty".to_string(),
            filter: Some(ConfigurationFilter::default()),
            storage_class_analysis: StorageClassAnalysis::default(),
        };
        assert!(to_sdk_analytics(&empty).is_err());

        let access_point = AnalyticsConfiguration {
            filter: Some(ConfigurationFilter {
                access_point_arn: Some("arn:aws:s3:::ap".to_string()),
                ..Default::default()
            }),
            ..empty
        };
        assert!(to_sdk_analytics(&access_point).is_err());
    }

    #[test]
    fn disabled_logging_maps_to_empty_status() {
        let status = to_sdk_logging(&LoggingRules::default()).unwrap();
        assert!(status.logging_enabled().is_none());
        assert_eq!(from_sdk_logging(status.logging_enabled()), LoggingRules::default());
    }
}
