use s3_manager::load_config::{default_output_path, load_config, load_standard_config, save_config};
use s3_manager_core::document::BucketConfig;
use s3_manager_core::ConfigError;
use serial_test::serial;
use std::fs::write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), content).unwrap();
    config_file
}

/// A full bucket document loads into the typed model.
#[test]
fn test_load_config_success_full_document() {
    let config_yaml = r#"
bucket-name: analytics-raw
region: eu-west-1
bucket-security-policy:
  Version: '2012-10-17'
  Statement:
  - Sid: AllowReadFromRole
    Effect: Allow
    Principal:
      AWS: arn:aws:iam::123456789012:role/reader
    Action: s3:GetObject
    Resource: arn:aws:s3:::BUCKET-NAME/*
life-cycle-rules:
  Rules:
  - ID: expire-tmp
    Filter:
      Prefix: tmp/
    Status: Enabled
    Expiration:
      Days: 7
bucket-analytics:
  Id: EntireBucketAnalytics
  StorageClassAnalysis: null
bucket-tags:
  TagSet:
  - Key: Owner
    Value: data-team
"#;
    let file = config_file(config_yaml);
    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.bucket_name, "analytics-raw");
    assert_eq!(config.region, "eu-west-1");
    let policy = config.settings.bucket_security_policy.unwrap();
    assert_eq!(policy.statement[0].sid.as_deref(), Some("AllowReadFromRole"));
    let rules = config.settings.life_cycle_rules.unwrap().rules;
    assert_eq!(
        rules[0].filter.as_ref().and_then(|f| f.prefix.as_deref()),
        Some("tmp/")
    );
    let analytics = config.settings.bucket_analytics.unwrap();
    assert!(analytics.storage_class_analysis.data_export.is_none());
    assert!(config.settings.logging_rules.is_none());
}

#[test]
fn test_load_config_errors_for_invalid_file() {
    let file = config_file("not-yaml: [:::");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigLoad { .. }), "got: {err:?}");
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let err = load_config("does/not/exist.yml").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("does/not/exist.yml"), "got: {msg}");
}

#[test]
fn test_load_config_errors_on_missing_bucket_name() {
    let file = config_file("region: eu-west-1\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("'bucket-name' is a required property"),
        "got: {err}"
    );
}

#[test]
fn test_load_config_errors_on_wrongly_typed_leaf() {
    let file = config_file(
        "bucket-name: b\nregion: eu-west-1\nlife-cycle-rules:\n  Rules:\n  - Status: Sometimes\n",
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaValidation(_)), "got: {err:?}");
}

#[test]
fn test_load_config_keeps_tag_and_and_filters() {
    let file = config_file(
        r#"
bucket-name: scoped
region: eu-west-1
life-cycle-rules:
  Rules:
  - ID: expire-scratch
    Filter:
      Tag:
        Key: scratch
        Value: 'true'
    Status: Enabled
    Expiration:
      Days: 1
bucket-analytics:
  Id: Reports
  Filter:
    And:
      Prefix: reports/
      Tags:
      - Key: Stage
        Value: prod
  StorageClassAnalysis: null
bucket-metrics:
  Id: AccessPoint
  Filter:
    AccessPointArn: arn:aws:s3:eu-west-1:123456789012:accesspoint/ap
"#,
    );
    let config = load_config(file.path()).expect("Config should load");

    let rule = &config.settings.life_cycle_rules.unwrap().rules[0];
    let tag = rule.filter.as_ref().and_then(|f| f.tag.as_ref()).unwrap();
    assert_eq!((tag.key.as_str(), tag.value.as_str()), ("scratch", "true"));
    let and = config.settings.bucket_analytics.unwrap().filter.unwrap().and.unwrap();
    assert_eq!(and.prefix.as_deref(), Some("reports/"));
    assert_eq!(and.tags.len(), 1);
    assert!(config.settings.bucket_metrics.unwrap().filter.unwrap().access_point_arn.is_some());
}

#[test]
fn test_load_config_rejects_unknown_lifecycle_keys() {
    for rules in [
        "  - Status: Enabled\n    Filter:\n      Tags: []\n",
        "  - Status: Enabled\n    ExpirationDays: 3\n",
    ] {
        let file = config_file(&format!(
            "bucket-name: b\nregion: eu-west-1\nlife-cycle-rules:\n  Rules:\n{rules}"
        ));
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation(_)), "got: {err:?}");
    }
}

#[test]
fn test_load_config_accepts_single_policy_statement() {
    let file = config_file(
        r#"
bucket-name: single
region: eu-west-1
bucket-security-policy:
  Version: '2012-10-17'
  Statement:
    Sid: AllowRead
    Effect: Allow
    Principal: '*'
    Action: s3:GetObject
"#,
    );
    let config = load_config(file.path()).expect("Config should load");
    let policy = config.settings.bucket_security_policy.unwrap();
    assert_eq!(policy.statement.len(), 1);
    assert_eq!(policy.statement[0].sid.as_deref(), Some("AllowRead"));
}

#[test]
fn test_standard_config_needs_no_bucket_name() {
    let file = config_file(
        "bucket-name: BUCKET-NAME\nbucket-metrics:\n  Id: EntireBucket\n",
    );
    let standard = load_standard_config(file.path()).expect("standard should load");
    assert_eq!(standard.bucket_metrics.unwrap().id, "EntireBucket");

    let file = config_file("bucket-tags:\n  TagSet: []\n");
    assert!(load_standard_config(file.path()).is_ok());
}

#[test]
fn test_save_then_load_keeps_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.yml");
    let mut config = BucketConfig::new("saved", "ap-southeast-2");
    config.settings.life_cycle_rules =
        Some(s3_manager_core::bucket::default_logging_lifecycle("saved"));

    save_config(&path, &config).expect("save should succeed");
    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.yml");
    let err = save_config(&path, &BucketConfig::new("b", "eu-west-1")).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigWrite { .. }));
}

/// Relative default output lands in the working directory.
#[test]
#[serial]
fn test_default_output_path_is_relative_to_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let path = default_output_path("cwd-bucket");
    let result = save_config(&path, &BucketConfig::new("cwd-bucket", "eu-west-1"));
    std::env::set_current_dir(previous).unwrap();

    result.unwrap();
    assert!(dir.path().join("cwd-bucket.yml").exists());
}
