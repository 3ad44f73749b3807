use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::NamedTempFile;

use s3_manager::cli::{
    config, create, retrieve_config, update, BucketArgs, BucketRequest, Cli, Commands,
};
use s3_manager_core::contract::MockBucketManager;
use s3_manager_core::document::{LifecycleConfiguration, Tag, TagSet};

const BUCKET_YAML: &str = r#"
bucket-name: team-data
region: eu-west-1
bucket-tags:
  TagSet:
  - Key: Owner
    Value: data-team
  - Key: Stage
    Value: dev
"#;

const STANDARD_YAML: &str = r#"
bucket-security-policy:
  Version: '2012-10-17'
  Statement:
  - Sid: RequiredSecureTransport
    Effect: Deny
    Principal: '*'
    Action: s3:*
    Resource: arn:aws:s3:::BUCKET-NAME/*
    Condition:
      Bool:
        aws:SecureTransport: false
logging-rules:
  LoggingEnabled:
    TargetBucket: LOGGING-BUCKET-NAME
    TargetPrefix: BUCKET-NAME/
bucket-tags:
  TagSet:
  - Key: Owner
    Value: ''
  - Key: App
    Value: ''
"#;

fn yaml_file(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Creating temp config file failed");
    write(file.path(), content).expect("Writing temp config failed");
    file
}

#[test]
fn validate_cli_accepts_valid_config() {
    let config = yaml_file(BUCKET_YAML);
    let mut cmd = Command::cargo_bin("s3-manager").expect("Binary exists");

    cmd.arg("validate").arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn validate_cli_rejects_config_without_region() {
    let config = yaml_file("bucket-name: team-data\n");
    let mut cmd = Command::cargo_bin("s3-manager").expect("Binary exists");

    cmd.arg("validate").arg("--config").arg(config.path());

    cmd.assert().failure().stderr(predicate::str::contains("region"));
}

#[test]
fn malformed_tag_argument_is_rejected_by_parser() {
    let mut cmd = Command::cargo_bin("s3-manager").expect("Binary exists");

    cmd.args(["config", "--bucket-name", "b", "--region", "eu-west-1", "--tag", "no-colon"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no-colon"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let msg = format!("{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    // Validate needs no AWS credentials; the missing file only makes it fail.
    let cli = Cli {
        profile: None,
        command: Commands::Validate {
            config: std::path::PathBuf::from("dummy.yaml"),
        },
    };

    let result = s3_manager::run(cli).await;
    assert!(result.is_err(), "dummy.yaml does not exist");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}

#[test]
fn request_flags_override_config_and_tags_are_upserted() {
    let config = yaml_file(BUCKET_YAML);
    let args = BucketArgs {
        config: Some(config.path().to_path_buf()),
        region: Some("eu-central-1".to_string()),
        tags: vec![Tag::new("Stage", "prod"), Tag::new("App", "lake")],
        ..Default::default()
    };

    let request = BucketRequest::from_args(&args).expect("request should build");
    assert_eq!(request.params.bucket_name, "team-data");
    assert_eq!(request.params.region, "eu-central-1");
    assert_eq!(
        request.params.settings.bucket_tags.unwrap().tag_set,
        TagSet(vec![
            Tag::new("Owner", "data-team"),
            Tag::new("Stage", "prod"),
            Tag::new("App", "lake"),
        ])
    );
    assert!(request.standard.is_none());
}

#[test]
fn request_without_config_needs_name_and_region() {
    let args = BucketArgs {
        bucket_name: Some("lonely".to_string()),
        ..Default::default()
    };
    let err = BucketRequest::from_args(&args).unwrap_err();
    assert!(err.to_string().contains("--region"), "got: {err}");

    let args = BucketArgs {
        bucket_name: Some("lonely".to_string()),
        region: Some("eu-west-1".to_string()),
        tags: vec![Tag::new("Owner", "me")],
        ..Default::default()
    };
    let request = BucketRequest::from_args(&args).unwrap();
    assert_eq!(request.params.bucket_name, "lonely");
    assert_eq!(request.params.settings.bucket_tags.unwrap().tag_set.len(), 1);
}

#[tokio::test]
async fn config_command_writes_effective_document() {
    let bucket = yaml_file(BUCKET_YAML);
    let standard = yaml_file(STANDARD_YAML);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("effective.yml");

    let args = BucketArgs {
        config: Some(bucket.path().to_path_buf()),
        standard_config: Some(standard.path().to_path_buf()),
        output: Some(output.clone()),
        ..Default::default()
    };
    let request = BucketRequest::from_args(&args).unwrap();

    let mut manager = MockBucketManager::new();
    manager
        .expect_account_id()
        .times(1)
        .returning(|| Ok("123456789012".to_string()));

    let written = config(&manager, &request).await.expect("config should succeed");
    assert_eq!(written, output);

    let effective = s3_manager::load_config::load_config(&output).expect("output reloads");
    let policy = effective.settings.bucket_security_policy.unwrap();
    assert_eq!(policy.statement[0].sid.as_deref(), Some("RequiredSecureTransport"));
    let enabled = effective.settings.logging_rules.unwrap().logging_enabled.unwrap();
    assert_eq!(enabled.target_bucket, "123456789012-bucket-logs-eu-west-1");
    assert_eq!(enabled.target_prefix, "team-data/");

    let keys: Vec<_> = effective
        .settings
        .bucket_tags
        .unwrap()
        .tag_set
        .iter()
        .map(|t| t.key.clone())
        .collect();
    assert_eq!(keys, vec!["Owner", "Stage", "App"]);
}

#[tokio::test]
async fn config_command_requires_standard() {
    let bucket = yaml_file(BUCKET_YAML);
    let args = BucketArgs {
        config: Some(bucket.path().to_path_buf()),
        ..Default::default()
    };
    let request = BucketRequest::from_args(&args).unwrap();
    let manager = MockBucketManager::new();

    let err = config(&manager, &request).await.unwrap_err();
    assert!(err.to_string().contains("--standard-config"));
}

#[tokio::test]
async fn create_on_existing_bucket_writes_nothing() {
    let out_dir = tempfile::tempdir().unwrap();
    let standard = yaml_file(STANDARD_YAML);
    let args = BucketArgs {
        bucket_name: Some("taken".to_string()),
        region: Some("eu-west-1".to_string()),
        standard_config: Some(standard.path().to_path_buf()),
        output: Some(out_dir.path().join("taken.yml")),
        ..Default::default()
    };
    let request = BucketRequest::from_args(&args).unwrap();

    let mut manager = MockBucketManager::new();
    manager.expect_bucket_exists().returning(|_| Ok(true));

    let report = create(&manager, &request).await.unwrap();
    assert!(report.is_none());
    assert!(!out_dir.path().join("taken.yml").exists());
}

#[tokio::test]
async fn update_without_standard_applies_tags_only() {
    let bucket = yaml_file(BUCKET_YAML);
    let args = BucketArgs {
        config: Some(bucket.path().to_path_buf()),
        ..Default::default()
    };
    let request = BucketRequest::from_args(&args).unwrap();

    let mut manager = MockBucketManager::new();
    manager.expect_bucket_exists().returning(|_| Ok(true));
    manager
        .expect_put_bucket_tagging()
        .withf(|bucket, tags| bucket == "team-data" && tags.len() == 2)
        .times(1)
        .returning(|_, _| Ok(()));

    let report = update(&manager, &request).await.unwrap();
    assert_eq!(report.applied.len(), 1);
}

#[tokio::test]
async fn retrieve_config_writes_loadable_yaml() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("live.yml");

    let mut manager = MockBucketManager::new();
    manager
        .expect_bucket_region()
        .returning(|_| Ok("eu-west-1".to_string()));
    manager.expect_get_bucket_policy().returning(|_| Ok(None));
    manager.expect_get_bucket_lifecycle().returning(|_| {
        Ok(Some(LifecycleConfiguration {
            rules: s3_manager_core::bucket::default_logging_lifecycle("live").rules,
        }))
    });
    manager.expect_get_bucket_logging().returning(|_| Ok(None));
    manager
        .expect_get_bucket_tagging()
        .returning(|_| Ok(Some(TagSet(vec![Tag::new("Owner", "ops")]))));
    manager.expect_get_bucket_analytics().returning(|_, _| Ok(None));
    manager.expect_get_bucket_metrics().returning(|_, _| Ok(None));

    let written = retrieve_config(&manager, "live", Some(output.as_path())).await.unwrap();
    assert_eq!(written, output);

    let reloaded = s3_manager::load_config::load_config(&output).unwrap();
    assert_eq!(reloaded.bucket_name, "live");
    assert_eq!(reloaded.region, "eu-west-1");
    assert_eq!(reloaded.settings.life_cycle_rules.unwrap().rules.len(), 1);
    assert!(reloaded.settings.bucket_security_policy.is_none());
}
