/// # s3-manager CLI Interface (Module)
///
/// Command parsing, argument validation and orchestration for the `s3-manager` binary.
///
/// All merge and apply logic (document model, reconciliation, bucket operations)
/// lives in the [`s3-manager-core`] crate. This module turns flags and files into a
/// [`BucketRequest`], picks the AWS client, and hands both to the core.
///
/// ## Features
/// - Entry struct [`Cli`] with a global `--profile` and one subcommand per action.
/// - Handlers ([`create`], [`update`], [`config`], [`retrieve_config`],
///   [`create_logging_bucket`]) generic over [`BucketManager`], so tests drive them
///   with `MockBucketManager`.
/// - Async entrypoint [`run`] for `main()` and integration tests.
///
/// [`s3-manager-core`]: ../../s3-manager-core/
use crate::aws::AwsBucketManager;
use crate::load_config::{default_output_path, load_config, load_standard_config, save_config};
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use s3_manager_core::bucket::{self, ApplyOptions, ApplyReport, CreateOutcome};
use s3_manager_core::contract::BucketManager;
use s3_manager_core::document::{BucketConfig, StandardConfig, Tag, Tagging};
use s3_manager_core::reconcile::reconcile;
use s3_manager_core::ConfigError;
use s3_manager_core::tags::{parse_tag_arg, upsert_tags};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI for s3-manager: create, update and audit S3 buckets against a standard configuration.
#[derive(Parser, Debug)]
#[clap(
    name = "s3-manager",
    version,
    about = "Create, update and audit S3 buckets against a standard configuration"
)]
pub struct Cli {
    /// AWS profile as stored in ~/.aws/credentials
    #[clap(long, short = 'p', global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a bucket and apply its configuration
    Create(BucketArgs),
    /// Apply configuration to an existing bucket
    Update(BucketArgs),
    /// Create the logging bucket for a region
    CreateLoggingBucket {
        #[clap(long, short = 'r')]
        region: String,
        /// Standard configuration to apply to the logging bucket
        #[clap(long, short = 'l')]
        standard_log_config: Option<PathBuf>,
    },
    /// Evaluate a bucket config against a standard configuration and write the result
    Config(BucketArgs),
    /// Write the live configuration of a bucket to YAML
    RetrieveConfig {
        #[clap(long, short = 'b')]
        bucket_name: String,
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Check a bucket config file against the schema
    Validate {
        #[clap(long, short = 'c')]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BucketArgs {
    /// Bucket configuration file
    #[clap(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Standard configuration to reconcile against
    #[clap(long, short = 's')]
    pub standard_config: Option<PathBuf>,
    /// Standard configuration for a logging bucket created along the way
    #[clap(long, short = 'l')]
    pub standard_log_config: Option<PathBuf>,
    /// Overrides `bucket-name` from the config file
    #[clap(long, short = 'b')]
    pub bucket_name: Option<String>,
    /// Overrides `region` from the config file
    #[clap(long, short = 'r')]
    pub region: Option<String>,
    /// Tag to apply, as key:value. Repeatable. Wins over tags in the config file.
    #[clap(long = "tag", short = 't', value_parser = parse_tag_arg)]
    pub tags: Vec<Tag>,
    /// Where to write the effective configuration (default: <bucket-name>.yml)
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Everything a create/update/config run needs, loaded from files and flags.
#[derive(Debug, Clone)]
pub struct BucketRequest {
    pub params: BucketConfig,
    pub standard: Option<StandardConfig>,
    pub standard_log: Option<StandardConfig>,
    pub output: Option<PathBuf>,
}

impl BucketRequest {
    pub fn from_args(args: &BucketArgs) -> Result<Self> {
        let mut params = match (&args.config, &args.bucket_name, &args.region) {
            (Some(path), _, _) => load_config(path)?,
            (None, Some(bucket), Some(region)) => BucketConfig::new(bucket.clone(), region.clone()),
            (None, _, _) => bail!("either --config or both --bucket-name and --region are required"),
        };
        if let Some(bucket) = &args.bucket_name {
            params.bucket_name = bucket.clone();
        }
        if let Some(region) = &args.region {
            params.region = region.clone();
        }
        if !args.tags.is_empty() {
            let tagging = params.settings.bucket_tags.get_or_insert_with(Tagging::default);
            upsert_tags(&mut tagging.tag_set, &args.tags);
        }

        let standard = args
            .standard_config
            .as_deref()
            .map(load_standard_config)
            .transpose()?;
        let standard_log = args
            .standard_log_config
            .as_deref()
            .map(load_standard_config)
            .transpose()?;

        Ok(Self {
            params,
            standard,
            standard_log,
            output: args.output.clone(),
        })
    }

    fn options(&self) -> ApplyOptions<'_> {
        ApplyOptions {
            standard: self.standard.as_ref(),
            standard_log: self.standard_log.as_ref(),
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.params.bucket_name))
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let profile = cli.profile.as_deref();
    let result = match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::CreateLoggingBucket {
            region,
            standard_log_config,
        } => {
            let standard_log = standard_log_config
                .as_deref()
                .map(load_standard_config)
                .transpose()?;
            let manager = AwsBucketManager::from_profile(profile, Some(&region)).await;
            create_logging_bucket(&manager, &region, standard_log.as_ref())
                .await
                .map(|_| ())
        }
        Commands::RetrieveConfig {
            bucket_name,
            output,
        } => {
            let manager = AwsBucketManager::from_profile(profile, None).await;
            retrieve_config(&manager, &bucket_name, output.as_deref())
                .await
                .map(|_| ())
        }
        Commands::Create(args) => {
            let request = BucketRequest::from_args(&args)?;
            let manager =
                AwsBucketManager::from_profile(profile, Some(&request.params.region)).await;
            create(&manager, &request).await.map(|_| ())
        }
        Commands::Update(args) => {
            let request = BucketRequest::from_args(&args)?;
            let manager =
                AwsBucketManager::from_profile(profile, Some(&request.params.region)).await;
            update(&manager, &request).await.map(|_| ())
        }
        Commands::Config(args) => {
            let request = BucketRequest::from_args(&args)?;
            let manager =
                AwsBucketManager::from_profile(profile, Some(&request.params.region)).await;
            config(&manager, &request).await.map(|_| ())
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

pub fn validate(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    info!(command = "validate", bucket = %config.bucket_name, "Config file is valid");
    println!("{} is valid", path.display());
    Ok(())
}

/// `None` when the bucket already existed and was left alone.
pub async fn create<M>(manager: &M, request: &BucketRequest) -> Result<Option<ApplyReport>>
where
    M: BucketManager + ?Sized,
{
    info!(command = "create", bucket = %request.params.bucket_name, "Starting create");
    match bucket::create_bucket(manager, &request.params, request.options()).await? {
        CreateOutcome::AlreadyExists => Ok(None),
        CreateOutcome::Created(report) => {
            save_if_reconciled(request, &report)?;
            info!(command = "create", applied = ?report.applied, "Bucket created");
            Ok(Some(report))
        }
    }
}

pub async fn update<M>(manager: &M, request: &BucketRequest) -> Result<ApplyReport>
where
    M: BucketManager + ?Sized,
{
    info!(command = "update", bucket = %request.params.bucket_name, "Starting update");
    let report = bucket::update_bucket(manager, &request.params, request.options()).await?;
    save_if_reconciled(request, &report)?;
    info!(command = "update", applied = ?report.applied, "Bucket updated");
    Ok(report)
}

/// Reconcile only: nothing is applied to the bucket. Returns the path written.
pub async fn config<M>(manager: &M, request: &BucketRequest) -> Result<PathBuf>
where
    M: BucketManager + ?Sized,
{
    let Some(standard) = &request.standard else {
        bail!("no standard configuration provided [--standard-config]");
    };
    let account = manager.account_id().await.map_err(|e| {
        ConfigError::collaborator("get_account_identity", &request.params.bucket_name, e)
    })?;
    let effective = reconcile(&request.params, standard, &account)?;

    let path = request.output_path();
    save_config(&path, &effective)?;
    info!(command = "config", bucket = %effective.bucket_name, output = ?path, "Effective configuration written");
    Ok(path)
}

/// Returns the path written.
pub async fn retrieve_config<M>(
    manager: &M,
    bucket_name: &str,
    output: Option<&Path>,
) -> Result<PathBuf>
where
    M: BucketManager + ?Sized,
{
    let config = bucket::retrieve_config(manager, bucket_name).await?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(bucket_name));
    save_config(&path, &config)?;
    info!(command = "retrieve-config", bucket = bucket_name, output = ?path, "Configuration retrieved");
    Ok(path)
}

pub async fn create_logging_bucket<M>(
    manager: &M,
    region: &str,
    standard_log: Option<&StandardConfig>,
) -> Result<ApplyReport>
where
    M: BucketManager + ?Sized,
{
    let report = bucket::create_logging_bucket(manager, region, standard_log).await?;
    info!(
        command = "create-logging-bucket",
        bucket = %report.bucket,
        created = report.created,
        applied = ?report.applied,
        "Logging bucket ready"
    );
    Ok(report)
}

fn save_if_reconciled(request: &BucketRequest, report: &ApplyReport) -> Result<()> {
    if request.standard.is_some() || request.output.is_some() {
        save_config(request.output_path(), &report.effective)?;
    }
    Ok(())
}
