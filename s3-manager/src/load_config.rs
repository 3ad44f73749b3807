/// `load_config` module: reads bucket and standard configuration documents from YAML,
/// checks their shape, and writes effective documents back out.
///
/// This module is the only place where untrusted YAML is parsed and mapped to the
/// typed document model of `s3-manager-core`.
///
/// # Responsibilities
/// - Parse user-supplied YAML files into [`BucketConfig`] / [`StandardConfig`]
/// - Check the document shape before any merge runs: a bucket document needs
///   string `bucket-name` and `region`; policy and lifecycle sections must be mappings
/// - Persist effective or retrieved documents as YAML
///
/// # Errors
/// Every failure is a [`ConfigError`]: `ConfigLoad` when the file cannot be read or
/// is not YAML, `SchemaValidation` when it has the wrong shape, `ConfigWrite` on save.
use s3_manager_core::document::{BucketConfig, StandardConfig};
use s3_manager_core::ConfigError;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const REQUIRED_STRING_KEYS: [&str; 2] = ["bucket-name", "region"];
const MAPPING_KEYS: [&str; 2] = ["bucket-security-policy", "life-cycle-rules"];

/// Loads a bucket configuration document and checks it has a bucket name and region.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BucketConfig, ConfigError> {
    let path_ref = path.as_ref();
    let document = read_document(path_ref)?;
    validate_bucket_document(&document).map_err(|e| {
        error!(error = %e, config_path = ?path_ref, "Config file failed validation");
        e
    })?;
    into_typed(document, path_ref)
}

/// Loads a standard configuration. `bucket-name` and `region` are optional here.
pub fn load_standard_config<P: AsRef<Path>>(path: P) -> Result<StandardConfig, ConfigError> {
    let path_ref = path.as_ref();
    let document = read_document(path_ref)?;
    let mapping = as_mapping(&document)?;
    validate_sections(mapping).map_err(|e| {
        error!(error = %e, config_path = ?path_ref, "Standard config failed validation");
        e
    })?;
    into_typed(document, path_ref)
}

/// Writes `config` as YAML to `path`, replacing any existing file.
pub fn save_config<P: AsRef<Path>>(path: P, config: &BucketConfig) -> Result<(), ConfigError> {
    let path_ref = path.as_ref();
    let write_error = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::ConfigWrite {
        path: path_ref.to_path_buf(),
        source,
    };

    let yaml = serde_yaml::to_string(config).map_err(|e| write_error(e.into()))?;
    match fs::write(path_ref, yaml) {
        Ok(()) => {
            info!(config_path = ?path_ref, bucket = %config.bucket_name, "Config written");
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to write config file");
            Err(write_error(e.into()))
        }
    }
}

/// `<bucket-name>.yml` in the working directory.
pub fn default_output_path(bucket_name: &str) -> PathBuf {
    PathBuf::from(format!("{bucket_name}.yml"))
}

/// Checks the shape of a bucket document without deserializing it.
pub fn validate_bucket_document(document: &Value) -> Result<(), ConfigError> {
    let mapping = as_mapping(document)?;
    for key in REQUIRED_STRING_KEYS {
        match mapping.get(key) {
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ConfigError::SchemaValidation(format!(
                    "'{key}' must be a string"
                )))
            }
            None => {
                return Err(ConfigError::SchemaValidation(format!(
                    "'{key}' is a required property"
                )))
            }
        }
    }
    validate_sections(mapping)
}

fn validate_sections(mapping: &Mapping) -> Result<(), ConfigError> {
    for key in MAPPING_KEYS {
        if let Some(value) = mapping.get(key) {
            if !value.is_mapping() {
                return Err(ConfigError::SchemaValidation(format!(
                    "'{key}' must be an object"
                )));
            }
        }
    }
    Ok(())
}

fn as_mapping(document: &Value) -> Result<&Mapping, ConfigError> {
    document.as_mapping().ok_or_else(|| {
        ConfigError::SchemaValidation("config document must be a mapping".to_string())
    })
}

fn read_document(path: &Path) -> Result<Value, ConfigError> {
    info!(config_path = ?path, "Loading configuration from file");

    let config_content = match fs::read_to_string(path) {
        Ok(content) => {
            info!(config_path = ?path, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(ConfigError::ConfigLoad {
                path: path.to_path_buf(),
                source: e.into(),
            });
        }
    };

    match serde_yaml::from_str::<Value>(&config_content) {
        Ok(document) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(document)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(ConfigError::ConfigLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })
        }
    }
}

// Shape is already checked; what fails here is a wrongly typed leaf, e.g. `Days: soon`.
fn into_typed<T: DeserializeOwned>(document: Value, path: &Path) -> Result<T, ConfigError> {
    serde_yaml::from_value(document).map_err(|e| {
        error!(error = %e, config_path = ?path, "Config does not match the document model");
        ConfigError::SchemaValidation(e.to_string())
    })
}
