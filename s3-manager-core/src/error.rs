use std::path::PathBuf;

/// Boxed error returned by collaborator implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or is not valid YAML.
    #[error("failed to load config {path:?}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to write config {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The document parsed but does not have the required shape.
    #[error("config failed validation: {0}")]
    SchemaValidation(String),

    /// A statement or tag entry is missing an attribute the merge relies on.
    #[error("invalid merge input: {0}")]
    MergeInput(String),

    #[error("placeholder substitution produced an invalid document: {0}")]
    Placeholder(#[from] serde_json::Error),

    #[error("malformed tag {0:?}, expected key:value")]
    InvalidTag(String),

    #[error("bucket {0} does not exist")]
    BucketNotFound(String),

    /// A cloud call failed. The source is the collaborator's own error, unmodified.
    #[error("{operation} failed for bucket {bucket}: {source}")]
    Collaborator {
        operation: &'static str,
        bucket: String,
        #[source]
        source: BoxError,
    },
}

impl ConfigError {
    pub fn collaborator(operation: &'static str, bucket: &str, source: BoxError) -> Self {
        ConfigError::Collaborator {
            operation,
            bucket: bucket.to_string(),
            source,
        }
    }
}
