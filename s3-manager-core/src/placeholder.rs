//! Placeholder substitution for standard configuration templates.
//!
//! Standard configs name buckets and accounts through well-known tokens.
//! Substitution is textual over the serialized document; tokens that contain
//! another token as a substring are replaced first.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConfigError;

pub const STANDARD_LOGGING_BUCKET_NAME: &str = "STANDARD-CONFIG-LOGGING-BUCKET-NAME";
pub const STANDARD_BUCKET_NAME: &str = "STANDARD-CONFIG-BUCKET-NAME";
pub const STANDARD_ACCOUNT_ID: &str = "STANDARD-CONFIG-ACCOUNT-ID";
pub const LOGGING_BUCKET_NAME: &str = "LOGGING-BUCKET-NAME";
pub const BUCKET_NAME: &str = "BUCKET-NAME";

/// Name of the per-region bucket that receives access logs.
pub fn logging_bucket_name(account_id: &str, region: &str) -> String {
    format!("{account_id}-bucket-logs-{region}")
}

/// Concrete values for the tokens of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub bucket_name: String,
    pub logging_bucket_name: String,
    pub account_id: String,
}

impl Placeholders {
    pub fn new(
        bucket_name: impl Into<String>,
        logging_bucket_name: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Placeholders {
            bucket_name: bucket_name.into(),
            logging_bucket_name: logging_bucket_name.into(),
            account_id: account_id.into(),
        }
    }

    /// Values for a bucket in `region`, with the logging bucket derived from
    /// the account.
    pub fn for_bucket(bucket_name: &str, region: &str, account_id: &str) -> Self {
        Placeholders::new(
            bucket_name,
            logging_bucket_name(account_id, region),
            account_id,
        )
    }

    // Longest token first: BUCKET-NAME is a suffix of three other tokens.
    fn replacements(&self) -> [(&'static str, &str); 5] {
        [
            (STANDARD_LOGGING_BUCKET_NAME, &self.logging_bucket_name),
            (STANDARD_BUCKET_NAME, &self.bucket_name),
            (STANDARD_ACCOUNT_ID, &self.account_id),
            (LOGGING_BUCKET_NAME, &self.logging_bucket_name),
            (BUCKET_NAME, &self.bucket_name),
        ]
    }

    /// Replace every token in plain text.
    pub fn substitute(&self, text: &str) -> String {
        self.replacements()
            .iter()
            .fold(text.to_string(), |acc, (token, value)| {
                acc.replace(token, value)
            })
    }

    /// Replace every token inside a serializable value and read it back.
    ///
    /// Replacement values are JSON-escaped, so a value can never break out of
    /// the string it lands in.
    pub fn render<T>(&self, value: &T) -> Result<T, ConfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        let serialized = serde_json::to_string(value)?;
        let rendered = self
            .replacements()
            .iter()
            .try_fold(serialized, |acc, (token, value)| {
                escape_json(value).map(|escaped| acc.replace(token, &escaped))
            })?;
        Ok(serde_json::from_str(&rendered)?)
    }
}

fn escape_json(value: &str) -> Result<String, serde_json::Error> {
    let quoted = serde_json::to_string(value)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{LoggingEnabled, LoggingRules};

    fn placeholders() -> Placeholders {
        Placeholders::new("my-bucket", "123456789012-bucket-logs-eu-west-1", "123456789012")
    }

    #[test]
    fn longer_tokens_are_not_clobbered_by_bucket_name() {
        let text = "STANDARD-CONFIG-LOGGING-BUCKET-NAME STANDARD-CONFIG-BUCKET-NAME LOGGING-BUCKET-NAME BUCKET-NAME";
        assert_eq!(
            placeholders().substitute(text),
            "123456789012-bucket-logs-eu-west-1 my-bucket 123456789012-bucket-logs-eu-west-1 my-bucket"
        );
    }

    #[test]
    fn account_id_is_substituted() {
        assert_eq!(
            placeholders().substitute("arn:aws:iam::STANDARD-CONFIG-ACCOUNT-ID:root"),
            "arn:aws:iam::123456789012:root"
        );
    }

    #[test]
    fn render_replaces_inside_nested_values() {
        let rules = LoggingRules {
            logging_enabled: Some(LoggingEnabled {
                target_bucket: "LOGGING-BUCKET-NAME".into(),
                target_prefix: "BUCKET-NAME/".into(),
            }),
        };
        let rendered = placeholders().render(&rules).unwrap();
        let enabled = rendered.logging_enabled.unwrap();
        assert_eq!(enabled.target_bucket, "123456789012-bucket-logs-eu-west-1");
        assert_eq!(enabled.target_prefix, "my-bucket/");
    }

    #[test]
    fn render_escapes_replacement_values() {
        let odd = Placeholders::new("quote\"bucket", "logs", "1");
        let rendered: String = odd.render(&"BUCKET-NAME".to_string()).unwrap();
        assert_eq!(rendered, "quote\"bucket");
    }

    #[test]
    fn logging_bucket_name_is_account_and_region() {
        assert_eq!(
            logging_bucket_name("111122223333", "us-east-1"),
            "111122223333-bucket-logs-us-east-1"
        );
    }
}
