#![doc = "s3-manager-core: configuration reconciliation logic for s3-manager."]

//! This crate holds the document model, the merge engine that combines a
//! standard (base) configuration with a bucket-specific override, and the
//! bucket operations that push an effective configuration through a
//! [`contract::BucketManager`].
//!
//! It has no AWS SDK dependency: the CLI crate provides the real
//! `BucketManager`, tests use the generated `MockBucketManager`.
//!
//! # Usage
//! Load documents at the edge, then call [`reconcile::reconcile`] to get the
//! effective configuration, or one of the [`bucket`] operations to apply it.

pub mod bucket;
pub mod contract;
pub mod document;
pub mod error;
pub mod placeholder;
pub mod policy;
pub mod reconcile;
pub mod tags;

pub use document::{BucketConfig, BucketSettings, StandardConfig};
pub use error::ConfigError;
