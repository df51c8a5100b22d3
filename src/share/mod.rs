//! File share source lookup
//!
//! - [`model`] - serde types for the VPC share response
//! - [`enumerant`] - open enumerations tolerant of unknown values
//! - [`flatten`] - pure conversion of nested objects into flat records
//! - [`reader`] - the read operation tying fetch, flattening and tags together

pub mod enumerant;
pub mod flatten;
pub mod model;
pub mod reader;

use crate::error::FetchError;
use async_trait::async_trait;
use model::ShareDescription;

pub use reader::{ReadOutcome, SourceShareReader};

/// Fetches the source share of a replica share
#[async_trait]
pub trait ShareSourceClient: Send + Sync {
    async fn get_share_source(&self, share_id: &str) -> Result<ShareDescription, FetchError>;
}
