//! IBM Cloud API interaction module
//!
//! HTTP implementations of the collaborators the source-share reader
//! depends on.
//!
//! # Module Structure
//!
//! - [`auth`] - IAM bearer token handling
//! - [`client`] - VPC API client, implements [`crate::share::ShareSourceClient`]
//! - [`http`] - HTTP utilities for REST API calls
//! - [`tagging`] - Global Tagging client, implements [`crate::tags::TagService`]
//!
//! # Example
//!
//! ```ignore
//! use vpcshare::api::{auth::Credentials, client::VpcClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let creds = Credentials::from_env()?;
//!     let endpoint = VpcClient::regional_endpoint("us-south");
//!     let client = VpcClient::new(creds, &endpoint, "2024-04-30", None)?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod tagging;
