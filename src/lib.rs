//! Source-share lookup for VPC file shares
//!
//! Given a replica file share id, [`share::SourceShareReader`] fetches the
//! replica's source share from the VPC API, flattens the response into a
//! schema-checked [`attributes::ResourceData`], and merges in the share's
//! user and access tags from the Global Tagging API.
//!
//! ```ignore
//! use vpcshare::api::auth::Credentials;
//! use vpcshare::api::client::VpcClient;
//! use vpcshare::api::tagging::{TaggingClient, DEFAULT_TAGGING_ENDPOINT};
//! use vpcshare::attributes::{ResourceData, Schema};
//! use vpcshare::share::SourceShareReader;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let creds = Credentials::from_env()?;
//!     let endpoint = VpcClient::regional_endpoint("us-south");
//!     let vpc = VpcClient::new(creds.clone(), &endpoint, "2024-04-30", None)?;
//!     let tags = TaggingClient::new(creds, DEFAULT_TAGGING_ENDPOINT, None)?;
//!
//!     let mut state = ResourceData::new(Schema::source_share());
//!     state.set("share_replica", "r006-0f1a")?;
//!     SourceShareReader::new(vpc, tags).read(&mut state).await?;
//!     println!("{}", state.to_json());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod attributes;
pub mod config;
pub mod error;
pub mod share;
pub mod tags;
