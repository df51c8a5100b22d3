//! VPC Client
//!
//! Client for the VPC regional API, combining credentials and HTTP
//! functionality.

use super::auth::Credentials;
use super::http::{ApiHttpClient, RequestError};
use crate::error::FetchError;
use crate::share::model::ShareDescription;
use crate::share::ShareSourceClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Default VPC API version date sent with every request
pub const DEFAULT_API_VERSION: &str = "2024-04-30";

/// VPC API generation (VPC infrastructure, not Classic)
const API_GENERATION: &str = "2";

/// Main VPC client
#[derive(Clone, Debug)]
pub struct VpcClient {
    credentials: Credentials,
    http: ApiHttpClient,
    endpoint: String,
    api_version: String,
}

impl VpcClient {
    /// Create a new VPC client for an endpoint such as `https://us-south.iaas.cloud.ibm.com`
    pub fn new(
        credentials: Credentials,
        endpoint: &str,
        api_version: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http = ApiHttpClient::new(timeout).context("Failed to initialize VPC HTTP client")?;

        Ok(Self {
            credentials,
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
        })
    }

    /// Regional endpoint for a region name
    pub fn regional_endpoint(region: &str) -> String {
        format!("https://{}.iaas.cloud.ibm.com", region)
    }

    /// Build VPC API URL
    pub fn vpc_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.endpoint, path)
    }

    /// Build the source-share URL for a replica share
    pub fn share_source_url(&self, share_id: &str) -> String {
        self.vpc_url(&format!("shares/{}/source", urlencoding::encode(share_id)))
    }
}

#[async_trait]
impl ShareSourceClient for VpcClient {
    async fn get_share_source(&self, share_id: &str) -> Result<ShareDescription, FetchError> {
        let url = self.share_source_url(share_id);
        let query = [
            ("version", self.api_version.as_str()),
            ("generation", API_GENERATION),
        ];

        let body = self
            .http
            .get(&url, self.credentials.token(), &query)
            .await
            .map_err(|e| match e {
                RequestError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
                    FetchError::NotFound
                }
                RequestError::Status { status, message } => FetchError::Api {
                    status: status.as_u16(),
                    message,
                },
                RequestError::Transport(msg) => FetchError::Transport(msg),
                RequestError::Decode(msg) => FetchError::InvalidResponse(msg),
            })?;

        serde_json::from_value(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
