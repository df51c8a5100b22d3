//! Global Tagging client
//!
//! Lists the tags attached to a resource CRN, one tag type at a time.

use super::auth::Credentials;
use super::http::{ApiHttpClient, RequestError};
use crate::error::TagError;
use crate::tags::{TagService, TagType};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default Global Tagging endpoint
pub const DEFAULT_TAGGING_ENDPOINT: &str = "https://tags.global-search-tagging.cloud.ibm.com";

/// Page size for tag listing (service maximum)
const PAGE_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
struct TagPage {
    #[serde(default)]
    total_count: Option<usize>,
    #[serde(default)]
    items: Vec<TagItem>,
}

#[derive(Debug, Deserialize)]
struct TagItem {
    name: String,
}

/// Client for the Global Tagging API
#[derive(Clone, Debug)]
pub struct TaggingClient {
    credentials: Credentials,
    http: ApiHttpClient,
    endpoint: String,
}

impl TaggingClient {
    pub fn new(
        credentials: Credentials,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http =
            ApiHttpClient::new(timeout).context("Failed to initialize tagging HTTP client")?;

        Ok(Self {
            credentials,
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build the tag listing URL
    pub fn tags_url(&self) -> String {
        format!("{}/v3/tags", self.endpoint)
    }

    async fn fetch_page(
        &self,
        crn: &str,
        tag_type: TagType,
        offset: usize,
    ) -> std::result::Result<TagPage, TagError> {
        let offset = offset.to_string();
        let limit = PAGE_LIMIT.to_string();
        let query = [
            ("attached_to", crn),
            ("tag_type", tag_type.as_str()),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
        ];

        let body = self
            .http
            .get(&self.tags_url(), self.credentials.token(), &query)
            .await
            .map_err(|e| match e {
                RequestError::Status { status, message } => TagError::Api {
                    status: status.as_u16(),
                    message,
                },
                RequestError::Transport(msg) => TagError::Transport(msg),
                RequestError::Decode(msg) => TagError::InvalidResponse(msg),
            })?;

        serde_json::from_value(body).map_err(|e| TagError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TagService for TaggingClient {
    /// Fetch all tags of one type (auto-paginate)
    async fn list_tags(
        &self,
        crn: &str,
        tag_type: TagType,
    ) -> std::result::Result<BTreeSet<String>, TagError> {
        let mut tags = BTreeSet::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(crn, tag_type, offset).await?;
            let received = page.items.len();
            offset += received;
            tags.extend(page.items.into_iter().map(|item| item.name));

            let exhausted = match page.total_count {
                Some(total) => offset >= total,
                None => received < PAGE_LIMIT,
            };
            if exhausted || received == 0 {
                break;
            }
        }

        tracing::debug!("Listed {} {} tags for {}", tags.len(), tag_type.as_str(), crn);
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_url() {
        let creds = Credentials::new("token").unwrap();
        let client = TaggingClient::new(creds, "https://tags.example.com/", None).unwrap();
        assert_eq!(client.tags_url(), "https://tags.example.com/v3/tags");
    }

    #[test]
    fn test_page_without_total_count() {
        let page: TagPage = serde_json::from_str(r#"{"items":[{"name":"env:prod"}]}"#).unwrap();
        assert!(page.total_count.is_none());
        assert_eq!(page.items[0].name, "env:prod");
    }
}
