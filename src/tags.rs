//! Tag augmentation
//!
//! User tags and access-management tags live in the Global Tagging service,
//! keyed by the resource CRN. Both lookups are best-effort: a failure is
//! logged and the affected set comes back empty.

use crate::error::TagError;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;

/// Attribute holding user tags
pub const TAGS_ATTRIBUTE: &str = "tags";
/// Attribute holding access-management tags
pub const ACCESS_TAGS_ATTRIBUTE: &str = "access_tags";

/// Tag namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    User,
    Access,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Access => "access",
        }
    }
}

/// Source of tags attached to a resource
#[async_trait]
pub trait TagService: Send + Sync {
    async fn list_tags(&self, crn: &str, tag_type: TagType) -> Result<BTreeSet<String>, TagError>;
}

/// Both tag namespaces for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    pub user: BTreeSet<String>,
    pub access: BTreeSet<String>,
}

/// Look up user and access tags concurrently.
///
/// `resource_id` only labels log lines. Each lookup is bounded by `timeout`
/// when given; a lookup that fails or times out contributes an empty set.
pub async fn fetch_tags<T>(
    service: &T,
    crn: &str,
    resource_id: &str,
    timeout: Option<Duration>,
) -> TagSet
where
    T: TagService + ?Sized,
{
    let (user, access) = futures::future::join(
        lookup(service, crn, TagType::User, timeout),
        lookup(service, crn, TagType::Access, timeout),
    )
    .await;

    let user = user.unwrap_or_else(|e| {
        tracing::warn!("Error getting shares ({}) tags: {}", resource_id, e);
        BTreeSet::new()
    });
    let access = access.unwrap_or_else(|e| {
        tracing::warn!("Error getting shares ({}) access tags: {}", resource_id, e);
        BTreeSet::new()
    });

    tracing::debug!(
        "Tags for {}: {} user, {} access",
        resource_id,
        user.len(),
        access.len()
    );

    TagSet { user, access }
}

async fn lookup<T>(
    service: &T,
    crn: &str,
    tag_type: TagType,
    timeout: Option<Duration>,
) -> Result<BTreeSet<String>, TagError>
where
    T: TagService + ?Sized,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, service.list_tags(crn, tag_type))
            .await
            .unwrap_or(Err(TagError::Timeout)),
        None => service.list_tags(crn, tag_type).await,
    }
}
