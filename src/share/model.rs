//! Share response model
//!
//! Serde types for the body of `GET /v1/shares/{id}/source`. Only the share's
//! `id` is mandatory; every other field, nested ones included, is an `Option`
//! so a sparse or newer response still decodes.

use super::enumerant::{
    Enumerant, JobStatus, JobType, LifecycleState, ReplicationRole, ReplicationStatus,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// File share as described by the VPC API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareDescription {
    pub id: String,
    #[serde(default)]
    pub crn: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub iops: Option<i64>,
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(default)]
    pub encryption_key: Option<EncryptionKeyRef>,
    #[serde(default)]
    pub lifecycle_state: Option<Enumerant<LifecycleState>>,
    #[serde(default)]
    pub latest_job: Option<LatestJob>,
    #[serde(default)]
    pub profile: Option<NamedRef>,
    #[serde(default)]
    pub zone: Option<NamedRef>,
    #[serde(default)]
    pub resource_group: Option<ResourceGroupRef>,
    #[serde(default)]
    pub replica_share: Option<ShareRef>,
    #[serde(default)]
    pub source_share: Option<ShareRef>,
    #[serde(default)]
    pub replication_cron_spec: Option<String>,
    #[serde(default)]
    pub replication_role: Option<Enumerant<ReplicationRole>>,
    #[serde(default)]
    pub replication_status: Option<Enumerant<ReplicationStatus>>,
    #[serde(default)]
    pub replication_status_reasons: Option<Vec<StatusReason>>,
    #[serde(default)]
    pub mount_targets: Option<Vec<MountTargetRef>>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Most recent job run against a share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestJob {
    #[serde(default)]
    pub status: Option<Enumerant<JobStatus>>,
    #[serde(default, rename = "type")]
    pub job_type: Option<Enumerant<JobType>>,
    #[serde(default)]
    pub status_reasons: Option<Vec<StatusReason>>,
}

/// Structured diagnostic attached to a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReason {
    /// Open-ended snake_case code, passed through as received
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Marker present on a reference whose target has been deleted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionMarker {
    #[serde(default)]
    pub more_info: Option<String>,
}

/// The kind of entity a [`ShareReference`] points at
pub trait ReferenceKind {
    /// Name used in log messages
    const KIND: &'static str;
    /// Whether references of this kind carry a CRN
    const HAS_CRN: bool;
}

/// Reference to another file share
#[derive(Debug, Clone, Copy)]
pub enum FileShare {}

impl ReferenceKind for FileShare {
    const KIND: &'static str = "share";
    const HAS_CRN: bool = true;
}

/// Reference to a share mount target
#[derive(Debug, Clone, Copy)]
pub enum MountTarget {}

impl ReferenceKind for MountTarget {
    const KIND: &'static str = "share_mount_target";
    const HAS_CRN: bool = false;
}

/// Weak reference to another entity; never implies ownership
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ShareReference<K> {
    #[serde(default)]
    pub crn: Option<String>,
    #[serde(default)]
    pub deleted: Option<DeletionMarker>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(skip)]
    kind: PhantomData<fn() -> K>,
}

pub type ShareRef = ShareReference<FileShare>;
pub type MountTargetRef = ShareReference<MountTarget>;

impl<K: ReferenceKind> ShareReference<K> {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            crn: None,
            deleted: None,
            href: None,
            id: Some(id.into()),
            name: Some(name.into()),
            resource_type: Some(K::KIND.to_string()),
            kind: PhantomData,
        }
    }

    /// The referenced entity has been confirmed deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}

impl<K> Clone for ShareReference<K> {
    fn clone(&self) -> Self {
        Self {
            crn: self.crn.clone(),
            deleted: self.deleted.clone(),
            href: self.href.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            resource_type: self.resource_type.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> PartialEq for ShareReference<K> {
    fn eq(&self, other: &Self) -> bool {
        self.crn == other.crn
            && self.deleted == other.deleted
            && self.href == other.href
            && self.id == other.id
            && self.name == other.name
            && self.resource_type == other.resource_type
    }
}

impl<K: ReferenceKind> fmt::Debug for ShareReference<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareReference")
            .field("kind", &K::KIND)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("crn", &self.crn)
            .field("href", &self.href)
            .field("resource_type", &self.resource_type)
            .field("deleted", &self.deleted)
            .finish()
    }
}

/// Reference projected by its name (profile, zone)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Resource group reference, projected by its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Root key reference, projected by its CRN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKeyRef {
    #[serde(default)]
    pub crn: Option<String>,
}
