//! Source share read
//!
//! [`SourceShareReader::read`] takes the `share_replica` input from a
//! [`ResourceData`], fetches the replica's source share, flattens it into the
//! data's attributes and merges in its tags.
//!
//! All work happens on a staged copy of the data; the caller's state is only
//! replaced once every assignment succeeded.

use super::enumerant::{Enumerant, KnownValue};
use super::flatten::{
    flatten_latest_job, flatten_reference, flatten_references, flatten_status_reasons, to_list,
};
use super::model::{ReferenceKind, ShareDescription, ShareReference};
use super::ShareSourceClient;
use crate::attributes::ResourceData;
use crate::error::{FetchError, ReadError};
use crate::tags::{fetch_tags, TagService, TagSet, ACCESS_TAGS_ATTRIBUTE, TAGS_ATTRIBUTE};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Duration;

/// Input attribute naming the replica share
pub const SHARE_REPLICA_ATTRIBUTE: &str = "share_replica";

/// Successful result of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The source share was found and the state populated
    Found,
    /// The API reported no such share; the identity was cleared
    NotFound,
}

/// Reads the source share of a replica share into a [`ResourceData`]
pub struct SourceShareReader<C, T> {
    client: C,
    tags: T,
    timeout: Option<Duration>,
}

impl<C, T> SourceShareReader<C, T>
where
    C: ShareSourceClient,
    T: TagService,
{
    pub fn new(client: C, tags: T) -> Self {
        Self {
            client,
            tags,
            timeout: None,
        }
    }

    /// Bound the share fetch and each tag lookup
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn read(&self, state: &mut ResourceData) -> Result<ReadOutcome, ReadError> {
        let replica_id = state
            .get_str(SHARE_REPLICA_ATTRIBUTE)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if replica_id.is_empty() {
            return Err(ReadError::MissingShareReplica);
        }

        let share = match self.fetch(&replica_id).await {
            Ok(share) => share,
            Err(FetchError::NotFound) => {
                tracing::debug!("Source share for replica {} not found", replica_id);
                state.set_id("");
                return Ok(ReadOutcome::NotFound);
            }
            Err(e) => {
                tracing::debug!("GetShareSource for replica {} failed: {}", replica_id, e);
                return Err(e.into());
            }
        };

        log_unrecognized(&share);

        let mut staged = state.clone();
        staged.clear_computed();
        staged.set_id(share.id.as_str());
        assign_share(&mut staged, &share)?;

        let tags = match share.crn.as_deref() {
            Some(crn) => fetch_tags(&self.tags, crn, &share.id, self.timeout).await,
            None => {
                tracing::warn!("Share {} has no CRN, skipping tag lookup", share.id);
                TagSet::default()
            }
        };
        assign_tags(&mut staged, tags);

        *state = staged;
        tracing::info!("Read source share {} for replica {}", share.id, replica_id);
        Ok(ReadOutcome::Found)
    }

    async fn fetch(&self, replica_id: &str) -> Result<ShareDescription, FetchError> {
        let request = self.client.get_share_source(replica_id);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.unwrap_or_else(|_| {
                Err(FetchError::Transport(format!(
                    "request timed out after {}ms",
                    limit.as_millis()
                )))
            }),
            None => request.await,
        }
    }
}

fn assign(
    data: &mut ResourceData,
    field: &'static str,
    value: impl Into<Value>,
) -> Result<(), ReadError> {
    data.set(field, value)
        .map_err(|source| ReadError::FieldAssignment { field, source })
}

fn assign_share(data: &mut ResourceData, share: &ShareDescription) -> Result<(), ReadError> {
    if let Some(created_at) = share.created_at.as_deref() {
        assign(data, "created_at", format_timestamp(created_at))?;
    }
    if let Some(crn) = share.crn.as_deref() {
        assign(data, "crn", crn)?;
    }
    if let Some(encryption) = share.encryption.as_deref() {
        assign(data, "encryption", encryption)?;
    }
    if let Some(key) = share.encryption_key.as_ref().and_then(|k| k.crn.as_deref()) {
        assign(data, "encryption_key", key)?;
    }
    if let Some(href) = share.href.as_deref() {
        assign(data, "href", href)?;
    }
    if let Some(iops) = share.iops {
        assign(data, "iops", iops)?;
    }
    if let Some(job) = &share.latest_job {
        assign(data, "latest_job", to_list(flatten_latest_job(job)))?;
    }
    if let Some(state) = &share.lifecycle_state {
        assign(data, "lifecycle_state", state.as_str())?;
    }
    if let Some(name) = share.name.as_deref() {
        assign(data, "name", name)?;
    }
    if let Some(profile) = share.profile.as_ref().and_then(|p| p.name.as_deref()) {
        assign(data, "profile", profile)?;
    }
    if let Some(replica) = &share.replica_share {
        assign(data, "replica_share", to_list(flatten_reference(replica)))?;
    }
    if let Some(cron_spec) = share.replication_cron_spec.as_deref() {
        assign(data, "replication_cron_spec", cron_spec)?;
    }
    if let Some(role) = &share.replication_role {
        assign(data, "replication_role", role.as_str())?;
    }
    if let Some(status) = &share.replication_status {
        assign(data, "replication_status", status.as_str())?;
    }
    if let Some(reasons) = share.replication_status_reasons.as_deref() {
        assign(
            data,
            "replication_status_reasons",
            to_list(flatten_status_reasons(Some(reasons))),
        )?;
    }
    if let Some(group) = share.resource_group.as_ref().and_then(|g| g.id.as_deref()) {
        assign(data, "resource_group", group)?;
    }
    if let Some(resource_type) = share.resource_type.as_deref() {
        assign(data, "resource_type", resource_type)?;
    }
    if let Some(size) = share.size {
        assign(data, "size", size)?;
    }
    if let Some(source) = &share.source_share {
        assign(data, "source_share", to_list(flatten_reference(source)))?;
    }
    if let Some(targets) = share.mount_targets.as_deref() {
        assign(data, "share_targets", to_list(flatten_references(Some(targets))))?;
    }
    if let Some(zone) = share.zone.as_ref().and_then(|z| z.name.as_deref()) {
        assign(data, "zone", zone)?;
    }
    Ok(())
}

/// Store both tag sets; a failure here is logged like a failed lookup
fn assign_tags(data: &mut ResourceData, tags: TagSet) {
    for (field, set) in [(TAGS_ATTRIBUTE, tags.user), (ACCESS_TAGS_ATTRIBUTE, tags.access)] {
        if let Err(e) = data.set(field, set_value(set)) {
            tracing::warn!("Error setting {} on share {}: {}", field, data.id(), e);
        }
    }
}

fn set_value(set: BTreeSet<String>) -> Value {
    Value::Array(set.into_iter().map(Value::String).collect())
}

/// Render a timestamp as RFC 3339 UTC with millisecond precision.
/// Values that do not parse are kept as received.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn warn_unrecognized<E: KnownValue>(share_id: &str, value: Option<&Enumerant<E>>) {
    if let Some(value) = value {
        if !value.is_recognized() {
            tracing::warn!(
                "Share {} has unrecognized {} value {:?}",
                share_id,
                E::FIELD,
                value.as_str()
            );
        }
    }
}

fn debug_deleted<K: ReferenceKind>(share_id: &str, field: &str, reference: &ShareReference<K>) {
    if reference.is_deleted() {
        tracing::debug!(
            "Share {} {} references deleted {} {}",
            share_id,
            field,
            K::KIND,
            reference.id.as_deref().unwrap_or("-")
        );
    }
}

/// Log enumerant values newer than this crate and references to deleted entities
fn log_unrecognized(share: &ShareDescription) {
    let id = share.id.as_str();
    warn_unrecognized(id, share.lifecycle_state.as_ref());
    warn_unrecognized(id, share.replication_role.as_ref());
    warn_unrecognized(id, share.replication_status.as_ref());
    if let Some(job) = &share.latest_job {
        warn_unrecognized(id, job.status.as_ref());
        warn_unrecognized(id, job.job_type.as_ref());
    }

    if let Some(replica) = &share.replica_share {
        debug_deleted(id, "replica_share", replica);
    }
    if let Some(source) = &share.source_share {
        debug_deleted(id, "source_share", source);
    }
    for target in share.mount_targets.iter().flatten() {
        debug_deleted(id, "share_targets", target);
    }
}
