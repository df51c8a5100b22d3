//! Flattening engine
//!
//! Converts nested response objects into the container form stored in
//! [`crate::attributes::ResourceData`]: an ordered list of records, each a
//! map from a stable lowercase key to a value. Optional fields that are
//! absent are omitted from the record. Nested lists inside a record are
//! always emitted, empty when the source had none.
//!
//! Everything here is pure: no I/O, no logging, input is only borrowed.

use super::model::{DeletionMarker, LatestJob, ReferenceKind, ShareReference, StatusReason};
use serde_json::{Map, Value};

/// One flattened record
pub type Record = Map<String, Value>;

fn put(record: &mut Record, key: &str, value: impl Into<Value>) {
    record.insert(key.to_string(), value.into());
}

fn put_opt<V: Into<Value>>(record: &mut Record, key: &str, value: Option<V>) {
    if let Some(value) = value {
        put(record, key, value);
    }
}

/// Wrap records as a list value
pub fn to_list(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}

/// `latest_job` as a one-element list
pub fn flatten_latest_job(job: &LatestJob) -> Vec<Record> {
    let mut record = Record::new();
    put_opt(&mut record, "status", job.status.as_ref().map(|s| s.as_str()));
    put(
        &mut record,
        "status_reasons",
        to_list(flatten_status_reasons(job.status_reasons.as_deref())),
    );
    put_opt(&mut record, "type", job.job_type.as_ref().map(|t| t.as_str()));
    vec![record]
}

/// Status reasons, one record each, in source order
pub fn flatten_status_reasons(reasons: Option<&[StatusReason]>) -> Vec<Record> {
    reasons
        .unwrap_or_default()
        .iter()
        .map(flatten_status_reason)
        .collect()
}

fn flatten_status_reason(reason: &StatusReason) -> Record {
    let mut record = Record::new();
    put_opt(&mut record, "code", reason.code.as_deref());
    put_opt(&mut record, "message", reason.message.as_deref());
    put_opt(&mut record, "more_info", reason.more_info.as_deref());
    record
}

/// `deleted` as a one-element list; an empty marker still yields one record
pub fn flatten_deleted(marker: &DeletionMarker) -> Vec<Record> {
    let mut record = Record::new();
    put_opt(&mut record, "more_info", marker.more_info.as_deref());
    vec![record]
}

fn flatten_reference_record<K: ReferenceKind>(reference: &ShareReference<K>) -> Record {
    let mut record = Record::new();
    if K::HAS_CRN {
        put_opt(&mut record, "crn", reference.crn.as_deref());
    }
    if let Some(marker) = &reference.deleted {
        put(&mut record, "deleted", to_list(flatten_deleted(marker)));
    }
    put_opt(&mut record, "href", reference.href.as_deref());
    put_opt(&mut record, "id", reference.id.as_deref());
    put_opt(&mut record, "name", reference.name.as_deref());
    put_opt(&mut record, "resource_type", reference.resource_type.as_deref());
    record
}

/// A single reference (replica or source share) as a one-element list
pub fn flatten_reference<K: ReferenceKind>(reference: &ShareReference<K>) -> Vec<Record> {
    vec![flatten_reference_record(reference)]
}

/// A list of references (mount targets), one record each, in source order
pub fn flatten_references<K: ReferenceKind>(
    references: Option<&[ShareReference<K>]>,
) -> Vec<Record> {
    references
        .unwrap_or_default()
        .iter()
        .map(flatten_reference_record)
        .collect()
}
