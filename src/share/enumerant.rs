//! Open enumerations
//!
//! The VPC API documents its enumerated string fields as open: new values may
//! appear at any time. [`Enumerant`] keeps the raw string exactly as received
//! and offers [`Enumerant::known`] to classify it against the variants this
//! crate recognises.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// A closed set of values recognised for one open enumeration
pub trait KnownValue: Sized + Copy {
    /// Name of the field, used in log messages
    const FIELD: &'static str;

    fn parse(raw: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;
}

/// Raw enumerant string tagged with the enumeration it belongs to
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Enumerant<E> {
    raw: String,
    #[serde(skip)]
    kind: PhantomData<fn() -> E>,
}

impl<E: KnownValue> Enumerant<E> {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: PhantomData,
        }
    }

    /// The value exactly as the API returned it
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parse to a recognised variant, `None` for values newer than this crate
    pub fn known(&self) -> Option<E> {
        E::parse(&self.raw)
    }

    pub fn is_recognized(&self) -> bool {
        self.known().is_some()
    }
}

impl<E: KnownValue> From<E> for Enumerant<E> {
    fn from(value: E) -> Self {
        Self::new(value.as_str())
    }
}

impl<E> Clone for Enumerant<E> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            kind: PhantomData,
        }
    }
}

impl<E> PartialEq for Enumerant<E> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<E> Eq for Enumerant<E> {}

impl<E> fmt::Debug for Enumerant<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}

impl<E> fmt::Display for Enumerant<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

macro_rules! known_values {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl KnownValue for $name {
            const FIELD: &'static str = $field;

            fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }
    };
}

known_values! {
    /// Lifecycle state of a file share
    LifecycleState, "lifecycle_state" {
        Deleting => "deleting",
        Failed => "failed",
        Pending => "pending",
        Stable => "stable",
        Suspended => "suspended",
        Updating => "updating",
        Waiting => "waiting",
    }
}

known_values! {
    /// Replication role of a file share
    ReplicationRole, "replication_role" {
        None => "none",
        Replica => "replica",
        Source => "source",
    }
}

known_values! {
    /// Replication status of a file share
    ReplicationStatus, "replication_status" {
        Active => "active",
        FailoverPending => "failover_pending",
        Initializing => "initializing",
        None => "none",
        SplitPending => "split_pending",
    }
}

known_values! {
    /// Status of a file share job
    JobStatus, "latest_job.status" {
        Cancelled => "cancelled",
        Failed => "failed",
        Queued => "queued",
        Running => "running",
        Succeeded => "succeeded",
    }
}

known_values! {
    /// Type of a file share job
    JobType, "latest_job.type" {
        ReplicationFailover => "replication_failover",
        ReplicationInit => "replication_init",
        ReplicationSplit => "replication_split",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value_is_classified() {
        let role: Enumerant<ReplicationRole> = Enumerant::new("source");
        assert_eq!(role.known(), Some(ReplicationRole::Source));
        assert!(role.is_recognized());
    }

    #[test]
    fn test_unknown_value_is_kept_verbatim() {
        let status: Enumerant<JobStatus> = Enumerant::new("paused_for_maintenance");
        assert_eq!(status.known(), None);
        assert_eq!(status.as_str(), "paused_for_maintenance");
        assert_eq!(status.to_string(), "paused_for_maintenance");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let state: Enumerant<LifecycleState> = serde_json::from_str("\"hibernating\"").unwrap();
        assert_eq!(state.as_str(), "hibernating");
        assert!(!state.is_recognized());
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"hibernating\"");
    }

    #[test]
    fn test_from_known_variant() {
        let job_type: Enumerant<JobType> = JobType::ReplicationSplit.into();
        assert_eq!(job_type.as_str(), "replication_split");
    }
}
