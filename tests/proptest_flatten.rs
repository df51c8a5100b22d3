//! Property-based tests using proptest
//!
//! These tests verify ordering, determinism and pass-through guarantees of
//! the flattening engine using randomized share responses.

use proptest::prelude::*;
use serde_json::{json, Value};
use vpcshare::share::flatten::{
    flatten_latest_job, flatten_reference, flatten_references, flatten_status_reasons, to_list,
};
use vpcshare::share::model::{LatestJob, MountTargetRef, ShareRef, StatusReason};

/// Generate arbitrary status reason data, known and unknown codes alike
fn arb_reason() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just("cannot_initialize_replication".to_string()),
            Just("cannot_reach_replica_share".to_string()),
            "[a-z][a-z_]{0,30}",
        ],
        "[A-Za-z ]{0,40}",
        proptest::option::of("https://[a-z]{3,10}\\.example/[a-z]{1,8}"),
    )
        .prop_map(|(code, message, more_info)| {
            let mut reason = json!({"code": code, "message": message});
            if let Some(link) = more_info {
                reason["more_info"] = json!(link);
            }
            reason
        })
}

/// Generate arbitrary reference data, sometimes carrying a deletion marker
fn arb_reference() -> impl Strategy<Value = Value> {
    (
        "r[0-9]{3}-[a-f0-9]{8}",
        "[a-z][a-z0-9-]{0,20}",
        proptest::option::of(proptest::option::of("https://[a-z]{3,10}\\.example")),
    )
        .prop_map(|(id, name, deleted)| {
            let mut reference = json!({"id": id, "name": name, "resource_type": "share_target"});
            match deleted {
                Some(Some(link)) => reference["deleted"] = json!({"more_info": link}),
                Some(None) => reference["deleted"] = json!({}),
                None => {}
            }
            reference
        })
}

/// Enumerant values, including ones no client has seen yet
fn arb_enumerant() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("running".to_string()),
        Just("succeeded".to_string()),
        Just("replication_init".to_string()),
        "[a-z][a-z_]{0,20}",
    ]
}

proptest! {
    /// N status reasons in, N records out, in the same order
    #[test]
    fn status_reasons_keep_count_and_order(raw in prop::collection::vec(arb_reason(), 0..20)) {
        let reasons: Vec<StatusReason> = serde_json::from_value(Value::Array(raw.clone())).unwrap();
        let records = flatten_status_reasons(Some(reasons.as_slice()));

        prop_assert_eq!(records.len(), raw.len());
        prop_assert_eq!(to_list(records), Value::Array(raw));
    }

    /// Mount targets keep count and order, and deletion markers survive
    #[test]
    fn mount_targets_keep_order_and_deletion(raw in prop::collection::vec(arb_reference(), 0..20)) {
        let targets: Vec<MountTargetRef> =
            serde_json::from_value(Value::Array(raw.clone())).unwrap();
        let records = flatten_references(Some(targets.as_slice()));

        prop_assert_eq!(records.len(), raw.len());
        for (record, source) in records.iter().zip(&raw) {
            prop_assert_eq!(&record["id"], &source["id"]);
            prop_assert_eq!(record.contains_key("deleted"), source.get("deleted").is_some());
            if let Some(deleted) = record.get("deleted") {
                prop_assert_eq!(deleted.as_array().map(|a| a.len()), Some(1));
            }
        }
    }

    /// Flattening the same input twice gives byte-identical output
    #[test]
    fn flattening_is_idempotent(raw in arb_reference()) {
        let reference: ShareRef = serde_json::from_value(raw).unwrap();
        let once = serde_json::to_vec(&to_list(flatten_reference(&reference))).unwrap();
        let twice = serde_json::to_vec(&to_list(flatten_reference(&reference))).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Job status and type are passed through verbatim, recognised or not
    #[test]
    fn job_enumerants_pass_through(status in arb_enumerant(), job_type in arb_enumerant()) {
        let job: LatestJob = serde_json::from_value(json!({
            "status": status,
            "type": job_type
        })).unwrap();
        let records = flatten_latest_job(&job);

        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0]["status"].as_str(), Some(status.as_str()));
        prop_assert_eq!(records[0]["type"].as_str(), Some(job_type.as_str()));
        prop_assert_eq!(&records[0]["status_reasons"], &json!([]));
    }
}
