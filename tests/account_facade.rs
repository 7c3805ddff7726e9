//! Capacity reports, votes and reward claims through the account facade.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use steem_capacity::blockchain::{
    Broadcaster, ClaimOutcome, ClientError, ComputationError, Operation, PostingKey,
    TransportError,
};
use steem_capacity::AccountFacade;

mod common;

/// Records broadcasts and fails the first `failures` of them.
#[derive(Default)]
struct RecordingBroadcaster {
    failures: u32,
    calls: AtomicU32,
    seen: Mutex<Vec<Value>>,
}

impl Broadcaster for RecordingBroadcaster {
    async fn broadcast(&self, _key: &PostingKey, operation: &Operation) -> Result<Value, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(operation.to_wire());
        if call < self.failures {
            return Err(TransportError::Status(502));
        }
        Ok(json!({ "id": "deadbeef", "block_num": 103 }))
    }
}

fn key() -> PostingKey {
    PostingKey::from_wif("5KtestKey").unwrap()
}

async fn node_for(account: Value) -> common::MockNode {
    common::start_mock_node(move |req| match req["method"].as_str() {
        Some("condenser_api.get_accounts") => {
            if req["params"][0][0] == "alice" {
                common::ok(req, json!([account.clone()]))
            } else {
                common::ok(req, json!([]))
            }
        }
        Some("rc_api.find_rc_accounts") => {
            let name = req["params"]["accounts"][0].as_str().unwrap_or_default();
            if name == "alice" {
                common::ok(req, common::rc_json(name))
            } else {
                common::ok(req, json!({ "rc_accounts": [] }))
            }
        }
        Some("condenser_api.get_dynamic_global_properties") => {
            common::ok(req, common::globals_json())
        }
        _ => (500, "unexpected".to_string()),
    })
    .await
}

#[tokio::test]
async fn test_capacity_report() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(0)).unwrap();

    let report = facade.capacity_report("alice").await.unwrap();

    assert_eq!(report.voting_power, 10_000);
    assert_eq!(report.resource_credit.ratio, 10_000);
    assert_eq!(report.resource_credit.current, 5);
    assert_eq!(report.resource_credit.max, 1_000_000);
    assert_eq!(report.stake.original, 1);
    assert_eq!(report.stake.received, 2);
    assert_eq!(report.stake.delegated, 1);
    assert_eq!(report.stake.current, 2);
    assert_eq!(report.steem_balance, 10.0);
    assert_eq!(report.sbd_balance, 2.5);

    assert_eq!(node.calls_to("condenser_api.get_accounts"), 1);
    assert_eq!(node.calls_to("rc_api.find_rc_accounts"), 1);
    assert_eq!(node.calls_to("condenser_api.get_dynamic_global_properties"), 1);
}

#[tokio::test]
async fn test_capacity_report_unknown_account() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(2)).unwrap();

    let err = facade.capacity_report("nobody").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Computation(
            ComputationError::AccountNotFound(_) | ComputationError::RcAccountNotFound(_)
        )
    ));
    // Computation failures are never retried; a sibling fetch may be cancelled early.
    assert!(node.calls_to("condenser_api.get_accounts") <= 1);
    assert!(node.calls_to("rc_api.find_rc_accounts") <= 1);
}

#[tokio::test]
async fn test_capacity_report_fails_when_one_fetch_exhausts() {
    let node = common::start_mock_node(|req| match req["method"].as_str() {
        Some("rc_api.find_rc_accounts") => (503, "down".to_string()),
        Some("condenser_api.get_accounts") => common::ok(
            req,
            json!([common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])]),
        ),
        _ => common::ok(req, common::globals_json()),
    })
    .await;
    let facade = AccountFacade::new(&node.config(1)).unwrap();

    match facade.capacity_report("alice").await.unwrap_err() {
        ClientError::RetryExhausted { label, max_retries, .. } => {
            assert_eq!(label, "find_rc_accounts");
            assert_eq!(max_retries, 1);
        }
        other => panic!("unexpected: {other}"),
    }
    assert_eq!(node.calls_to("rc_api.find_rc_accounts"), 2);
}

#[tokio::test]
async fn test_claim_with_zero_rewards_does_not_broadcast() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(0)).unwrap();
    let broadcaster = RecordingBroadcaster::default();

    let outcome = facade
        .claim_reward_balance(&broadcaster, "alice", &key())
        .await
        .unwrap();

    assert_eq!(outcome, ClaimOutcome::NothingToClaim);
    assert_eq!(broadcaster.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_claim_broadcasts_exact_reward_amounts() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.125 SBD", "1.234567 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(0)).unwrap();
    let broadcaster = RecordingBroadcaster::default();

    let outcome = facade
        .claim_reward_balance(&broadcaster, "alice", &key())
        .await
        .unwrap();

    assert!(matches!(outcome, ClaimOutcome::Claimed(_)));
    let seen = broadcaster.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        json!(["claim_reward_balance", {
            "account": "alice",
            "reward_steem": "0.000 STEEM",
            "reward_sbd": "0.125 SBD",
            "reward_vests": "1.234567 VESTS"
        }])
    );
}

#[tokio::test]
async fn test_vote_is_retried() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(3)).unwrap();
    let broadcaster = Arc::new(RecordingBroadcaster {
        failures: 2,
        ..Default::default()
    });

    let result = facade
        .api()
        .vote(broadcaster.as_ref(), &key(), "alice", "bob", "hello", 10_000)
        .await
        .unwrap();

    assert_eq!(result["block_num"], 103);
    assert_eq!(broadcaster.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_vote_exhaustion_uses_operation_label() {
    let node = node_for(common::account_json("alice", ["0.000 STEEM", "0.000 SBD", "0.000000 VESTS"])).await;
    let facade = AccountFacade::new(&node.config(1)).unwrap();
    let broadcaster = RecordingBroadcaster {
        failures: u32::MAX,
        ..Default::default()
    };

    let err = facade
        .api()
        .vote(&broadcaster, &key(), "alice", "bob", "hello", 5_000)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("vote retry over 1"));
    assert_eq!(broadcaster.calls.load(Ordering::SeqCst), 2);
}
