use std::fs;

use serde_json::Value;
use trumigrate_lib::driver::{FileStore, MigrationArgs, run_migration};
use trumigrate_lib::error::MigrationError;
use trumigrate_lib::migrate::transform;

const GENESIS: &str = r#"{
  "genesis_time": "2019-01-15T00:00:00Z",
  "chain_id": "betanet-7",
  "consensus_params": {"block": {"max_bytes": "22020096", "max_gas": "-1"}},
  "app_state": {
    "distribution": {"community_tax": "0.500000000000000000", "withdraw_addr_enabled": true},
    "account": {"params": {"user_growth_allocation": "0.333333333333333333", "stakeholder_allocation": "0.333333333333333333"}},
    "trustaking": {"params": {"user_reward_allocation": "0.333333333333333333"}},
    "accounts": [
      {"address": "cosmos1xqc5gwzpg3fyv5en2fzyx36z2se5ks33tt57e7", "coins": [{"denom": "tru", "amount": "1000"}]}
    ],
    "staking": {"pool": {"bonded_tokens": "0"}}
  }
}"#;

#[test]
fn integration_migrate_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("genesis.json");
    let output = dir.path().join("new-genesis.json");
    fs::write(&input, GENESIS).expect("write input");

    let mut store = FileStore::new(&input, &output);
    run_migration(&mut store, &MigrationArgs::default(), transform).expect("migrate");

    let out: Value = serde_json::from_str(&fs::read_to_string(&output).expect("read output"))
        .expect("output json");
    let app = &out["app_state"];
    assert_eq!(out["chain_id"], "devnet-n");
    assert_eq!(out["genesis_time"], "2019-02-11T12:00:00Z");
    assert_eq!(app["distribution"]["community_tax"], "0.800000000000000000");
    assert_eq!(app["distribution"]["withdraw_addr_enabled"], true);
    assert_eq!(app["staking"]["pool"]["bonded_tokens"], "0");
    assert_eq!(out["consensus_params"]["block"]["max_gas"], "-1");

    let accounts = app["accounts"].as_array().expect("accounts");
    assert_eq!(accounts.len(), 5);
    assert_eq!(accounts[0]["address"], "cosmos1xqc5gwzpg3fyv5en2fzyx36z2se5ks33tt57e7");
    assert!(accounts[0].get("module_name").is_none());

    let expected = [
        ("fee_collector", "cosmos17xpfvakm2amg962yls6f84z3kell8c5lserqta", "0"),
        ("user_reward_tokens_pool", "cosmos1ed82m7snyk8mux8xxpwygvtyq633a4k43rfp8l", "2500000"),
        ("user_growth_tokens_pool", "cosmos1f7x5wx3adh6klcurmd8n36etx4elgu9d4wkys3", "2500000"),
        ("stakeholder_tokens_pool", "cosmos1m9rhdryf059x684um3pa9n30tsdxuww84pxemz", "0"),
    ];
    for (acc, (name, addr, amount)) in accounts[1..].iter().zip(expected) {
        assert_eq!(acc["module_name"], name);
        assert_eq!(acc["address"], addr);
        assert_eq!(acc["coins"][0]["denom"], "tru");
        assert_eq!(acc["coins"][0]["amount"], amount);
        assert_eq!(acc["module_permissions"], Value::Array(vec![]));
    }
}

#[test]
fn integration_missing_section_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("genesis.json");
    let output = dir.path().join("new-genesis.json");
    let mut doc: Value = serde_json::from_str(GENESIS).expect("json");
    doc["app_state"]
        .as_object_mut()
        .expect("app_state")
        .remove("trustaking");
    fs::write(&input, doc.to_string()).expect("write input");

    let mut store = FileStore::new(&input, &output);
    let err = run_migration(&mut store, &MigrationArgs::default(), transform).unwrap_err();
    assert!(matches!(err, MigrationError::MissingPath(_)));
    assert!(!output.exists());
}

#[test]
fn integration_missing_input_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path().join("nope.json"), dir.path().join("out.json"));
    let err = run_migration(&mut store, &MigrationArgs::default(), transform).unwrap_err();
    assert!(matches!(err, MigrationError::Io { .. }));
}
