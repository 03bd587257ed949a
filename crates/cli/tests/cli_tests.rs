use std::path::Path;

use tempfile::tempdir;
use ultranode_cli::commands::{generate, inspect, state, verify};
use ultranode_cli::hexutil::join_hex;
use ultranode_kernel::types::account::InitParams;
use ultranode_kernel::types::enums::HashKind;
use ultranode_kernel::types::id::Identity;
use ultranode_node::config::NodeConfig;
use ultranode_node::engine::Engine;

const ADMIN: Identity = Identity([0xAA; 32]);
const ALICE: Identity = Identity([1; 32]);

/// Writes events.log and state.snapshot into `dir`: snapshot after three
/// events, two uptime ticks after it.
fn write_fixture(dir: &Path) {
    let cfg = NodeConfig {
        event_log_path: Some(dir.join(inspect::EVENT_LOG_FILE)),
        snapshot_path: Some(dir.join(inspect::SNAPSHOT_FILE)),
        ..Default::default()
    };
    let mut engine = Engine::open(&cfg).unwrap();
    engine.initialize(ADMIN, ADMIN, InitParams::default()).unwrap();

    let proof = generate::generate(HashKind::Sha256, "tx1,tx2,tx3,tx4", 3).unwrap();
    engine.publish_root(ALICE, proof.root, 1, ALICE).unwrap();
    engine
        .submit_proof(ALICE, proof.leaf, proof.root, proof.index, proof.path, ALICE)
        .unwrap();
    engine.save_snapshot(None).unwrap();

    engine.record_uptime(ALICE, ALICE).unwrap();
    engine.record_uptime(ALICE, ALICE).unwrap();
}

#[test]
fn test_generate_then_verify() {
    for (kind, name) in [(HashKind::Sha256, "sha256"), (HashKind::Blake3, "blake3")] {
        let proof = generate::generate(kind, "a,b,c", 1).unwrap();
        assert_eq!(proof.path.len(), 2);

        let valid = verify::check(
            kind,
            &hex::encode(proof.leaf),
            &hex::encode(proof.root),
            &join_hex(&proof.path),
            1,
        )
        .unwrap();
        assert!(valid, "round trip failed for {}", name);

        // Wrong position.
        let valid = verify::check(
            kind,
            &hex::encode(proof.leaf),
            &hex::encode(proof.root),
            &join_hex(&proof.path),
            0,
        )
        .unwrap();
        assert!(!valid);
    }
}

#[test]
fn test_generate_out_of_range() {
    assert!(generate::generate(HashKind::Sha256, "a,b,c", 3).is_err());
}

#[test]
fn test_dummy_proof_invalid() {
    let leaf = hex::encode([1u8; 32]);
    let root = hex::encode([2u8; 32]);
    let path = hex::encode([3u8; 32]);
    assert!(!verify::check(HashKind::Sha256, &leaf, &root, &path, 0).unwrap());
}

#[test]
fn test_verify_rejects_bad_hex() {
    assert!(verify::check(HashKind::Sha256, "zz", &hex::encode([0u8; 32]), "", 0).is_err());
}

#[test]
fn test_inspect_dir() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    assert!(inspect::run(Some(dir.path().to_path_buf()), None, None, true).is_ok());

    // Missing files are reported, not errors.
    let empty = tempdir().unwrap();
    assert!(inspect::run(Some(empty.path().to_path_buf()), None, None, false).is_ok());
}

#[test]
fn test_state_rebuild_points() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let log = dir.path().join(inspect::EVENT_LOG_FILE);
    let snap = dir.path().join(inspect::SNAPSHOT_FILE);

    let full = state::rebuild(None, &log, None).unwrap();
    assert_eq!(full.version(), 5);
    assert_eq!(full.get_node(&ALICE).unwrap().uptime, 2);

    let from_snapshot = state::rebuild(Some(&snap), &log, None).unwrap();
    assert_eq!(from_snapshot, full);

    let early = state::rebuild(None, &log, Some(2)).unwrap();
    assert_eq!(early.version(), 2);
    assert_eq!(early.registry().len(), 1);
    assert!(early.get_node(&ALICE).is_none());

    // Snapshot is past the requested point.
    assert!(state::rebuild(Some(&snap), &log, Some(2)).is_err());
    // Beyond the log.
    assert!(state::rebuild(None, &log, Some(6)).is_err());

    assert!(state::run(Some(&snap), &log, None).is_ok());
}
