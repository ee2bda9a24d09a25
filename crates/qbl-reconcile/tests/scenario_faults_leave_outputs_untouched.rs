//! Scenario: fatal conditions abort before either output is written.
//!
//! 1. Missing merged log.
//! 2. Malformed transaction line (blank lines included).
//! 3. Malformed master line.
//! 4. Unknown event under the default policy.
//! 5. A create naming the snapshot terminator.
//!
//! And the skip policy turns (4) into a warning.

use std::fs;

use qbl_reconcile::{MissingEventPolicy, ReconcileError, ReconcileOptions, Reconciler, RunFiles};

const MASTER: &str = "160201 00010 Concert             \n";
const SNAPSHOT: &str = "stale snapshot";

fn setup(merged: Option<&str>, master: &str) -> (tempfile::TempDir, RunFiles) {
    let dir = tempfile::tempdir().unwrap();
    let files = RunFiles::in_dir(dir.path());
    fs::write(&files.master_events, master).unwrap();
    fs::write(&files.current_events, SNAPSHOT).unwrap();
    if let Some(merged) = merged {
        fs::write(&files.merged_transactions, merged).unwrap();
    }
    (dir, files)
}

fn opts() -> ReconcileOptions {
    ReconcileOptions::new("160101".parse().unwrap())
}

fn assert_untouched(files: &RunFiles, master: &str) {
    assert_eq!(fs::read_to_string(&files.master_events).unwrap(), master);
    assert_eq!(fs::read_to_string(&files.current_events).unwrap(), SNAPSHOT);
}

#[test]
fn scenario_missing_merged_log_is_fatal() {
    let (_dir, files) = setup(None, MASTER);
    let err = Reconciler::new(files.clone(), opts()).run().unwrap_err();
    assert!(matches!(err, ReconcileError::MissingTransactions { .. }));
    assert_untouched(&files, MASTER);
}

#[test]
fn scenario_malformed_transaction_is_fatal() {
    let merged = "01 Concert              000000 00001\n\n";
    let (_dir, files) = setup(Some(merged), MASTER);
    let err = Reconciler::new(files.clone(), opts()).run().unwrap_err();
    assert!(matches!(err, ReconcileError::Malformed { line: 2, .. }));
    assert_untouched(&files, MASTER);
}

#[test]
fn scenario_malformed_master_is_fatal() {
    let master = "16O201 00010 Concert             \n";
    let (_dir, files) = setup(Some(""), master);
    let err = Reconciler::new(files.clone(), opts()).run().unwrap_err();
    assert!(matches!(err, ReconcileError::Malformed { line: 1, .. }));
    assert_untouched(&files, master);
}

#[test]
fn scenario_create_named_end_is_malformed() {
    let merged = "03 END                  160301 00005\n";
    let (_dir, files) = setup(Some(merged), MASTER);
    let err = Reconciler::new(files.clone(), opts()).run().unwrap_err();
    assert!(matches!(err, ReconcileError::Malformed { line: 1, .. }));
    assert_untouched(&files, MASTER);
}

#[test]
fn scenario_unknown_event_faults_by_default() {
    let merged = "01 Ghost                000000 00001\n";
    let (_dir, files) = setup(Some(merged), MASTER);
    let err = Reconciler::new(files.clone(), opts()).run().unwrap_err();
    assert!(matches!(err, ReconcileError::ConsistencyFault { line: 1, .. }));
    assert_untouched(&files, MASTER);
}

#[test]
fn scenario_unknown_event_skipped_when_configured() {
    let merged = "01 Ghost                000000 00001\n01 Concert              000000 00001\n";
    let (_dir, files) = setup(Some(merged), MASTER);
    let opts = opts().with_missing_event(MissingEventPolicy::Skip);
    let report = Reconciler::new(files.clone(), opts).run().unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(
        fs::read_to_string(&files.master_events).unwrap(),
        "160201 00009 Concert             \n"
    );
}
