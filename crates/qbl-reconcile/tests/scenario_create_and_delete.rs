//! Scenario: create and delete change which events exist.
//!
//! 1. A created event appears in both outputs in date order.
//! 2. A deleted event disappears from both.
//! 3. With no events left the snapshot is the terminator alone.
//! 4. A second create with the same name adds a second entry; later
//!    operations hit the first.

use std::fs;

use qbl_reconcile::{ReconcileOptions, Reconciler, RunFiles};
use qbl_schemas::TransactionCode;

fn setup(master: Option<&str>, merged: &str) -> (tempfile::TempDir, RunFiles) {
    let dir = tempfile::tempdir().unwrap();
    let files = RunFiles::in_dir(dir.path());
    if let Some(master) = master {
        fs::write(&files.master_events, master).unwrap();
    }
    fs::write(&files.merged_transactions, merged).unwrap();
    (dir, files)
}

fn opts() -> ReconcileOptions {
    ReconcileOptions::new("160101".parse().unwrap())
}

#[test]
fn scenario_create_inserts_in_date_order() {
    let (_dir, files) = setup(
        Some("160301 00004 Opera               \n"),
        "03 Concert              160201 00050\n",
    );
    let report = Reconciler::new(files.clone(), opts()).run().unwrap();

    assert_eq!(report.applied_count(TransactionCode::Create), 1);
    assert_eq!(
        fs::read_to_string(&files.master_events).unwrap(),
        "160201 00050 Concert             \n160301 00004 Opera               \n"
    );
}

#[test]
fn scenario_delete_last_event_leaves_only_terminator() {
    let (_dir, files) = setup(
        Some("160201 00010 Concert             \n"),
        "05 Concert              000000 00000\n",
    );
    let report = Reconciler::new(files.clone(), opts()).run().unwrap();

    assert_eq!(report.events_emitted, 0);
    assert_eq!(fs::read_to_string(&files.master_events).unwrap(), "");
    assert_eq!(
        fs::read_to_string(&files.current_events).unwrap(),
        "END                  00000"
    );
}

#[test]
fn scenario_missing_master_starts_empty() {
    let (_dir, files) = setup(None, "03 Concert              160201 00050\n");
    let report = Reconciler::new(files.clone(), opts()).run().unwrap();

    assert_eq!(report.master_read, 0);
    assert_eq!(
        fs::read_to_string(&files.current_events).unwrap(),
        "Concert              00050\nEND                  00000"
    );
}

#[test]
fn scenario_duplicate_create_keeps_both_entries() {
    let (_dir, files) = setup(
        Some("160201 00010 Concert             \n"),
        "03 Concert              160201 00020\n01 Concert              000000 00004\n",
    );
    Reconciler::new(files.clone(), opts()).run().unwrap();

    assert_eq!(
        fs::read_to_string(&files.master_events).unwrap(),
        "160201 00006 Concert             \n160201 00020 Concert             \n"
    );
}
