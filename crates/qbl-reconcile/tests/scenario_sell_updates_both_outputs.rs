//! Scenario: a single sell flows through to both outputs.
//!
//! master:  Concert 160101, 10 tickets
//! merged:  sell 3 of Concert, then logout
//! expect:  master and snapshot both show 7
//!
//! Replaying a mixed log from the same prior master gives identical bytes.

use std::fs;

use qbl_reconcile::{ReconcileOptions, Reconciler, RunFiles};
use qbl_schemas::TransactionCode;

#[test]
fn scenario_sell_updates_both_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let files = RunFiles::in_dir(dir.path());
    fs::write(&files.master_events, "160101 00010 Concert             \n").unwrap();
    fs::write(
        &files.merged_transactions,
        "01 Concert              160101 00003\n00                      000000 00000\n",
    )
    .unwrap();

    let opts = ReconcileOptions::new("160101".parse().unwrap());
    let report = Reconciler::new(files.clone(), opts).run().unwrap();

    assert_eq!(
        fs::read_to_string(&files.master_events).unwrap(),
        "160101 00007 Concert             \n"
    );
    assert_eq!(
        fs::read_to_string(&files.current_events).unwrap(),
        "Concert              00007\nEND                  00000"
    );

    assert_eq!(report.transactions_read, 2);
    assert_eq!(report.applied_count(TransactionCode::Sell), 1);
    assert_eq!(report.applied_count(TransactionCode::Logout), 1);
    assert_eq!(report.events_emitted, 1);
}

#[test]
fn scenario_replaying_the_same_log_is_idempotent() {
    const MASTER: &str = "160201 00002 Concert             \n\
                          160201 99998 Opera               \n\
                          160301 00010 Ballet              \n";
    const MERGED: &str = "01 Concert              000000 00005\n\
                          04 Opera                000000 00005\n\
                          02 Concert              000000 00003\n\
                          05 Ballet               000000 00000\n\
                          01 Opera                000000 00001\n";

    let dir = tempfile::tempdir().unwrap();
    let files = RunFiles::in_dir(dir.path());
    fs::write(&files.merged_transactions, MERGED).unwrap();
    let opts = ReconcileOptions::new("160101".parse().unwrap());
    let reconciler = Reconciler::new(files.clone(), opts);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        // Each replay starts from the same prior master.
        fs::write(&files.master_events, MASTER).unwrap();
        reconciler.run().unwrap();
        outputs.push((
            fs::read_to_string(&files.master_events).unwrap(),
            fs::read_to_string(&files.current_events).unwrap(),
        ));
    }

    assert_eq!(outputs[0], outputs[1]);

    // Oversell floors Concert at 0 before the return; Opera hits the ceiling
    // before the sell.
    let (master, snapshot) = &outputs[0];
    assert_eq!(
        master,
        "160201 00003 Concert             \n160201 99998 Opera               \n"
    );
    assert_eq!(
        snapshot,
        "Concert              00003\nOpera                99998\nEND                  00000"
    );
}
