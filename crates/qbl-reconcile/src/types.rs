use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use qbl_schemas::{EventDate, TransactionCode};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// The three files one run reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunFiles {
    /// Durable master record. Read if present, always rewritten.
    pub master_events: PathBuf,
    /// Merged transaction log. Must exist.
    pub merged_transactions: PathBuf,
    /// Point-of-sale snapshot. Always rewritten.
    pub current_events: PathBuf,
}

impl RunFiles {
    pub const MASTER_EVENTS: &'static str = "master-events";
    pub const MERGED_TRANSACTIONS: &'static str = "merged-transactions";
    pub const CURRENT_EVENTS: &'static str = "current-events";

    /// Fixed file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            master_events: dir.join(Self::MASTER_EVENTS),
            merged_transactions: dir.join(Self::MERGED_TRANSACTIONS),
            current_events: dir.join(Self::CURRENT_EVENTS),
        }
    }
}

impl Default for RunFiles {
    /// Fixed file names in the working directory.
    fn default() -> Self {
        Self {
            master_events: PathBuf::from(Self::MASTER_EVENTS),
            merged_transactions: PathBuf::from(Self::MERGED_TRANSACTIONS),
            current_events: PathBuf::from(Self::CURRENT_EVENTS),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do with a sell/return/add/delete naming an event the ledger does
/// not hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingEventPolicy {
    /// Abort the run with a consistency fault. Nothing is written.
    #[default]
    Fault,
    /// Log a warning, skip the transaction, keep going.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Events dated before this are dropped at load.
    pub current_date: EventDate,
    pub missing_event: MissingEventPolicy,
}

impl ReconcileOptions {
    pub fn new(current_date: EventDate) -> Self {
        Self {
            current_date,
            missing_event: MissingEventPolicy::default(),
        }
    }

    pub fn with_missing_event(mut self, policy: MissingEventPolicy) -> Self {
        self.missing_event = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub current_date: EventDate,
    /// Master lines decoded, including the pruned ones.
    pub master_read: usize,
    /// Master events dropped for being in the past.
    pub master_pruned: usize,
    pub transactions_read: usize,
    /// Transactions applied, per code (logout counts as applied).
    pub applied: BTreeMap<TransactionCode, usize>,
    /// Transactions skipped under [`MissingEventPolicy::Skip`].
    pub skipped: usize,
    /// Events written to each output.
    pub events_emitted: usize,
}

impl ReconcileReport {
    pub fn applied_count(&self, code: TransactionCode) -> usize {
        self.applied.get(&code).copied().unwrap_or(0)
    }

    /// `key=value` lines in a fixed order.
    pub fn to_kv_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("current_date={}", self.current_date),
            format!("master_read={}", self.master_read),
            format!("master_pruned={}", self.master_pruned),
            format!("transactions_read={}", self.transactions_read),
        ];
        for code in TransactionCode::ALL {
            lines.push(format!("applied_{}={}", code, self.applied_count(code)));
        }
        lines.push(format!("skipped={}", self.skipped));
        lines.push(format!("events_emitted={}", self.events_emitted));
        lines
    }
}
