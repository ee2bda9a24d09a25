//! qbl-reconcile
//!
//! Reconciliation Engine: folds a merged transaction log into the master
//! record of events and re-emits the master record plus the point-of-sale
//! snapshot.
//!
//! Architectural decisions:
//! - Four phases, strictly in order: load, apply, sort, emit
//! - Load drops events already in the past as of this run's date
//! - Transactions apply in file order; counts clamp, never fail
//! - Missing master record = empty ledger; missing transaction log = fatal
//! - Any malformed line aborts the run before either output is touched
//! - No process exit here: every fatal condition is a [`ReconcileError`]
//!
//! The phases in [`engine`] work on readers and writers; [`Reconciler`] binds
//! them to the three files on disk.

pub mod engine;
mod error;
mod run;
mod types;

pub use engine::{
    apply_transaction, apply_transactions, emit_master, emit_snapshot, load_master, ApplyStats,
    LoadStats,
};
pub use error::{ApplyError, ReconcileError};
pub use run::Reconciler;
pub use types::{MissingEventPolicy, ReconcileOptions, ReconcileReport, RunFiles};
