//! qbl-session
//!
//! The file boundary between the point-of-sale front end and reconciliation:
//! per-session transaction logs, merging them into one log, and reading the
//! point-of-sale snapshot back.
//!
//! Every line written here goes through `qbl-codec`, and every line read is
//! decoded before anything is written, so a bad input never produces a
//! partial output.

mod error;
mod log;
mod merge;
mod snapshot;

pub use error::SessionError;
pub use log::SessionLog;
pub use merge::{merge_logs, MergeStats};
pub use qbl_schemas::validate_creation_date;
pub use snapshot::read_snapshot;
