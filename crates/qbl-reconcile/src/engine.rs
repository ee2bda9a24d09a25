//! The four run phases over plain readers and writers.
//!
//! `origin` paths passed in here are only used to label errors and log lines.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use qbl_codec::{
    decode_master, decode_transaction, encode_master, encode_snapshot, snapshot_terminator,
};
use qbl_ledger::EventLedger;
use qbl_schemas::{Event, EventDate, EventName, Transaction, TransactionCode};
use tracing::{debug, info, warn};

use crate::{ApplyError, MissingEventPolicy, ReconcileError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub read: usize,
    pub pruned: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub read: usize,
    pub applied: BTreeMap<TransactionCode, usize>,
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Decode every master line into a fresh ledger, dropping events dated before
/// `current_date`. File order is kept.
pub fn load_master<R: BufRead>(
    reader: R,
    origin: &Path,
    current_date: EventDate,
) -> Result<(EventLedger, LoadStats), ReconcileError> {
    let mut ledger = EventLedger::new();
    let mut stats = LoadStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ReconcileError::io(origin, e))?;
        let event = decode_master(&line).map_err(|source| ReconcileError::Malformed {
            path: origin.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        stats.read += 1;

        if event.date < current_date {
            stats.pruned += 1;
            debug!(name = %event.name, date = %event.date, "master/prune");
            continue;
        }
        ledger.upsert_create(event.name, event.date, event.ticket_count);
    }

    info!(
        path = %origin.display(),
        read = stats.read,
        pruned = stats.pruned,
        live = ledger.len(),
        "master/load"
    );
    Ok((ledger, stats))
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// Apply one transaction.
///
/// Logout is a no-op. Create always inserts. Every other code needs an event
/// with that name; without one the ledger is left untouched and
/// [`ApplyError::UnknownEvent`] comes back.
pub fn apply_transaction(ledger: &mut EventLedger, tx: &Transaction) -> Result<(), ApplyError> {
    let name = tx.event_name.as_str();
    let found = match tx.code {
        TransactionCode::Logout => true,
        TransactionCode::Create => {
            let event_name = EventName::new(name)?;
            ledger.upsert_create(event_name, tx.event_date, tx.ticket_count);
            true
        }
        TransactionCode::Sell => ledger.sell(name, tx.ticket_count).is_some(),
        TransactionCode::Return | TransactionCode::Add => {
            ledger.add(name, tx.ticket_count).is_some()
        }
        TransactionCode::Delete => ledger.delete(name).is_some(),
    };

    if !found {
        return Err(ApplyError::UnknownEvent {
            code: tx.code,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Decode and apply the merged log in file order.
///
/// Decoding errors always abort. Unknown-event errors abort or are skipped
/// per `policy`.
pub fn apply_transactions<R: BufRead>(
    ledger: &mut EventLedger,
    reader: R,
    origin: &Path,
    policy: MissingEventPolicy,
) -> Result<ApplyStats, ReconcileError> {
    let mut stats = ApplyStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| ReconcileError::io(origin, e))?;
        let tx = decode_transaction(&line).map_err(|source| ReconcileError::Malformed {
            path: origin.to_path_buf(),
            line: line_no,
            source,
        })?;
        stats.read += 1;

        match apply_transaction(ledger, &tx) {
            Ok(()) => {
                debug!(line = line_no, code = %tx.code, name = %tx.event_name, "tx/apply");
                *stats.applied.entry(tx.code).or_default() += 1;
            }
            Err(err @ ApplyError::UnknownEvent { .. }) if policy == MissingEventPolicy::Skip => {
                warn!(line = line_no, error = %err, "tx/skip");
                stats.skipped += 1;
            }
            Err(source) => {
                return Err(ReconcileError::ConsistencyFault {
                    path: origin.to_path_buf(),
                    line: line_no,
                    source,
                })
            }
        }
    }

    info!(
        path = %origin.display(),
        read = stats.read,
        skipped = stats.skipped,
        live = ledger.len(),
        "tx/apply_all"
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Emit
// ---------------------------------------------------------------------------

/// One master line per event, each newline-terminated.
pub fn emit_master<W: Write>(writer: &mut W, events: &[Event]) -> io::Result<()> {
    for event in events {
        writeln!(writer, "{}", encode_master(event))?;
    }
    Ok(())
}

/// One snapshot line per event, then the terminator with no trailing newline.
pub fn emit_snapshot<W: Write>(writer: &mut W, events: &[Event]) -> io::Result<()> {
    for event in events {
        writeln!(writer, "{}", encode_snapshot(event))?;
    }
    write!(writer, "{}", snapshot_terminator())
}
