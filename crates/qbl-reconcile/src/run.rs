use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use qbl_ledger::EventLedger;
use tracing::{info, info_span};

use crate::engine::{apply_transactions, emit_master, emit_snapshot, load_master, LoadStats};
use crate::{ReconcileError, ReconcileOptions, ReconcileReport, RunFiles};

/// One reconciliation run bound to files on disk.
///
/// Both inputs are fully read and applied before either output is opened, so
/// any error leaves the previous outputs untouched.
#[derive(Clone, Debug)]
pub struct Reconciler {
    files: RunFiles,
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(files: RunFiles, options: ReconcileOptions) -> Self {
        Self { files, options }
    }

    pub fn run(&self) -> Result<ReconcileReport, ReconcileError> {
        let span = info_span!("reconcile", current_date = %self.options.current_date);
        let _guard = span.enter();
        info!("run/start");

        let (mut ledger, load) = self.load()?;

        let merged = &self.files.merged_transactions;
        let tx_file = match File::open(merged) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReconcileError::MissingTransactions {
                    path: merged.clone(),
                })
            }
            Err(e) => return Err(ReconcileError::io(merged, e)),
        };
        let applied = apply_transactions(
            &mut ledger,
            BufReader::new(tx_file),
            merged,
            self.options.missing_event,
        )?;

        let events = ledger.into_sorted_by_date();
        write_output(&self.files.master_events, |w| emit_master(w, &events))?;
        write_output(&self.files.current_events, |w| emit_snapshot(w, &events))?;

        let report = ReconcileReport {
            current_date: self.options.current_date,
            master_read: load.read,
            master_pruned: load.pruned,
            transactions_read: applied.read,
            applied: applied.applied,
            skipped: applied.skipped,
            events_emitted: events.len(),
        };
        info!(events = report.events_emitted, skipped = report.skipped, "run/done");
        Ok(report)
    }

    /// A missing master file is an empty ledger.
    fn load(&self) -> Result<(EventLedger, LoadStats), ReconcileError> {
        let path = &self.files.master_events;
        match File::open(path) {
            Ok(f) => load_master(BufReader::new(f), path, self.options.current_date),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "master/absent");
                Ok((EventLedger::new(), LoadStats::default()))
            }
            Err(e) => Err(ReconcileError::io(path, e)),
        }
    }
}

fn write_output<F>(path: &Path, emit: F) -> Result<(), ReconcileError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|e| ReconcileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|e| ReconcileError::io(path, e))?;
    info!(path = %path.display(), "emit/done");
    Ok(())
}
