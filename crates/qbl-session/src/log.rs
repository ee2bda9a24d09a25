use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use qbl_codec::encode_transaction;
use qbl_schemas::{EventDate, Transaction, TransactionCode};
use tracing::info;

use crate::SessionError;

/// Transactions recorded between one login and its logout.
///
/// `end_session` appends the logout (unless it is already last), writes the buffer to
/// `transaction-<YYMMDD>-<n>` under `dir` (replacing any file of that name),
/// then moves on to session `n + 1` with an empty buffer. Numbering starts
/// at 1.
#[derive(Debug)]
pub struct SessionLog {
    dir: PathBuf,
    date: EventDate,
    session_number: u32,
    pending: Vec<Transaction>,
}

impl SessionLog {
    pub fn new(dir: impl Into<PathBuf>, date: EventDate) -> Self {
        Self {
            dir: dir.into(),
            date,
            session_number: 1,
            pending: Vec::new(),
        }
    }

    /// Resume numbering, e.g. after a restart on the same day.
    pub fn with_session_number(mut self, n: u32) -> Self {
        self.session_number = n;
        self
    }

    pub fn session_number(&self) -> u32 {
        self.session_number
    }

    pub fn record(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Path the current session will be written to.
    pub fn current_path(&self) -> PathBuf {
        self.dir
            .join(format!("transaction-{}-{}", self.date, self.session_number))
    }

    /// Close the session. Returns the file written.
    ///
    /// On error the buffer (logout included) and the session number are kept,
    /// so the caller may retry.
    pub fn end_session(&mut self) -> Result<PathBuf, SessionError> {
        if self.pending.last().map(|tx| tx.code) != Some(TransactionCode::Logout) {
            self.pending.push(Transaction::logout());
        }

        let path = self.current_path();
        fs::create_dir_all(&self.dir).map_err(|e| SessionError::io(&self.dir, e))?;
        write_lines(&path, &self.pending)?;

        info!(
            path = %path.display(),
            transactions = self.pending.len(),
            session = self.session_number,
            "session/end"
        );
        self.session_number += 1;
        self.pending.clear();
        Ok(path)
    }
}

fn write_lines(path: &Path, txs: &[Transaction]) -> Result<(), SessionError> {
    let file = File::create(path).map_err(|e| SessionError::io(path, e))?;
    let mut w = BufWriter::new(file);
    for tx in txs {
        writeln!(w, "{}", encode_transaction(tx)).map_err(|e| SessionError::io(path, e))?;
    }
    w.flush().map_err(|e| SessionError::io(path, e))
}
