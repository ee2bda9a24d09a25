use std::io;
use std::path::PathBuf;

use qbl_codec::DecodeError;
use qbl_schemas::{TransactionCode, ValidationError};
use thiserror::Error;

/// A transaction that decoded cleanly but cannot be applied to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// Sell/return/add/delete against a name the ledger does not hold. The
    /// front end only emits these after a successful lookup, so this is an
    /// internal consistency fault rather than user error.
    #[error("{code} targets unknown event '{name}'")]
    UnknownEvent { code: TransactionCode, name: String },

    #[error("create carries an invalid event name: {0}")]
    InvalidName(#[from] ValidationError),
}

/// Every condition that aborts a reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("merged transaction file {} not found", path.display())]
    MissingTransactions { path: PathBuf },

    #[error("{}:{line}: malformed record: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("{}:{line}: consistency fault: {source}", path.display())]
    ConsistencyFault {
        path: PathBuf,
        line: usize,
        #[source]
        source: ApplyError,
    },
}

impl ReconcileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
