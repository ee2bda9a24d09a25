use std::io;
use std::path::PathBuf;

use qbl_codec::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: malformed record: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("{}: snapshot has no END line", path.display())]
    Unterminated { path: PathBuf },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
