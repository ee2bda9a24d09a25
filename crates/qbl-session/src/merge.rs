use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use qbl_codec::decode_transaction;
use tracing::{debug, info};

use crate::SessionError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub files: usize,
    pub transactions: usize,
}

/// Concatenate session logs, in the order given, into `output`.
///
/// Every line of every input must decode as a transaction; the output is only
/// created once all inputs have been read and checked. Lines are copied
/// verbatim, each newline-terminated.
pub fn merge_logs<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<MergeStats, SessionError> {
    let mut lines: Vec<String> = Vec::new();
    let mut stats = MergeStats::default();

    for input in inputs {
        let path = input.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        let before = lines.len();
        for (idx, line) in raw.lines().enumerate() {
            decode_transaction(line).map_err(|source| SessionError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            lines.push(line.to_string());
        }
        stats.files += 1;
        debug!(path = %path.display(), transactions = lines.len() - before, "merge/input");
    }
    stats.transactions = lines.len();

    let file = File::create(output).map_err(|e| SessionError::io(output, e))?;
    let mut w = BufWriter::new(file);
    for line in &lines {
        writeln!(w, "{line}").map_err(|e| SessionError::io(output, e))?;
    }
    w.flush().map_err(|e| SessionError::io(output, e))?;

    info!(
        output = %output.display(),
        files = stats.files,
        transactions = stats.transactions,
        "merge/done"
    );
    Ok(stats)
}
