use std::fs;
use std::path::Path;

use qbl_codec::{decode_snapshot, SnapshotEntry, SnapshotLine};

use crate::SessionError;

/// Entries of the point-of-sale snapshot, in file order, up to `END`.
/// Anything after the terminator is ignored.
pub fn read_snapshot(path: &Path) -> Result<Vec<SnapshotEntry>, SessionError> {
    let raw = fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;

    let mut entries = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let decoded = decode_snapshot(line).map_err(|source| SessionError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        match decoded {
            SnapshotLine::Entry(entry) => entries.push(entry),
            SnapshotLine::Terminator => return Ok(entries),
        }
    }

    Err(SessionError::Unterminated {
        path: path.to_path_buf(),
    })
}
