//! `qbl merge`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn run_merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let stats = qbl_session::merge_logs(inputs, output)
        .with_context(|| format!("merge into {} failed", output.display()))?;

    println!("merged=true output={}", output.display());
    println!("files={}", stats.files);
    println!("transactions={}", stats.transactions);
    Ok(())
}
