//! Command handler modules for qbl-cli.

pub mod merge;
pub mod reconcile;

use anyhow::Result;
use qbl_config::LoadedConfig;

/// Load layered config; no paths means built-in defaults.
pub fn load_config(paths: &[String]) -> Result<LoadedConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    qbl_config::load_layered_yaml(&path_refs)
}
