use std::path::PathBuf;

use qbl_reconcile::{MissingEventPolicy, ReconcileOptions, RunFiles};
use qbl_schemas::EventDate;
use serde::{Deserialize, Serialize};

/// Typed view of the merged configuration. Every key is optional; an empty
/// document reproduces the fixed file names in the working directory, today's
/// date and the fault policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuibbleConfig {
    pub files: FilesConfig,
    pub run: RunConfig,
    pub reconcile: ReconcileConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Base directory the three file names resolve against.
    pub dir: Option<PathBuf>,
    pub master_events: PathBuf,
    pub merged_transactions: PathBuf,
    pub current_events: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        let files = RunFiles::default();
        Self {
            dir: None,
            master_events: files.master_events,
            merged_transactions: files.merged_transactions,
            current_events: files.current_events,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// YYMMDD. Quote values with a leading zero.
    pub current_date: Option<EventDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    pub missing_event: MissingEventPolicy,
}

impl QuibbleConfig {
    pub fn run_files(&self) -> RunFiles {
        let f = &self.files;
        let resolve = |p: &PathBuf| match &f.dir {
            Some(dir) => dir.join(p),
            None => p.clone(),
        };
        RunFiles {
            master_events: resolve(&f.master_events),
            merged_transactions: resolve(&f.merged_transactions),
            current_events: resolve(&f.current_events),
        }
    }

    /// `today` is used unless the config pins a date.
    pub fn reconcile_options(&self, today: EventDate) -> ReconcileOptions {
        ReconcileOptions::new(self.run.current_date.unwrap_or(today))
            .with_missing_event(self.reconcile.missing_event)
    }
}
