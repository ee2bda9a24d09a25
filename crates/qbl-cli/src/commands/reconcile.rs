//! `qbl reconcile`

use anyhow::{Context, Result};
use qbl_reconcile::Reconciler;
use qbl_schemas::EventDate;
use tracing::info_span;
use uuid::Uuid;

use super::load_config;

pub fn run_reconcile(config_paths: &[String], json: bool) -> Result<()> {
    let loaded = load_config(config_paths)?;

    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id, config_hash = %loaded.config_hash);
    let _guard = span.enter();

    let files = loaded.config.run_files();
    let options = loaded.config.reconcile_options(EventDate::today());
    let report = Reconciler::new(files, options)
        .run()
        .context("reconciliation failed")?;

    if json {
        let mut v = serde_json::to_value(&report).context("serialize report failed")?;
        if let Some(obj) = v.as_object_mut() {
            obj.insert("run_id".to_string(), run_id.to_string().into());
            obj.insert("config_hash".to_string(), loaded.config_hash.clone().into());
        }
        println!("{}", serde_json::to_string(&v).context("json stringify failed")?);
        return Ok(());
    }

    println!("run_id={}", run_id);
    println!("config_hash={}", loaded.config_hash);
    for line in report.to_kv_lines() {
        println!("{}", line);
    }
    Ok(())
}
