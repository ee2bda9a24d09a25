//! Scenario: config hash is a function of the effective settings only.
//!
//! 1. Same input, same hash.
//! 2. Key order inside a document does not matter.
//! 3. Different values give different hashes.
//! 4. Overlays override the base and the result is stable.

use qbl_config::load_layered_yaml_from_strings;
use qbl_reconcile::MissingEventPolicy;

const BASE_YAML: &str = r#"
files:
  dir: "/srv/quibble"
  master_events: "master-events"
reconcile:
  missing_event: fault
"#;

const BASE_YAML_REORDERED: &str = r#"
reconcile:
  missing_event: fault
files:
  master_events: "master-events"
  dir: "/srv/quibble"
"#;

const OVERLAY_YAML: &str = r#"
run:
  current_date: "160201"
reconcile:
  missing_event: skip
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_takes_effect_in_typed_config() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let cfg = &loaded.config;

    assert_eq!(cfg.reconcile.missing_event, MissingEventPolicy::Skip);
    assert_eq!(
        cfg.run.current_date.map(|d| d.to_string()).as_deref(),
        Some("160201")
    );
    // Base keys survive the overlay.
    assert_eq!(
        cfg.run_files().master_events,
        std::path::PathBuf::from("/srv/quibble/master-events")
    );
}

#[test]
fn numeric_date_is_accepted() {
    let loaded = load_layered_yaml_from_strings(&["run:\n  current_date: 160201\n"]).unwrap();
    assert_eq!(
        loaded.config.run.current_date.map(|d| d.value()),
        Some(160_201)
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn no_layers_and_empty_layers_agree() {
    let none = load_layered_yaml_from_strings(&[]).unwrap();
    let empty = load_layered_yaml_from_strings(&["", "{}"]).unwrap();
    assert_eq!(none.config_hash, empty.config_hash);
    assert_eq!(none.canonical_json, "{}");
}
