use std::fs;
use std::path::{Path, PathBuf};

use netplan_config_core::{MetricModel, NetworkAlgorithm, ValidationError};
use netplan_config_loader::{FileRole, LoadError, load_config, load_document};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const VALID_JSON: &str = r#"{
    "demand_nodes_file": "demand.csv",
    "metric_model": "mvMax5",
    "network_algorithm": "mod_kruskal",
    "metric_model_parameters_file": "metric_params.json",
    "existing_networks": { "filename": "grid.zip", "budget_value": 10 }
}"#;

const VALID_YAML: &str = "\
demand_nodes_file: demand.csv
metric_model: mvMax5
network_algorithm: mod_kruskal
metric_model_parameters_file: metric_params.json
existing_networks:
  filename: grid.zip
  budget_value: 10
";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_json_and_yaml_load_to_same_config() {
    let dir = tempfile::tempdir().unwrap();
    let json = write(dir.path(), "config.json", VALID_JSON);
    let yaml = write(dir.path(), "config.yaml", VALID_YAML);

    let from_json = load_config(&json).unwrap();
    let from_yaml = load_config(&yaml).unwrap();

    assert_eq!(from_json.config(), from_yaml.config());
    assert_eq!(from_json.config().metric_model, MetricModel::MvMax5);
    assert_eq!(
        from_json.config().network_algorithm,
        NetworkAlgorithm::ModKruskal
    );
    assert_eq!(
        from_json
            .config()
            .existing_networks
            .as_ref()
            .unwrap()
            .budget_value,
        10.0
    );
    assert_eq!(from_json.config().network_parameters.minimum_node_count, 0.0);
    assert_eq!(from_json.path(), json.as_path());
    assert_eq!(from_json.document(), from_yaml.document());
    assert_eq!(from_json.document()["existing_networks"]["budget_value"], 10);
}

#[test]
fn test_invalid_document_reports_all_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.yml",
        "metric_model: mvMax9\nexisting_networks:\n  budget_value: -5\n",
    );

    let err = load_config(&path).unwrap_err();
    let errors = err.validation_errors().expect("expected validation errors");
    assert_eq!(
        errors.paths(),
        vec![
            "demand_nodes_file",
            "network_algorithm",
            "metric_model",
            "existing_networks.filename",
        ]
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::EnumViolation { actual, .. } if actual == "mvMax9"
    )));
}

#[test]
fn test_non_object_root_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.json", "[1, 2, 3]");

    match load_config(&path) {
        Err(LoadError::Invalid(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(matches!(
                errors.as_slice()[0],
                ValidationError::InvalidRoot { .. }
            ));
        }
        other => panic!("expected invalid root, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_is_not_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.json", "{ \"metric_model\": ");

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, LoadError::JsonError(_)));
    assert!(err.validation_errors().is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LoadError::IoError(_)));
}

#[test]
fn test_unsupported_extension_is_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.toml", "metric_model = 'mvMax2'");
    assert!(matches!(
        load_document(&path),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

// ---------------------------------------------------------------------------
// Referenced files
// ---------------------------------------------------------------------------

#[test]
fn test_missing_files_resolved_against_base_dir() {
    let config_dir = tempfile::tempdir().unwrap();
    let run_dir = tempfile::tempdir().unwrap();
    let path = write(config_dir.path(), "config.json", VALID_JSON);
    write(run_dir.path(), "demand.csv", "X,Y\n0,0\n");

    let loaded = load_config(&path).unwrap();
    let missing = loaded.missing_files(run_dir.path());

    let roles: Vec<FileRole> = missing.iter().map(|f| f.role).collect();
    assert_eq!(
        roles,
        vec![FileRole::MetricModelParameters, FileRole::ExistingNetworks]
    );
    assert_eq!(missing[0].path, PathBuf::from("metric_params.json"));

    write(run_dir.path(), "metric_params.json", "{}");
    write(run_dir.path(), "grid.zip", "");
    assert!(loaded.missing_files(run_dir.path()).is_empty());
}

#[test]
fn test_files_beside_config_do_not_count() {
    let config_dir = tempfile::tempdir().unwrap();
    let run_dir = tempfile::tempdir().unwrap();
    let path = write(config_dir.path(), "config.json", VALID_JSON);
    write(config_dir.path(), "demand.csv", "X,Y\n0,0\n");
    write(config_dir.path(), "metric_params.json", "{}");
    write(config_dir.path(), "grid.zip", "");

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.missing_files(run_dir.path()).len(), 3);
}
