use super::*;
use crate::model::states::StateOverride;

#[test]
fn gyro_documents_start_with_fixed_states() {
    let doc = CamlDocument::new(
        Layer::new("r", "Root", LayerKind::Shape),
        ProjectMeta {
            gyro: true,
            ..ProjectMeta::default()
        },
    );
    assert_eq!(doc.states, vec!["Locked", "Unlock", "Sleep"]);

    let doc = CamlDocument::new(Layer::new("r", "Root", LayerKind::Shape), ProjectMeta::default());
    assert!(doc.states.is_empty());
}

#[test]
fn add_state_keeps_an_ordered_set() {
    let mut doc = CamlDocument::default();
    assert!(doc.add_state("Dark"));
    assert!(doc.add_state("Light"));
    assert!(!doc.add_state("Dark"));
    assert!(!doc.add_state("Base State"));
    assert!(!doc.add_state("  "));
    assert_eq!(doc.states, vec!["Dark", "Light"]);
}

#[test]
fn json_round_trip_preserves_side_tables() {
    let mut doc = CamlDocument::default();
    doc.add_state("Dark");
    doc.overrides.insert(
        "Dark".to_owned(),
        vec![StateOverride::new("root", "opacity", 0.5)],
    );
    let json = doc.to_json_pretty().unwrap();
    let back = CamlDocument::from_json_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = CamlDocument::from_json_str("{").unwrap_err();
    assert!(err.to_string().contains("parse document JSON"));
}

#[test]
fn missing_json_file_is_an_io_error_naming_the_path() {
    let path = std::env::temp_dir().join("camlkit-missing-document.json");
    let _ = std::fs::remove_file(&path);
    let err = CamlDocument::from_json_path(&path).unwrap_err();
    assert!(matches!(err, CamlError::Io(_)));
    assert!(err.to_string().contains("camlkit-missing-document.json"));
}
