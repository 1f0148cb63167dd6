use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(CamlError::xml("x").to_string().contains("xml error:"));
    assert!(
        CamlError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CamlError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CamlError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_become_serde_errors() {
    let err: CamlError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, CamlError::Serde(_)));
}
