use super::*;

#[test]
fn default_transitions_cover_every_gyro_state_both_ways() {
    let transitions = default_transitions();
    assert_eq!(transitions.len(), 6);
    assert_eq!(transitions[0].from_state, "*");
    assert_eq!(transitions[0].to_state, STATE_UNLOCK);
    assert_eq!(transitions[1].from_state, STATE_UNLOCK);
    assert_eq!(transitions[1].to_state, "*");
    for state in GYRO_STATES {
        assert!(transitions.iter().any(|t| t.from_state == "*" && t.to_state == state));
        assert!(transitions.iter().any(|t| t.from_state == state && t.to_state == "*"));
    }
    assert!(transitions.iter().all(|t| t.elements.is_empty()));
}

#[test]
fn upsert_replaces_matching_pair_only() {
    let mut list = vec![
        StateOverride::new("a", KEY_OPACITY, 0.5),
        StateOverride::new("b", KEY_OPACITY, 0.2),
    ];
    upsert_override(&mut list, StateOverride::new("a", KEY_OPACITY, 0.9));
    upsert_override(&mut list, StateOverride::new("a", KEY_POSITION_X, 10.0));
    assert_eq!(list.len(), 3);
    assert_eq!(
        find_override(&list, "a", KEY_OPACITY).unwrap().value,
        OverrideValue::Number(0.9)
    );
    assert_eq!(
        find_override(&list, "b", KEY_OPACITY).unwrap().value,
        OverrideValue::Number(0.2)
    );
}

#[test]
fn rotation_key_paths_are_recognized() {
    assert!(is_rotation_key_path(KEY_ROTATION_Z));
    assert!(is_rotation_key_path("transform.rotation.y"));
    assert!(!is_rotation_key_path(KEY_OPACITY));
}

#[test]
fn override_values_serialize_untagged() {
    let json = serde_json::to_string(&StateOverride::new("a", KEY_CONTENTS, "assets/f.png"))
        .unwrap();
    assert!(json.contains(r#""value":"assets/f.png""#));
    let back: StateOverride =
        serde_json::from_str(r#"{"targetId":"a","keyPath":"opacity","value":0.25}"#).unwrap();
    assert_eq!(back.value.as_number(), Some(0.25));
}

#[test]
fn parallax_key_paths_parse() {
    for kp in ParallaxKeyPath::ALL {
        assert_eq!(ParallaxKeyPath::from_caml_key(kp.caml_key()), Some(kp));
    }
    assert_eq!(ParallaxKeyPath::from_caml_key("opacity"), None);
    assert_eq!(ParallaxAxis::from_caml_name("Y"), Some(ParallaxAxis::Y));
}
