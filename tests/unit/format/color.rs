use super::*;

#[test]
fn hex_converts_to_float_triplet() {
    assert_eq!(hex_to_rgb_triplet("#ff0000").as_deref(), Some("1 0 0"));
    assert_eq!(hex_to_rgb_triplet("00ff00").as_deref(), Some("0 1 0"));
    assert_eq!(hex_to_rgb_triplet("#fff").as_deref(), Some("1 1 1"));
    assert_eq!(hex_to_rgb_triplet("#zzzzzz"), None);
    assert_eq!(hex_to_rgb_triplet("#12345"), None);
}

#[test]
fn triplet_converts_to_hex() {
    assert_eq!(rgb_triplet_to_hex("1 0.5 0").as_deref(), Some("#ff8000"));
    assert_eq!(rgb_triplet_to_hex("2 -1 0").as_deref(), Some("#ff0000"));
    assert_eq!(rgb_triplet_to_hex("1 0"), None);
}

#[test]
fn hex_survives_triplet_round_trip() {
    for hex in ["#000000", "#ffffff", "#3a7bd5", "#808080", "#010203"] {
        let triplet = hex_to_rgb_triplet(hex).unwrap();
        assert_eq!(rgb_triplet_to_hex(&triplet).as_deref(), Some(hex));
    }
}

#[test]
fn caml_colors_keep_alpha_component() {
    let c = parse_caml_color("0 0 1 0.25").unwrap();
    assert_eq!(c.hex, "#0000ff");
    assert_eq!(c.alpha, Some(0.25));

    let c = parse_caml_color("0 0 1").unwrap();
    assert_eq!(c.alpha, None);

    assert_eq!(format_caml_color("#0000ff", 1.0).as_deref(), Some("0 0 1"));
    assert_eq!(
        format_caml_color("#0000ff", 0.25).as_deref(),
        Some("0 0 1 0.25")
    );
}

#[test]
fn normalize_hex_lowercases_and_expands() {
    assert_eq!(normalize_hex("#ABC").as_deref(), Some("#aabbcc"));
    assert_eq!(normalize_hex("FF0000").as_deref(), Some("#ff0000"));
    assert_eq!(normalize_hex("red"), None);
}
