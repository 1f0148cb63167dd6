use super::*;

#[test]
fn parses_translate_and_rotate_terms() {
    let ops = parse_transform("translate(10, 20, 0) rotate(0.5, 0, 0, 1)");
    assert_eq!(
        ops,
        vec![
            TransformOp::Translate(Vec3::new(10.0, 20.0, 0.0)),
            TransformOp::Rotate {
                angle: 0.5,
                axis: [0.0, 0.0, 1.0]
            },
        ]
    );
}

#[test]
fn single_argument_rotate_is_about_z() {
    let ops = parse_transform("rotate(1.25)");
    assert_eq!(axis_rotations(&ops), [0.0, 0.0, 1.25]);
}

#[test]
fn mixed_axes_are_not_split() {
    let ops = parse_transform("rotate(1, 1, 1, 0) rotate(0.25, 1, 0, 0)");
    assert_eq!(axis_rotations(&ops), [0.25, 0.0, 0.0]);
}

#[test]
fn unknown_and_malformed_terms_are_skipped() {
    let ops = parse_transform("skew(1, 2) translate(1) scale(2) rotate(0.1, 0, 1, 0");
    assert_eq!(ops, vec![TransformOp::Scale(Vec3::new(2.0, 2.0, 1.0))]);
}

#[test]
fn translations_accumulate() {
    let ops = parse_transform("translate(1, 2) translate(3, 4, 5)");
    assert_eq!(translation(&ops), Vec3::new(4.0, 6.0, 5.0));
}

#[test]
fn format_omits_identity_terms() {
    assert_eq!(format_transform(Vec3::ZERO, 0.0), None);
    assert_eq!(
        format_transform(Vec3::new(10.0, 0.0, 0.0), 0.0).as_deref(),
        Some("translate(10, 0, 0)")
    );
    assert_eq!(
        format_transform(Vec3::ZERO, 0.5).as_deref(),
        Some("rotate(0.5, 0, 0, 1)")
    );
}

#[test]
fn formatted_transform_parses_back() {
    let s = format_transform(Vec3::new(5.0, -2.5, 0.0), 0.75).unwrap();
    let ops = parse_transform(&s);
    assert_eq!(translation(&ops), Vec3::new(5.0, -2.5, 0.0));
    assert_eq!(axis_rotations(&ops), [0.0, 0.0, 0.75]);
}
