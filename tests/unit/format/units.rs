use super::*;

#[test]
fn degrees_and_radians_convert() {
    assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
    assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
}

#[test]
fn snapped_degrees_absorb_truncated_radians() {
    assert_eq!(rad_to_deg_snapped(1.570_796_326_8), 90.0);
    assert!((rad_to_deg_snapped(1.570_796_3) - 90.0).abs() < 1e-3);
    assert_eq!(rad_to_deg_snapped(-0.0), 0.0);
}

#[test]
fn number_lists_skip_garbage() {
    assert_eq!(parse_number_list("0 0 100 50"), vec![0.0, 0.0, 100.0, 50.0]);
    assert_eq!(parse_number_list("1;2, 3\t4"), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(parse_number_list("1 x 3"), vec![1.0, 3.0]);
    assert_eq!(parse_number_list("NaN inf"), Vec::<f64>::new());
    assert!(parse_number_list("").is_empty());
}

#[test]
fn number_arrays_require_exact_length() {
    assert_eq!(parse_number_array::<2>("3 4"), Some([3.0, 4.0]));
    assert_eq!(parse_number_array::<2>("3"), None);
    assert_eq!(parse_number_array::<4>("0 0 10"), None);
}

#[test]
fn bool_flags_accept_common_spellings() {
    assert_eq!(parse_bool_flag("1"), Some(true));
    assert_eq!(parse_bool_flag(" true "), Some(true));
    assert_eq!(parse_bool_flag("0"), Some(false));
    assert_eq!(parse_bool_flag("maybe"), None);
    assert_eq!(format_bool_flag(true), "1");
}

#[test]
fn numbers_format_compactly() {
    assert_eq!(format_number(25.0), "25");
    assert_eq!(format_number(-3.0), "-3");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(f64::NAN), "0");
    assert_eq!(format_number_list(&[0.0, 0.0, 100.0, 50.5]), "0 0 100 50.5");
}

#[test]
fn formatted_numbers_parse_back() {
    for v in [0.1, 12.75, -400.0, 0.7853981634, 1e-4] {
        let back = parse_number(&format_number(v)).unwrap();
        assert!((back - v).abs() < 1e-9, "{v} -> {back}");
    }
}
