//! Numeric conversions and number-list parsing.

/// Decimal places kept when a radian value is converted back to degrees.
pub const DEGREE_DECIMALS: i32 = 4;

const NUMBER_DECIMALS: usize = 10;

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Convert radians to degrees and snap to [`DEGREE_DECIMALS`] places.
///
/// The snap absorbs the precision lost when degrees were written out as
/// truncated radians, so `90deg -> 1.5707963268 -> 90deg` is exact.
pub fn rad_to_deg_snapped(rad: f64) -> f64 {
    round_to(rad_to_deg(rad), DEGREE_DECIMALS)
}

/// Round half away from zero at `decimals` places; non-finite values and `-0` become `0`.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(decimals);
    let r = (v * scale).round() / scale;
    if r == 0.0 { 0.0 } else { r }
}

/// Parse a single finite number. Surrounding whitespace is ignored.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whitespace, semicolon or comma separated list of numbers.
///
/// Tokens that are not finite numbers are skipped.
pub fn parse_number_list(s: &str) -> Vec<f64> {
    s.split(|c: char| c.is_whitespace() || c == ';' || c == ',')
        .filter(|tok| !tok.is_empty())
        .filter_map(parse_number)
        .collect()
}

/// Parse exactly `N` numbers, or nothing.
pub fn parse_number_array<const N: usize>(s: &str) -> Option<[f64; N]> {
    let values = parse_number_list(s);
    values.try_into().ok()
}

/// Parse CAML boolean-like attribute text (`1`, `true`, `YES`, ...).
pub fn parse_bool_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" => Some(false),
        _ => None,
    }
}

/// CAML booleans are `"1"` and `"0"`.
pub fn format_bool_flag(v: bool) -> &'static str {
    if v { "1" } else { "0" }
}

/// Format a number for an XML attribute.
///
/// Whole numbers are written without a fractional part; everything else keeps at
/// most ten decimals with trailing zeros trimmed. Non-finite values become `0`.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    if v.abs() >= 1e15 {
        return format!("{v}");
    }
    let r = round_to(v, NUMBER_DECIMALS as i32);
    if r.fract() == 0.0 {
        return format!("{}", r as i64);
    }
    let s = format!("{r:.prec$}", prec = NUMBER_DECIMALS);
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Format numbers as a single space separated attribute value.
pub fn format_number_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True for finite values without a fractional part.
pub fn is_whole(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/format/units.rs"]
mod tests;
