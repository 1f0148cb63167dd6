//! Conversions between editor hex colors (`#rrggbb`) and CAML float colors
//! (`"r g b"` or `"r g b a"`, components in `0..=1`).

use crate::format::units::{format_number, parse_number_list};

/// A CAML color split into its editor parts.
#[derive(Clone, Debug, PartialEq)]
pub struct CamlColor {
    /// Lowercase `#rrggbb`.
    pub hex: String,
    /// Alpha component, when the CAML value carried a fourth component.
    pub alpha: Option<f64>,
}

fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return None;
    }

    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let nibble = c.to_digit(16)? as u8;
                out[i] = nibble * 17;
            }
            Some(out)
        }
        6 | 8 => Some([
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ]),
        _ => None,
    }
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `#ff8000` -> `"1 0.5019607843 0"`.
pub fn hex_to_rgb_triplet(hex: &str) -> Option<String> {
    let [r, g, b] = parse_hex_rgb(hex)?;
    Some(
        [r, g, b]
            .iter()
            .map(|c| format_number(f64::from(*c) / 255.0))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// `"1 0.5 0"` -> `#ff8000`. Extra components are ignored.
pub fn rgb_triplet_to_hex(triplet: &str) -> Option<String> {
    let values = parse_number_list(triplet);
    if values.len() < 3 {
        return None;
    }
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        unit_to_byte(values[0]),
        unit_to_byte(values[1]),
        unit_to_byte(values[2])
    ))
}

/// Parse a CAML color attribute, keeping a fourth (alpha) component when present.
pub fn parse_caml_color(value: &str) -> Option<CamlColor> {
    let values = parse_number_list(value);
    let hex = rgb_triplet_to_hex(value)?;
    let alpha = values.get(3).map(|a| a.clamp(0.0, 1.0));
    Some(CamlColor { hex, alpha })
}

/// Format an editor color for CAML; alpha is appended only when it is not opaque.
pub fn format_caml_color(hex: &str, alpha: f64) -> Option<String> {
    let triplet = hex_to_rgb_triplet(hex)?;
    if alpha.is_finite() && alpha < 1.0 {
        Some(format!("{triplet} {}", format_number(alpha.max(0.0))))
    } else {
        Some(triplet)
    }
}

/// Normalize a user supplied hex color to lowercase `#rrggbb`.
pub fn normalize_hex(hex: &str) -> Option<String> {
    let [r, g, b] = parse_hex_rgb(hex)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

#[cfg(test)]
#[path = "../../tests/unit/format/color.rs"]
mod tests;
