//! Composite `transform` attribute strings such as `translate(10, 0, 0) rotate(0.5, 0, 0, 1)`.

use crate::foundation::core::Vec3;
use crate::format::units::{format_number, parse_number_list};

#[derive(Clone, Debug, PartialEq)]
pub enum TransformOp {
    Translate(Vec3),
    /// Angle in radians around a (not necessarily unit) axis.
    Rotate { angle: f64, axis: [f64; 3] },
    Scale(Vec3),
}

/// Parse every recognized `name(args)` term; unknown or malformed terms are skipped.
pub fn parse_transform(s: &str) -> Vec<TransformOp> {
    let mut ops = Vec::new();
    let mut rest = s;
    while let Some(open) = rest.find('(') {
        let Some(close_rel) = rest[open..].find(')') else {
            break;
        };
        let close = open + close_rel;
        let name = rest[..open]
            .trim()
            .rsplit(|c: char| !c.is_ascii_alphanumeric())
            .next()
            .unwrap_or("");
        let args = parse_number_list(&rest[open + 1..close]);
        if let Some(op) = term(name, &args) {
            ops.push(op);
        }
        rest = &rest[close + 1..];
    }
    ops
}

fn term(name: &str, args: &[f64]) -> Option<TransformOp> {
    match (name, args) {
        ("translate", [x, y]) => Some(TransformOp::Translate(Vec3::new(*x, *y, 0.0))),
        ("translate", [x, y, z]) => Some(TransformOp::Translate(Vec3::new(*x, *y, *z))),
        ("rotate", [angle]) => Some(TransformOp::Rotate {
            angle: *angle,
            axis: [0.0, 0.0, 1.0],
        }),
        ("rotate", [angle, ax, ay, az]) => Some(TransformOp::Rotate {
            angle: *angle,
            axis: [*ax, *ay, *az],
        }),
        ("scale", [s]) => Some(TransformOp::Scale(Vec3::new(*s, *s, 1.0))),
        ("scale", [x, y]) => Some(TransformOp::Scale(Vec3::new(*x, *y, 1.0))),
        ("scale", [x, y, z]) => Some(TransformOp::Scale(Vec3::new(*x, *y, *z))),
        _ => None,
    }
}

const UNIT_AXES: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Per-axis rotations `(x, y, z)` in radians.
///
/// Only exact unit axes count; a rotation about a mixed axis cannot be split and
/// is ignored.
pub fn axis_rotations(ops: &[TransformOp]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for op in ops {
        if let TransformOp::Rotate { angle, axis } = op {
            if let Some(slot) = UNIT_AXES.iter().position(|unit| unit == axis) {
                out[slot] += *angle;
            }
        }
    }
    out
}

pub fn translation(ops: &[TransformOp]) -> Vec3 {
    ops.iter().fold(Vec3::ZERO, |acc, op| match op {
        TransformOp::Translate(t) => Vec3::new(acc.x + t.x, acc.y + t.y, acc.z + t.z),
        _ => acc,
    })
}

/// Format a translation followed by a Z rotation (radians). Identity terms are left out.
pub fn format_transform(translate: Vec3, rotate_z: f64) -> Option<String> {
    let mut terms = Vec::new();
    if !translate.is_zero() {
        terms.push(format!(
            "translate({}, {}, {})",
            format_number(translate.x),
            format_number(translate.y),
            format_number(translate.z)
        ));
    }
    if rotate_z != 0.0 && rotate_z.is_finite() {
        terms.push(format!("rotate({}, 0, 0, 1)", format_number(rotate_z)));
    }
    (!terms.is_empty()).then(|| terms.join(" "))
}

#[cfg(test)]
#[path = "../../tests/unit/caml/transform.rs"]
mod tests;
