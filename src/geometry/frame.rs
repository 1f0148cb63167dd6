use crate::foundation::core::{Point, finite_or_zero};
use crate::model::layer::Layer;
use crate::model::traverse::find_path_to;

/// Top-left corner of a layer's box inside its container, Y-down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxOrigin {
    pub left: f64,
    pub top: f64,
}

/// A layer's box in root space plus the frame its own position is expressed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsoluteBox {
    pub left: f64,
    pub top: f64,
    /// Whether the layer's parent frame is Y-up.
    pub y_up: bool,
    /// Height of the layer's parent frame.
    pub container_height: f64,
}

/// The layer's anchor point, defaulting to the center `(0.5, 0.5)`.
pub fn anchor_of(layer: &Layer) -> Point {
    match layer.anchor_point {
        Some(p) => Point::new(finite_or_zero(p.x), finite_or_zero(p.y)),
        None => Point::new(0.5, 0.5),
    }
}

/// Box origin of `layer` in a container of `container_height`.
///
/// In a Y-up frame `position.y` is measured from the container's bottom edge.
pub fn to_box(layer: &Layer, container_height: f64, y_up: bool) -> BoxOrigin {
    let anchor = anchor_of(layer);
    let x = finite_or_zero(layer.position.x);
    let y = finite_or_zero(layer.position.y);
    let w = finite_or_zero(layer.size.width);
    let h = finite_or_zero(layer.size.height);
    let container_height = finite_or_zero(container_height);

    let left = x - anchor.x * w;
    let top = if y_up {
        container_height - (y + (1.0 - anchor.y) * h)
    } else {
        y - anchor.y * h
    };
    BoxOrigin {
        left: finite_or_zero(left),
        top: finite_or_zero(top),
    }
}

/// Inverse of [`to_box`]: the position that puts `layer`'s box at `(left, top)`.
pub fn to_position(left: f64, top: f64, layer: &Layer, container_height: f64, y_up: bool) -> Point {
    let anchor = anchor_of(layer);
    let left = finite_or_zero(left);
    let top = finite_or_zero(top);
    let w = finite_or_zero(layer.size.width);
    let h = finite_or_zero(layer.size.height);
    let container_height = finite_or_zero(container_height);

    let x = left + anchor.x * w;
    let y = if y_up {
        container_height - top - (1.0 - anchor.y) * h
    } else {
        top + anchor.y * h
    };
    Point::new(finite_or_zero(x), finite_or_zero(y))
}

/// Resolve the root-space box of the layer `id`.
///
/// Each ancestor on the path establishes the frame for the next level: its own
/// `geometry_flipped` (or the inherited frame when unset) and its height. An unknown
/// id yields a zero box in the root frame.
pub fn absolute_box(id: &str, root: &Layer, root_height: f64, root_flipped: bool) -> AbsoluteBox {
    let mut acc = AbsoluteBox {
        left: 0.0,
        top: 0.0,
        y_up: !root_flipped,
        container_height: finite_or_zero(root_height),
    };
    let Some(path) = find_path_to(root, id) else {
        return acc;
    };

    let last = path.len() - 1;
    for (i, layer) in path.iter().enumerate() {
        let origin = to_box(layer, acc.container_height, acc.y_up);
        acc.left += origin.left;
        acc.top += origin.top;
        if i < last {
            if let Some(flipped) = layer.geometry_flipped {
                acc.y_up = !flipped;
            }
            acc.container_height = finite_or_zero(layer.size.height);
        }
    }
    acc
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/frame.rs"]
mod tests;
