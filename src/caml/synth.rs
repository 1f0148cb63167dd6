//! Sublayers synthesized for liquid glass layers.
//!
//! A liquid glass layer is written as a backdrop layer holding an SDF layer,
//! which in turn holds one SDF element. Both synthetic layers fill the glass
//! bounds, and the element carries the clamped corner radius. They are derived
//! on every encode and dropped on decode.

use crate::caml::keys::{ELEMENT_LAYER_SUFFIX, SDF_LAYER_SUFFIX};
use crate::model::layer::{Layer, LayerKind};
use crate::model::traverse::find_by_id;

pub fn sdf_layer_id(glass_id: &str) -> String {
    format!("{glass_id}{SDF_LAYER_SUFFIX}")
}

pub fn element_layer_id(glass_id: &str) -> String {
    format!("{glass_id}{ELEMENT_LAYER_SUFFIX}")
}

/// The synthetic SDF layer (with its element child) for a liquid glass layer.
pub fn liquid_glass_sublayer(glass: &Layer) -> Layer {
    let (w, h) = (glass.size.width, glass.size.height);
    let mut element = Layer::new(
        element_layer_id(&glass.id),
        format!("{} Element", glass.name),
        LayerKind::Shape,
    )
    .with_position(w / 2.0, h / 2.0)
    .with_size(w, h);
    element.corner_radius = glass.clamped_corner_radius();

    Layer::new(
        sdf_layer_id(&glass.id),
        format!("{} SDF", glass.name),
        LayerKind::Shape,
    )
    .with_position(w / 2.0, h / 2.0)
    .with_size(w, h)
    .with_child(element)
}

/// The liquid glass layer owning the synthetic sublayer `id`, if it is one.
pub fn synthetic_owner<'a>(root: &'a Layer, id: &str) -> Option<&'a Layer> {
    let base = id
        .strip_suffix(SDF_LAYER_SUFFIX)
        .or_else(|| id.strip_suffix(ELEMENT_LAYER_SUFFIX))?;
    find_by_id(root, base).filter(|layer| layer.is_liquid_glass())
}

/// Resolve `id` against the authored tree first, then against synthetic sublayers.
pub fn resolve_layer(root: &Layer, id: &str) -> Option<Layer> {
    if let Some(layer) = find_by_id(root, id) {
        return Some(layer.clone());
    }
    let glass = synthetic_owner(root, id)?;
    let sdf = liquid_glass_sublayer(glass);
    if sdf.id == id {
        return Some(sdf);
    }
    sdf.children.into_iter().find(|child| child.id == id)
}

#[cfg(test)]
#[path = "../../tests/unit/caml/synth.rs"]
mod tests;
