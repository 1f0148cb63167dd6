//! CAML text to [`CamlDocument`].
//!
//! Decoding is tolerant: unknown elements and attributes are ignored, malformed
//! values fall back to their defaults, and [`decode`] never fails. Use
//! [`try_decode`] to see why a document could not be read at all.

mod animation;
mod layer;
mod states;

use crate::caml::keys::{WRAPPER_ROOT_ID, is_layer_tag};
use crate::caml::xml::{Node, child, element_children};
use crate::format::units::parse_number_array;
use crate::foundation::error::{CamlError, CamlResult};
use crate::model::document::{CamlDocument, ProjectMeta};
use crate::model::traverse::collect_ids;

/// Decode CAML, returning an empty document when the text is not usable.
pub fn decode(xml: &str) -> CamlDocument {
    match try_decode(xml) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(error = %err, "could not decode CAML, using an empty document");
            CamlDocument::default()
        }
    }
}

#[tracing::instrument(skip(xml), fields(bytes = xml.len()))]
pub fn try_decode(xml: &str) -> CamlResult<CamlDocument> {
    let parsed = roxmltree::Document::parse(xml)
        .map_err(|e| CamlError::xml(format!("parse CAML: {e}")))?;
    let top = top_layer(parsed.root_element())
        .ok_or_else(|| CamlError::xml("no layer element in CAML document"))?;

    let wrapped = top.attribute("id") == Some(WRAPPER_ROOT_ID);
    let authored = if wrapped {
        child(top, "sublayers")
            .and_then(|s| element_children(s).find(|n| is_layer_tag(n.tag_name().name())))
            .ok_or_else(|| CamlError::xml("wrapper root has no authored layer"))?
    } else {
        top
    };

    let mut ctx = layer::DecodeContext::default();
    let root = layer::decode_layer(authored, &mut ctx);

    let (width, height) = top
        .attribute("bounds")
        .and_then(parse_number_array::<4>)
        .map(|[_, _, w, h]| (w, h))
        .unwrap_or((root.size.width, root.size.height));
    let project = ProjectMeta {
        width,
        height,
        gyro: !wrapped,
    };

    let mut ids = collect_ids(&root);
    ids.sort_unstable();
    for pair in ids.windows(2) {
        if pair[0] == pair[1] {
            tracing::warn!(id = pair[0], "duplicate layer id in CAML");
        }
    }

    let doc = CamlDocument {
        states: states::decode_state_names(top),
        overrides: states::decode_overrides(top, &root),
        transitions: states::decode_transitions(top),
        parallax: states::decode_parallax(top),
        root,
        project,
    };
    tracing::debug!(
        states = doc.states.len(),
        transitions = doc.transitions.len(),
        gyro = doc.project.gyro,
        "decoded CAML document"
    );
    Ok(doc)
}

fn top_layer<'a, 'input>(root: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    if is_layer_tag(root.tag_name().name()) {
        return Some(root);
    }
    element_children(root).find(|n| is_layer_tag(n.tag_name().name()))
}

#[cfg(test)]
#[path = "../../../tests/unit/caml/decode.rs"]
mod tests;
