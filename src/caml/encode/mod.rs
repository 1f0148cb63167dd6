//! [`CamlDocument`] to CAML text.

mod animation;
mod layer;
mod states;

use serde::{Deserialize, Serialize};

use crate::caml::keys::{CAML_NAMESPACE, TAG_LAYER, WRAPPER_ROOT_ID, WRAPPER_ROOT_NAME};
use crate::caml::prepare::prepare_overrides;
use crate::caml::xml::{XmlElement, write_document};
use crate::format::units::format_number;
use crate::foundation::error::{CamlError, CamlResult};
use crate::model::document::{CamlDocument, ProjectMeta};
use crate::model::validate::validate_layer_tree;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Output settings for [`encode_with`].
pub struct EncodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Comment written right after the XML declaration.
    pub banner: Option<String>,
    /// Check the layer tree first. Id problems abort; other findings are logged.
    pub validate: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            banner: None,
            validate: true,
        }
    }
}

pub fn encode(doc: &CamlDocument) -> CamlResult<String> {
    encode_with(doc, &EncodeOptions::default())
}

#[tracing::instrument(skip(doc, opts), fields(root = %doc.root.id, gyro = doc.project.gyro))]
pub fn encode_with(doc: &CamlDocument, opts: &EncodeOptions) -> CamlResult<String> {
    if opts.validate {
        if let Err(errors) = validate_layer_tree(&doc.root) {
            if errors.has_id_errors() {
                return Err(CamlError::validation(format!("layer tree:\n{errors}")));
            }
            for err in &errors.errors {
                tracing::warn!(error = %err, "encoding layer tree with a validation finding");
            }
        }
    }

    let (state_names, table) = prepare_overrides(doc);

    let authored = layer::layer_element(&doc.root);
    let mut top = if doc.project.gyro {
        authored
    } else {
        wrapper(&doc.project).child(XmlElement::new("sublayers").child(authored))
    };

    if !state_names.is_empty() {
        top.push(states::states_element(&state_names, &table, &doc.root));
    }
    top.push(states::transitions_element(&doc.transitions));
    if doc.project.gyro {
        top.push_non_empty(states::parallax_element(&doc.parallax));
    }

    let caml = XmlElement::new("caml")
        .attr("xmlns", CAML_NAMESPACE)
        .child(top);
    let out = write_document(&caml, opts.indent, opts.banner.as_deref())?;
    tracing::debug!(bytes = out.len(), states = state_names.len(), "encoded CAML document");
    Ok(out)
}

/// Outer root for non-gyro documents. It keeps the authored root's own geometry
/// and flip intact inside a plain Y-up canvas of the project size.
fn wrapper(project: &ProjectMeta) -> XmlElement {
    let (w, h) = (project.width, project.height);
    XmlElement::new(TAG_LAYER)
        .attr("id", WRAPPER_ROOT_ID)
        .attr("name", WRAPPER_ROOT_NAME)
        .attr("bounds", format!("0 0 {} {}", format_number(w), format_number(h)))
        .attr(
            "position",
            format!("{} {}", format_number(w / 2.0), format_number(h / 2.0)),
        )
        .attr("geometryFlipped", "0")
}

#[cfg(test)]
#[path = "../../../tests/unit/caml/encode.rs"]
mod tests;
