use std::collections::HashSet;
use std::fmt;

use crate::model::layer::Layer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreePathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub struct TreeError {
    pub path: Vec<TreePathElem>,
    pub message: String,
}

impl TreeError {
    fn at(path: &[TreePathElem], field: &'static str, message: impl Into<String>) -> Self {
        let mut path = path.to_vec();
        path.push(TreePathElem::Field(field));
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[TreePathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            TreePathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            TreePathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub struct TreeErrors {
    pub errors: Vec<TreeError>,
}

impl TreeErrors {
    /// True when any error concerns id addressing (empty or duplicate ids).
    pub fn has_id_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.path.last() == Some(&TreePathElem::Field("id")))
    }
}

impl fmt::Display for TreeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TreeErrors {}

/// Check the structural invariants of a layer tree, collecting every violation.
pub fn validate_layer_tree(root: &Layer) -> Result<(), TreeErrors> {
    let mut errors = Vec::new();
    let mut ids = HashSet::<&str>::new();
    validate_layer(root, &mut Vec::new(), &mut ids, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TreeErrors { errors })
    }
}

fn validate_layer<'a>(
    layer: &'a Layer,
    path: &mut Vec<TreePathElem>,
    ids: &mut HashSet<&'a str>,
    errors: &mut Vec<TreeError>,
) {
    if layer.id.trim().is_empty() {
        errors.push(TreeError::at(path, "id", "layer id must be non-empty"));
    } else if !ids.insert(layer.id.as_str()) {
        errors.push(TreeError::at(
            path,
            "id",
            format!("duplicate layer id \"{}\"", layer.id),
        ));
    }

    if !layer.opacity.is_finite() || !(0.0..=1.0).contains(&layer.opacity) {
        errors.push(TreeError::at(path, "opacity", "opacity must be within [0, 1]"));
    }
    if !(0.0..=1.0).contains(&layer.background_opacity) {
        errors.push(TreeError::at(
            path,
            "backgroundOpacity",
            "background opacity must be within [0, 1]",
        ));
    } else if layer.background_color.is_none() && layer.background_opacity != 1.0 {
        // CAML carries this only as the alpha of backgroundColor.
        errors.push(TreeError::at(
            path,
            "backgroundOpacity",
            "background opacity has no effect without a background color",
        ));
    }
    for (field, value) in [
        ("position", layer.position.x),
        ("position", layer.position.y),
        ("size", layer.size.width),
        ("size", layer.size.height),
        ("rotation", layer.rotation),
        ("rotationX", layer.rotation_x),
        ("rotationY", layer.rotation_y),
    ] {
        if !value.is_finite() {
            errors.push(TreeError::at(path, field, format!("{field} must be finite")));
        }
    }
    if layer.size.width < 0.0 || layer.size.height < 0.0 {
        errors.push(TreeError::at(path, "size", "size must be >= 0"));
    }

    if layer.is_liquid_glass() && !layer.children.is_empty() {
        errors.push(TreeError::at(
            path,
            "children",
            "liquid glass layers cannot have children",
        ));
    }

    for (i, child) in layer.children.iter().enumerate() {
        path.push(TreePathElem::Field("children"));
        path.push(TreePathElem::Index(i));
        validate_layer(child, path, ids, errors);
        path.pop();
        path.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/validate.rs"]
mod tests;
