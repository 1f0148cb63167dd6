use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::foundation::error::{CamlError, CamlResult};
use crate::model::layer::{Layer, LayerKind};
use crate::model::states::{
    BASE_STATE, GYRO_STATES, ParallaxDict, StateOverrides, StateTransition,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-project settings the encoder needs beyond the layer tree.
pub struct ProjectMeta {
    /// Canvas width in points.
    pub width: f64,
    /// Canvas height in points.
    pub height: f64,
    /// Gyro ("wallpaper") documents are not wrapped and carry parallax groups.
    #[serde(default)]
    pub gyro: bool,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            gyro: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A layer tree plus the state, transition and parallax side tables of one face.
pub struct CamlDocument {
    pub root: Layer,
    #[serde(default)]
    pub project: ProjectMeta,
    /// Ordered, duplicate-free state names (never [`BASE_STATE`]).
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub overrides: StateOverrides,
    #[serde(default)]
    pub transitions: Vec<StateTransition>,
    #[serde(default)]
    pub parallax: Vec<ParallaxDict>,
}

impl CamlDocument {
    /// A document with `root`; gyro projects start with the fixed gyro states.
    pub fn new(root: Layer, project: ProjectMeta) -> Self {
        let states = if project.gyro {
            GYRO_STATES.iter().map(|s| (*s).to_owned()).collect()
        } else {
            Vec::new()
        };
        Self {
            root,
            project,
            states,
            overrides: StateOverrides::new(),
            transitions: Vec::new(),
            parallax: Vec::new(),
        }
    }

    /// Append a state name, ignoring duplicates, blanks and the base state.
    pub fn add_state(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || name == BASE_STATE || self.states.iter().any(|s| s == name) {
            return false;
        }
        self.states.push(name.to_owned());
        true
    }

    /// Parse a document from its JSON form.
    pub fn from_json_str(s: &str) -> CamlResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CamlError::serde(format!("parse document JSON: {e}")))
    }

    /// Load a document from a JSON file; read failures surface as [`CamlError::Io`].
    pub fn from_json_path(path: impl AsRef<Path>) -> CamlResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("open document JSON '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> CamlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for CamlDocument {
    fn default() -> Self {
        let project = ProjectMeta::default();
        let root = Layer::new("root", "Root", LayerKind::Transform)
            .with_position(project.width / 2.0, project.height / 2.0)
            .with_size(project.width, project.height);
        Self::new(root, project)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
