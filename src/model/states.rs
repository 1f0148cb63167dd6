use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STATE_LOCKED: &str = "Locked";
pub const STATE_UNLOCK: &str = "Unlock";
pub const STATE_SLEEP: &str = "Sleep";
/// The implicit base configuration; never a named state.
pub const BASE_STATE: &str = "Base State";

/// The fixed state set of gyro wallpapers.
pub const GYRO_STATES: [&str; 3] = [STATE_LOCKED, STATE_UNLOCK, STATE_SLEEP];

/// Key paths a state override may target.
pub const KEY_POSITION_X: &str = "position.x";
pub const KEY_POSITION_Y: &str = "position.y";
pub const KEY_WIDTH: &str = "bounds.size.width";
pub const KEY_HEIGHT: &str = "bounds.size.height";
pub const KEY_ROTATION_Z: &str = "transform.rotation.z";
pub const KEY_ROTATION_X: &str = "transform.rotation.x";
pub const KEY_ROTATION_Y: &str = "transform.rotation.y";
pub const KEY_OPACITY: &str = "opacity";
pub const KEY_CORNER_RADIUS: &str = "cornerRadius";
pub const KEY_Z_POSITION: &str = "zPosition";
pub const KEY_CONTENTS: &str = "contents";

/// Rotation key paths; their override values are degrees in memory, radians in CAML.
pub fn is_rotation_key_path(key_path: &str) -> bool {
    matches!(key_path, KEY_ROTATION_Z | KEY_ROTATION_X | KEY_ROTATION_Y)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Number(f64),
    Text(String),
}

impl OverrideValue {
    /// The numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for OverrideValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for OverrideValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A property value a layer takes while a named state is active.
pub struct StateOverride {
    pub target_id: String,
    pub key_path: String,
    pub value: OverrideValue,
}

impl StateOverride {
    pub fn new(
        target_id: impl Into<String>,
        key_path: impl Into<String>,
        value: impl Into<OverrideValue>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            key_path: key_path.into(),
            value: value.into(),
        }
    }

    /// True when this entry addresses `(target_id, key_path)`.
    pub fn targets(&self, target_id: &str, key_path: &str) -> bool {
        self.target_id == target_id && self.key_path == key_path
    }
}

/// Overrides grouped by state name.
pub type StateOverrides = BTreeMap<String, Vec<StateOverride>>;

/// Look up the override for `(target_id, key_path)` in one state's list.
pub fn find_override<'a>(
    list: &'a [StateOverride],
    target_id: &str,
    key_path: &str,
) -> Option<&'a StateOverride> {
    list.iter().find(|o| o.targets(target_id, key_path))
}

/// Replace the value of an existing entry or append a new one.
pub fn upsert_override(list: &mut Vec<StateOverride>, entry: StateOverride) {
    match list
        .iter_mut()
        .find(|o| o.targets(&entry.target_id, &entry.key_path))
    {
        Some(existing) => existing.value = entry.value,
        None => list.push(entry),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionAnimationKind {
    #[default]
    Spring,
    Basic,
}

impl TransitionAnimationKind {
    pub fn caml_type(self) -> &'static str {
        match self {
            Self::Spring => "CASpringAnimation",
            Self::Basic => "CABasicAnimation",
        }
    }

    /// Parse a transition animation `type` attribute.
    pub fn from_caml_type(name: &str) -> Option<Self> {
        match name.trim() {
            "CASpringAnimation" => Some(Self::Spring),
            "CABasicAnimation" => Some(Self::Basic),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionAnimation {
    pub kind: TransitionAnimationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damping: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionElement {
    pub target_id: String,
    pub key_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<TransitionAnimation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How the host animates between two states; `*` matches any state.
pub struct StateTransition {
    pub from_state: String,
    pub to_state: String,
    #[serde(default)]
    pub elements: Vec<TransitionElement>,
}

impl StateTransition {
    pub fn new(from_state: impl Into<String>, to_state: impl Into<String>) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
            elements: Vec::new(),
        }
    }
}

/// Wildcard transitions into and out of each gyro state, without elements.
pub fn default_transitions() -> Vec<StateTransition> {
    [STATE_UNLOCK, STATE_LOCKED, STATE_SLEEP]
        .into_iter()
        .flat_map(|state| {
            [
                StateTransition::new("*", state),
                StateTransition::new(state, "*"),
            ]
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParallaxAxis {
    X,
    Y,
}

impl ParallaxAxis {
    pub fn caml_name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        match name.trim() {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParallaxKeyPath {
    #[serde(rename = "position.x")]
    PositionX,
    #[serde(rename = "position.y")]
    PositionY,
    #[serde(rename = "transform.translation.x")]
    TranslationX,
    #[serde(rename = "transform.translation.y")]
    TranslationY,
    #[serde(rename = "transform.rotation.x")]
    RotationX,
    #[serde(rename = "transform.rotation.y")]
    RotationY,
}

impl ParallaxKeyPath {
    pub const ALL: [Self; 6] = [
        Self::PositionX,
        Self::PositionY,
        Self::TranslationX,
        Self::TranslationY,
        Self::RotationX,
        Self::RotationY,
    ];

    pub fn caml_key(self) -> &'static str {
        match self {
            Self::PositionX => "position.x",
            Self::PositionY => "position.y",
            Self::TranslationX => "transform.translation.x",
            Self::TranslationY => "transform.translation.y",
            Self::RotationX => "transform.rotation.x",
            Self::RotationY => "transform.rotation.y",
        }
    }

    pub fn from_caml_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|k| k.caml_key() == key)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Maps one device-tilt axis onto a property delta of a named layer.
pub struct ParallaxDict {
    pub axis: ParallaxAxis,
    #[serde(default)]
    pub image: String,
    pub key_path: ParallaxKeyPath,
    pub layer_name: String,
    pub map_min_to: f64,
    pub map_max_to: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub view: String,
}

#[cfg(test)]
#[path = "../../tests/unit/model/states.rs"]
mod tests;
