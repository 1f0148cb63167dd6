//! State tables: `LKState` set-values, legacy wallpaper property groups,
//! transitions and parallax dictionaries.

use std::collections::BTreeMap;

use crate::caml::synth::synthetic_owner;
use crate::caml::xml::{Node, child, children_named, element_children};
use crate::format::units::{parse_number, rad_to_deg_snapped};
use crate::model::layer::{Layer, LayerKind};
use crate::model::states::{
    BASE_STATE, GYRO_STATES, KEY_CONTENTS, OverrideValue, ParallaxAxis, ParallaxDict,
    ParallaxKeyPath, STATE_LOCKED, STATE_SLEEP, STATE_UNLOCK, StateOverride, StateOverrides,
    StateTransition, TransitionAnimation, TransitionAnimationKind, TransitionElement,
    is_rotation_key_path,
};
use crate::model::traverse::{find_by_id, find_id_by_name};

/// Legacy group value keys and the state each one feeds.
const LEGACY_VALUE_KEYS: [(&str, &str); 3] = [
    ("v_lock", STATE_LOCKED),
    ("v_home", STATE_UNLOCK),
    ("v_sleep", STATE_SLEEP),
];

fn lk_states<'a, 'input: 'a>(top: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    child(top, "states")
        .map(|states| children_named(states, "LKState").collect())
        .unwrap_or_default()
}

fn legacy_groups<'a, 'input: 'a>(top: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    child(top, "wallpaperPropertyGroups")
        .map(|groups| children_named(groups, "NSDictionary").collect())
        .unwrap_or_default()
}

/// Entries of a property-list style dictionary: `<key type=".." value=".."/>` children.
fn dict_fields<'a>(dict: Node<'a, '_>) -> BTreeMap<&'a str, &'a str> {
    element_children(dict)
        .filter_map(|field| Some((field.tag_name().name(), field.attribute("value")?)))
        .collect()
}

pub(super) fn decode_state_names(top: Node<'_, '_>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for state in lk_states(top) {
        let Some(name) = state.attribute("name").map(str::trim) else {
            continue;
        };
        if name.is_empty() || name == BASE_STATE || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_owned());
    }
    if names.is_empty() && !legacy_groups(top).is_empty() {
        names = GYRO_STATES.iter().map(|s| (*s).to_owned()).collect();
    }
    names
}

/// Overrides from `LKState` elements, or from legacy groups when there are none.
///
/// Entries the encoder derives (synthetic liquid glass targets, video `contents`)
/// are dropped; they are rebuilt on the next encode.
pub(super) fn decode_overrides(top: Node<'_, '_>, root: &Layer) -> StateOverrides {
    let states = lk_states(top);
    if states.is_empty() {
        return decode_legacy_groups(top, root);
    }

    let mut out = StateOverrides::new();
    for state in states {
        let Some(name) = state.attribute("name").map(str::trim) else {
            continue;
        };
        if name.is_empty() || name == BASE_STATE {
            continue;
        }
        let Some(elements) = child(state, "elements") else {
            continue;
        };
        for set in children_named(elements, "LKStateSetValue") {
            if let Some(entry) = decode_set_value(set, root) {
                out.entry(name.to_owned()).or_default().push(entry);
            }
        }
    }
    out
}

fn decode_set_value(set: Node<'_, '_>, root: &Layer) -> Option<StateOverride> {
    let target_id = set.attribute("targetId").map(str::trim).filter(|s| !s.is_empty())?;
    let key_path = set.attribute("keyPath").map(str::trim).filter(|s| !s.is_empty())?;

    if synthetic_owner(root, target_id).is_some() {
        return None;
    }
    if key_path == KEY_CONTENTS
        && find_by_id(root, target_id).is_some_and(|l| matches!(l.kind, LayerKind::Video(_)))
    {
        return None;
    }

    let value_node = child(set, "value")?;
    let value = match value_node.attribute("type").map(str::trim) {
        Some("integer" | "real" | "float" | "double" | "number") => {
            let Some(v) = value_node.attribute("value").and_then(parse_number) else {
                tracing::warn!(target_id, key_path, "non-numeric state value, skipping");
                return None;
            };
            OverrideValue::Number(v)
        }
        Some("CGImage") => OverrideValue::Text(
            value_node
                .attribute("src")
                .or_else(|| value_node.attribute("value"))?
                .to_owned(),
        ),
        Some(_) => OverrideValue::Text(value_node.attribute("value")?.to_owned()),
        None => {
            let raw = value_node.attribute("value")?;
            match parse_number(raw) {
                Some(v) => OverrideValue::Number(v),
                None => OverrideValue::Text(raw.to_owned()),
            }
        }
    };
    let value = match value {
        OverrideValue::Number(rad) if is_rotation_key_path(key_path) => {
            OverrideValue::Number(rad_to_deg_snapped(rad))
        }
        other => other,
    };
    Some(StateOverride::new(target_id, key_path, value))
}

fn decode_legacy_groups(top: Node<'_, '_>, root: &Layer) -> StateOverrides {
    let mut out = StateOverrides::new();
    for group in legacy_groups(top) {
        let fields = dict_fields(group);
        let (Some(key_path), Some(layer_name)) = (fields.get("keyPath"), fields.get("layerName"))
        else {
            tracing::warn!("wallpaper property group without keyPath or layerName");
            continue;
        };
        let Some(target_id) = find_id_by_name(root, layer_name) else {
            tracing::warn!(layer_name = *layer_name, "wallpaper property group names no unique layer");
            continue;
        };
        for (field, state) in LEGACY_VALUE_KEYS {
            if let Some(v) = fields.get(field).and_then(|raw| parse_number(raw)) {
                out.entry(state.to_owned())
                    .or_default()
                    .push(StateOverride::new(target_id.as_str(), *key_path, v));
            }
        }
    }
    out
}

pub(super) fn decode_transitions(top: Node<'_, '_>) -> Vec<StateTransition> {
    let Some(transitions) = child(top, "stateTransitions") else {
        return Vec::new();
    };
    children_named(transitions, "LKStateTransition")
        .filter_map(|t| {
            let mut transition =
                StateTransition::new(t.attribute("fromState")?, t.attribute("toState")?);
            if let Some(elements) = child(t, "elements") {
                transition.elements = children_named(elements, "LKStateTransitionElement")
                    .filter_map(decode_transition_element)
                    .collect();
            }
            Some(transition)
        })
        .collect()
}

fn decode_transition_element(el: Node<'_, '_>) -> Option<TransitionElement> {
    let animation = child(el, "animation").map(|a| {
        let n = |name: &str| a.attribute(name).and_then(parse_number);
        TransitionAnimation {
            kind: a
                .attribute("type")
                .and_then(TransitionAnimationKind::from_caml_type)
                .unwrap_or_default(),
            damping: n("damping"),
            mass: n("mass"),
            stiffness: n("stiffness"),
            velocity: n("velocity"),
            duration: n("duration"),
            fill_mode: a.attribute("fillMode").map(str::to_owned),
        }
    });
    Some(TransitionElement {
        target_id: el.attribute("targetId")?.to_owned(),
        key_path: el.attribute("key")?.to_owned(),
        animation,
    })
}

pub(super) fn decode_parallax(top: Node<'_, '_>) -> Vec<ParallaxDict> {
    let Some(groups) = child(top, "wallpaperParallaxGroups") else {
        return Vec::new();
    };
    children_named(groups, "NSDictionary")
        .filter_map(|dict| {
            let fields = dict_fields(dict);
            let text = |name: &str| fields.get(name).map(|v| (*v).to_owned()).unwrap_or_default();
            let number = |name: &str| fields.get(name).and_then(|v| parse_number(v)).unwrap_or(0.0);
            let axis = fields.get("axis").and_then(|a| ParallaxAxis::from_caml_name(a));
            let key_path = fields.get("keyPath").and_then(|k| ParallaxKeyPath::from_caml_key(k));
            let (Some(axis), Some(key_path)) = (axis, key_path) else {
                tracing::warn!("parallax group with unknown axis or key path");
                return None;
            };
            let layer_name = fields.get("layerName")?;
            Some(ParallaxDict {
                axis,
                image: text("image"),
                key_path,
                layer_name: (*layer_name).to_owned(),
                map_min_to: number("mapMinTo"),
                map_max_to: number("mapMaxTo"),
                title: text("title"),
                view: text("view"),
            })
        })
        .collect()
}
