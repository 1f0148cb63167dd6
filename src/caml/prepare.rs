//! Pure passes that turn authored state overrides into the table the encoder writes.
//!
//! Core Animation resets any property a state does not mention, so every
//! `(target, keyPath)` pair used by one state must appear in all of them. The
//! passes here never touch the document; each returns a fresh table.

use crate::caml::synth::{element_layer_id, resolve_layer, sdf_layer_id};
use crate::model::document::CamlDocument;
use crate::model::layer::{Layer, LayerKind, clamp_corner_radius};
use crate::model::states::{
    BASE_STATE, GYRO_STATES, KEY_CONTENTS, KEY_CORNER_RADIUS, KEY_HEIGHT, KEY_OPACITY,
    KEY_POSITION_X, KEY_POSITION_Y, KEY_ROTATION_X, KEY_ROTATION_Y, KEY_ROTATION_Z, KEY_WIDTH,
    KEY_Z_POSITION, OverrideValue, StateOverride, StateOverrides, find_override,
    upsert_override,
};
use crate::model::traverse::{find_by_id, walk};

/// State names the encoder emits: declared states, then any extra override keys.
///
/// Gyro documents without declared states fall back to the fixed gyro set.
pub fn effective_states(doc: &CamlDocument) -> Vec<String> {
    let mut states: Vec<String> = if doc.states.is_empty() && doc.project.gyro {
        GYRO_STATES.iter().map(|s| (*s).to_owned()).collect()
    } else {
        doc.states.clone()
    };
    for name in doc.overrides.keys() {
        if name != BASE_STATE && !states.contains(name) {
            tracing::warn!(state = %name, "overrides reference an undeclared state");
            states.push(name.clone());
        }
    }
    states.retain(|s| s != BASE_STATE);
    states
}

/// Live value of a repairable key path on a layer.
pub fn base_value(layer: &Layer, key_path: &str) -> Option<OverrideValue> {
    let v = match key_path {
        KEY_POSITION_X => layer.position.x,
        KEY_POSITION_Y => layer.position.y,
        KEY_WIDTH => layer.size.width,
        KEY_HEIGHT => layer.size.height,
        KEY_ROTATION_Z => layer.rotation,
        KEY_ROTATION_X => layer.rotation_x,
        KEY_ROTATION_Y => layer.rotation_y,
        KEY_OPACITY => layer.opacity,
        KEY_CORNER_RADIUS => layer.corner_radius,
        KEY_Z_POSITION => layer.z_position,
        _ => return None,
    };
    Some(OverrideValue::Number(v))
}

/// Give every state an entry for every `(target, keyPath)` pair used by any state.
///
/// Missing entries take the layer's live value. Pairs whose layer is gone or whose
/// key path has no live value are left alone.
pub fn repair_overrides(states: &[String], overrides: &StateOverrides, root: &Layer) -> StateOverrides {
    let mut out = overrides.clone();
    out.remove(BASE_STATE);
    for state in states {
        out.entry(state.clone()).or_default();
    }

    loop {
        let pairs = used_pairs(states, &out);
        let mut changed = false;
        for (target_id, key_path) in &pairs {
            let Some(value) = resolve_layer(root, target_id)
                .as_ref()
                .and_then(|layer| base_value(layer, key_path))
            else {
                tracing::debug!(target_id = %target_id, key_path = %key_path, "no base value, pair not repaired");
                continue;
            };
            for state in states {
                let list = out.entry(state.clone()).or_default();
                if find_override(list, target_id, key_path).is_none() {
                    list.push(StateOverride::new(target_id.clone(), key_path.clone(), value.clone()));
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    out
}

fn used_pairs(states: &[String], overrides: &StateOverrides) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let lists = states
        .iter()
        .filter_map(|s| overrides.get(s))
        .chain(overrides.iter().filter(|(k, _)| !states.contains(k)).map(|(_, v)| v));
    for list in lists {
        for entry in list {
            if !pairs
                .iter()
                .any(|(t, k)| *t == entry.target_id && *k == entry.key_path)
            {
                pairs.push((entry.target_id.clone(), entry.key_path.clone()));
            }
        }
    }
    pairs
}

/// Mirror liquid glass size and corner overrides onto the synthetic sublayers.
///
/// A width `w` becomes the width of both synthetic layers and a `position.x` of
/// `w / 2`; height likewise on Y. A corner radius goes to the element only.
pub fn propagate_liquid_glass(overrides: &StateOverrides, root: &Layer) -> StateOverrides {
    let mut out = overrides.clone();
    for list in out.values_mut() {
        let mut derived = Vec::new();
        for entry in list.iter() {
            let Some(v) = entry.value.as_number() else {
                continue;
            };
            let is_glass = find_by_id(root, &entry.target_id)
                .is_some_and(Layer::is_liquid_glass);
            if !is_glass {
                continue;
            }
            let sdf = sdf_layer_id(&entry.target_id);
            let element = element_layer_id(&entry.target_id);
            match entry.key_path.as_str() {
                KEY_WIDTH | KEY_HEIGHT => {
                    let center_key = if entry.key_path == KEY_WIDTH {
                        KEY_POSITION_X
                    } else {
                        KEY_POSITION_Y
                    };
                    for id in [&sdf, &element] {
                        derived.push(StateOverride::new(id.as_str(), entry.key_path.as_str(), v));
                        derived.push(StateOverride::new(id.as_str(), center_key, v / 2.0));
                    }
                }
                KEY_CORNER_RADIUS => {
                    derived.push(StateOverride::new(element.as_str(), KEY_CORNER_RADIUS, v));
                }
                _ => {}
            }
        }
        for entry in derived {
            upsert_override(list, entry);
        }
    }
    out
}

/// Pin every state-synced video to its per-state frame.
pub fn sync_video_contents(states: &[String], overrides: &StateOverrides, root: &Layer) -> StateOverrides {
    let mut out = overrides.clone();
    walk(root, &mut |layer| {
        let LayerKind::Video(video) = &layer.kind else {
            return;
        };
        if !video.sync_with_state || video.frame_count == 0 {
            return;
        }
        for state in states {
            let src = video.frame_src(video.frame_for_state(state));
            let list = out.entry(state.clone()).or_default();
            upsert_override(list, StateOverride::new(layer.id.as_str(), KEY_CONTENTS, src.as_str()));
        }
    });
    out
}

/// Add a corner radius override wherever a state's size would cut the base radius.
///
/// States that shrink a layer without mentioning `cornerRadius` would otherwise
/// render the base radius on the smaller box. The added entry carries the base
/// radius; [`clamp_state_corner_radii`] brings it down to the state's size.
pub fn add_state_corner_radii(overrides: &StateOverrides, root: &Layer) -> StateOverrides {
    let mut out = overrides.clone();
    for list in out.values_mut() {
        let mut added: Vec<StateOverride> = Vec::new();
        for entry in list.iter() {
            if entry.key_path != KEY_WIDTH && entry.key_path != KEY_HEIGHT {
                continue;
            }
            let target_id = entry.target_id.as_str();
            if find_override(list, target_id, KEY_CORNER_RADIUS).is_some()
                || find_override(&added, target_id, KEY_CORNER_RADIUS).is_some()
            {
                continue;
            }
            let Some(layer) = resolve_layer(root, target_id) else {
                continue;
            };
            let size_in_state = |key: &str, live: f64| {
                find_override(list, target_id, key)
                    .and_then(|o| o.value.as_number())
                    .unwrap_or(live)
            };
            let w = size_in_state(KEY_WIDTH, layer.size.width);
            let h = size_in_state(KEY_HEIGHT, layer.size.height);
            if clamp_corner_radius(layer.corner_radius, w, h) < layer.clamped_corner_radius() {
                added.push(StateOverride::new(target_id, KEY_CORNER_RADIUS, layer.corner_radius));
            }
        }
        list.extend(added);
    }
    out
}

/// Clamp each corner radius override against the size the layer has in that state.
pub fn clamp_state_corner_radii(overrides: &StateOverrides, root: &Layer) -> StateOverrides {
    let mut out = overrides.clone();
    for list in out.values_mut() {
        let snapshot = list.clone();
        for entry in list.iter_mut() {
            if entry.key_path != KEY_CORNER_RADIUS {
                continue;
            }
            let Some(r) = entry.value.as_number() else {
                continue;
            };
            let Some(layer) = resolve_layer(root, &entry.target_id) else {
                continue;
            };
            let size_in_state = |key: &str, live: f64| {
                find_override(&snapshot, &entry.target_id, key)
                    .and_then(|o| o.value.as_number())
                    .unwrap_or(live)
            };
            let w = size_in_state(KEY_WIDTH, layer.size.width);
            let h = size_in_state(KEY_HEIGHT, layer.size.height);
            entry.value = OverrideValue::Number(clamp_corner_radius(r, w, h));
        }
    }
    out
}

/// Run the full override pipeline for `doc`, returning the states and table to emit.
pub fn prepare_overrides(doc: &CamlDocument) -> (Vec<String>, StateOverrides) {
    let root = &doc.root;
    let states = effective_states(doc);
    let table = repair_overrides(&states, &doc.overrides, root);
    let table = propagate_liquid_glass(&table, root);
    let table = sync_video_contents(&states, &table, root);
    let table = add_state_corner_radii(&table, root);
    let table = repair_overrides(&states, &table, root);
    let table = clamp_state_corner_radii(&table, root);
    (states, table)
}

#[cfg(test)]
#[path = "../../tests/unit/caml/prepare.rs"]
mod tests;
