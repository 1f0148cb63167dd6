use crate::caml::synth::synthetic_owner;
use crate::caml::xml::XmlElement;
use crate::format::units::{deg_to_rad, format_number, is_whole};
use crate::model::layer::Layer;
use crate::model::states::{
    KEY_CONTENTS, KEY_POSITION_X, KEY_POSITION_Y, OverrideValue, ParallaxDict, StateOverride,
    StateOverrides, StateTransition, TransitionAnimation, default_transitions,
    is_rotation_key_path,
};
use crate::model::traverse::find_by_id;

fn typed_string(name: &str, v: &str) -> XmlElement {
    XmlElement::new(name).attr("type", "string").attr("value", v)
}

/// Whole numbers are typed `integer`, everything else `real`.
fn typed_number(name: &str, v: f64) -> XmlElement {
    let kind = if is_whole(v) { "integer" } else { "real" };
    XmlElement::new(name)
        .attr("type", kind)
        .attr("value", format_number(v))
}

fn set_value(entry: &StateOverride) -> XmlElement {
    let value = match &entry.value {
        OverrideValue::Number(v) => {
            let v = match entry.key_path.as_str() {
                KEY_POSITION_X | KEY_POSITION_Y => v.round(),
                key if is_rotation_key_path(key) => deg_to_rad(*v),
                _ => *v,
            };
            typed_number("value", v)
        }
        OverrideValue::Text(src) if entry.key_path == KEY_CONTENTS => XmlElement::new("value")
            .attr("type", "CGImage")
            .attr("src", src.as_str()),
        OverrideValue::Text(text) => XmlElement::new("value")
            .attr("type", "string")
            .attr("value", text.as_str()),
    };
    XmlElement::new("LKStateSetValue")
        .attr("targetId", entry.target_id.as_str())
        .attr("keyPath", entry.key_path.as_str())
        .child(value)
}

/// `<states>` with one `LKState` per name, in order.
pub(super) fn states_element(names: &[String], table: &StateOverrides, root: &Layer) -> XmlElement {
    let mut states = XmlElement::new("states");
    for name in names {
        let mut elements = XmlElement::new("elements");
        for entry in table.get(name).map(Vec::as_slice).unwrap_or_default() {
            let known = find_by_id(root, &entry.target_id).is_some()
                || synthetic_owner(root, &entry.target_id).is_some();
            if !known {
                tracing::warn!(state = %name, target_id = %entry.target_id, "override targets an unknown layer");
            }
            elements.push(set_value(entry));
        }
        states.push(
            XmlElement::new("LKState")
                .attr("name", name.as_str())
                .child(elements),
        );
    }
    states
}

fn transition_animation(key_path: &str, anim: &TransitionAnimation) -> XmlElement {
    let mut el = XmlElement::new("animation")
        .attr("type", anim.kind.caml_type())
        .attr("keyPath", key_path);
    for (key, value) in [
        ("damping", anim.damping),
        ("mass", anim.mass),
        ("stiffness", anim.stiffness),
        ("velocity", anim.velocity),
        ("duration", anim.duration),
    ] {
        if let Some(v) = value {
            el.set_attr(key, format_number(v));
        }
    }
    if let Some(fill) = &anim.fill_mode {
        el.set_attr("fillMode", fill.as_str());
    }
    el
}

/// `<stateTransitions>`; the wildcard defaults stand in when none are authored.
pub(super) fn transitions_element(transitions: &[StateTransition]) -> XmlElement {
    let defaults;
    let transitions = if transitions.is_empty() {
        defaults = default_transitions();
        defaults.as_slice()
    } else {
        transitions
    };

    let mut out = XmlElement::new("stateTransitions");
    for transition in transitions {
        let mut elements = XmlElement::new("elements");
        for element in &transition.elements {
            let mut el = XmlElement::new("LKStateTransitionElement")
                .attr("key", element.key_path.as_str())
                .attr("targetId", element.target_id.as_str());
            if let Some(anim) = &element.animation {
                el.push(transition_animation(&element.key_path, anim));
            }
            elements.push(el);
        }
        out.push(
            XmlElement::new("LKStateTransition")
                .attr("fromState", transition.from_state.as_str())
                .attr("toState", transition.to_state.as_str())
                .child(elements),
        );
    }
    out
}

/// `<wallpaperParallaxGroups>` with one `NSDictionary` per entry.
pub(super) fn parallax_element(parallax: &[ParallaxDict]) -> XmlElement {
    let mut out = XmlElement::new("wallpaperParallaxGroups");
    for dict in parallax {
        out.push(
            XmlElement::new("NSDictionary")
                .child(typed_string("axis", dict.axis.caml_name()))
                .child(typed_string("image", &dict.image))
                .child(typed_string("keyPath", dict.key_path.caml_key()))
                .child(typed_string("layerName", &dict.layer_name))
                .child(typed_number("mapMaxTo", dict.map_max_to))
                .child(typed_number("mapMinTo", dict.map_min_to))
                .child(typed_string("title", &dict.title))
                .child(typed_string("view", &dict.view)),
        );
    }
    out
}
