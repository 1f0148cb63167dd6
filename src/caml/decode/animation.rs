use crate::caml::xml::{Node, child, element_children};
use crate::foundation::core::{Point, Size};
use crate::format::units::{
    parse_bool_flag, parse_number, parse_number_array, parse_number_list, rad_to_deg_snapped,
};
use crate::model::layer::{AnimationKeyPath, CalculationMode, KeyframeAnimation, KeyframeValue};
use crate::model::states::KEY_CONTENTS;

fn key_path_of<'a>(anim: Node<'a, '_>) -> Option<&'a str> {
    anim.attribute("keyPath").map(str::trim)
}

fn is_infinite(raw: &str) -> bool {
    raw.trim()
        .trim_start_matches('+')
        .to_ascii_lowercase()
        .starts_with("inf")
}

/// First keyframe animation of a layer that is not the reserved `contents` one.
pub(super) fn decode_keyframe_animation(node: Node<'_, '_>) -> Option<KeyframeAnimation> {
    let animations = child(node, "animations")?;
    let anim = element_children(animations)
        .find(|a| key_path_of(*a).is_some_and(|k| k != KEY_CONTENTS))?;
    let raw_key = key_path_of(anim)?;
    let Some(key_path) = AnimationKeyPath::from_caml_key(raw_key) else {
        tracing::warn!(key_path = raw_key, "unsupported keyframe animation key path");
        return None;
    };

    let values: Vec<KeyframeValue> = child(anim, "values")
        .map(|values| {
            element_children(values)
                .filter_map(|v| keyframe_value(v, key_path))
                .collect()
        })
        .unwrap_or_default();

    let mut decoded = KeyframeAnimation {
        enabled: !values.is_empty(),
        key_path,
        values,
        autoreverses: anim
            .attribute("autoreverses")
            .and_then(parse_bool_flag)
            .unwrap_or(false),
        duration_seconds: None,
        infinite: anim.attribute("repeatCount").is_some_and(is_infinite),
        repeat_duration_seconds: anim.attribute("repeatDuration").and_then(parse_number),
        speed: anim.attribute("speed").and_then(parse_number),
    };
    // The writer fills in the derived duration when none is stored.
    decoded.duration_seconds = anim
        .attribute("duration")
        .and_then(parse_number)
        .filter(|d| *d != decoded.derived_duration());
    Some(decoded)
}

fn keyframe_value(node: Node<'_, '_>, key_path: AnimationKeyPath) -> Option<KeyframeValue> {
    let raw = node.attribute("value")?;
    match key_path {
        AnimationKeyPath::Position => {
            parse_number_array::<2>(raw).map(|[x, y]| KeyframeValue::Point(Point::new(x, y)))
        }
        AnimationKeyPath::Bounds => match parse_number_list(raw).as_slice() {
            [_, _, w, h] | [w, h] => Some(KeyframeValue::Size(Size::new(*w, *h))),
            _ => None,
        },
        k if k.is_rotation() => parse_number(raw).map(|r| KeyframeValue::Scalar(rad_to_deg_snapped(r))),
        _ => parse_number(raw).map(KeyframeValue::Scalar),
    }
}

/// Summary of a video layer's frame-cycling `contents` animation.
pub(super) struct ContentsAnimation {
    pub(super) frames: usize,
    pub(super) duration: Option<f64>,
    pub(super) autoreverses: bool,
    pub(super) calculation_mode: Option<CalculationMode>,
}

pub(super) fn decode_contents_animation(node: Node<'_, '_>) -> Option<ContentsAnimation> {
    let animations = child(node, "animations")?;
    let anim = element_children(animations)
        .find(|a| key_path_of(*a) == Some(KEY_CONTENTS))?;
    Some(ContentsAnimation {
        frames: child(anim, "values")
            .map(|v| element_children(v).count())
            .unwrap_or(0),
        duration: anim.attribute("duration").and_then(parse_number),
        autoreverses: anim
            .attribute("autoreverses")
            .and_then(parse_bool_flag)
            .unwrap_or(false),
        calculation_mode: anim
            .attribute("calculationMode")
            .and_then(CalculationMode::from_caml_name),
    })
}
