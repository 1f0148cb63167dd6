use crate::caml::xml::XmlElement;
use crate::format::units::{deg_to_rad, format_bool_flag, format_number};
use crate::model::layer::{AnimationKeyPath, KeyframeAnimation, KeyframeValue, VideoLayer};
use crate::model::states::KEY_CONTENTS;

/// `<animation type="CAKeyframeAnimation">` for an enabled animation with values.
pub(super) fn keyframe_animation_element(anim: &KeyframeAnimation) -> Option<XmlElement> {
    if !anim.enabled || anim.values.is_empty() {
        return None;
    }
    let mut values = XmlElement::new("values");
    for value in &anim.values {
        if !value.fits(anim.key_path) {
            tracing::warn!(key_path = anim.key_path.caml_key(), ?value, "keyframe does not fit its key path");
            continue;
        }
        values.push(keyframe_value(anim.key_path, value));
    }

    let mut el = XmlElement::new("animation")
        .attr("type", "CAKeyframeAnimation")
        .attr("keyPath", anim.key_path.caml_key())
        .attr("autoreverses", format_bool_flag(anim.autoreverses))
        .attr("beginTime", "0")
        .attr("duration", format_number(anim.effective_duration()))
        .attr("removedOnCompletion", "0");
    if anim.infinite {
        el.set_attr("repeatCount", "inf");
    }
    if let Some(d) = anim.repeat_duration_seconds {
        el.set_attr("repeatDuration", format_number(d));
    }
    if let Some(speed) = anim.speed {
        el.set_attr("speed", format_number(speed));
    }
    Some(el.child(values))
}

fn keyframe_value(key_path: AnimationKeyPath, value: &KeyframeValue) -> XmlElement {
    match value {
        KeyframeValue::Point(p) => XmlElement::new("CGPoint").attr(
            "value",
            format!("{} {}", format_number(p.x.round()), format_number(p.y.round())),
        ),
        KeyframeValue::Size(s) => XmlElement::new("CGRect").attr(
            "value",
            format!("0 0 {} {}", format_number(s.width), format_number(s.height)),
        ),
        KeyframeValue::Scalar(v) => {
            let v = match key_path {
                AnimationKeyPath::PositionX | AnimationKeyPath::PositionY => v.round(),
                k if k.is_rotation() => deg_to_rad(*v),
                _ => *v,
            };
            XmlElement::new("NSNumber").attr("value", format_number(v))
        }
    }
}

/// Frame-cycling `contents` animation of a video that is not synced to states.
pub(super) fn video_animation_element(video: &VideoLayer) -> Option<XmlElement> {
    if video.sync_with_state || video.frame_count == 0 {
        return None;
    }
    let duration = if video.duration > 0.0 {
        video.duration
    } else if video.fps > 0.0 {
        f64::from(video.frame_count) / video.fps
    } else {
        1.0
    };
    let mut values = XmlElement::new("values");
    for i in 0..video.frame_count {
        values.push(XmlElement::new("CGImage").attr("src", video.frame_src(i)));
    }
    Some(
        XmlElement::new("animation")
            .attr("type", "CAKeyframeAnimation")
            .attr("keyPath", KEY_CONTENTS)
            .attr("calculationMode", video.calculation_mode.caml_name())
            .attr("autoreverses", format_bool_flag(video.auto_reverses))
            .attr("beginTime", "0")
            .attr("duration", format_number(duration))
            .attr("removedOnCompletion", "0")
            .attr("repeatCount", "inf")
            .child(values),
    )
}
