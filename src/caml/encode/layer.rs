use crate::caml::keys::{
    ATTR_LIQUID_GLASS, ATTR_VIDEO, TAG_BACKDROP, TAG_EMITTER, TAG_GRADIENT, TAG_LAYER,
    TAG_REPLICATOR, TAG_SDF, TAG_SDF_ELEMENT, TAG_TEXT, TAG_TRANSFORM,
};
use crate::caml::synth::liquid_glass_sublayer;
use crate::caml::transform::format_transform;
use crate::caml::xml::XmlElement;
use crate::foundation::core::{Point, Size};
use crate::format::color::format_caml_color;
use crate::format::units::{deg_to_rad, format_bool_flag, format_number};
use crate::model::layer::{
    EmitterCell, EmitterLayer, Filter, FilterKind, GradientLayer, Layer, LayerKind,
    ReplicatorLayer, TextLayer, VideoLayer,
};
use crate::model::states::{KEY_ROTATION_X, KEY_ROTATION_Y, KEY_ROTATION_Z};

use super::animation::{keyframe_animation_element, video_animation_element};

fn point_attr(p: Point) -> String {
    format!("{} {}", format_number(p.x), format_number(p.y))
}

fn size_attr(s: Size) -> String {
    format!("{} {}", format_number(s.width), format_number(s.height))
}

fn bounds_attr(s: Size) -> String {
    format!("0 0 {}", size_attr(s))
}

fn image_contents(src: &str) -> XmlElement {
    XmlElement::new("contents").attr("type", "CGImage").attr("src", src)
}

fn tag_for(kind: &LayerKind) -> &'static str {
    match kind {
        LayerKind::Text(_) => TAG_TEXT,
        LayerKind::Gradient(_) => TAG_GRADIENT,
        LayerKind::Emitter(_) => TAG_EMITTER,
        LayerKind::Transform => TAG_TRANSFORM,
        LayerKind::Replicator(_) => TAG_REPLICATOR,
        LayerKind::LiquidGlass => TAG_BACKDROP,
        LayerKind::Shape | LayerKind::Image(_) | LayerKind::Video(_) => TAG_LAYER,
    }
}

pub(super) fn layer_element(layer: &Layer) -> XmlElement {
    layer_element_tagged(layer, tag_for(&layer.kind))
}

fn layer_element_tagged(layer: &Layer, tag: &str) -> XmlElement {
    let mut el = XmlElement::new(tag)
        .attr("id", layer.id.as_str())
        .attr("name", layer.name.as_str())
        .attr("bounds", bounds_attr(layer.size))
        .attr("position", point_attr(layer.position));
    if let Some(anchor) = layer.anchor_point {
        el.set_attr("anchorPoint", point_attr(anchor));
    }
    el.set_attr("opacity", format_number(layer.opacity));
    if layer.z_position != 0.0 {
        el.set_attr("zPosition", format_number(layer.z_position));
    }
    for (key, deg) in [
        (KEY_ROTATION_Z, layer.rotation),
        (KEY_ROTATION_X, layer.rotation_x),
        (KEY_ROTATION_Y, layer.rotation_y),
    ] {
        if deg != 0.0 && deg.is_finite() {
            el.set_attr(key, format_number(deg_to_rad(deg)));
        }
    }
    if let Some(flipped) = layer.geometry_flipped {
        el.set_attr("geometryFlipped", format_bool_flag(flipped));
    }
    if layer.masks_to_bounds {
        el.set_attr("masksToBounds", "1");
    }
    let radius = layer.clamped_corner_radius();
    if radius > 0.0 {
        el.set_attr("cornerRadius", format_number(radius));
    }
    if let Some(color) = layer
        .background_color
        .as_deref()
        .and_then(|hex| format_caml_color(hex, layer.background_opacity))
    {
        el.set_attr("backgroundColor", color);
    }
    if let Some(color) = layer
        .border_color
        .as_deref()
        .and_then(|hex| format_caml_color(hex, 1.0))
    {
        el.set_attr("borderColor", color);
    }
    if layer.border_width > 0.0 {
        el.set_attr("borderWidth", format_number(layer.border_width));
    }

    if let Some(filter) = layer.blend_mode.caml_filter() {
        el.push(
            XmlElement::new("compositingFilter")
                .attr("type", "CAFilter")
                .attr("filter", filter),
        );
    }

    match &layer.kind {
        LayerKind::Shape | LayerKind::Transform => {}
        LayerKind::Text(text) => text_attrs(&mut el, text),
        LayerKind::Image(image) => el.push(image_contents(&image.src)),
        LayerKind::Gradient(gradient) => gradient_payload(&mut el, gradient),
        LayerKind::Video(video) => video_payload(&mut el, video),
        LayerKind::Emitter(emitter) => emitter_payload(&mut el, emitter),
        LayerKind::Replicator(replicator) => replicator_attrs(&mut el, replicator),
        LayerKind::LiquidGlass => el.set_attr(ATTR_LIQUID_GLASS, "1"),
    }

    if layer.is_liquid_glass() {
        el.push(liquid_glass_filters());
        el.push(XmlElement::new("sublayers").child(synthetic_element(&liquid_glass_sublayer(layer))));
    } else {
        el.push_non_empty(filters_element(&layer.filters));
        let mut sublayers = XmlElement::new("sublayers");
        for child in &layer.children {
            sublayers.push(layer_element(child));
        }
        el.push_non_empty(sublayers);
    }

    let mut animations = XmlElement::new("animations");
    if let Some(anim) = layer.animation.as_ref().and_then(keyframe_animation_element) {
        animations.push(anim);
    }
    if let LayerKind::Video(video) = &layer.kind {
        if let Some(anim) = video_animation_element(video) {
            animations.push(anim);
        }
    }
    el.push_non_empty(animations);
    el
}

/// Synthetic SDF layer and its element, which are tagged by their depth.
fn synthetic_element(sdf: &Layer) -> XmlElement {
    let mut el = layer_element_tagged(&Layer { children: Vec::new(), ..sdf.clone() }, TAG_SDF);
    let mut sublayers = XmlElement::new("sublayers");
    for element in &sdf.children {
        sublayers.push(layer_element_tagged(element, TAG_SDF_ELEMENT));
    }
    el.push_non_empty(sublayers);
    el
}

fn liquid_glass_filters() -> XmlElement {
    XmlElement::new("filters")
        .child(
            XmlElement::new("filter")
                .attr("type", "CAFilter")
                .attr("name", "glassBackground")
                .attr("filter", "glassBackground")
                .attr("enabled", "1"),
        )
        .child(
            XmlElement::new("filter")
                .attr("type", "CAFilter")
                .attr("name", "displacementMap")
                .attr("filter", "displacementMap")
                .attr("enabled", "1")
                .child(number_input("inputAmount", 20.0)),
        )
}

fn number_input(key: &str, value: f64) -> XmlElement {
    XmlElement::new(key)
        .attr("type", "real")
        .attr("value", format_number(value))
}

fn filters_element(filters: &[Filter]) -> XmlElement {
    let mut el = XmlElement::new("filters");
    for filter in filters {
        let name = filter.kind.caml_name();
        let mut f = XmlElement::new("filter")
            .attr("type", "CAFilter")
            .attr("name", name)
            .attr("filter", name)
            .attr("enabled", format_bool_flag(filter.enabled));
        if let Some(key) = filter.kind.input_key() {
            let value = if filter.kind == FilterKind::ColorHueRotate {
                deg_to_rad(filter.value)
            } else {
                filter.value
            };
            f.push(number_input(key, value));
        }
        el.push(f);
    }
    el
}

fn text_attrs(el: &mut XmlElement, text: &TextLayer) {
    el.set_attr("string", text.text.as_str());
    el.set_attr("font", text.font_family.as_str());
    el.set_attr("fontSize", format_number(text.font_size));
    if let Some(color) = format_caml_color(&text.color, 1.0) {
        el.set_attr("foregroundColor", color);
    }
    el.set_attr("alignmentMode", text.align.caml_name());
    el.set_attr("wrapped", format_bool_flag(text.wrapped));
}

fn gradient_payload(el: &mut XmlElement, gradient: &GradientLayer) {
    el.set_attr("type", gradient.gradient_type.caml_name());
    el.set_attr("startPoint", point_attr(gradient.start_point));
    el.set_attr("endPoint", point_attr(gradient.end_point));
    let mut colors = XmlElement::new("colors");
    for stop in &gradient.stops {
        if let Some(value) = format_caml_color(&stop.color, stop.opacity) {
            colors.push(XmlElement::new("CGColor").attr("value", value));
        }
    }
    el.push_non_empty(colors);
}

fn video_payload(el: &mut XmlElement, video: &VideoLayer) {
    el.set_attr(ATTR_VIDEO, "1");
    el.set_attr("frameCount", video.frame_count.to_string());
    el.set_attr("fps", format_number(video.fps));
    el.set_attr("duration", format_number(video.duration));
    el.set_attr("autoreverses", format_bool_flag(video.auto_reverses));
    el.set_attr("framePrefix", video.frame_prefix.as_str());
    el.set_attr("frameExtension", video.frame_extension.as_str());
    el.set_attr("calculationMode", video.calculation_mode.caml_name());
    el.set_attr("syncWithState", format_bool_flag(video.sync_with_state));
    if !video.state_frame_modes.is_empty() {
        let modes = video
            .state_frame_modes
            .iter()
            .map(|(state, mode)| format!("{state}:{}", mode.caml_name()))
            .collect::<Vec<_>>()
            .join(",");
        el.set_attr("stateFrameModes", modes);
    }
    if video.frame_count > 0 {
        el.push(image_contents(&video.frame_src(0)));
    }
}

fn emitter_payload(el: &mut XmlElement, emitter: &EmitterLayer) {
    el.set_attr("emitterPosition", point_attr(emitter.emitter_position));
    el.set_attr("emitterSize", size_attr(emitter.emitter_size));
    el.set_attr("emitterShape", emitter.emitter_shape.caml_name());
    el.set_attr("emitterMode", emitter.emitter_mode.caml_name());
    el.set_attr("renderMode", emitter.render_mode.caml_name());
    let mut cells = XmlElement::new("emitterCells");
    for cell in &emitter.cells {
        cells.push(emitter_cell(cell));
    }
    el.push_non_empty(cells);
}

fn emitter_cell(cell: &EmitterCell) -> XmlElement {
    let mut el = XmlElement::new("CAEmitterCell")
        .attr("id", cell.id.as_str())
        .attr("name", cell.name.as_str());
    for (key, value) in [
        ("birthRate", cell.birth_rate),
        ("lifetime", cell.lifetime),
        ("velocity", cell.velocity),
        ("velocityRange", cell.velocity_range),
        ("scale", cell.scale),
        ("scaleRange", cell.scale_range),
        ("scaleSpeed", cell.scale_speed),
        ("spin", cell.spin),
        ("spinRange", cell.spin_range),
        ("emissionRange", cell.emission_range),
        ("xAcceleration", cell.x_acceleration),
        ("yAcceleration", cell.y_acceleration),
        ("alphaSpeed", cell.alpha_speed),
    ] {
        el.set_attr(key, format_number(value));
    }
    if let Some(src) = &cell.src {
        el.push(image_contents(src));
    }
    el
}

fn replicator_attrs(el: &mut XmlElement, replicator: &ReplicatorLayer) {
    el.set_attr("instanceCount", replicator.instance_count.to_string());
    el.set_attr("instanceDelay", format_number(replicator.instance_delay));
    if let Some(transform) = format_transform(
        replicator.instance_translation,
        deg_to_rad(replicator.instance_rotation),
    ) {
        el.set_attr("instanceTransform", transform);
    }
}
