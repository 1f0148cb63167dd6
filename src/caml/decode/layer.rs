use crate::caml::keys::{
    ATTR_LIQUID_GLASS, ATTR_VIDEO, TAG_BACKDROP, TAG_EMITTER, TAG_GRADIENT, TAG_REPLICATOR,
    TAG_TEXT, TAG_TRANSFORM, is_layer_tag,
};
use crate::caml::transform::{axis_rotations, parse_transform, translation};
use crate::caml::xml::{Node, child, element_children};
use crate::foundation::core::{Point, Size};
use crate::format::color::parse_caml_color;
use crate::format::units::{
    parse_bool_flag, parse_number, parse_number_array, rad_to_deg_snapped,
};
use crate::model::layer::{
    BlendMode, CalculationMode, EmitterCell, EmitterLayer, EmitterMode, EmitterRenderMode,
    EmitterShape, Filter, FilterKind, FrameMode, GradientLayer, GradientStop, GradientType,
    ImageLayer, Layer, LayerKind, ReplicatorLayer, TextAlign, TextLayer, VideoLayer,
    default_font_family, default_font_size, default_text_color,
};
use crate::model::states::{KEY_ROTATION_X, KEY_ROTATION_Y, KEY_ROTATION_Z};

use super::animation::{decode_contents_animation, decode_keyframe_animation};

#[derive(Default)]
pub(super) struct DecodeContext {
    anonymous: usize,
}

impl DecodeContext {
    fn anonymous_id(&mut self) -> String {
        self.anonymous += 1;
        format!("layer-{}", self.anonymous)
    }
}

fn num(node: Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name).and_then(parse_number)
}

fn flag(node: Node<'_, '_>, name: &str) -> Option<bool> {
    node.attribute(name).and_then(parse_bool_flag)
}

fn text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_owned)
}

fn point(node: Node<'_, '_>, name: &str) -> Option<Point> {
    node.attribute(name)
        .and_then(parse_number_array::<2>)
        .map(|[x, y]| Point::new(x, y))
}

fn size(node: Node<'_, '_>, name: &str) -> Option<Size> {
    node.attribute(name)
        .and_then(parse_number_array::<2>)
        .map(|[w, h]| Size::new(w, h))
}

fn hex(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .and_then(parse_caml_color)
        .map(|c| c.hex)
}

pub(super) fn decode_layer(node: Node<'_, '_>, ctx: &mut DecodeContext) -> Layer {
    let id = node
        .attribute("id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| ctx.anonymous_id());
    let name = node.attribute("name").unwrap_or_default().to_owned();

    let mut layer = Layer::new(id, name, decode_kind(node));
    decode_geometry(node, &mut layer);
    decode_appearance(node, &mut layer);
    layer.blend_mode = decode_blend_mode(node);
    layer.animation = decode_keyframe_animation(node);

    if layer.is_liquid_glass() {
        // Filters and sublayers of liquid glass are synthesized on encode.
        return layer;
    }
    layer.filters = decode_filters(node);
    if let Some(sublayers) = child(node, "sublayers") {
        layer.children = element_children(sublayers)
            .filter(|n| is_layer_tag(n.tag_name().name()))
            .map(|n| decode_layer(n, ctx))
            .collect();
    }
    layer
}

fn decode_kind(node: Node<'_, '_>) -> LayerKind {
    match node.tag_name().name() {
        TAG_TEXT => LayerKind::Text(decode_text(node)),
        TAG_GRADIENT => LayerKind::Gradient(decode_gradient(node)),
        TAG_EMITTER => LayerKind::Emitter(decode_emitter(node)),
        TAG_TRANSFORM => LayerKind::Transform,
        TAG_REPLICATOR => LayerKind::Replicator(decode_replicator(node)),
        TAG_BACKDROP if flag(node, ATTR_LIQUID_GLASS).unwrap_or(false) => LayerKind::LiquidGlass,
        _ if flag(node, ATTR_VIDEO).unwrap_or(false) => LayerKind::Video(decode_video(node)),
        _ => match contents_src(node) {
            Some(src) => LayerKind::Image(ImageLayer { src }),
            None => LayerKind::Shape,
        },
    }
}

fn contents_src(node: Node<'_, '_>) -> Option<String> {
    child(node, "contents")
        .and_then(|c| c.attribute("src"))
        .map(str::to_owned)
}

fn decode_geometry(node: Node<'_, '_>, layer: &mut Layer) {
    if let Some([_, _, w, h]) = node.attribute("bounds").and_then(parse_number_array::<4>) {
        layer.size = Size::new(w, h);
    }
    if let Some(position) = point(node, "position") {
        layer.position = position;
    }
    layer.anchor_point = point(node, "anchorPoint");

    let z = num(node, KEY_ROTATION_Z).or_else(|| num(node, "transform.rotation"));
    let x = num(node, KEY_ROTATION_X);
    let y = num(node, KEY_ROTATION_Y);
    let [rx, ry, rz] = if z.is_none() && x.is_none() && y.is_none() {
        node.attribute("transform")
            .map(|t| axis_rotations(&parse_transform(t)))
            .unwrap_or([0.0; 3])
    } else {
        [x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0)]
    };
    layer.rotation = rad_to_deg_snapped(rz);
    layer.rotation_x = rad_to_deg_snapped(rx);
    layer.rotation_y = rad_to_deg_snapped(ry);

    layer.z_position = num(node, "zPosition").unwrap_or(0.0);
    layer.geometry_flipped = flag(node, "geometryFlipped");
}

fn decode_appearance(node: Node<'_, '_>, layer: &mut Layer) {
    layer.opacity = num(node, "opacity").unwrap_or(1.0);
    layer.masks_to_bounds = flag(node, "masksToBounds").unwrap_or(false);
    layer.corner_radius = num(node, "cornerRadius").unwrap_or(0.0);
    if let Some(color) = node.attribute("backgroundColor").and_then(parse_caml_color) {
        layer.background_color = Some(color.hex);
        layer.background_opacity = color.alpha.unwrap_or(1.0);
    }
    layer.border_color = hex(node, "borderColor");
    layer.border_width = num(node, "borderWidth").unwrap_or(0.0);
}

fn decode_blend_mode(node: Node<'_, '_>) -> BlendMode {
    let name = child(node, "compositingFilter")
        .and_then(|c| c.attribute("filter").or_else(|| c.attribute("value")))
        .or_else(|| node.attribute("compositingFilter"));
    match name {
        Some(name) => BlendMode::from_caml_filter(name).unwrap_or_else(|| {
            tracing::warn!(filter = name, "unknown compositing filter");
            BlendMode::Normal
        }),
        None => BlendMode::Normal,
    }
}

fn decode_filters(node: Node<'_, '_>) -> Vec<Filter> {
    let Some(filters) = child(node, "filters") else {
        return Vec::new();
    };
    element_children(filters)
        .filter_map(|f| {
            let name = f.attribute("filter").or_else(|| f.attribute("name"))?;
            let Some(kind) = FilterKind::from_caml_name(name) else {
                tracing::debug!(filter = name, "skipping unsupported filter");
                return None;
            };
            let raw = kind
                .input_key()
                .and_then(|key| child(f, key).and_then(|v| num(v, "value")).or_else(|| num(f, key)))
                .unwrap_or(0.0);
            let value = if kind == FilterKind::ColorHueRotate {
                rad_to_deg_snapped(raw)
            } else {
                raw
            };
            Some(Filter {
                kind,
                value,
                enabled: flag(f, "enabled").unwrap_or(true),
            })
        })
        .collect()
}

fn decode_text(node: Node<'_, '_>) -> TextLayer {
    TextLayer {
        text: text(node, "string").unwrap_or_default(),
        font_family: text(node, "font").unwrap_or_else(default_font_family),
        font_size: num(node, "fontSize").unwrap_or_else(default_font_size),
        color: hex(node, "foregroundColor").unwrap_or_else(default_text_color),
        align: node
            .attribute("alignmentMode")
            .and_then(TextAlign::from_caml_name)
            .unwrap_or_default(),
        wrapped: flag(node, "wrapped").unwrap_or(false),
    }
}

fn decode_gradient(node: Node<'_, '_>) -> GradientLayer {
    let defaults = GradientLayer::default();
    let stops = child(node, "colors")
        .map(|colors| {
            element_children(colors)
                .filter_map(|c| c.attribute("value").and_then(parse_caml_color))
                .map(|c| GradientStop {
                    color: c.hex,
                    opacity: c.alpha.unwrap_or(1.0),
                })
                .collect()
        })
        .unwrap_or_default();
    GradientLayer {
        gradient_type: node
            .attribute("type")
            .and_then(GradientType::from_caml_name)
            .unwrap_or_default(),
        start_point: point(node, "startPoint").unwrap_or(defaults.start_point),
        end_point: point(node, "endPoint").unwrap_or(defaults.end_point),
        stops,
    }
}

fn decode_video(node: Node<'_, '_>) -> VideoLayer {
    let defaults = VideoLayer::default();
    let anim = decode_contents_animation(node);
    let state_frame_modes = node
        .attribute("stateFrameModes")
        .map(|s| {
            s.split([',', ';'])
                .filter_map(|pair| {
                    let (state, mode) = pair.split_once(':')?;
                    let mode = FrameMode::from_caml_name(mode)?;
                    Some((state.trim().to_owned(), mode))
                })
                .collect()
        })
        .unwrap_or_default();

    VideoLayer {
        frame_count: num(node, "frameCount")
            .map(|n| n.max(0.0).round() as u32)
            .or_else(|| anim.as_ref().map(|a| a.frames as u32))
            .unwrap_or(0),
        fps: num(node, "fps").unwrap_or(defaults.fps),
        duration: num(node, "duration")
            .or_else(|| anim.as_ref().and_then(|a| a.duration))
            .unwrap_or(0.0),
        auto_reverses: flag(node, "autoreverses")
            .or_else(|| anim.as_ref().map(|a| a.autoreverses))
            .unwrap_or(false),
        frame_prefix: text(node, "framePrefix").unwrap_or_default(),
        frame_extension: text(node, "frameExtension").unwrap_or(defaults.frame_extension),
        sync_with_state: flag(node, "syncWithState").unwrap_or(false),
        state_frame_modes,
        calculation_mode: node
            .attribute("calculationMode")
            .and_then(CalculationMode::from_caml_name)
            .or_else(|| anim.as_ref().and_then(|a| a.calculation_mode))
            .unwrap_or_default(),
    }
}

fn decode_emitter(node: Node<'_, '_>) -> EmitterLayer {
    let cells = child(node, "emitterCells")
        .map(|cells| element_children(cells).map(decode_emitter_cell).collect())
        .unwrap_or_default();
    EmitterLayer {
        emitter_position: point(node, "emitterPosition").unwrap_or_default(),
        emitter_size: size(node, "emitterSize").unwrap_or_default(),
        emitter_shape: node
            .attribute("emitterShape")
            .and_then(EmitterShape::from_caml_name)
            .unwrap_or_default(),
        emitter_mode: node
            .attribute("emitterMode")
            .and_then(EmitterMode::from_caml_name)
            .unwrap_or_default(),
        render_mode: node
            .attribute("renderMode")
            .and_then(EmitterRenderMode::from_caml_name)
            .unwrap_or_default(),
        cells,
    }
}

fn decode_emitter_cell(node: Node<'_, '_>) -> EmitterCell {
    let n = |name: &str| num(node, name).unwrap_or(0.0);
    EmitterCell {
        id: text(node, "id").unwrap_or_default(),
        name: text(node, "name").unwrap_or_default(),
        src: contents_src(node),
        birth_rate: n("birthRate"),
        lifetime: n("lifetime"),
        velocity: n("velocity"),
        velocity_range: n("velocityRange"),
        scale: n("scale"),
        scale_range: n("scaleRange"),
        scale_speed: n("scaleSpeed"),
        spin: n("spin"),
        spin_range: n("spinRange"),
        emission_range: n("emissionRange"),
        x_acceleration: n("xAcceleration"),
        y_acceleration: n("yAcceleration"),
        alpha_speed: n("alphaSpeed"),
    }
}

fn decode_replicator(node: Node<'_, '_>) -> ReplicatorLayer {
    let ops = node
        .attribute("instanceTransform")
        .map(parse_transform)
        .unwrap_or_default();
    ReplicatorLayer {
        instance_count: num(node, "instanceCount")
            .map(|n| n.max(0.0).round() as u32)
            .unwrap_or(1),
        instance_translation: translation(&ops),
        instance_rotation: rad_to_deg_snapped(axis_rotations(&ops)[2]),
        instance_delay: num(node, "instanceDelay").unwrap_or(0.0),
    }
}
