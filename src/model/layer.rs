use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Size, Vec3};

fn one() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One node of the layer tree.
///
/// A parent exclusively owns its `children`, so the tree can hold neither cycles nor
/// shared nodes. Children are stored back-to-front (index 0 is drawn first).
pub struct Layer {
    /// Document-unique identifier; addressed by state overrides and transitions.
    pub id: String,
    /// Display name. Not unique; legacy wallpaper groups address layers by name.
    #[serde(default)]
    pub name: String,
    /// Position of the anchor point in the parent's coordinate space.
    #[serde(default)]
    pub position: Point,
    /// Bounds size.
    #[serde(default)]
    pub size: Size,
    /// Normalized anchor; `None` means the Core Animation default `(0.5, 0.5)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_point: Option<Point>,
    /// Z rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// X rotation in degrees.
    #[serde(default)]
    pub rotation_x: f64,
    /// Y rotation in degrees.
    #[serde(default)]
    pub rotation_y: f64,
    #[serde(default)]
    pub z_position: f64,
    /// `Some(true)` lays children out Y-down; `None` inherits the parent's frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_flipped: Option<bool>,
    #[serde(default)]
    pub masks_to_bounds: bool,
    /// Layer opacity in `[0, 1]`.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Requested corner radius; emission clamps it to half the shorter side.
    #[serde(default)]
    pub corner_radius: f64,
    /// `#rrggbb`. Shape layers use it as their fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default = "one")]
    pub background_opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Ordered filter chain (ignored for liquid glass, which synthesizes its own).
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub kind: LayerKind,
    #[serde(default)]
    pub children: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<KeyframeAnimation>,
}

impl Layer {
    /// Create a layer with Core Animation defaults (opaque, unrotated, zero-sized).
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Point::ZERO,
            size: Size::ZERO,
            anchor_point: None,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            z_position: 0.0,
            geometry_flipped: None,
            masks_to_bounds: false,
            opacity: 1.0,
            corner_radius: 0.0,
            background_color: None,
            background_opacity: 1.0,
            border_color: None,
            border_width: 0.0,
            blend_mode: BlendMode::Normal,
            filters: Vec::new(),
            kind,
            children: Vec::new(),
            animation: None,
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Append `child` as the topmost sublayer.
    pub fn with_child(mut self, child: Layer) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_liquid_glass(&self) -> bool {
        matches!(self.kind, LayerKind::LiquidGlass)
    }

    /// Corner radius after the structural clamp to `min(r, w/2, h/2)`.
    pub fn clamped_corner_radius(&self) -> f64 {
        clamp_corner_radius(self.corner_radius, self.size.width, self.size.height)
    }
}

/// Clamp a corner radius so it never exceeds half of either side.
pub fn clamp_corner_radius(radius: f64, width: f64, height: f64) -> f64 {
    let half_w = if width.is_finite() { width / 2.0 } else { 0.0 };
    let half_h = if height.is_finite() { height / 2.0 } else { 0.0 };
    let r = if radius.is_finite() { radius } else { 0.0 };
    r.min(half_w).min(half_h).max(0.0)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Kind-specific payload of a [`Layer`].
pub enum LayerKind {
    /// Plain rectangle; fill comes from [`Layer::background_color`].
    #[default]
    Shape,
    Text(TextLayer),
    Image(ImageLayer),
    Gradient(GradientLayer),
    Video(VideoLayer),
    Emitter(EmitterLayer),
    /// Pure grouping layer.
    Transform,
    Replicator(ReplicatorLayer),
    /// Backdrop glass; the encoder emits its SDF sublayers.
    LiquidGlass,
}

impl LayerKind {
    /// Short lowercase name used in logs and validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Gradient(_) => "gradient",
            Self::Video(_) => "video",
            Self::Emitter(_) => "emitter",
            Self::Transform => "transform",
            Self::Replicator(_) => "replicator",
            Self::LiquidGlass => "liquidGlass",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    PlusLighter,
    PlusDarker,
}

impl BlendMode {
    pub const ALL: [Self; 14] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::SoftLight,
        Self::HardLight,
        Self::Difference,
        Self::Exclusion,
        Self::PlusLighter,
        Self::PlusDarker,
    ];

    /// Core Animation compositing filter name; `None` for normal compositing.
    pub fn caml_filter(self) -> Option<&'static str> {
        Some(match self {
            Self::Normal => return None,
            Self::Multiply => "multiplyBlendMode",
            Self::Screen => "screenBlendMode",
            Self::Overlay => "overlayBlendMode",
            Self::Darken => "darkenBlendMode",
            Self::Lighten => "lightenBlendMode",
            Self::ColorDodge => "colorDodgeBlendMode",
            Self::ColorBurn => "colorBurnBlendMode",
            Self::SoftLight => "softLightBlendMode",
            Self::HardLight => "hardLightBlendMode",
            Self::Difference => "differenceBlendMode",
            Self::Exclusion => "exclusionBlendMode",
            Self::PlusLighter => "plusL",
            Self::PlusDarker => "plusD",
        })
    }

    pub fn from_caml_filter(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.caml_filter() == Some(name))
    }

    /// CSS `mix-blend-mode` keyword for renderers.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::PlusLighter => "plus-lighter",
            Self::PlusDarker => "plus-darker",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub kind: FilterKind,
    /// Filter input; hue rotation is in degrees, the rest are raw CA inputs.
    #[serde(default)]
    pub value: f64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    GaussianBlur,
    ColorSaturate,
    ColorContrast,
    ColorBrightness,
    ColorInvert,
    ColorHueRotate,
}

impl FilterKind {
    pub const ALL: [Self; 6] = [
        Self::GaussianBlur,
        Self::ColorSaturate,
        Self::ColorContrast,
        Self::ColorBrightness,
        Self::ColorInvert,
        Self::ColorHueRotate,
    ];

    pub fn caml_name(self) -> &'static str {
        match self {
            Self::GaussianBlur => "gaussianBlur",
            Self::ColorSaturate => "colorSaturate",
            Self::ColorContrast => "colorContrast",
            Self::ColorBrightness => "colorBrightness",
            Self::ColorInvert => "colorInvert",
            Self::ColorHueRotate => "colorHueRotate",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|k| k.caml_name() == name)
    }

    /// Name of the filter's scalar input element, if it takes one.
    pub fn input_key(self) -> Option<&'static str> {
        match self {
            Self::GaussianBlur => Some("inputRadius"),
            Self::ColorSaturate | Self::ColorContrast | Self::ColorBrightness => {
                Some("inputAmount")
            }
            Self::ColorInvert => None,
            Self::ColorHueRotate => Some("inputAngle"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

impl TextAlign {
    pub fn caml_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justified => "justified",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        match name.trim() {
            "left" | "natural" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justified" => Some(Self::Justified),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub text: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// `#rrggbb` foreground color.
    #[serde(default = "default_text_color")]
    pub color: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub wrapped: bool,
}

pub(crate) fn default_font_family() -> String {
    "SFProText-Regular".to_owned()
}

pub(crate) fn default_font_size() -> f64 {
    16.0
}

pub(crate) fn default_text_color() -> String {
    "#ffffff".to_owned()
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            color: default_text_color(),
            align: TextAlign::default(),
            wrapped: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayer {
    /// Asset-relative path, e.g. `assets/photo.png`.
    pub src: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientType {
    #[default]
    Axial,
    Radial,
    Conic,
}

impl GradientType {
    pub fn caml_name(self) -> &'static str {
        match self {
            Self::Axial => "axial",
            Self::Radial => "radial",
            Self::Conic => "conic",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        match name.trim() {
            "axial" => Some(Self::Axial),
            "radial" => Some(Self::Radial),
            "conic" => Some(Self::Conic),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub color: String,
    #[serde(default = "one")]
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientLayer {
    #[serde(default)]
    pub gradient_type: GradientType,
    /// Unit-space start point.
    pub start_point: Point,
    /// Unit-space end point.
    pub end_point: Point,
    #[serde(default)]
    pub stops: Vec<GradientStop>,
}

impl Default for GradientLayer {
    fn default() -> Self {
        Self {
            gradient_type: GradientType::Axial,
            start_point: Point::new(0.5, 0.0),
            end_point: Point::new(0.5, 1.0),
            stops: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Which frame a state-synced video shows in a given state.
pub enum FrameMode {
    #[default]
    Beginning,
    End,
}

impl FrameMode {
    pub fn caml_name(self) -> &'static str {
        match self {
            Self::Beginning => "beginning",
            Self::End => "end",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        match name.trim() {
            "beginning" => Some(Self::Beginning),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationMode {
    #[default]
    Linear,
    Discrete,
}

impl CalculationMode {
    pub fn caml_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Discrete => "discrete",
        }
    }

    pub fn from_caml_name(name: &str) -> Option<Self> {
        match name.trim() {
            "linear" => Some(Self::Linear),
            "discrete" => Some(Self::Discrete),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Image-sequence video. Frames live at `assets/{frame_prefix}{index}{frame_extension}`.
pub struct VideoLayer {
    pub frame_count: u32,
    pub fps: f64,
    /// Playback duration in seconds.
    pub duration: f64,
    #[serde(default)]
    pub auto_reverses: bool,
    pub frame_prefix: String,
    pub frame_extension: String,
    /// Select a fixed frame per state instead of looping.
    #[serde(default)]
    pub sync_with_state: bool,
    #[serde(default)]
    pub state_frame_modes: std::collections::BTreeMap<String, FrameMode>,
    #[serde(default)]
    pub calculation_mode: CalculationMode,
}

impl VideoLayer {
    /// Asset path of frame `index`, e.g. `assets/clip_3.png`.
    pub fn frame_src(&self, index: u32) -> String {
        format!(
            "assets/{}{}{}",
            self.frame_prefix, index, self.frame_extension
        )
    }

    /// Frame shown in `state` when the video is synced to states.
    pub fn frame_for_state(&self, state: &str) -> u32 {
        match self.state_frame_modes.get(state).copied().unwrap_or_default() {
            FrameMode::Beginning => 0,
            FrameMode::End => self.frame_count.saturating_sub(1),
        }
    }
}

impl Default for VideoLayer {
    fn default() -> Self {
        Self {
            frame_count: 0,
            fps: 30.0,
            duration: 0.0,
            auto_reverses: false,
            frame_prefix: String::new(),
            frame_extension: ".png".to_owned(),
            sync_with_state: false,
            state_frame_modes: Default::default(),
            calculation_mode: CalculationMode::Linear,
        }
    }
}

macro_rules! caml_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $caml:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub fn caml_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $caml),+
                }
            }

            pub fn from_caml_name(name: &str) -> Option<Self> {
                match name.trim() {
                    $($caml => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

caml_enum!(EmitterShape {
    Point => "point",
    Line => "line",
    Rectangle => "rectangle",
    Cuboid => "cuboid",
    Circle => "circle",
    Sphere => "sphere",
});

caml_enum!(EmitterMode {
    Points => "points",
    Outline => "outline",
    Surface => "surface",
    Volume => "volume",
});

caml_enum!(EmitterRenderMode {
    Unordered => "unordered",
    OldestFirst => "oldestFirst",
    OldestLast => "oldestLast",
    BackToFront => "backToFront",
    Additive => "additive",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Particle template. Angular fields are raw Core Animation values (radians).
pub struct EmitterCell {
    pub id: String,
    pub name: String,
    pub src: Option<String>,
    pub birth_rate: f64,
    pub lifetime: f64,
    pub velocity: f64,
    pub velocity_range: f64,
    pub scale: f64,
    pub scale_range: f64,
    pub scale_speed: f64,
    pub spin: f64,
    pub spin_range: f64,
    pub emission_range: f64,
    pub x_acceleration: f64,
    pub y_acceleration: f64,
    pub alpha_speed: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterLayer {
    pub emitter_position: Point,
    pub emitter_size: Size,
    pub emitter_shape: EmitterShape,
    pub emitter_mode: EmitterMode,
    pub render_mode: EmitterRenderMode,
    pub cells: Vec<EmitterCell>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicatorLayer {
    pub instance_count: u32,
    pub instance_translation: Vec3,
    /// Per-instance Z rotation in degrees.
    pub instance_rotation: f64,
    pub instance_delay: f64,
}

impl Default for ReplicatorLayer {
    fn default() -> Self {
        Self {
            instance_count: 1,
            instance_translation: Vec3::ZERO,
            instance_rotation: 0.0,
            instance_delay: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Property animated by a layer's keyframe animation.
pub enum AnimationKeyPath {
    #[serde(rename = "position")]
    Position,
    #[serde(rename = "position.x")]
    PositionX,
    #[serde(rename = "position.y")]
    PositionY,
    #[serde(rename = "rotation.x")]
    RotationX,
    #[serde(rename = "rotation.y")]
    RotationY,
    #[serde(rename = "rotation.z")]
    RotationZ,
    #[serde(rename = "opacity")]
    Opacity,
    #[serde(rename = "bounds")]
    Bounds,
}

impl AnimationKeyPath {
    pub const ALL: [Self; 8] = [
        Self::Position,
        Self::PositionX,
        Self::PositionY,
        Self::RotationX,
        Self::RotationY,
        Self::RotationZ,
        Self::Opacity,
        Self::Bounds,
    ];

    pub fn caml_key(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::PositionX => "position.x",
            Self::PositionY => "position.y",
            Self::RotationX => "transform.rotation.x",
            Self::RotationY => "transform.rotation.y",
            Self::RotationZ => "transform.rotation.z",
            Self::Opacity => "opacity",
            Self::Bounds => "bounds",
        }
    }

    /// Accepts both `transform.rotation.z` and the short `rotation.z` spelling.
    pub fn from_caml_key(key: &str) -> Option<Self> {
        let key = key.trim();
        let key = key.strip_prefix("transform.").unwrap_or(key);
        match key {
            "position" => Some(Self::Position),
            "position.x" => Some(Self::PositionX),
            "position.y" => Some(Self::PositionY),
            "rotation.x" => Some(Self::RotationX),
            "rotation.y" => Some(Self::RotationY),
            "rotation" | "rotation.z" => Some(Self::RotationZ),
            "opacity" => Some(Self::Opacity),
            "bounds" => Some(Self::Bounds),
            _ => None,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Self::RotationX | Self::RotationY | Self::RotationZ)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// One keyframe; the expected shape depends on the animation key path.
pub enum KeyframeValue {
    Point(Point),
    Size(Size),
    Scalar(f64),
}

impl KeyframeValue {
    /// True when this value's shape matches what `key_path` animates.
    pub fn fits(&self, key_path: AnimationKeyPath) -> bool {
        match key_path {
            AnimationKeyPath::Position => matches!(self, Self::Point(_)),
            AnimationKeyPath::Bounds => matches!(self, Self::Size(_)),
            _ => matches!(self, Self::Scalar(_)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeAnimation {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub key_path: AnimationKeyPath,
    /// Rotation values are in degrees.
    #[serde(default)]
    pub values: Vec<KeyframeValue>,
    #[serde(default)]
    pub autoreverses: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl KeyframeAnimation {
    /// One second per segment, at least one.
    pub fn derived_duration(&self) -> f64 {
        self.values.len().saturating_sub(1).max(1) as f64
    }

    /// Stored duration, or [`Self::derived_duration`] when unset.
    pub fn effective_duration(&self) -> f64 {
        self.duration_seconds
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| self.derived_duration())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
