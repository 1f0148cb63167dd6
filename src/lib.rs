//! camlkit reads and writes CAML, the Core Animation archive format of iOS
//! wallpapers and lock-screen faces, and models its layer documents.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: CAML text -> [`CamlDocument`] (layer tree plus state, transition and
//!    parallax tables). Decoding is tolerant and never fails through [`decode`].
//! 2. **Edit**: work on the plain-data document; [`absolute_box`] and friends map
//!    Core Animation geometry to top-left boxes for editors and renderers.
//! 3. **Encode**: [`CamlDocument`] -> CAML text. The encoder repairs state overrides
//!    so every state mentions every animated pair, synthesizes liquid glass
//!    sublayers and wraps non-gyro documents in a neutral root.
//!
//! Angles are degrees in memory and radians on the wire. Colors are `#rrggbb` in
//! memory and `"r g b"` unit triplets on the wire.
#![forbid(unsafe_code)]

mod caml;
mod foundation;
mod format;
mod geometry;
mod model;

pub use caml::decode::{decode, try_decode};
pub use caml::encode::{EncodeOptions, encode, encode_with};
pub use caml::keys::{CAML_NAMESPACE, ELEMENT_LAYER_SUFFIX, SDF_LAYER_SUFFIX, WRAPPER_ROOT_ID};
pub use caml::prepare::{
    add_state_corner_radii, base_value, clamp_state_corner_radii, effective_states, prepare_overrides,
    propagate_liquid_glass, repair_overrides, sync_video_contents,
};
pub use caml::synth::{element_layer_id, liquid_glass_sublayer, resolve_layer, sdf_layer_id};
pub use caml::transform::{TransformOp, axis_rotations, format_transform, parse_transform};
pub use format::color::{
    CamlColor, format_caml_color, hex_to_rgb_triplet, normalize_hex, parse_caml_color,
    rgb_triplet_to_hex,
};
pub use format::units::{
    DEGREE_DECIMALS, deg_to_rad, format_number, parse_number, parse_number_list, rad_to_deg,
    rad_to_deg_snapped, round_to,
};
pub use foundation::core::{Point, Size, Vec3};
pub use foundation::error::{CamlError, CamlResult};
pub use geometry::frame::{AbsoluteBox, BoxOrigin, absolute_box, anchor_of, to_box, to_position};
pub use model::document::{CamlDocument, ProjectMeta};
pub use model::layer::{
    AnimationKeyPath, BlendMode, CalculationMode, EmitterCell, EmitterLayer, EmitterMode,
    EmitterRenderMode, EmitterShape, Filter, FilterKind, FrameMode, GradientLayer, GradientStop,
    GradientType, ImageLayer, KeyframeAnimation, KeyframeValue, Layer, LayerKind,
    ReplicatorLayer, TextAlign, TextLayer, VideoLayer, clamp_corner_radius,
};
pub use model::states::{
    BASE_STATE, GYRO_STATES, KEY_CONTENTS, KEY_CORNER_RADIUS, KEY_HEIGHT, KEY_OPACITY,
    KEY_POSITION_X, KEY_POSITION_Y, KEY_ROTATION_X, KEY_ROTATION_Y, KEY_ROTATION_Z, KEY_WIDTH,
    KEY_Z_POSITION, OverrideValue, ParallaxAxis, ParallaxDict, ParallaxKeyPath, STATE_LOCKED,
    STATE_SLEEP, STATE_UNLOCK, StateOverride, StateOverrides, StateTransition,
    TransitionAnimation, TransitionAnimationKind, TransitionElement, default_transitions,
    find_override, is_rotation_key_path, upsert_override,
};
pub use model::traverse::{
    collect_ids, find_by_id, find_by_id_mut, find_id_by_name, find_path_to, find_siblings,
    find_siblings_mut, walk,
};
pub use model::validate::{TreeError, TreeErrors, TreePathElem, validate_layer_tree};
