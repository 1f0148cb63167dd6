//! Fixed names of the CAML dialect.

pub const CAML_NAMESPACE: &str = "http://www.apple.com/CoreAnimation/1.0";

/// Id of the synthetic root the encoder wraps non-gyro documents in.
pub const WRAPPER_ROOT_ID: &str = "__capRootLayer__";
pub const WRAPPER_ROOT_NAME: &str = "Root Layer";

pub const SDF_LAYER_SUFFIX: &str = "_sdfLayer";
pub const ELEMENT_LAYER_SUFFIX: &str = "_elementLayer";

/// Marker attribute on `CABackdropLayer` elements that are liquid glass.
pub const ATTR_LIQUID_GLASS: &str = "liquidGlass";
/// Marker attribute on `CALayer` elements that are image-sequence videos.
pub const ATTR_VIDEO: &str = "video";

pub const TAG_LAYER: &str = "CALayer";
pub const TAG_TEXT: &str = "CATextLayer";
pub const TAG_GRADIENT: &str = "CAGradientLayer";
pub const TAG_EMITTER: &str = "CAEmitterLayer";
pub const TAG_TRANSFORM: &str = "CATransformLayer";
pub const TAG_REPLICATOR: &str = "CAReplicatorLayer";
pub const TAG_BACKDROP: &str = "CABackdropLayer";
pub const TAG_SDF: &str = "CASDFLayer";
pub const TAG_SDF_ELEMENT: &str = "CASDFElementLayer";

pub const LAYER_TAGS: [&str; 9] = [
    TAG_LAYER,
    TAG_TEXT,
    TAG_GRADIENT,
    TAG_EMITTER,
    TAG_TRANSFORM,
    TAG_REPLICATOR,
    TAG_BACKDROP,
    TAG_SDF,
    TAG_SDF_ELEMENT,
];

pub fn is_layer_tag(tag: &str) -> bool {
    LAYER_TAGS.contains(&tag)
}
