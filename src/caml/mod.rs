pub mod decode;
pub mod encode;
pub mod keys;
pub mod prepare;
pub mod synth;
pub mod transform;
pub(crate) mod xml;
