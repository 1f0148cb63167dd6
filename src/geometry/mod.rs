//! Conversions between anchor-relative layer positions and axis-aligned boxes.

pub mod frame;
