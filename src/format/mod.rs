//! Stateless unit and text conversions shared by the CAML decoder and encoder.
//!
//! Every parser here is tolerant: malformed input yields `None` (or skips the bad
//! token) instead of failing, so partially hand-edited documents still load.

pub mod color;
pub mod units;
