//! The in-memory document: a layer tree plus its per-state side tables.

pub mod document;
pub mod layer;
pub mod states;
pub mod traverse;
pub mod validate;
