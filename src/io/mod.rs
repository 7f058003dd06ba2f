//! Persistence of particle values.
//!
//! - [`json`] – The `plasmapy_particle` JSON envelope shared by every particle variant.

pub mod json;

pub use json::{ENVELOPE_KEY, InitArgs, json_load_particle, json_loads_particle};
