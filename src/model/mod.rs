//! Core value types that flow through `particle-forge`.
//!
//! - [`types`] – Periodic table elements.
//! - [`units`] – Dimensioned scalar quantities used for masses, charges, and energies.
//! - [`constants`] – Physical constants in SI units.
//! - [`category`] – The closed vocabulary of particle category tags and queries over it.
//! - [`identity`] – The resolved identity of a particle and its symbolic forms.
//!
//! Nothing in this module consults reference data; lookups live in [`crate::data`]
//! and attribute derivation in [`crate::particles`].

pub mod category;
pub mod constants;
pub mod identity;
pub mod types;
pub mod units;
