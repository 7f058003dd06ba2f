//! Particle resolution and the particle value types.
//!
//! Input flows one way: [`parser`] turns raw text into a descriptor,
//! [`resolver`] validates it against the reference tables, and
//! [`Particle`] derives and caches attributes from the resolved identity.
//! [`CustomParticle`] and [`DimensionlessParticle`] bypass the tables
//! entirely and share the [`AbstractParticle`] surface.

mod attributes;
mod base;
mod config;
mod custom;
mod dimensionless;
mod error;
mod particle;
mod roman;
mod warning;

pub mod parser;
pub mod resolver;

pub use base::{AbstractParticle, AnyParticle};
pub use config::ParticleOptions;
pub use custom::{CustomParticle, CustomParticleBuilder, QuantityArg};
pub use dimensionless::{DimensionlessParticle, DimensionlessParticleBuilder, ScalarArg};
pub use error::Error;
pub use particle::{Particle, ParticleArg};
pub use warning::{Warned, Warning};
