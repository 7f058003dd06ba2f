//! A pure Rust library that resolves particle descriptions (symbols, names,
//! aliases, charge and isotope notation) into typed particle values with
//! physically consistent derived properties.
//!
//! It resolves atoms, isotopes, ions, and catalog particles against embedded
//! reference tables and exposes their masses, charges, binding energies,
//! half-lives, and category tags under a uniform error taxonomy.
//!
//! # Features
//!
//! - **Symbol resolution**: `e-`, `electron`, `Fe-56 17+`, `He-4++`,
//!   `alpha`, `H-1 II`, element names in any case
//! - **Attribute derivation**: Mass, nuclide mass, standard atomic weight,
//!   binding energy, spin, lepton and baryon numbers, half-life, periodic
//!   table placement
//! - **Category queries**: Validated `require`/`any_of`/`exclude` queries
//!   over a closed tag vocabulary
//! - **Custom particles**: User-defined mass and charge, with or without
//!   physical units
//! - **JSON interchange**: A self-describing envelope that round-trips all
//!   particle variants
//!
//! # Quick Start
//!
//! ```
//! use particle_forge::{CategoryQuery, Particle, ParticleOptions, Error};
//!
//! let proton = Particle::new("proton")?;
//! assert_eq!(proton.symbol(), "p+");
//! assert_eq!(proton.integer_charge()?, 1);
//! assert_eq!(proton.isotope().as_deref(), Some("H-1"));
//! assert!(proton.is_category(&CategoryQuery::new().require(&["ion", "fermion"]))?);
//!
//! // Explicit keywords narrow an element to an isotope and an ion.
//! let iron = Particle::with_options("Fe", ParticleOptions::new().mass_number(56).charge(17))?;
//! assert_eq!(iron.symbol(), "Fe-56 17+");
//! assert_eq!(iron.roman_symbol()?.as_deref(), Some("Fe-56 XVIII"));
//!
//! // Attributes that do not apply fail with a specific error kind.
//! assert!(matches!(Particle::new("n")?.atomic_number(), Err(Error::InvalidElement { .. })));
//! assert!(matches!(
//!     Particle::new("Fe-56")?.standard_atomic_weight(),
//!     Err(Error::InvalidElement { .. })
//! ));
//!
//! // Antiparticles of catalog entries.
//! assert_eq!((!&Particle::new("e-")?)?, Particle::new("positron")?);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`particles`]: Parser, resolver, and the particle value types
//! - [`data`]: Reference tables, embedded or loaded from TOML
//! - [`io`]: The JSON envelope
//!
//! # Data Types
//!
//! - [`Particle`]: A resolved atom, isotope, ion, or catalog particle
//! - [`CustomParticle`]: User-defined mass and charge in physical units
//! - [`DimensionlessParticle`]: User-defined unitless mass and charge
//! - [`AnyParticle`]: Any of the above, as returned by JSON decoding
//! - [`Quantity`]: A scalar with a [`Unit`]
//! - [`Category`]: A category tag such as `lepton` or `noble gas`
//! - [`Element`]: Chemical element (H through Og)

mod model;

pub mod data;
pub mod io;
pub mod particles;

pub use model::category::{Category, CategoryQuery, CategorySet, QueryError, ValidatedQuery};
pub use model::constants;
pub use model::identity::Identity;
pub use model::types::{Element, ParseElementError};
pub use model::units::{Dimension, Quantity, Unit, UnitError};

pub use data::{HalfLife, PeriodicTable, ReferenceData, load_reference_data};

pub use particles::{
    AbstractParticle, AnyParticle, CustomParticle, DimensionlessParticle, Error, Particle,
    ParticleArg, ParticleOptions, QuantityArg, ScalarArg, Warned, Warning,
};

pub use io::json::{json_load_particle, json_loads_particle};
