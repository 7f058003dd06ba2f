//! The capability surface shared by every particle variant.

use std::fmt;
use std::io::Write;

use super::custom::CustomParticle;
use super::dimensionless::DimensionlessParticle;
use super::error::Error;
use super::particle::Particle;
use crate::io::json::{self, InitArgs};
use crate::model::units::Quantity;

/// Mass, charge, and serialization for any particle-like value.
pub trait AbstractParticle {
    /// The variant name written into the JSON envelope.
    fn type_name(&self) -> &'static str;

    fn mass(&self) -> Result<Quantity, Error>;

    fn charge(&self) -> Result<Quantity, Error>;

    /// The constructor arguments that rebuild this value.
    fn init_args(&self) -> InitArgs;

    fn json_dumps(&self) -> Result<String, Error> {
        json::dumps(self.type_name(), &self.init_args())
    }

    fn json_dump<W: Write>(&self, writer: W) -> Result<(), Error>
    where
        Self: Sized,
    {
        json::dump(self.type_name(), &self.init_args(), writer)
    }
}

impl AbstractParticle for Particle {
    fn type_name(&self) -> &'static str {
        "Particle"
    }

    fn mass(&self) -> Result<Quantity, Error> {
        Particle::mass(self)
    }

    fn charge(&self) -> Result<Quantity, Error> {
        Particle::charge(self)
    }

    fn init_args(&self) -> InitArgs {
        InitArgs {
            args: vec![self.symbol().into()],
            kwargs: serde_json::Map::new(),
        }
    }
}

/// Any of the three particle variants, as produced by JSON decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyParticle {
    Particle(Particle),
    Custom(CustomParticle),
    Dimensionless(DimensionlessParticle),
}

impl AnyParticle {
    fn inner(&self) -> &dyn AbstractParticle {
        match self {
            AnyParticle::Particle(p) => p,
            AnyParticle::Custom(p) => p,
            AnyParticle::Dimensionless(p) => p,
        }
    }

    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            AnyParticle::Particle(p) => Some(p),
            _ => None,
        }
    }
}

impl AbstractParticle for AnyParticle {
    fn type_name(&self) -> &'static str {
        self.inner().type_name()
    }

    fn mass(&self) -> Result<Quantity, Error> {
        self.inner().mass()
    }

    fn charge(&self) -> Result<Quantity, Error> {
        self.inner().charge()
    }

    fn init_args(&self) -> InitArgs {
        self.inner().init_args()
    }
}

impl fmt::Display for AnyParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyParticle::Particle(p) => write!(f, "Particle(\"{p}\")"),
            AnyParticle::Custom(p) => fmt::Display::fmt(p, f),
            AnyParticle::Dimensionless(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl From<Particle> for AnyParticle {
    fn from(p: Particle) -> Self {
        AnyParticle::Particle(p)
    }
}

impl From<CustomParticle> for AnyParticle {
    fn from(p: CustomParticle) -> Self {
        AnyParticle::Custom(p)
    }
}

impl From<DimensionlessParticle> for AnyParticle {
    fn from(p: DimensionlessParticle) -> Self {
        AnyParticle::Dimensionless(p)
    }
}
