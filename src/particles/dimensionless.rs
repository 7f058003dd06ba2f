use std::fmt;

use serde_json::Map;

use super::base::AbstractParticle;
use super::error::Error;
use crate::io::json::{InitArgs, encode_float};
use crate::model::units::{Dimension, Quantity, format_value};

/// A plain number, or a quantity that must be dimensionless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarArg {
    Number(f64),
    Quantity(Quantity),
}

impl From<f64> for ScalarArg {
    fn from(value: f64) -> Self {
        ScalarArg::Number(value)
    }
}

impl From<Quantity> for ScalarArg {
    fn from(q: Quantity) -> Self {
        ScalarArg::Quantity(q)
    }
}

impl ScalarArg {
    fn into_value(self) -> Result<f64, Error> {
        match self {
            ScalarArg::Number(value) => Ok(value),
            ScalarArg::Quantity(q) if q.dimension() == Dimension::Dimensionless => Ok(q.value()),
            ScalarArg::Quantity(q) => Err(Error::invalid_particle(
                q.to_string(),
                "expected a dimensionless value",
            )),
        }
    }
}

/// A particle whose mass and charge are unitless numbers, as used in
/// normalized simulations. Unspecified values are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionlessParticle {
    mass: f64,
    charge: f64,
}

impl Default for DimensionlessParticle {
    fn default() -> Self {
        Self {
            mass: f64::NAN,
            charge: f64::NAN,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionlessParticleBuilder {
    mass: Option<ScalarArg>,
    charge: Option<ScalarArg>,
}

impl DimensionlessParticleBuilder {
    pub fn mass(mut self, mass: impl Into<ScalarArg>) -> Self {
        self.mass = Some(mass.into());
        self
    }

    pub fn charge(mut self, charge: impl Into<ScalarArg>) -> Self {
        self.charge = Some(charge.into());
        self
    }

    pub fn build(self) -> Result<DimensionlessParticle, Error> {
        let mut particle = DimensionlessParticle::default();
        if let Some(mass) = self.mass {
            let mass = mass.into_value()?;
            if mass < 0.0 {
                return Err(Error::invalid_particle(
                    format_value(mass),
                    "mass cannot be negative",
                ));
            }
            particle.mass = mass;
        }
        if let Some(charge) = self.charge {
            particle.charge = charge.into_value()?;
        }
        Ok(particle)
    }
}

impl DimensionlessParticle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DimensionlessParticleBuilder {
        DimensionlessParticleBuilder::default()
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }
}

impl fmt::Display for DimensionlessParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DimensionlessParticle(mass={}, charge={})",
            format_value(self.mass),
            format_value(self.charge)
        )
    }
}

impl AbstractParticle for DimensionlessParticle {
    fn type_name(&self) -> &'static str {
        "DimensionlessParticle"
    }

    fn mass(&self) -> Result<Quantity, Error> {
        Ok(Quantity::dimensionless(self.mass))
    }

    fn charge(&self) -> Result<Quantity, Error> {
        Ok(Quantity::dimensionless(self.charge))
    }

    fn init_args(&self) -> InitArgs {
        let mut kwargs = Map::new();
        kwargs.insert("mass".to_string(), encode_float(self.mass));
        kwargs.insert("charge".to_string(), encode_float(self.charge));
        InitArgs {
            args: Vec::new(),
            kwargs,
        }
    }
}
