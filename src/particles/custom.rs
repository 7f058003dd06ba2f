use std::fmt;

use serde_json::{Map, Value};

use super::base::AbstractParticle;
use super::error::Error;
use crate::io::json::InitArgs;
use crate::model::constants::ELEMENTARY_CHARGE;
use crate::model::units::{Dimension, Quantity, Unit};

/// A mass or charge argument: a quantity, its `"<value> <unit>"` text, or
/// (for charges only) a bare multiple of the elementary charge.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityArg {
    Quantity(Quantity),
    Text(String),
    Number(f64),
}

impl From<Quantity> for QuantityArg {
    fn from(q: Quantity) -> Self {
        QuantityArg::Quantity(q)
    }
}

impl From<&str> for QuantityArg {
    fn from(text: &str) -> Self {
        QuantityArg::Text(text.to_string())
    }
}

impl From<String> for QuantityArg {
    fn from(text: String) -> Self {
        QuantityArg::Text(text)
    }
}

impl From<f64> for QuantityArg {
    fn from(value: f64) -> Self {
        QuantityArg::Number(value)
    }
}

impl From<i32> for QuantityArg {
    fn from(value: i32) -> Self {
        QuantityArg::Number(f64::from(value))
    }
}

impl QuantityArg {
    fn describe(&self) -> String {
        match self {
            QuantityArg::Quantity(q) => q.to_string(),
            QuantityArg::Text(text) => text.clone(),
            QuantityArg::Number(n) => n.to_string(),
        }
    }

    fn into_quantity(self) -> Result<Quantity, Error> {
        match self {
            QuantityArg::Quantity(q) => Ok(q),
            QuantityArg::Text(text) => text
                .parse::<Quantity>()
                .map_err(|e| Error::invalid_quantity(text.as_str(), e)),
            QuantityArg::Number(n) => Ok(Quantity::dimensionless(n)),
        }
    }
}

/// A particle with a user-chosen mass and charge and no catalog identity.
///
/// Unspecified values are NaN in kilograms and coulombs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomParticle {
    mass: Quantity,
    charge: Quantity,
}

impl Default for CustomParticle {
    fn default() -> Self {
        Self {
            mass: Quantity::kilograms(f64::NAN),
            charge: Quantity::coulombs(f64::NAN),
        }
    }
}

/// Collects the arguments of a [`CustomParticle`]; validation happens in
/// [`build`](CustomParticleBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct CustomParticleBuilder {
    mass: Option<QuantityArg>,
    charge: Option<QuantityArg>,
}

impl CustomParticleBuilder {
    pub fn mass(mut self, mass: impl Into<QuantityArg>) -> Self {
        self.mass = Some(mass.into());
        self
    }

    pub fn charge(mut self, charge: impl Into<QuantityArg>) -> Self {
        self.charge = Some(charge.into());
        self
    }

    pub fn build(self) -> Result<CustomParticle, Error> {
        let mut particle = CustomParticle::default();
        if let Some(mass) = self.mass {
            particle.mass = validate_mass(mass)?;
        }
        if let Some(charge) = self.charge {
            particle.charge = validate_charge(charge)?;
        }
        Ok(particle)
    }
}

fn validate_mass(arg: QuantityArg) -> Result<Quantity, Error> {
    let input = arg.describe();
    if let QuantityArg::Number(_) = arg {
        return Err(Error::invalid_particle(input, "a mass needs a unit"));
    }
    let mass = arg
        .into_quantity()?
        .to(Unit::Kilogram)
        .map_err(|e| Error::invalid_quantity(input.as_str(), e))?;
    if mass.value() < 0.0 {
        return Err(Error::invalid_particle(input, "mass cannot be negative"));
    }
    Ok(mass)
}

fn validate_charge(arg: QuantityArg) -> Result<Quantity, Error> {
    let input = arg.describe();
    let charge = arg.into_quantity()?;
    if charge.dimension() == Dimension::Dimensionless {
        return Ok(Quantity::coulombs(charge.value() * ELEMENTARY_CHARGE));
    }
    charge
        .to(Unit::Coulomb)
        .map_err(|e| Error::invalid_quantity(input.as_str(), e))
}

impl CustomParticle {
    /// A particle with undefined mass and charge.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CustomParticleBuilder {
        CustomParticleBuilder::default()
    }

    /// Mass in kilograms.
    #[inline]
    pub fn mass(&self) -> Quantity {
        self.mass
    }

    /// Charge in coulombs.
    #[inline]
    pub fn charge(&self) -> Quantity {
        self.charge
    }

    /// Charge in units of the elementary charge.
    pub fn charge_number(&self) -> f64 {
        self.charge.value() / ELEMENTARY_CHARGE
    }
}

impl fmt::Display for CustomParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomParticle(mass={}, charge={})", self.mass, self.charge)
    }
}

impl AbstractParticle for CustomParticle {
    fn type_name(&self) -> &'static str {
        "CustomParticle"
    }

    fn mass(&self) -> Result<Quantity, Error> {
        Ok(self.mass)
    }

    fn charge(&self) -> Result<Quantity, Error> {
        Ok(self.charge)
    }

    fn init_args(&self) -> InitArgs {
        let mut kwargs = Map::new();
        kwargs.insert("mass".to_string(), Value::String(self.mass.to_string()));
        kwargs.insert("charge".to_string(), Value::String(self.charge.to_string()));
        InitArgs {
            args: Vec::new(),
            kwargs,
        }
    }
}
