//! Dimensioned scalar quantities.
//!
//! A deliberately small unit system: every [`Unit`] belongs to one
//! [`Dimension`] and carries a scale factor to the SI unit of that
//! dimension. It covers what particle masses, charges, energies, and
//! half-lives need and nothing more.

use std::fmt;
use std::ops::{Mul, Neg};
use std::str::FromStr;
use thiserror::Error;

use super::constants::{ATOMIC_MASS_UNIT, ELECTRON_VOLT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unknown unit '{0}'")]
    Unknown(String),

    #[error("malformed quantity '{0}': expected '<value> <unit>'")]
    Malformed(String),

    #[error("cannot convert {from} to {to}")]
    Incompatible { from: Dimension, to: Dimension },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Mass,
    Charge,
    Energy,
    Time,
    Length,
    Dimensionless,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Mass => write!(f, "mass"),
            Dimension::Charge => write!(f, "charge"),
            Dimension::Energy => write!(f, "energy"),
            Dimension::Time => write!(f, "time"),
            Dimension::Length => write!(f, "length"),
            Dimension::Dimensionless => write!(f, "dimensionless"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Kilogram,
    Gram,
    AtomicMassUnit,
    Coulomb,
    Kilocoulomb,
    Joule,
    ElectronVolt,
    MegaElectronVolt,
    Second,
    Meter,
    Kilometer,
    Dimensionless,
}

impl Unit {
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Kilogram | Unit::Gram | Unit::AtomicMassUnit => Dimension::Mass,
            Unit::Coulomb | Unit::Kilocoulomb => Dimension::Charge,
            Unit::Joule | Unit::ElectronVolt | Unit::MegaElectronVolt => Dimension::Energy,
            Unit::Second => Dimension::Time,
            Unit::Meter | Unit::Kilometer => Dimension::Length,
            Unit::Dimensionless => Dimension::Dimensionless,
        }
    }

    /// Factor converting a value in this unit to the SI unit of its dimension.
    pub fn si_scale(&self) -> f64 {
        match self {
            Unit::Kilogram => 1.0,
            Unit::Gram => 1e-3,
            Unit::AtomicMassUnit => ATOMIC_MASS_UNIT,
            Unit::Coulomb => 1.0,
            Unit::Kilocoulomb => 1e3,
            Unit::Joule => 1.0,
            Unit::ElectronVolt => ELECTRON_VOLT,
            Unit::MegaElectronVolt => ELECTRON_VOLT * 1e6,
            Unit::Second => 1.0,
            Unit::Meter => 1.0,
            Unit::Kilometer => 1e3,
            Unit::Dimensionless => 1.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::AtomicMassUnit => "u",
            Unit::Coulomb => "C",
            Unit::Kilocoulomb => "kC",
            Unit::Joule => "J",
            Unit::ElectronVolt => "eV",
            Unit::MegaElectronVolt => "MeV",
            Unit::Second => "s",
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::Dimensionless => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Unit::Kilogram),
            "g" => Ok(Unit::Gram),
            "u" | "Da" => Ok(Unit::AtomicMassUnit),
            "C" => Ok(Unit::Coulomb),
            "kC" => Ok(Unit::Kilocoulomb),
            "J" => Ok(Unit::Joule),
            "eV" => Ok(Unit::ElectronVolt),
            "MeV" => Ok(Unit::MegaElectronVolt),
            "s" => Ok(Unit::Second),
            "m" => Ok(Unit::Meter),
            "km" => Ok(Unit::Kilometer),
            "" | "dimensionless" => Ok(Unit::Dimensionless),
            _ => Err(UnitError::Unknown(s.to_string())),
        }
    }
}

/// A scalar value attached to a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn kilograms(value: f64) -> Self {
        Self::new(value, Unit::Kilogram)
    }

    pub const fn coulombs(value: f64) -> Self {
        Self::new(value, Unit::Coulomb)
    }

    pub const fn joules(value: f64) -> Self {
        Self::new(value, Unit::Joule)
    }

    pub const fn seconds(value: f64) -> Self {
        Self::new(value, Unit::Second)
    }

    pub const fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::Dimensionless)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// The value expressed in the SI unit of this quantity's dimension.
    pub fn si_value(&self) -> f64 {
        self.value * self.unit.si_scale()
    }

    pub fn to(&self, unit: Unit) -> Result<Quantity, UnitError> {
        if self.dimension() != unit.dimension() {
            return Err(UnitError::Incompatible {
                from: self.dimension(),
                to: unit.dimension(),
            });
        }
        Ok(Quantity::new(self.si_value() / unit.si_scale(), unit))
    }

    /// Relative closeness in SI units. Two NaN values of the same dimension
    /// compare as close; infinities must match exactly.
    pub fn is_close(&self, other: &Quantity, rtol: f64) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        let (a, b) = (self.si_value(), other.si_value());
        if a.is_nan() || b.is_nan() {
            return a.is_nan() && b.is_nan();
        }
        if a.is_infinite() || b.is_infinite() {
            return a == b;
        }
        (a - b).abs() <= rtol * a.abs().max(b.abs())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => f.write_str(&format_value(self.value)),
            unit => write!(f, "{} {}", format_value(self.value), unit),
        }
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (value_str, unit_str) = match trimmed.split_once(char::is_whitespace) {
            Some((v, u)) => (v, u.trim()),
            None => (trimmed, ""),
        };
        let value = value_str
            .parse::<f64>()
            .map_err(|_| UnitError::Malformed(s.to_string()))?;
        let unit = unit_str.parse::<Unit>()?;
        Ok(Quantity::new(value, unit))
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::new(-self.value, self.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

/// Formats a float the way it reads back: shortest round-trip digits,
/// `nan`/`inf` spelled in lowercase.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{value:?}")
    }
}
