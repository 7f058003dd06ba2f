//! Error types for particle resolution and attribute access.
//!
//! Every accessor on a particle either returns a value or exactly one of
//! these errors. The variants follow the failure taxonomy of the resolver:
//! the input could not be resolved at all, a resolved particle lacks the
//! structure an attribute needs, or the reference tables have no answer.

use thiserror::Error;

use crate::model::category::QueryError;
use crate::model::units::UnitError;

/// Errors raised while resolving particles and deriving their attributes.
///
/// The enum is `Clone` and `PartialEq` so memoized results can be cached
/// on a particle and compared in tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input cannot be resolved to any particle.
    ///
    /// Covers malformed symbols, impossible mass number or charge
    /// combinations, and constructor arguments of the wrong kind.
    #[error("invalid particle '{input}': {detail}")]
    InvalidParticle {
        /// The raw input as given by the caller.
        input: String,
        /// Description of the problem.
        detail: String,
    },

    /// The particle is not an element, isotope, or ion, but the attribute
    /// requires one.
    #[error("'{particle}' {detail}")]
    InvalidElement {
        /// Symbol of the particle being queried.
        particle: String,
        /// Description of the problem.
        detail: String,
    },

    /// The particle has no mass number, but the attribute requires one.
    #[error("'{particle}' {detail}")]
    InvalidIsotope {
        /// Symbol of the particle being queried.
        particle: String,
        /// Description of the problem.
        detail: String,
    },

    /// An ionization state cannot exist or cannot be reached.
    #[error("'{particle}' {detail}")]
    InvalidIon {
        /// Symbol of the particle being queried.
        particle: String,
        /// Description of the problem.
        detail: String,
    },

    /// The charge state of the particle is not known.
    #[error("charge information is required for '{particle}': {detail}")]
    Charge {
        /// Symbol of the particle being queried.
        particle: String,
        /// Which attribute needed the charge.
        detail: String,
    },

    /// The reference tables hold no value for this attribute.
    #[error("missing atomic data for '{particle}': {detail}")]
    MissingAtomicData {
        /// Symbol of the particle being queried.
        particle: String,
        /// Which datum is missing.
        detail: String,
    },

    /// Misuse of the particle API: unknown or contradictory category
    /// queries, undefined antiparticles, and comparison against strings
    /// that are not particles.
    #[error("{0}")]
    Atomic(String),

    /// A count argument is outside its allowed range (such as
    /// `ionize(0)`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Custom reference tables could not be parsed or are inconsistent.
    #[error("invalid reference data: {0}")]
    ReferenceData(String),

    /// JSON text could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ReferenceData(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(e: QueryError) -> Self {
        Error::Atomic(e.to_string())
    }
}

impl Error {
    /// Creates an [`InvalidParticle`](Error::InvalidParticle) error.
    pub fn invalid_particle(input: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParticle {
            input: input.into(),
            detail: detail.into(),
        }
    }

    /// Creates an [`InvalidParticle`](Error::InvalidParticle) error for a
    /// quantity that failed to parse or had the wrong dimension.
    pub fn invalid_quantity(input: impl Into<String>, source: UnitError) -> Self {
        Self::invalid_particle(input, source.to_string())
    }

    pub fn invalid_element(particle: &str, detail: impl Into<String>) -> Self {
        Self::InvalidElement {
            particle: particle.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid_isotope(particle: &str, detail: impl Into<String>) -> Self {
        Self::InvalidIsotope {
            particle: particle.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid_ion(particle: &str, detail: impl Into<String>) -> Self {
        Self::InvalidIon {
            particle: particle.to_string(),
            detail: detail.into(),
        }
    }

    pub fn charge(particle: &str, detail: impl Into<String>) -> Self {
        Self::Charge {
            particle: particle.to_string(),
            detail: detail.into(),
        }
    }

    pub fn missing_data(particle: &str, detail: impl Into<String>) -> Self {
        Self::MissingAtomicData {
            particle: particle.to_string(),
            detail: detail.into(),
        }
    }

    /// The taxonomy name of this error, as shown by the command line tool.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidParticle { .. } => "InvalidParticleError",
            Error::InvalidElement { .. } => "InvalidElementError",
            Error::InvalidIsotope { .. } => "InvalidIsotopeError",
            Error::InvalidIon { .. } => "InvalidIonError",
            Error::Charge { .. } => "ChargeError",
            Error::MissingAtomicData { .. } => "MissingAtomicDataError",
            Error::Atomic(_) => "AtomicError",
            Error::InvalidArgument(_) => "ValueError",
            Error::ReferenceData(_) => "ReferenceDataError",
            Error::Json(_) => "JsonError",
        }
    }
}
