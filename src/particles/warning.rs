//! Non-fatal conditions reported alongside a value.
//!
//! Warnings are returned to the caller, never only logged. Construction
//! warnings stay attached to the particle; per-access warnings travel in a
//! [`Warned`] next to the value they qualify.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The input was ambiguous or redundant but could still be interpreted.
    Atomic(String),
    /// The reference data only holds a qualitative or bounded value.
    MissingAtomicData(String),
}

impl Warning {
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::Atomic(_) => "AtomicWarning",
            Warning::MissingAtomicData(_) => "MissingAtomicDataWarning",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Warning::Atomic(msg) | Warning::MissingAtomicData(msg) => msg,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Warned<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Warned<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: Warning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
