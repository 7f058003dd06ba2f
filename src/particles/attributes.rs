//! Attribute derivation: physical properties as pure functions of a resolved
//! identity and the reference tables.
//!
//! Each getter returns either its value or the single error kind its
//! inapplicability maps to. Memoization happens one level up, in
//! [`Particle`](super::Particle).

use super::error::Error;
use super::roman;
use crate::data::{
    ElementRecord, HalfLife, IsotopeRecord, ParticleRecord, PeriodicTable, ReferenceData,
};
use crate::model::category::{Category, CategorySet};
use crate::model::constants::{
    ATOMIC_MASS_UNIT, ELECTRON_MASS, ELEMENTARY_CHARGE, NEUTRON_MASS, PROTON_MASS,
    SPEED_OF_LIGHT, measured_nuclear_mass,
};
use crate::model::identity::{Identity, isotope_symbol};
use crate::model::units::Quantity;

/// A resolved identity paired with the tables it was resolved against.
#[derive(Clone, Copy)]
pub(crate) struct Subject<'a> {
    pub identity: &'a Identity,
    pub symbol: &'a str,
    pub data: &'a ReferenceData,
}

impl<'a> Subject<'a> {
    /// The catalog entry for this particle, including nuclei such as `p+`.
    pub fn catalog(&self) -> Option<&'a ParticleRecord> {
        self.data.particle(self.symbol)
    }

    fn not_an_element(&self) -> Error {
        Error::invalid_element(self.symbol, "is not an element, isotope, or ion")
    }

    fn element_record(&self) -> Result<&'a ElementRecord, Error> {
        let element = self.identity.element().ok_or_else(|| self.not_an_element())?;
        self.data
            .element(element)
            .ok_or_else(|| Error::missing_data(self.symbol, "no element data"))
    }

    fn isotope_record(&self) -> Result<&'a IsotopeRecord, Error> {
        let element = self.identity.element();
        let mass_number = self.identity.mass_number();
        match (element, mass_number) {
            (Some(element), Some(a)) => self
                .data
                .isotope(element, a)
                .ok_or_else(|| Error::missing_data(self.symbol, "no isotope data")),
            _ => Err(self.no_isotope()),
        }
    }

    fn no_isotope(&self) -> Error {
        Error::invalid_isotope(self.symbol, "has no mass number, so it is not an isotope")
    }

    fn is_single_nucleon(&self) -> bool {
        self.baryon_number() == Ok(1)
    }

    pub fn atomic_number(&self) -> Result<u8, Error> {
        self.identity
            .element()
            .map(|el| el.atomic_number())
            .ok_or_else(|| self.not_an_element())
    }

    pub fn mass_number(&self) -> Result<u16, Error> {
        self.identity.mass_number().ok_or_else(|| self.no_isotope())
    }

    pub fn neutron_number(&self) -> Result<u16, Error> {
        if let Some(record) = self.catalog() {
            if record.categories.contains(&Category::Neutron) {
                return Ok(1);
            }
        }
        let a = self.mass_number()?;
        Ok(a - u16::from(self.atomic_number()?))
    }

    pub fn element_name(&self) -> Result<String, Error> {
        Ok(self.element_record()?.name.clone())
    }

    pub fn isotope_name(&self) -> Result<String, Error> {
        let record = self.element_record()?;
        let a = self.mass_number()?;
        Ok(match (record.atomic_number, a) {
            (1, 2) => "deuterium".to_string(),
            (1, 3) => "tritium".to_string(),
            _ => format!("{}-{}", record.name, a),
        })
    }

    pub fn integer_charge(&self) -> Result<i32, Error> {
        match self.identity {
            Identity::Subatomic { .. } => self
                .catalog()
                .map(|record| record.charge)
                .ok_or_else(|| Error::missing_data(self.symbol, "not in the particle catalog")),
            Identity::Ion { charge, .. } => Ok(*charge),
            _ => Err(Error::charge(self.symbol, "the charge state is not known")),
        }
    }

    pub fn charge(&self) -> Result<Quantity, Error> {
        Ok(Quantity::coulombs(f64::from(self.integer_charge()?) * ELEMENTARY_CHARGE))
    }

    pub fn roman_symbol(&self) -> Result<Option<String>, Error> {
        if let Identity::Subatomic { .. } = self.identity {
            return Ok(None);
        }
        let charge = self.integer_charge()?;
        let numeral = u32::try_from(charge + 1)
            .ok()
            .and_then(roman::to_roman)
            .ok_or_else(|| {
                Error::invalid_ion(self.symbol, "has no roman numeral ionization state")
            })?;
        let base = self.identity.nuclear_symbol().unwrap_or_default();
        Ok(Some(format!("{base} {numeral}")))
    }

    pub fn baryon_number(&self) -> Result<i32, Error> {
        if let Some(record) = self.catalog() {
            return Ok(record.baryon_number);
        }
        self.identity.mass_number().map(i32::from).ok_or_else(|| {
            Error::missing_data(self.symbol, "baryon number unknown without a mass number")
        })
    }

    pub fn lepton_number(&self) -> Result<i32, Error> {
        match self.catalog() {
            Some(record) => Ok(record.lepton_number),
            None if self.identity.element().is_some() => Ok(0),
            None => Err(Error::missing_data(self.symbol, "lepton number")),
        }
    }

    pub fn spin(&self) -> Result<f64, Error> {
        self.catalog().map(|record| record.spin).ok_or_else(|| {
            Error::missing_data(self.symbol, "spin is only tabulated for catalog particles")
        })
    }

    pub fn periodic_table(&self) -> Result<PeriodicTable, Error> {
        Ok(self.element_record()?.periodic_table())
    }

    pub fn standard_atomic_weight(&self) -> Result<Quantity, Error> {
        let record = self.element_record()?;
        if !matches!(self.identity, Identity::Element(_)) {
            return Err(Error::invalid_element(
                self.symbol,
                "is an isotope or ion, so the standard atomic weight does not apply",
            ));
        }
        record
            .standard_atomic_weight
            .map(|w| Quantity::kilograms(w * ATOMIC_MASS_UNIT))
            .ok_or_else(|| Error::missing_data(self.symbol, "no standard atomic weight"))
    }

    /// Mass of the bare nucleus (or the free nucleon for `n`).
    pub fn nuclide_mass(&self) -> Result<Quantity, Error> {
        if let Identity::Subatomic { .. } = self.identity {
            return match self.catalog() {
                Some(record) if record.categories.contains(&Category::Neutron) => {
                    self.catalog_mass(record)
                }
                _ => Err(self.no_isotope()),
            };
        }

        let element = self.identity.element().ok_or_else(|| self.no_isotope())?;
        let a = self.mass_number()?;
        if let Some(mass) = measured_nuclear_mass(&isotope_symbol(element, a)) {
            return Ok(Quantity::kilograms(mass));
        }
        let electrons = f64::from(element.atomic_number()) * ELECTRON_MASS;
        Ok(Quantity::kilograms(self.tabulated_atomic_mass()? - electrons))
    }

    /// Mass of the neutral isotope in kilograms.
    fn tabulated_atomic_mass(&self) -> Result<f64, Error> {
        self.isotope_record()?
            .atomic_mass()
            .map(|mass| mass.si_value())
            .ok_or_else(|| Error::missing_data(self.symbol, "no isotope mass"))
    }

    pub fn mass(&self) -> Result<Quantity, Error> {
        match self.identity {
            Identity::Subatomic { .. } => {
                let record = self
                    .catalog()
                    .ok_or_else(|| Error::missing_data(self.symbol, "not in the particle catalog"))?;
                self.catalog_mass(record)
            }
            Identity::Element(_) => self.element_mass(0),
            Identity::Isotope { .. } => self.isotope_mass(0),
            Identity::Ion {
                element,
                mass_number,
                charge,
            } => match mass_number {
                Some(_) if *charge == i32::from(element.atomic_number()) => self.nuclide_mass(),
                Some(_) => self.isotope_mass(*charge),
                None => self.element_mass(*charge),
            },
        }
    }

    fn catalog_mass(&self, record: &ParticleRecord) -> Result<Quantity, Error> {
        record
            .mass
            .map(Quantity::kilograms)
            .ok_or_else(|| Error::missing_data(self.symbol, "rest mass is not known"))
    }

    fn element_mass(&self, charge: i32) -> Result<Quantity, Error> {
        let weight = self
            .element_record()?
            .standard_atomic_weight
            .ok_or_else(|| Error::missing_data(self.symbol, "no standard atomic weight"))?;
        Ok(Quantity::kilograms(
            weight * ATOMIC_MASS_UNIT - f64::from(charge) * ELECTRON_MASS,
        ))
    }

    fn isotope_mass(&self, charge: i32) -> Result<Quantity, Error> {
        Ok(Quantity::kilograms(
            self.tabulated_atomic_mass()? - f64::from(charge) * ELECTRON_MASS,
        ))
    }

    /// Rest energy. Nuclear particles use the nuclide mass, so a neutral
    /// atom and its bare nucleus report the same value.
    pub fn mass_energy(&self) -> Result<Quantity, Error> {
        let mass = if self.identity.mass_number().is_some() {
            self.nuclide_mass()?
        } else {
            self.mass()?
        };
        Ok(Quantity::joules(mass.si_value() * SPEED_OF_LIGHT * SPEED_OF_LIGHT))
    }

    pub fn binding_energy(&self) -> Result<Quantity, Error> {
        if self.is_single_nucleon() {
            return Ok(Quantity::joules(0.0));
        }
        let z = f64::from(self.atomic_number().map_err(|_| self.no_isotope())?);
        let n = f64::from(self.neutron_number()?);
        let defect = n * NEUTRON_MASS + z * PROTON_MASS - self.nuclide_mass()?.si_value();
        Ok(Quantity::joules(defect * SPEED_OF_LIGHT * SPEED_OF_LIGHT))
    }

    pub fn half_life(&self) -> Result<HalfLife, Error> {
        let tabulated = match self.identity {
            Identity::Subatomic { .. } => self.catalog().and_then(|r| r.half_life.clone()),
            _ => self.isotope_record()?.half_life.clone(),
        };
        tabulated.ok_or_else(|| Error::missing_data(self.symbol, "no half-life"))
    }

    /// Natural abundance as a fraction of the element's atoms.
    pub fn isotopic_abundance(&self) -> Result<Quantity, Error> {
        self.isotope_record()?
            .abundance
            .map(Quantity::dimensionless)
            .ok_or_else(|| Error::missing_data(self.symbol, "no natural abundance"))
    }

    pub fn is_ion(&self) -> bool {
        matches!(self.identity, Identity::Ion { charge, .. } if *charge != 0)
    }

    pub fn categories(&self) -> CategorySet {
        let mut categories = CategorySet::new();

        if let Some(record) = self.catalog() {
            categories.extend(record.categories.iter().copied());
        }

        if let Some(element) = self.identity.element() {
            categories.insert(Category::Element);
            if let Some(record) = self.data.element(element) {
                categories.insert(record.category);
            }
            if self.identity.mass_number().is_some() {
                categories.insert(Category::Isotope);
            }
            if self.is_ion() {
                categories.insert(Category::Ion);
            }
        }

        if let Ok(charge) = self.integer_charge() {
            categories.insert(if charge == 0 {
                Category::Uncharged
            } else {
                Category::Charged
            });
        }

        let stability = match self.identity {
            Identity::Subatomic { .. } | Identity::Isotope { .. } => self.half_life().ok(),
            Identity::Ion {
                mass_number: Some(_),
                ..
            } => self.half_life().ok(),
            _ => None,
        };
        match stability.as_ref().and_then(HalfLife::is_stable) {
            Some(true) => {
                categories.insert(Category::Stable);
            }
            Some(false) => {
                categories.insert(Category::Unstable);
            }
            None => {}
        }

        categories
    }
}
