//! Reference tables: elements, isotopes, and the subatomic particle catalog.
//!
//! The default tables are TOML files embedded in the binary and parsed once
//! per process. Callers that need different data (test fixtures, updated
//! evaluations) load their own document with [`load_reference_data`] and
//! hand the resulting [`ReferenceData`] to the particle constructors. After
//! loading, a table is never mutated, so a shared handle needs no locking.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::model::category::{Category, CategorySet};
use crate::model::types::Element;
use crate::model::units::{Quantity, Unit};
use crate::particles::Error;

const ELEMENTS_TOML: &str = include_str!("../../resources/elements.toml");
const ISOTOPES_TOML: &str = include_str!("../../resources/isotopes.toml");
const PARTICLES_TOML: &str = include_str!("../../resources/particles.toml");

static DEFAULT_DATA: OnceLock<Arc<ReferenceData>> = OnceLock::new();

/// A half-life as tabulated: either a value in seconds (infinite for stable
/// nuclides) or a textual bound such as `"> 9.1e-22 s"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HalfLife {
    Seconds(f64),
    Bound(String),
}

impl HalfLife {
    pub fn as_quantity(&self) -> Option<Quantity> {
        match self {
            HalfLife::Seconds(s) => Some(Quantity::seconds(*s)),
            HalfLife::Bound(_) => None,
        }
    }

    /// `Some(true)` for an infinite half-life, `Some(false)` for a finite
    /// one, `None` when only a bound is known.
    pub fn is_stable(&self) -> Option<bool> {
        match self {
            HalfLife::Seconds(s) => Some(s.is_infinite()),
            HalfLife::Bound(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementRecord {
    pub symbol: String,
    pub name: String,
    pub atomic_number: u8,
    /// In unified atomic mass units.
    #[serde(default)]
    pub standard_atomic_weight: Option<f64>,
    pub group: u8,
    pub period: u8,
    pub block: String,
    pub category: Category,
}

/// Placement of an element in the periodic table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTable {
    pub group: u8,
    pub period: u8,
    pub block: String,
    pub category: Category,
}

impl ElementRecord {
    pub fn periodic_table(&self) -> PeriodicTable {
        PeriodicTable {
            group: self.group,
            period: self.period,
            block: self.block.clone(),
            category: self.category,
        }
    }

    pub fn standard_atomic_weight(&self) -> Option<Quantity> {
        self.standard_atomic_weight
            .map(|w| Quantity::new(w, Unit::AtomicMassUnit))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IsotopeRecord {
    pub element: String,
    pub mass_number: u16,
    /// Mass of the neutral atom, in unified atomic mass units.
    #[serde(default)]
    pub atomic_mass: Option<f64>,
    #[serde(default)]
    pub abundance: Option<f64>,
    #[serde(default)]
    pub half_life: Option<HalfLife>,
}

impl IsotopeRecord {
    pub fn atomic_mass(&self) -> Option<Quantity> {
        self.atomic_mass
            .map(|m| Quantity::new(m, Unit::AtomicMassUnit))
    }

    /// `None` when the half-life is missing or only a bound.
    pub fn is_stable(&self) -> Option<bool> {
        self.half_life.as_ref().and_then(HalfLife::is_stable)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticleRecord {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// The isotope this particle is the bare nucleus of, as `Sym-A`.
    #[serde(default)]
    pub nucleus: Option<String>,
    /// Rest mass in kilograms; absent where only bounds are known.
    #[serde(default)]
    pub mass: Option<f64>,
    pub charge: i32,
    pub spin: f64,
    pub baryon_number: i32,
    pub lepton_number: i32,
    #[serde(default)]
    pub half_life: Option<HalfLife>,
    pub antiparticle: String,
    #[serde(default)]
    pub categories: CategorySet,
}

#[derive(Debug, Default, Deserialize)]
struct Tables {
    #[serde(default)]
    element: Vec<ElementRecord>,
    #[serde(default)]
    isotope: Vec<IsotopeRecord>,
    #[serde(default)]
    particle: Vec<ParticleRecord>,
}

/// Immutable lookup service over the element, isotope, and particle tables.
#[derive(Debug, Default)]
pub struct ReferenceData {
    elements: HashMap<Element, ElementRecord>,
    element_names: HashMap<String, Element>,
    isotopes: HashMap<(Element, u16), IsotopeRecord>,
    particles: HashMap<String, ParticleRecord>,
    particle_order: Vec<String>,
    aliases: HashMap<String, String>,
    particle_names: HashMap<String, String>,
    nuclei: HashMap<(Element, u16, i32), String>,
}

/// Loads reference data.
///
/// `None` returns the shared handle to the embedded default tables.
/// `Some(text)` parses one TOML document holding any of the `[[element]]`,
/// `[[isotope]]`, and `[[particle]]` arrays; missing arrays are empty.
pub fn load_reference_data(custom_toml: Option<&str>) -> Result<Arc<ReferenceData>, Error> {
    match custom_toml {
        Some(text) => {
            let tables: Tables = toml::from_str(text)?;
            Ok(Arc::new(ReferenceData::build(tables)?))
        }
        None => Ok(default_reference_data()),
    }
}

/// The process-wide default tables, parsed on first use.
pub fn default_reference_data() -> Arc<ReferenceData> {
    DEFAULT_DATA
        .get_or_init(|| {
            let mut tables = Tables::default();
            for text in [ELEMENTS_TOML, ISOTOPES_TOML, PARTICLES_TOML] {
                let part: Tables = toml::from_str(text)
                    .expect("Failed to parse embedded reference data. This is a library bug.");
                tables.element.extend(part.element);
                tables.isotope.extend(part.isotope);
                tables.particle.extend(part.particle);
            }
            Arc::new(
                ReferenceData::build(tables)
                    .expect("Embedded reference data is inconsistent. This is a library bug."),
            )
        })
        .clone()
}

impl ReferenceData {
    /// See [`load_reference_data`].
    pub fn load(custom_toml: Option<&str>) -> Result<Arc<Self>, Error> {
        load_reference_data(custom_toml)
    }

    fn build(tables: Tables) -> Result<Self, Error> {
        let mut data = ReferenceData::default();

        for record in tables.element {
            let element: Element = record
                .symbol
                .parse()
                .map_err(|e: crate::model::types::ParseElementError| {
                    Error::ReferenceData(e.to_string())
                })?;
            if element.atomic_number() != record.atomic_number {
                return Err(Error::ReferenceData(format!(
                    "element '{}' has atomic number {} but the periodic table says {}",
                    record.symbol,
                    record.atomic_number,
                    element.atomic_number()
                )));
            }
            if !record.category.is_periodic_series() {
                return Err(Error::ReferenceData(format!(
                    "element '{}' has category '{}', which is not a periodic table series",
                    record.symbol, record.category
                )));
            }
            let name = record.name.to_lowercase();
            if data.element_names.insert(name, element).is_some()
                || data.elements.insert(element, record.clone()).is_some()
            {
                return Err(Error::ReferenceData(format!(
                    "element '{}' is listed more than once",
                    record.symbol
                )));
            }
        }

        for record in tables.isotope {
            let element: Element = record
                .element
                .parse()
                .map_err(|e: crate::model::types::ParseElementError| {
                    Error::ReferenceData(e.to_string())
                })?;
            if record.mass_number < u16::from(element.atomic_number()) {
                return Err(Error::ReferenceData(format!(
                    "isotope {}-{} has fewer nucleons than protons",
                    record.element, record.mass_number
                )));
            }
            let key = (element, record.mass_number);
            if data.isotopes.insert(key, record.clone()).is_some() {
                return Err(Error::ReferenceData(format!(
                    "isotope {}-{} is listed more than once",
                    record.element, record.mass_number
                )));
            }
        }

        let mut seen = HashSet::new();
        for record in tables.particle {
            for key in std::iter::once(&record.symbol).chain(&record.aliases) {
                if key != &record.symbol && !seen.insert(key.clone()) {
                    return Err(Error::ReferenceData(format!(
                        "particle alias '{key}' is ambiguous"
                    )));
                }
                if key != &record.symbol {
                    data.aliases.insert(key.clone(), record.symbol.clone());
                }
            }
            if let Some(nucleus) = &record.nucleus {
                let (element, mass_number) = parse_nucleus(nucleus).ok_or_else(|| {
                    Error::ReferenceData(format!(
                        "particle '{}' names an unknown nucleus '{}'",
                        record.symbol, nucleus
                    ))
                })?;
                data.nuclei
                    .insert((element, mass_number, record.charge), record.symbol.clone());
            }
            let name = record.name.to_lowercase();
            if let Some(previous) = data.particle_names.insert(name, record.symbol.clone()) {
                return Err(Error::ReferenceData(format!(
                    "particle name '{}' is used by both '{}' and '{}'",
                    record.name, previous, record.symbol
                )));
            }
            data.particle_order.push(record.symbol.clone());
            if data
                .particles
                .insert(record.symbol.clone(), record.clone())
                .is_some()
            {
                return Err(Error::ReferenceData(format!(
                    "particle '{}' is listed more than once",
                    record.symbol
                )));
            }
        }

        for record in data.particles.values() {
            match data.particles.get(&record.antiparticle) {
                Some(anti) if anti.antiparticle == record.symbol => {}
                _ => {
                    return Err(Error::ReferenceData(format!(
                        "antiparticle of '{}' is not a catalog entry that points back",
                        record.symbol
                    )));
                }
            }
        }

        for symbol in data.aliases.keys() {
            if data.particles.contains_key(symbol) {
                return Err(Error::ReferenceData(format!(
                    "particle alias '{symbol}' shadows a catalog symbol"
                )));
            }
        }

        for (name, symbol) in &data.particle_names {
            let claimed_by = data
                .aliases
                .get(name)
                .or_else(|| data.particles.get(name).map(|record| &record.symbol));
            if let Some(other) = claimed_by.filter(|other| *other != symbol) {
                return Err(Error::ReferenceData(format!(
                    "particle name '{name}' of '{symbol}' resolves to '{other}'"
                )));
            }
        }

        debug!(
            elements = data.elements.len(),
            isotopes = data.isotopes.len(),
            particles = data.particles.len(),
            "loaded reference data"
        );

        Ok(data)
    }

    pub fn element(&self, element: Element) -> Option<&ElementRecord> {
        self.elements.get(&element)
    }

    /// Case-insensitive lookup by element name.
    pub fn element_by_name(&self, name: &str) -> Option<Element> {
        self.element_names.get(&name.to_lowercase()).copied()
    }

    pub fn isotope(&self, element: Element, mass_number: u16) -> Option<&IsotopeRecord> {
        self.isotopes.get(&(element, mass_number))
    }

    pub fn particle(&self, symbol: &str) -> Option<&ParticleRecord> {
        self.particles.get(symbol)
    }

    /// Resolves a catalog symbol, an exact alias, or a case-insensitive
    /// particle name to the catalog symbol.
    pub fn dealias(&self, input: &str) -> Option<&str> {
        if let Some(record) = self.particles.get(input) {
            return Some(&record.symbol);
        }
        if let Some(symbol) = self.aliases.get(input) {
            return Some(symbol);
        }
        self.particle_names
            .get(&input.to_lowercase())
            .map(String::as_str)
    }

    /// The catalog entry that is the given ion of the given isotope, such as
    /// `p+` for a singly ionized hydrogen-1.
    pub fn nucleus_particle(
        &self,
        element: Element,
        mass_number: u16,
        charge: i32,
    ) -> Option<&ParticleRecord> {
        self.nuclei
            .get(&(element, mass_number, charge))
            .and_then(|symbol| self.particles.get(symbol))
    }

    /// Catalog entries in table order.
    pub fn particles(&self) -> impl Iterator<Item = &ParticleRecord> {
        self.particle_order
            .iter()
            .filter_map(|symbol| self.particles.get(symbol))
    }

    pub fn isotopes(&self) -> impl Iterator<Item = (Element, &IsotopeRecord)> {
        self.isotopes.iter().map(|((el, _), record)| (*el, record))
    }

    /// Every tabulated isotope of an element, lightest first.
    pub fn known_isotopes(&self, element: Element) -> Vec<&IsotopeRecord> {
        let mut isotopes: Vec<_> = self
            .isotopes
            .iter()
            .filter(|((el, _), _)| *el == element)
            .map(|(_, record)| record)
            .collect();
        isotopes.sort_by_key(|record| record.mass_number);
        isotopes
    }

    /// Isotopes with an infinite tabulated half-life, lightest first.
    pub fn stable_isotopes(&self, element: Element) -> Vec<&IsotopeRecord> {
        self.known_isotopes(element)
            .into_iter()
            .filter(|record| record.is_stable() == Some(true))
            .collect()
    }

    /// Isotopes with a nonzero natural abundance, most abundant first.
    pub fn common_isotopes(&self, element: Element) -> Vec<&IsotopeRecord> {
        let mut isotopes: Vec<_> = self
            .known_isotopes(element)
            .into_iter()
            .filter(|record| record.abundance.is_some_and(|a| a > 0.0))
            .collect();
        isotopes.sort_by(|a, b| {
            b.abundance
                .unwrap_or_default()
                .total_cmp(&a.abundance.unwrap_or_default())
        });
        isotopes
    }
}

/// Splits `Sym-A` into an element and a mass number.
pub fn parse_nucleus(text: &str) -> Option<(Element, u16)> {
    let (symbol, mass_number) = text.split_once('-')?;
    Some((symbol.parse().ok()?, mass_number.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_cover_every_element() {
        let data = default_reference_data();
        for el in Element::iter() {
            let record = data.element(el).expect("element present");
            assert_eq!(record.atomic_number, el.atomic_number());
        }
        assert_eq!(data.element_by_name("hYdRoGeN"), Some(Element::H));
        assert_eq!(data.element_by_name("lead"), Some(Element::Pb));
    }

    #[test]
    fn default_handle_is_shared() {
        let a = default_reference_data();
        let b = load_reference_data(None).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn weights_are_optional() {
        let data = default_reference_data();
        assert!(data.element(Element::Fe).unwrap().standard_atomic_weight.is_some());
        assert!(data.element(Element::Og).unwrap().standard_atomic_weight.is_none());
    }

    #[test]
    fn half_lives_may_be_textual() {
        let data = default_reference_data();
        let h5 = data.isotope(Element::H, 5).unwrap();
        assert!(matches!(h5.half_life, Some(HalfLife::Bound(_))));
        let h1 = data.isotope(Element::H, 1).unwrap();
        assert_eq!(h1.half_life.as_ref().and_then(HalfLife::is_stable), Some(true));
    }

    #[test]
    fn aliases_and_names_resolve_to_catalog_symbols() {
        let data = default_reference_data();
        assert_eq!(data.dealias("electron"), Some("e-"));
        assert_eq!(data.dealias("e"), Some("e-"));
        assert_eq!(data.dealias("NEUTRON"), Some("n"));
        assert_eq!(data.dealias("n-1"), Some("n"));
        assert_eq!(data.dealias("muon-"), Some("mu-"));
        assert_eq!(data.dealias("P"), None);
        assert_eq!(data.dealias("Fe"), None);
    }

    #[test]
    fn proton_is_the_hydrogen_nucleus() {
        let data = default_reference_data();
        let proton = data.nucleus_particle(Element::H, 1, 1).unwrap();
        assert_eq!(proton.symbol, "p+");
        assert!(data.nucleus_particle(Element::H, 1, 0).is_none());
    }

    #[test]
    fn custom_tables_load_and_missing_arrays_are_empty() {
        let text = r#"
            [[element]]
            symbol = "He"
            name = "helium"
            atomic_number = 2
            group = 18
            period = 1
            block = "s"
            category = "noble gas"
        "#;
        let data = load_reference_data(Some(text)).unwrap();
        assert!(data.element(Element::He).is_some());
        assert!(data.element(Element::H).is_none());
        assert_eq!(data.particles().count(), 0);
    }

    #[test]
    fn duplicate_elements_are_rejected() {
        let record = r#"
            [[element]]
            symbol = "H"
            name = "hydrogen"
            atomic_number = 1
            group = 1
            period = 1
            block = "s"
            category = "nonmetal"
        "#;
        let text = format!("{record}\n{record}");
        assert!(matches!(
            load_reference_data(Some(&text)),
            Err(Error::ReferenceData(_))
        ));
    }

    #[test]
    fn colliding_particle_names_are_rejected() {
        let entry = |symbol: &str, name: &str, alias: &str| {
            format!(
                r#"
                [[particle]]
                symbol = "{symbol}"
                name = "{name}"
                aliases = ["{alias}"]
                charge = 0
                spin = 0.5
                baryon_number = 0
                lepton_number = 0
                antiparticle = "{symbol}"
                "#
            )
        };
        let shared_name = format!("{}{}", entry("x1", "Thing", "x"), entry("x2", "thing", "y"));
        assert!(matches!(
            load_reference_data(Some(&shared_name)),
            Err(Error::ReferenceData(_))
        ));
        let name_is_alias = format!("{}{}", entry("x1", "first", "second"), entry("x2", "second", "z"));
        assert!(matches!(
            load_reference_data(Some(&name_is_alias)),
            Err(Error::ReferenceData(_))
        ));
        let name_is_symbol = format!("{}{}", entry("x1", "x2", "a"), entry("x2", "other", "b"));
        assert!(matches!(
            load_reference_data(Some(&name_is_symbol)),
            Err(Error::ReferenceData(_))
        ));
        let own_alias = format!("{}{}", entry("x1", "one", "one"), entry("x2", "two", "two"));
        let data = load_reference_data(Some(&own_alias)).unwrap();
        assert_eq!(data.dealias("ONE"), Some("x1"));
    }

    #[test]
    fn isotope_listings_filter_and_order() {
        let data = default_reference_data();
        let mass_numbers = |records: Vec<&IsotopeRecord>| {
            records.iter().map(|r| r.mass_number).collect::<Vec<_>>()
        };
        let known = mass_numbers(data.known_isotopes(Element::H));
        assert_eq!(&known[..5], &[1, 2, 3, 4, 5]);
        assert!(known.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(mass_numbers(data.stable_isotopes(Element::H)), vec![1, 2]);
        assert_eq!(mass_numbers(data.common_isotopes(Element::He)), vec![4, 3]);
        assert!(data.common_isotopes(Element::Tc).is_empty());
        assert_eq!(data.isotope(Element::H, 5).unwrap().is_stable(), None);
        assert_eq!(data.isotope(Element::H, 3).unwrap().is_stable(), Some(false));
    }

    #[test]
    fn inconsistent_atomic_numbers_are_rejected() {
        let text = r#"
            [[element]]
            symbol = "Fe"
            name = "iron"
            atomic_number = 25
            group = 8
            period = 4
            block = "d"
            category = "transition metal"
        "#;
        let err = load_reference_data(Some(text)).unwrap_err();
        assert!(err.to_string().contains("atomic number"));
    }

    #[test]
    fn dangling_antiparticles_are_rejected() {
        let text = r#"
            [[particle]]
            symbol = "e-"
            name = "electron"
            charge = -1
            spin = 0.5
            baryon_number = 0
            lepton_number = 1
            antiparticle = "e+"
        "#;
        assert!(matches!(
            load_reference_data(Some(text)),
            Err(Error::ReferenceData(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_reference_data_error() {
        assert!(matches!(
            load_reference_data(Some("[[element]\nsymbol =")),
            Err(Error::ReferenceData(_))
        ));
    }
}
