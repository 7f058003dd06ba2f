use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Not;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use super::attributes::Subject;
use super::config::ParticleOptions;
use super::error::Error;
use super::parser::{self, Descriptor};
use super::resolver;
use super::warning::{Warned, Warning};
use crate::data::{HalfLife, PeriodicTable, ReferenceData, default_reference_data};
use crate::model::category::{CategoryQuery, CategorySet};
use crate::model::identity::Identity;
use crate::model::types::Element;
use crate::model::units::Quantity;

/// Anything a [`Particle`] can be built from.
///
/// A particle argument skips the string parser entirely and reuses the
/// resolved identity, so a particle built from a particle is never
/// re-specified by its own symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleArg {
    Symbol(String),
    Identity(Identity),
    AtomicNumber(u8),
}

impl From<&str> for ParticleArg {
    fn from(symbol: &str) -> Self {
        ParticleArg::Symbol(symbol.to_string())
    }
}

impl From<String> for ParticleArg {
    fn from(symbol: String) -> Self {
        ParticleArg::Symbol(symbol)
    }
}

impl From<&String> for ParticleArg {
    fn from(symbol: &String) -> Self {
        ParticleArg::Symbol(symbol.clone())
    }
}

impl From<&Particle> for ParticleArg {
    fn from(particle: &Particle) -> Self {
        ParticleArg::Identity(particle.identity.clone())
    }
}

impl From<Particle> for ParticleArg {
    fn from(particle: Particle) -> Self {
        ParticleArg::Identity(particle.identity)
    }
}

impl From<u8> for ParticleArg {
    fn from(atomic_number: u8) -> Self {
        ParticleArg::AtomicNumber(atomic_number)
    }
}

/// Write-once slots for the attributes that walk the reference tables.
///
/// Each slot is filled with the first computed result. A concurrent race
/// on the same slot computes equal values, so losing it is harmless.
#[derive(Debug, Clone, Default)]
struct Cache {
    mass: OnceLock<Result<Quantity, Error>>,
    nuclide_mass: OnceLock<Result<Quantity, Error>>,
    standard_atomic_weight: OnceLock<Result<Quantity, Error>>,
    binding_energy: OnceLock<Result<Quantity, Error>>,
    half_life: OnceLock<Result<HalfLife, Error>>,
    isotopic_abundance: OnceLock<Result<Quantity, Error>>,
    categories: OnceLock<CategorySet>,
}

/// An atom, isotope, ion, or catalog particle with derived physical
/// properties.
///
/// Identity is fixed at construction. Attributes are computed on first
/// access and cached; an attribute that does not apply to the particle
/// returns the same error every time it is asked for.
///
/// ```
/// use particle_forge::{Particle, ParticleOptions};
///
/// let iron = Particle::with_options("Fe", ParticleOptions::new().charge(17).mass_number(56))?;
/// assert_eq!(iron.symbol(), "Fe-56 17+");
/// assert_eq!(iron.atomic_number()?, 26);
/// assert_eq!(iron.neutron_number()?, 30);
/// # Ok::<(), particle_forge::Error>(())
/// ```
#[derive(Clone)]
pub struct Particle {
    identity: Identity,
    symbol: String,
    data: Arc<ReferenceData>,
    warnings: Vec<Warning>,
    cache: Cache,
}

impl Particle {
    pub fn new(arg: impl Into<ParticleArg>) -> Result<Self, Error> {
        Self::with_options(arg, ParticleOptions::default())
    }

    pub fn with_options(
        arg: impl Into<ParticleArg>,
        options: ParticleOptions,
    ) -> Result<Self, Error> {
        Self::with_data(arg, options, default_reference_data())
    }

    /// Builds a particle against an explicit set of reference tables.
    pub fn with_data(
        arg: impl Into<ParticleArg>,
        options: ParticleOptions,
        data: Arc<ReferenceData>,
    ) -> Result<Self, Error> {
        let (input, parsed) = match arg.into() {
            ParticleArg::Symbol(symbol) => {
                let parsed = parser::parse(&symbol, &options, &data)?;
                (symbol, parsed)
            }
            ParticleArg::Identity(identity) => {
                let input = resolver::canonical_symbol(&identity, &data);
                let descriptor = Descriptor::from_identity(&identity);
                let parsed = parser::merge_options(&input, Warned::clean(descriptor), &options)?;
                (input, parsed)
            }
            ParticleArg::AtomicNumber(z) => {
                let input = z.to_string();
                let element = Element::from_atomic_number(z).ok_or_else(|| {
                    Error::invalid_particle(&input, "atomic number must be between 1 and 118")
                })?;
                let descriptor = Descriptor::Nuclear {
                    element,
                    mass_number: None,
                    charge: None,
                };
                let parsed = parser::merge_options(&input, Warned::clean(descriptor), &options)?;
                (input, parsed)
            }
        };

        let Warned {
            value: descriptor,
            warnings,
        } = parsed;
        let identity = resolver::resolve(&input, descriptor, &data)?;
        let symbol = resolver::canonical_symbol(&identity, &data);

        Ok(Self {
            identity,
            symbol,
            data,
            warnings,
            cache: Cache::default(),
        })
    }

    fn from_identity(identity: Identity, data: &Arc<ReferenceData>) -> Self {
        Self {
            symbol: resolver::canonical_symbol(&identity, data),
            identity,
            data: Arc::clone(data),
            warnings: Vec::new(),
            cache: Cache::default(),
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject {
            identity: &self.identity,
            symbol: &self.symbol,
            data: &self.data,
        }
    }

    /// The canonical symbol, such as `e-`, `Fe`, `D`, `He-4 1+`, or `p+`.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[inline]
    pub fn reference_data(&self) -> &Arc<ReferenceData> {
        &self.data
    }

    /// Warnings raised while interpreting the constructor arguments.
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[inline]
    pub fn element(&self) -> Option<Element> {
        self.identity.element()
    }

    /// The isotope symbol (`Fe-56`, `D`), if a mass number is known.
    #[inline]
    pub fn isotope(&self) -> Option<String> {
        self.identity.isotope_symbol()
    }

    /// The ion symbol, if the charge of an element or isotope is known.
    pub fn ionic_symbol(&self) -> Option<String> {
        match self.identity {
            Identity::Ion { .. } => Some(self.symbol.clone()),
            _ => None,
        }
    }

    pub fn element_name(&self) -> Result<String, Error> {
        self.subject().element_name()
    }

    pub fn isotope_name(&self) -> Result<String, Error> {
        self.subject().isotope_name()
    }

    /// Spectroscopic notation, `Fe-56 XVIII` for `Fe-56 17+`.
    pub fn roman_symbol(&self) -> Result<Option<String>, Error> {
        self.subject().roman_symbol()
    }

    pub fn atomic_number(&self) -> Result<u8, Error> {
        self.subject().atomic_number()
    }

    pub fn mass_number(&self) -> Result<u16, Error> {
        self.subject().mass_number()
    }

    pub fn neutron_number(&self) -> Result<u16, Error> {
        self.subject().neutron_number()
    }

    pub fn baryon_number(&self) -> Result<i32, Error> {
        self.subject().baryon_number()
    }

    pub fn lepton_number(&self) -> Result<i32, Error> {
        self.subject().lepton_number()
    }

    /// Net charge in units of the elementary charge.
    pub fn integer_charge(&self) -> Result<i32, Error> {
        self.subject().integer_charge()
    }

    pub fn charge(&self) -> Result<Quantity, Error> {
        self.subject().charge()
    }

    pub fn spin(&self) -> Result<f64, Error> {
        self.subject().spin()
    }

    pub fn periodic_table(&self) -> Result<PeriodicTable, Error> {
        self.subject().periodic_table()
    }

    pub fn mass(&self) -> Result<Quantity, Error> {
        self.cache
            .mass
            .get_or_init(|| self.subject().mass())
            .clone()
    }

    pub fn nuclide_mass(&self) -> Result<Quantity, Error> {
        self.cache
            .nuclide_mass
            .get_or_init(|| self.subject().nuclide_mass())
            .clone()
    }

    pub fn mass_energy(&self) -> Result<Quantity, Error> {
        self.subject().mass_energy()
    }

    pub fn standard_atomic_weight(&self) -> Result<Quantity, Error> {
        self.cache
            .standard_atomic_weight
            .get_or_init(|| self.subject().standard_atomic_weight())
            .clone()
    }

    pub fn binding_energy(&self) -> Result<Quantity, Error> {
        self.cache
            .binding_energy
            .get_or_init(|| self.subject().binding_energy())
            .clone()
    }

    /// The tabulated half-life.
    ///
    /// A value known only as a bound is returned verbatim together with a
    /// [`Warning::MissingAtomicData`]. The value is cached; the warning is
    /// attached on every call.
    pub fn half_life(&self) -> Result<Warned<HalfLife>, Error> {
        let half_life = self
            .cache
            .half_life
            .get_or_init(|| self.subject().half_life())
            .clone()?;
        Ok(match &half_life {
            HalfLife::Seconds(_) => Warned::clean(half_life),
            HalfLife::Bound(text) => {
                let warning = Warning::MissingAtomicData(format!(
                    "the half-life of {} is only known as '{}'",
                    self.symbol, text
                ));
                Warned::with_warning(half_life, warning)
            }
        })
    }

    /// Natural abundance of this isotope, as a dimensionless fraction.
    pub fn isotopic_abundance(&self) -> Result<Quantity, Error> {
        self.cache
            .isotopic_abundance
            .get_or_init(|| self.subject().isotopic_abundance())
            .clone()
    }

    /// `Some(true)` for an infinite tabulated half-life, `None` when the
    /// half-life is unknown or only a bound.
    pub fn is_stable(&self) -> Option<bool> {
        self.half_life().ok().and_then(|half_life| half_life.into_value().is_stable())
    }

    pub fn categories(&self) -> &CategorySet {
        self.cache
            .categories
            .get_or_init(|| self.subject().categories())
    }

    /// Tests this particle against a category query.
    ///
    /// Unknown tags, empty queries, and queries that both require and
    /// exclude a tag are errors for every particle.
    pub fn is_category(&self, query: &CategoryQuery) -> Result<bool, Error> {
        let query = query.validate()?;
        Ok(query.matches(self.categories()))
    }

    /// True for elements and isotopes with a nonzero known charge.
    #[inline]
    pub fn is_ion(&self) -> bool {
        self.subject().is_ion()
    }

    #[inline]
    pub fn is_electron(&self) -> bool {
        self.symbol == "e-"
    }

    /// Removes `n` electrons.
    pub fn ionize(&self, n: i32) -> Result<Particle, Error> {
        let (element, mass_number, charge) = self.ionization_state(n, "ionize")?;
        let z = i32::from(element.atomic_number());
        let target = charge.checked_add(n).filter(|target| *target <= z).ok_or_else(|| {
            Error::invalid_ion(
                &self.symbol,
                format!("cannot lose {n} more electron(s) with atomic number {z}"),
            )
        })?;
        Ok(self.with_charge(element, mass_number, target))
    }

    /// Adds `n` electrons. Charges stay within `0..=Z`.
    pub fn recombine(&self, n: i32) -> Result<Particle, Error> {
        let (element, mass_number, charge) = self.ionization_state(n, "recombine")?;
        let target = charge.checked_sub(n).filter(|target| *target >= 0).ok_or_else(|| {
            Error::invalid_ion(
                &self.symbol,
                format!("cannot recombine {n} electron(s) from charge {charge}"),
            )
        })?;
        Ok(self.with_charge(element, mass_number, target))
    }

    fn ionization_state(
        &self,
        n: i32,
        operation: &str,
    ) -> Result<(Element, Option<u16>, i32), Error> {
        let element = self.identity.element().ok_or_else(|| {
            Error::invalid_element(
                &self.symbol,
                format!("is not an element, so it cannot {operation}"),
            )
        })?;
        if n <= 0 {
            return Err(Error::InvalidArgument(format!(
                "{operation} count must be a positive integer, got {n}"
            )));
        }
        let charge = self.identity.ion_charge().ok_or_else(|| {
            Error::charge(&self.symbol, format!("{operation} needs a known charge"))
        })?;
        Ok((element, self.identity.mass_number(), charge))
    }

    fn with_charge(&self, element: Element, mass_number: Option<u16>, charge: i32) -> Particle {
        let identity = Identity::Ion {
            element,
            mass_number,
            charge,
        };
        Particle::from_identity(identity, &self.data)
    }

    /// The antiparticle of a catalog particle.
    pub fn antiparticle(&self) -> Result<Particle, Error> {
        let record = self.subject().catalog().ok_or_else(|| {
            Error::Atomic(format!("the antiparticle of '{}' is not defined", self.symbol))
        })?;
        Particle::with_data(
            record.antiparticle.as_str(),
            ParticleOptions::default(),
            Arc::clone(&self.data),
        )
    }

    /// Compares against a symbol by resolving it first, so `"proton"` is
    /// the same as `p+`.
    pub fn is_same_as(&self, other: &str) -> Result<bool, Error> {
        let resolved = Particle::with_data(other, ParticleOptions::default(), Arc::clone(&self.data))
            .map_err(|e| {
                Error::Atomic(format!("cannot compare {} with '{other}': {e}", self.symbol))
            })?;
        Ok(*self == resolved)
    }
}

impl PartialEq for Particle {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Particle {}

impl Hash for Particle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl fmt::Debug for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({:?})", self.symbol)
    }
}

impl FromStr for Particle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Particle::new(s)
    }
}

impl Not for &Particle {
    type Output = Result<Particle, Error>;

    fn not(self) -> Self::Output {
        self.antiparticle()
    }
}

impl Not for Particle {
    type Output = Result<Particle, Error>;

    fn not(self) -> Self::Output {
        self.antiparticle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::Category;
    use crate::model::constants::{ELECTRON_MASS, NEUTRON_MASS, PROTON_MASS};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn approx_eq(a: f64, b: f64, rtol: f64) -> bool {
        (a - b).abs() <= rtol * a.abs().max(b.abs())
    }

    fn p(symbol: &str) -> Particle {
        Particle::new(symbol).unwrap()
    }

    #[test]
    fn proton_is_a_hydrogen_ion() {
        let proton = p("p+");
        assert_eq!(proton.element(), Some(Element::H));
        assert_eq!(proton.isotope().as_deref(), Some("H-1"));
        assert_eq!(proton.ionic_symbol().as_deref(), Some("p+"));
        assert_eq!(proton.integer_charge(), Ok(1));
        assert!(approx_eq(proton.mass().unwrap().si_value(), PROTON_MASS, 1e-12));
        assert!(proton.is_category(&CategoryQuery::new().require(&["ion", "fermion"])).unwrap());
        assert!(proton.is_ion());
    }

    #[test]
    fn proton_spellings_agree() {
        for spelling in ["p", "p+", "proton", "H-1+", "H-1 1+", "H-1 +1", "hydrogen-1+", "H-1 II"] {
            assert_eq!(p(spelling).symbol(), "p+", "{spelling}");
        }
        assert_eq!(p("H 1+").symbol(), "H 1+");
    }

    #[test]
    fn neutron_has_no_element() {
        let neutron = p("n");
        assert!(matches!(neutron.atomic_number(), Err(Error::InvalidElement { .. })));
        assert!(approx_eq(neutron.mass().unwrap().si_value(), NEUTRON_MASS, 1e-12));
        assert_eq!(neutron.baryon_number(), Ok(1));
        assert_eq!(neutron.element(), None);
        assert_eq!(neutron.isotope(), None);
        assert_eq!(neutron.ionic_symbol(), None);
        assert_eq!(p("neutron"), neutron);
    }

    #[test]
    fn keywords_narrow_an_element() {
        let iron = Particle::with_options("Fe", ParticleOptions::new().charge(17).mass_number(56)).unwrap();
        assert_eq!(iron.symbol(), "Fe-56 17+");
        assert_eq!(iron.atomic_number(), Ok(26));
        assert_eq!(iron.mass_number(), Ok(56));
        assert_eq!(iron.neutron_number(), Ok(30));
        assert_eq!(iron.roman_symbol(), Ok(Some("Fe-56 XVIII".to_string())));
        assert!(iron.warnings().is_empty());
    }

    #[test]
    fn unknown_isotopes_are_invalid_particles() {
        let result = Particle::with_options("H", ParticleOptions::new().mass_number(99));
        assert!(matches!(result, Err(Error::InvalidParticle { .. })));
    }

    #[test]
    fn standard_atomic_weight_needs_a_bare_element() {
        assert!(p("Fe").standard_atomic_weight().is_ok());
        assert!(matches!(
            p("Fe-56").standard_atomic_weight(),
            Err(Error::InvalidElement { .. })
        ));
    }

    #[test]
    fn contradictory_queries_fail_for_every_particle() {
        let query = CategoryQuery::new().require(&["charged"]).exclude(&["charged"]);
        for symbol in ["e-", "Fe", "He-4 2+", "n"] {
            assert!(matches!(p(symbol).is_category(&query), Err(Error::Atomic(_))));
        }
        assert!(matches!(
            p("e-").is_category(&CategoryQuery::new().require(&["not a category"])),
            Err(Error::Atomic(_))
        ));
    }

    #[test]
    fn inapplicable_attributes_fail_the_same_way_each_time() {
        let iron = p("Fe");
        for _ in 0..2 {
            assert!(matches!(iron.mass_number(), Err(Error::InvalidIsotope { .. })));
            assert!(matches!(iron.integer_charge(), Err(Error::Charge { .. })));
            assert!(matches!(iron.nuclide_mass(), Err(Error::InvalidIsotope { .. })));
            assert!(matches!(iron.binding_energy(), Err(Error::InvalidIsotope { .. })));
        }
        let electron = p("e-");
        for _ in 0..2 {
            assert!(matches!(electron.standard_atomic_weight(), Err(Error::InvalidElement { .. })));
            assert!(matches!(electron.periodic_table(), Err(Error::InvalidElement { .. })));
        }
    }

    #[test]
    fn textual_half_life_warns_on_every_access() {
        let h5 = p("H-5");
        for _ in 0..2 {
            let half_life = h5.half_life().unwrap();
            assert!(matches!(half_life.value, HalfLife::Bound(ref text) if text.contains("9.1e-22")));
            assert!(matches!(half_life.warnings[..], [Warning::MissingAtomicData(_)]));
        }
        let neutron = p("n").half_life().unwrap();
        assert!(!neutron.has_warnings());
        assert_eq!(neutron.value, HalfLife::Seconds(611.0));
        assert!(matches!(p("Fe").half_life(), Err(Error::InvalidIsotope { .. })));
        assert!(matches!(p("Cn-276").half_life(), Err(Error::MissingAtomicData { .. })));
    }

    #[test]
    fn aliases_resolve_to_canonical_symbols() {
        assert_eq!(p("alpha").symbol(), "He-4 2+");
        assert_eq!(p("deuteron").symbol(), "D 1+");
        assert_eq!(p("triton").symbol(), "T 1+");
        assert_eq!(p("deuterium").symbol(), "D");
        assert_eq!(p("tritium").symbol(), "T");
        assert_eq!(p("positron").symbol(), "e+");
        assert_eq!(p("antiproton").symbol(), "p-");
        assert_eq!(p("He-4 III").symbol(), "He-4 2+");
        assert_eq!(p("H-").symbol(), "H 1-");
    }

    #[test]
    fn atomic_numbers_build_elements() {
        assert_eq!(p_from(26).symbol(), "Fe");
        assert!(matches!(Particle::new(0u8), Err(Error::InvalidParticle { .. })));
        assert!(matches!(Particle::new(119u8), Err(Error::InvalidParticle { .. })));
    }

    fn p_from(z: u8) -> Particle {
        Particle::new(z).unwrap()
    }

    #[test]
    fn redundant_keywords_warn_and_conflicting_ones_fail() {
        let alpha = Particle::with_options("alpha", ParticleOptions::new().mass_number(4)).unwrap();
        assert_eq!(alpha.symbol(), "He-4 2+");
        assert!(matches!(alpha.warnings(), [Warning::Atomic(_)]));

        let conflict = Particle::with_options("Fe-56", ParticleOptions::new().mass_number(57));
        assert!(matches!(conflict, Err(Error::InvalidParticle { .. })));
        let charged = Particle::with_options("e-", ParticleOptions::new().charge(1));
        assert!(matches!(charged, Err(Error::InvalidParticle { .. })));
    }

    #[test]
    fn particle_from_particle_is_equal_but_distinct() {
        let original = p("Fe-56 3+");
        let copy = Particle::new(&original).unwrap();
        assert_eq!(copy, original);
        assert!(!std::ptr::eq(&copy, &original));

        let narrowed = Particle::with_options(&p("Fe"), ParticleOptions::new().mass_number(56)).unwrap();
        assert_eq!(narrowed.symbol(), "Fe-56");
    }

    #[test]
    fn particles_work_as_map_keys() {
        let mut map = HashMap::new();
        map.insert(p("p+"), "proton");
        assert_eq!(map.get(&p("proton")), Some(&"proton"));
        assert_eq!(map.get(&p("H-1 1+")), Some(&"proton"));
    }

    #[test]
    fn ionize_and_recombine_move_between_charge_states() {
        let iron = p("Fe-56 0+");
        assert!(!iron.is_ion());
        let ionized = iron.ionize(3).unwrap();
        assert_eq!(ionized.symbol(), "Fe-56 3+");
        assert_eq!(ionized.recombine(3).unwrap(), iron);
        assert_eq!(p("He 1+").ionize(1).unwrap().symbol(), "He 2+");
        assert_eq!(p("H-1 0+").ionize(1).unwrap().symbol(), "p+");

        assert!(matches!(p("He 2+").ionize(1), Err(Error::InvalidIon { .. })));
        assert!(matches!(p("He 0+").recombine(1), Err(Error::InvalidIon { .. })));
        assert!(matches!(p("He").ionize(1), Err(Error::Charge { .. })));
        assert!(matches!(p("e-").ionize(1), Err(Error::InvalidElement { .. })));
        assert!(matches!(p("He 0+").ionize(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(p("He 1+").recombine(-1), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn charge_shifts_that_overflow_are_invalid_ions() {
        assert!(matches!(p("Fe 6+").ionize(i32::MAX), Err(Error::InvalidIon { .. })));
        assert!(matches!(p("H 5-").recombine(i32::MAX), Err(Error::InvalidIon { .. })));
        assert!(matches!(p("Fe 6+").recombine(i32::MAX), Err(Error::InvalidIon { .. })));
        let deep = Particle::with_options("H", ParticleOptions::new().charge(-2)).unwrap();
        assert!(matches!(deep.recombine(i32::MAX), Err(Error::InvalidIon { .. })));
        assert_eq!(p("H 5-").recombine(1).unwrap().symbol(), "H 6-");
    }

    #[test]
    fn extreme_negative_charges_round_trip() {
        let anion = Particle::with_options("H", ParticleOptions::new().charge(i32::MIN)).unwrap();
        assert_eq!(anion.symbol(), "H 2147483648-");
        assert_eq!(anion.integer_charge(), Ok(i32::MIN));
        assert_eq!(p(anion.symbol()), anion);
        assert_eq!(anion.ionize(i32::MAX).unwrap().symbol(), "H 1-");
        assert!(matches!(anion.recombine(1), Err(Error::InvalidIon { .. })));
    }

    #[test]
    fn abundance_and_stability_come_from_the_isotope_table() {
        let he4 = p("He-4");
        for _ in 0..2 {
            assert_eq!(he4.isotopic_abundance(), Ok(Quantity::dimensionless(0.99999866)));
        }
        assert_eq!(p("alpha").isotopic_abundance(), he4.isotopic_abundance());
        assert!(matches!(p("He").isotopic_abundance(), Err(Error::InvalidIsotope { .. })));
        assert!(matches!(p("e-").isotopic_abundance(), Err(Error::InvalidIsotope { .. })));
        assert!(matches!(p("He-6").isotopic_abundance(), Err(Error::MissingAtomicData { .. })));

        assert_eq!(he4.is_stable(), Some(true));
        assert_eq!(p("He-6").is_stable(), Some(false));
        assert_eq!(p("n").is_stable(), Some(false));
        assert_eq!(p("H-5").is_stable(), None);
        assert_eq!(p("Fe").is_stable(), None);
    }

    #[test]
    fn antiparticles_are_catalog_only() {
        assert_eq!((!&p("e-")).unwrap(), p("e+"));
        assert_eq!(p("p+").antiparticle().unwrap(), p("p-"));
        assert!(matches!(!p("Fe"), Err(Error::Atomic(_))));
        assert!(matches!(p("He-4 2+").antiparticle(), Err(Error::Atomic(_))));
    }

    #[test]
    fn is_same_as_resolves_strings() {
        assert_eq!(p("p+").is_same_as("proton"), Ok(true));
        assert_eq!(p("p+").is_same_as("e-"), Ok(false));
        assert!(matches!(p("p+").is_same_as("not a particle"), Err(Error::Atomic(_))));
    }

    #[test]
    fn names_and_periodic_placement() {
        let gold = p("Au-197");
        assert_eq!(gold.element_name().as_deref(), Ok("gold"));
        assert_eq!(gold.isotope_name().as_deref(), Ok("gold-197"));
        let table = gold.periodic_table().unwrap();
        assert_eq!((table.group, table.period, table.block.as_str()), (11, 6, "d"));
        assert_eq!(table.category, Category::TransitionMetal);
        assert!(p("e-").is_electron());
        assert!(!p("e+").is_electron());
    }

    #[test]
    fn mass_energy_uses_the_nuclide_mass() {
        let neutral = p("He-4").mass_energy().unwrap();
        let nucleus = p("alpha").mass_energy().unwrap();
        assert_eq!(neutral, nucleus);
        let electron = p("e-").mass_energy().unwrap().si_value();
        assert!(approx_eq(electron, 8.187_105_776_8e-14, 1e-9));
    }

    #[test]
    fn charge_is_reported_in_coulombs() {
        let charge = p("e-").charge().unwrap();
        assert!(charge.is_close(&Quantity::coulombs(-1.602_176_634e-19), 1e-12));
        let ion_mass = p("He-4 1+").mass().unwrap().si_value();
        let atom_mass = p("He-4").mass().unwrap().si_value();
        assert!(approx_eq(atom_mass - ion_mass, ELECTRON_MASS, 1e-6));
    }

    #[test]
    fn lots_of_signs_warn_but_resolve() {
        let hydrogen = p("H----");
        assert_eq!(hydrogen.integer_charge(), Ok(-4));
        assert!(!hydrogen.warnings().is_empty());
    }

    #[test]
    fn custom_reference_data_is_injected() {
        let text = r#"
            [[element]]
            symbol = "He"
            name = "helium"
            atomic_number = 2
            standard_atomic_weight = 4.0
            group = 18
            period = 1
            block = "s"
            category = "noble gas"
        "#;
        let data = crate::data::load_reference_data(Some(text)).unwrap();
        let helium = Particle::with_data("He", ParticleOptions::default(), Arc::clone(&data)).unwrap();
        assert!(approx_eq(
            helium.mass().unwrap().si_value(),
            4.0 * crate::model::constants::ATOMIC_MASS_UNIT,
            1e-12
        ));
        assert!(matches!(
            Particle::with_data("Fe", ParticleOptions::default(), data),
            Err(Error::InvalidParticle { .. })
        ));
    }

    fn catalog_symbols() -> Vec<String> {
        default_reference_data()
            .particles()
            .map(|record| record.symbol.clone())
            .collect()
    }

    fn isotope_keys() -> Vec<(Element, u16)> {
        let mut keys: Vec<_> = default_reference_data()
            .isotopes()
            .map(|(element, record)| (element, record.mass_number))
            .collect();
        keys.sort();
        keys
    }

    proptest! {
        #[test]
        fn canonical_symbols_round_trip(
            index in 0usize..1000,
            charge in prop_oneof![-3i32..=3, i32::MIN..=-4, Just(i32::MIN)],
        ) {
            let keys = isotope_keys();
            let (element, mass_number) = keys[index % keys.len()];
            let z = i32::from(element.atomic_number());
            let charge = charge.min(z);
            for options in [
                ParticleOptions::new().mass_number(mass_number),
                ParticleOptions::new().mass_number(mass_number).charge(charge),
                ParticleOptions::new().charge(charge),
            ] {
                let particle = Particle::with_options(element.symbol(), options).unwrap();
                let reparsed = Particle::new(particle.symbol()).unwrap();
                prop_assert_eq!(reparsed.identity(), particle.identity());
                prop_assert_eq!(Particle::new(&particle).unwrap(), particle);
            }
        }

        #[test]
        fn catalog_symbols_round_trip(index in 0usize..100) {
            let symbols = catalog_symbols();
            let particle = p(&symbols[index % symbols.len()]);
            let reparsed = Particle::new(particle.symbol()).unwrap();
            prop_assert_eq!(reparsed.symbol(), particle.symbol());
            prop_assert_eq!(reparsed.identity(), particle.identity());
            prop_assert_eq!(Particle::new(&particle).unwrap(), particle);
        }

        #[test]
        fn antiparticle_is_an_involution(index in 0usize..100) {
            let symbols = catalog_symbols();
            let particle = p(&symbols[index % symbols.len()]);
            let anti = particle.antiparticle().unwrap();
            prop_assert_eq!(&anti.antiparticle().unwrap(), &particle);
            prop_assert_eq!(anti.integer_charge().unwrap(), -particle.integer_charge().unwrap());
            match (particle.mass(), anti.mass()) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                (a, b) => prop_assert!(false, "mass mismatch {:?} {:?}", a, b),
            }
        }

        #[test]
        fn nuclide_mass_is_the_fully_stripped_ion(index in 0usize..1000) {
            let keys = isotope_keys();
            let (element, mass_number) = keys[index % keys.len()];
            let options = ParticleOptions::new().mass_number(mass_number);
            let isotope = Particle::with_options(element.symbol(), options).unwrap();
            let stripped = fully_stripped(&isotope);
            prop_assert_eq!(isotope.nuclide_mass(), stripped.mass());
        }

        #[test]
        fn ionize_then_recombine_round_trips(z in 1u8..=30, start in 0i32..30, n in 0i32..30) {
            let element = Element::from_atomic_number(z).unwrap();
            let zi = i32::from(z);
            let start = start % zi;
            let n = 1 + n % (zi - start);
            let ion = Particle::with_options(element.symbol(), ParticleOptions::new().charge(start)).unwrap();
            let back = ion.ionize(n).unwrap().recombine(n).unwrap();
            prop_assert_eq!(back, ion);
        }
    }

    fn fully_stripped(isotope: &Particle) -> Particle {
        let z = i32::from(isotope.element().unwrap().atomic_number());
        Particle::with_options(isotope, ParticleOptions::new().charge(z)).unwrap()
    }
}
