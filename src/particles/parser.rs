//! Symbol parsing: raw user input to a particle [`Descriptor`].
//!
//! Accepted forms, tried in order:
//!
//! 1. catalog symbols and aliases (`e-`, `electron`, `NEUTRON`, `p`)
//! 2. atomic aliases (`alpha`, `deuteron`, `triton`, `deuterium`, `tritium`)
//! 3. nuclear notation: an element symbol or name, an optional `-A` mass
//!    number, and optional charge information (`Fe-56 17+`, `He-4++`,
//!    `H-1 +1`, `He-4 III`, `H-`)

use tracing::trace;

use super::config::ParticleOptions;
use super::error::Error;
use super::roman;
use super::warning::{Warned, Warning};
use crate::data::{ReferenceData, parse_nucleus};
use crate::model::identity::Identity;
use crate::model::types::Element;

/// Longest run of `+`/`-` characters accepted without a warning.
const MAX_SIGN_RUN: usize = 6;

/// Most negative charge accepted without a warning.
const MIN_LIKELY_CHARGE: i32 = -3;

/// What the parser recognized, before any check against isotope tables or
/// atomic numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// A catalog entry without nuclear structure.
    Subatomic { symbol: String },
    /// An element, possibly narrowed by mass number and charge.
    Nuclear {
        element: Element,
        mass_number: Option<u16>,
        charge: Option<i32>,
    },
}

impl Descriptor {
    /// Recovers the descriptor of an already resolved particle without
    /// going back through its string form.
    pub fn from_identity(identity: &Identity) -> Self {
        match identity {
            Identity::Subatomic { symbol } => Descriptor::Subatomic {
                symbol: symbol.clone(),
            },
            Identity::Element(element) => Descriptor::Nuclear {
                element: *element,
                mass_number: None,
                charge: None,
            },
            Identity::Isotope {
                element,
                mass_number,
            } => Descriptor::Nuclear {
                element: *element,
                mass_number: Some(*mass_number),
                charge: None,
            },
            Identity::Ion {
                element,
                mass_number,
                charge,
            } => Descriptor::Nuclear {
                element: *element,
                mass_number: *mass_number,
                charge: Some(*charge),
            },
        }
    }
}

fn atomic_alias(input: &str) -> Option<&'static str> {
    match input.to_lowercase().as_str() {
        "alpha" => Some("He-4 2+"),
        "deuteron" => Some("D 1+"),
        "triton" => Some("T 1+"),
        "deuterium" => Some("D"),
        "tritium" => Some("T"),
        _ => None,
    }
}

/// Parses `input` and merges the explicit `options` into the result.
pub fn parse(
    input: &str,
    options: &ParticleOptions,
    data: &ReferenceData,
) -> Result<Warned<Descriptor>, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_particle(input, "empty particle symbol"));
    }

    if let Some(symbol) = data.dealias(trimmed) {
        trace!(input, symbol, "expanded particle alias");
        let record = data
            .particle(symbol)
            .ok_or_else(|| Error::invalid_particle(input, "alias points outside the catalog"))?;
        let descriptor = match record.nucleus.as_deref().and_then(parse_nucleus) {
            Some((element, mass_number)) => Descriptor::Nuclear {
                element,
                mass_number: Some(mass_number),
                charge: Some(record.charge),
            },
            None => Descriptor::Subatomic {
                symbol: record.symbol.clone(),
            },
        };
        return merge_options(input, Warned::clean(descriptor), options);
    }

    let expanded = match atomic_alias(trimmed) {
        Some(alias) => {
            trace!(input, alias, "expanded atomic alias");
            alias
        }
        None => trimmed,
    };

    let parsed = parse_nuclear(input, expanded, data)?;
    merge_options(input, parsed, options)
}

/// Applies explicit options to a descriptor, rejecting conflicts and
/// warning on redundant repetition.
pub fn merge_options(
    input: &str,
    parsed: Warned<Descriptor>,
    options: &ParticleOptions,
) -> Result<Warned<Descriptor>, Error> {
    let Warned {
        value: descriptor,
        mut warnings,
    } = parsed;

    let descriptor = match descriptor {
        Descriptor::Subatomic { symbol } => {
            if !options.is_empty() {
                return Err(Error::invalid_particle(
                    input,
                    "mass number and charge only apply to elements, isotopes, and ions",
                ));
            }
            Descriptor::Subatomic { symbol }
        }
        Descriptor::Nuclear {
            element,
            mass_number,
            charge,
        } => {
            let mass_number = merge_field(
                input,
                "mass number",
                mass_number,
                options.mass_number,
                &mut warnings,
            )?;
            let charge = merge_field(input, "charge", charge, options.charge, &mut warnings)?;
            if let Some(q) = charge.filter(|q| *q < MIN_LIKELY_CHARGE) {
                warnings.push(Warning::Atomic(format!(
                    "particle '{input}' has an integer charge of {q}, which is unlikely to occur in nature"
                )));
            }
            Descriptor::Nuclear {
                element,
                mass_number,
                charge,
            }
        }
    };

    Ok(Warned {
        value: descriptor,
        warnings,
    })
}

fn merge_field<T: PartialEq + Copy + std::fmt::Display>(
    input: &str,
    what: &str,
    embedded: Option<T>,
    explicit: Option<T>,
    warnings: &mut Vec<Warning>,
) -> Result<Option<T>, Error> {
    match (embedded, explicit) {
        (Some(a), Some(b)) if a != b => Err(Error::invalid_particle(
            input,
            format!("{what} {b} conflicts with the {what} {a} given in the symbol"),
        )),
        (Some(a), Some(_)) => {
            warnings.push(Warning::Atomic(format!(
                "{what} {a} of '{input}' is given redundantly"
            )));
            Ok(Some(a))
        }
        (a, b) => Ok(a.or(b)),
    }
}

fn parse_nuclear(
    input: &str,
    text: &str,
    data: &ReferenceData,
) -> Result<Warned<Descriptor>, Error> {
    let mut warnings = Vec::new();
    let (nuclide, charge) = extract_charge(input, text, &mut warnings)?;
    let (element_part, mass_number) = extract_mass_number(input, nuclide)?;

    let (element, implied_mass) = match element_part {
        "D" => (Element::H, Some(2)),
        "T" => (Element::H, Some(3)),
        other => {
            let element = other
                .parse::<Element>()
                .ok()
                .or_else(|| data.element_by_name(other))
                .ok_or_else(|| Error::invalid_particle(input, "unrecognized particle symbol"))?;
            (element, None)
        }
    };

    let mass_number = match (implied_mass, mass_number) {
        (Some(_), Some(_)) => {
            return Err(Error::invalid_particle(
                input,
                "deuterium and tritium already carry a mass number",
            ));
        }
        (a, b) => a.or(b),
    };

    Ok(Warned {
        value: Descriptor::Nuclear {
            element,
            mass_number,
            charge,
        },
        warnings,
    })
}

fn extract_mass_number<'a>(
    input: &str,
    nuclide: &'a str,
) -> Result<(&'a str, Option<u16>), Error> {
    match nuclide.split_once('-') {
        Some((element, mass)) => {
            let mass_number = mass
                .parse::<u16>()
                .ok()
                .filter(|a| *a > 0)
                .ok_or_else(|| {
                    Error::invalid_particle(input, format!("invalid mass number '{mass}'"))
                })?;
            Ok((element, Some(mass_number)))
        }
        None => Ok((nuclide, None)),
    }
}

/// Splits the charge information off a nuclear symbol.
fn extract_charge<'a>(
    input: &str,
    text: &'a str,
    warnings: &mut Vec<Warning>,
) -> Result<(&'a str, Option<i32>), Error> {
    let mut parts = text.split_whitespace();
    let nuclide = parts.next().unwrap_or_default();

    if let Some(charge_info) = parts.next() {
        if parts.next().is_some() {
            return Err(Error::invalid_particle(input, "too many space-separated fields"));
        }
        let charge = parse_charge_field(input, charge_info, warnings)?;
        return Ok((nuclide, Some(charge)));
    }

    let run_start = nuclide
        .char_indices()
        .rev()
        .take_while(|(_, c)| *c == '+' || *c == '-')
        .last()
        .map(|(i, _)| i);

    match run_start {
        Some(0) => Err(Error::invalid_particle(input, "missing element symbol")),
        Some(start) => {
            let charge = sign_run_charge(input, &nuclide[start..], warnings);
            Ok((&nuclide[..start], Some(charge)))
        }
        None => Ok((nuclide, None)),
    }
}

/// Charge given as a separate field: `17+`, `+17`, `1-`, `-1`, `++`, or a
/// roman numeral spectroscopic state.
fn parse_charge_field(
    input: &str,
    field: &str,
    warnings: &mut Vec<Warning>,
) -> Result<i32, Error> {
    if let Some(value) = roman::from_roman(field) {
        return i32::try_from(value)
            .map(|v| v - 1)
            .map_err(|_| Error::invalid_particle(input, "ionization state out of range"));
    }

    if field.chars().all(|c| c == '+' || c == '-') {
        return Ok(sign_run_charge(input, field, warnings));
    }

    let invalid =
        || Error::invalid_particle(input, format!("invalid charge information '{field}'"));

    let positive = field.strip_suffix('+').or_else(|| field.strip_prefix('+'));
    let negative = field.strip_suffix('-').or_else(|| field.strip_prefix('-'));
    let (sign, digits) = if let Some(d) = positive {
        (1, d)
    } else if let Some(d) = negative {
        (-1, d)
    } else {
        return Err(invalid());
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let magnitude: i64 = digits.parse().map_err(|_| invalid())?;
    i32::try_from(sign * magnitude).map_err(|_| invalid())
}

/// Net charge of a run of `+`/`-` characters, warning when the run is
/// unusually long or mixes signs.
fn sign_run_charge(input: &str, run: &str, warnings: &mut Vec<Warning>) -> i32 {
    let plus = run.chars().filter(|c| *c == '+').count();
    let minus = run.len() - plus;

    if plus > 0 && minus > 0 {
        warnings.push(Warning::Atomic(format!(
            "charge notation '{run}' in '{input}' mixes signs; using the net charge"
        )));
    }
    if run.len() > MAX_SIGN_RUN {
        warnings.push(Warning::Atomic(format!(
            "charge notation '{run}' in '{input}' is unusually long"
        )));
    }

    plus as i32 - minus as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_reference_data;

    fn nuclear(element: Element, mass_number: Option<u16>, charge: Option<i32>) -> Descriptor {
        Descriptor::Nuclear {
            element,
            mass_number,
            charge,
        }
    }

    fn parse_plain(input: &str) -> Result<Warned<Descriptor>, Error> {
        parse(input, &ParticleOptions::default(), &default_reference_data())
    }

    fn descriptor(input: &str) -> Descriptor {
        parse_plain(input).unwrap().value
    }

    #[test]
    fn catalog_aliases() {
        let electron = Descriptor::Subatomic {
            symbol: "e-".to_string(),
        };
        assert_eq!(descriptor("electron"), electron);
        assert_eq!(descriptor("e"), electron);
        assert_eq!(
            descriptor("NEUTRON"),
            Descriptor::Subatomic {
                symbol: "n".to_string()
            }
        );
    }

    #[test]
    fn proton_aliases_are_the_hydrogen_nucleus() {
        let proton = nuclear(Element::H, Some(1), Some(1));
        for input in ["p+", "p", "proton", "H-1+", "H-1 1+", "H-1 +1"] {
            assert_eq!(descriptor(input), proton, "{input}");
        }
    }

    #[test]
    fn element_names_are_case_insensitive() {
        assert_eq!(descriptor("hYdRoGeN"), nuclear(Element::H, None, None));
        assert_eq!(descriptor("Hydrogen-2"), nuclear(Element::H, Some(2), None));
        assert_eq!(descriptor("iron-56"), nuclear(Element::Fe, Some(56), None));
    }

    #[test]
    fn alpha_notations_agree() {
        let alpha = nuclear(Element::He, Some(4), Some(2));
        for input in ["alpha", "He-4++", "He-4 2+", "He-4 +2", "He-4 III", "He-4 ++"] {
            assert_eq!(descriptor(input), alpha, "{input}");
        }
    }

    #[test]
    fn deuterium_and_tritium() {
        assert_eq!(descriptor("D"), nuclear(Element::H, Some(2), None));
        assert_eq!(descriptor("deuterium"), nuclear(Element::H, Some(2), None));
        assert_eq!(descriptor("T 1+"), nuclear(Element::H, Some(3), Some(1)));
        assert!(parse_plain("D-2").is_err());
    }

    #[test]
    fn trailing_sign_runs() {
        assert_eq!(descriptor("H-"), nuclear(Element::H, None, Some(-1)));
        assert_eq!(descriptor("H-1-"), nuclear(Element::H, Some(1), Some(-1)));
        assert_eq!(descriptor("Pb-209+++"), nuclear(Element::Pb, Some(209), Some(3)));
    }

    #[test]
    fn long_and_unlikely_charges_warn() {
        let parsed = parse_plain("H----").unwrap();
        assert_eq!(parsed.value, nuclear(Element::H, None, Some(-4)));
        assert!(parsed.warnings.iter().any(|w| matches!(w, Warning::Atomic(_))));

        let parsed = parse_plain("Fe+++++++").unwrap();
        assert_eq!(parsed.value, nuclear(Element::Fe, None, Some(7)));
        assert!(parsed.has_warnings());
    }

    #[test]
    fn mixed_signs_warn_and_use_net_charge() {
        let parsed = parse_plain("Fe ++-").unwrap();
        assert_eq!(parsed.value, nuclear(Element::Fe, None, Some(1)));
        assert!(parsed.has_warnings());
    }

    #[test]
    fn charge_fields_span_the_full_integer_range() {
        let parsed = parse_plain("H 2147483648-").unwrap();
        assert_eq!(parsed.value, nuclear(Element::H, None, Some(i32::MIN)));
        assert!(matches!(
            parse_plain("H 2147483648+"),
            Err(Error::InvalidParticle { .. })
        ));
        assert!(matches!(
            parse_plain("H 99999999999999999999-"),
            Err(Error::InvalidParticle { .. })
        ));
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for input in ["a", "d+", "", "Fe 2+ 3", "Fe 2x", "Fe +2+", "Fe-x", "+", "Fe-0"] {
            assert!(
                matches!(parse_plain(input), Err(Error::InvalidParticle { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn explicit_options_merge_and_conflict() {
        let data = default_reference_data();
        let opts = ParticleOptions::new().charge(17).mass_number(56);
        let parsed = parse("Fe", &opts, &data).unwrap();
        assert_eq!(parsed.value, nuclear(Element::Fe, Some(56), Some(17)));
        assert!(!parsed.has_warnings());

        let redundant = parse("alpha", &ParticleOptions::new().mass_number(4), &data).unwrap();
        assert!(redundant.has_warnings());

        let conflict = parse("Fe-56", &ParticleOptions::new().mass_number(57), &data);
        assert!(matches!(conflict, Err(Error::InvalidParticle { .. })));

        let subatomic = parse("e-", &ParticleOptions::new().charge(-1), &data);
        assert!(matches!(subatomic, Err(Error::InvalidParticle { .. })));
    }

    #[test]
    fn descriptor_from_identity_skips_the_string_form() {
        let identity = Identity::Ion {
            element: Element::Au,
            mass_number: None,
            charge: 1,
        };
        assert_eq!(
            Descriptor::from_identity(&identity),
            nuclear(Element::Au, None, Some(1))
        );
    }
}
