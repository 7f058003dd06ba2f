//! Identity resolution: a parsed [`Descriptor`] checked against the
//! reference tables.

use tracing::debug;

use super::error::Error;
use super::parser::Descriptor;
use crate::data::ReferenceData;
use crate::model::identity::Identity;

/// Validates a descriptor and turns it into an [`Identity`].
///
/// Catalog entries are accepted as they are. Nuclear descriptors must name
/// an element present in the tables, a tabulated isotope when a mass number
/// is given, and a charge that does not exceed the proton count. Missing
/// masses or half-lives do not fail resolution; they only fail the
/// attribute that needs them.
pub fn resolve(
    input: &str,
    descriptor: Descriptor,
    data: &ReferenceData,
) -> Result<Identity, Error> {
    let identity = match descriptor {
        Descriptor::Subatomic { symbol } => {
            if data.particle(&symbol).is_none() {
                return Err(Error::invalid_particle(input, "not in the particle catalog"));
            }
            Identity::Subatomic { symbol }
        }
        Descriptor::Nuclear {
            element,
            mass_number,
            charge,
        } => {
            if data.element(element).is_none() {
                return Err(Error::invalid_particle(
                    input,
                    format!("no reference data for element {element}"),
                ));
            }

            let z = element.atomic_number();

            if let Some(a) = mass_number {
                if a < u16::from(z) {
                    return Err(Error::invalid_particle(
                        input,
                        format!("mass number {a} is smaller than the atomic number {z}"),
                    ));
                }
                if data.isotope(element, a).is_none() {
                    return Err(Error::invalid_particle(
                        input,
                        format!("{element}-{a} is not a known isotope"),
                    ));
                }
            }

            if let Some(q) = charge {
                if q > i32::from(z) {
                    return Err(Error::invalid_particle(
                        input,
                        format!("charge {q}+ exceeds the atomic number {z} of {element}"),
                    ));
                }
            }

            match (mass_number, charge) {
                (_, Some(charge)) => Identity::Ion {
                    element,
                    mass_number,
                    charge,
                },
                (Some(mass_number), None) => Identity::Isotope {
                    element,
                    mass_number,
                },
                (None, None) => Identity::Element(element),
            }
        }
    };

    debug!(input, identity = ?identity, "resolved particle");
    Ok(identity)
}

/// The canonical symbol of an identity. Ions that are catalog entries
/// (the proton) take their catalog symbol.
pub fn canonical_symbol(identity: &Identity, data: &ReferenceData) -> String {
    if let Identity::Ion {
        element,
        mass_number: Some(a),
        charge,
    } = identity
    {
        if let Some(record) = data.nucleus_particle(*element, *a, *charge) {
            return record.symbol.clone();
        }
    }
    identity.structural_symbol()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_reference_data;
    use crate::model::types::Element;

    fn nuclear(element: Element, mass_number: Option<u16>, charge: Option<i32>) -> Descriptor {
        Descriptor::Nuclear {
            element,
            mass_number,
            charge,
        }
    }

    #[test]
    fn narrows_by_available_information() {
        let data = default_reference_data();
        assert_eq!(
            resolve("Fe", nuclear(Element::Fe, None, None), &data).unwrap(),
            Identity::Element(Element::Fe)
        );
        assert_eq!(
            resolve("Fe-56", nuclear(Element::Fe, Some(56), None), &data).unwrap(),
            Identity::Isotope {
                element: Element::Fe,
                mass_number: 56
            }
        );
        assert_eq!(
            resolve("Fe 3+", nuclear(Element::Fe, None, Some(3)), &data).unwrap(),
            Identity::Ion {
                element: Element::Fe,
                mass_number: None,
                charge: 3
            }
        );
    }

    #[test]
    fn rejects_impossible_nuclei() {
        let data = default_reference_data();
        for (a, z) in [(Some(99), None), (Some(12), None), (None, Some(2))] {
            let result = resolve("H", nuclear(Element::H, a, z), &data);
            assert!(matches!(result, Err(Error::InvalidParticle { .. })));
        }
        let result = resolve("Au-818", nuclear(Element::Au, Some(818), None), &data);
        assert!(matches!(result, Err(Error::InvalidParticle { .. })));
        let result = resolve("Au-12", nuclear(Element::Au, Some(12), None), &data);
        assert!(matches!(result, Err(Error::InvalidParticle { .. })));
    }

    #[test]
    fn negative_ions_beyond_the_proton_count_resolve() {
        let data = default_reference_data();
        assert!(resolve("H----", nuclear(Element::H, None, Some(-4)), &data).is_ok());
    }

    #[test]
    fn proton_takes_its_catalog_symbol() {
        let data = default_reference_data();
        let proton = Identity::Ion {
            element: Element::H,
            mass_number: Some(1),
            charge: 1,
        };
        assert_eq!(canonical_symbol(&proton, &data), "p+");

        let neutral = Identity::Ion {
            element: Element::H,
            mass_number: Some(1),
            charge: 0,
        };
        assert_eq!(canonical_symbol(&neutral, &data), "H-1 0+");
    }
}
