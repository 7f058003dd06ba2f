//! Resolved particle identities and the symbols derived from them.

use super::types::Element;

/// What a particle *is*, once parsing and validation have succeeded.
///
/// Each variant carries only the fields meaningful to it; everything else is
/// derived on demand from the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// A catalog entry without nuclear structure (leptons, neutrinos, the
    /// neutron, antibaryons). Identified by its catalog symbol.
    Subatomic { symbol: String },
    /// An element with neither mass number nor charge chosen.
    Element(Element),
    /// An element narrowed by mass number, charge unknown.
    Isotope { element: Element, mass_number: u16 },
    /// An element (optionally an isotope) with a known net charge,
    /// including zero.
    Ion {
        element: Element,
        mass_number: Option<u16>,
        charge: i32,
    },
}

impl Identity {
    pub fn element(&self) -> Option<Element> {
        match self {
            Identity::Subatomic { .. } => None,
            Identity::Element(element)
            | Identity::Isotope { element, .. }
            | Identity::Ion { element, .. } => Some(*element),
        }
    }

    pub fn mass_number(&self) -> Option<u16> {
        match self {
            Identity::Isotope { mass_number, .. } => Some(*mass_number),
            Identity::Ion { mass_number, .. } => *mass_number,
            _ => None,
        }
    }

    /// Charge carried by the identity itself. Subatomic charges live in the
    /// catalog and are not reported here.
    pub fn ion_charge(&self) -> Option<i32> {
        match self {
            Identity::Ion { charge, .. } => Some(*charge),
            _ => None,
        }
    }

    pub fn isotope_symbol(&self) -> Option<String> {
        Some(isotope_symbol(self.element()?, self.mass_number()?))
    }

    /// The element or isotope symbol, without any charge suffix.
    pub fn nuclear_symbol(&self) -> Option<String> {
        let element = self.element()?;
        Some(match self.mass_number() {
            Some(mass_number) => isotope_symbol(element, mass_number),
            None => element.symbol().to_string(),
        })
    }

    pub fn ionic_symbol(&self) -> Option<String> {
        let charge = self.ion_charge()?;
        Some(ionic_symbol(&self.nuclear_symbol()?, charge))
    }

    /// Symbol built purely from the identity's own fields. Catalog symbols
    /// that name a particular ion (such as `p+`) take precedence over this
    /// when a particle is displayed.
    pub fn structural_symbol(&self) -> String {
        match self {
            Identity::Subatomic { symbol } => symbol.clone(),
            Identity::Element(element) => element.symbol().to_string(),
            Identity::Isotope {
                element,
                mass_number,
            } => isotope_symbol(*element, *mass_number),
            Identity::Ion { .. } => self.ionic_symbol().unwrap_or_default(),
        }
    }
}

/// `H-2` and `H-3` have dedicated symbols; every other isotope is `Sym-A`.
pub fn isotope_symbol(element: Element, mass_number: u16) -> String {
    match (element, mass_number) {
        (Element::H, 2) => "D".to_string(),
        (Element::H, 3) => "T".to_string(),
        _ => format!("{}-{}", element.symbol(), mass_number),
    }
}

pub fn ionic_symbol(base: &str, charge: i32) -> String {
    if charge < 0 {
        format!("{} {}-", base, charge.unsigned_abs())
    } else {
        format!("{} {}+", base, charge)
    }
}
