//! Physical constants (CODATA 2018), in SI units.

pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

pub const ELECTRON_VOLT: f64 = ELEMENTARY_CHARGE;

pub const ATOMIC_MASS_UNIT: f64 = 1.660_539_066_60e-27;

pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;

pub const PROTON_MASS: f64 = 1.672_621_923_69e-27;

pub const NEUTRON_MASS: f64 = 1.674_927_498_04e-27;

pub const DEUTERON_MASS: f64 = 3.343_583_772_4e-27;

pub const TRITON_MASS: f64 = 5.007_356_744_6e-27;

pub const ALPHA_PARTICLE_MASS: f64 = 6.644_657_335_7e-27;

/// Measured bare-nucleus masses that take precedence over
/// "atomic mass minus electrons", keyed by canonical isotope symbol.
pub fn measured_nuclear_mass(isotope: &str) -> Option<f64> {
    match isotope {
        "H-1" => Some(PROTON_MASS),
        "D" => Some(DEUTERON_MASS),
        "T" => Some(TRITON_MASS),
        "He-4" => Some(ALPHA_PARTICLE_MASS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_nuclear_masses_cover_light_nuclei() {
        assert_eq!(measured_nuclear_mass("H-1"), Some(PROTON_MASS));
        assert_eq!(measured_nuclear_mass("He-4"), Some(ALPHA_PARTICLE_MASS));
        assert_eq!(measured_nuclear_mass("H-2"), None);
        assert_eq!(measured_nuclear_mass("Fe-56"), None);
    }

    #[test]
    fn alpha_is_lighter_than_its_free_nucleons() {
        assert!(ALPHA_PARTICLE_MASS < 2.0 * PROTON_MASS + 2.0 * NEUTRON_MASS);
        assert!(DEUTERON_MASS < PROTON_MASS + NEUTRON_MASS);
    }
}
