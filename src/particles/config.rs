/// Explicit disambiguators supplied next to a particle argument.
///
/// A value here must agree with anything already embedded in the argument
/// string: `Particle::with_options("Fe-56", ParticleOptions::new().mass_number(57))`
/// is rejected, while repeating the same value only warns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleOptions {
    pub mass_number: Option<u16>,
    pub charge: Option<i32>,
}

impl ParticleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mass_number(mut self, mass_number: u16) -> Self {
        self.mass_number = Some(mass_number);
        self
    }

    pub fn charge(mut self, charge: i32) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mass_number.is_none() && self.charge.is_none()
    }
}
