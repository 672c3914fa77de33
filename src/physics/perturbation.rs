//! Optional mass-dependent speed correction.
//!
//! This is a teaching aid, not physics: in a real two-body orbit of a
//! satellite around a planet the satellite's own mass has no measurable
//! effect on its speed or period. When enabled, velocity is scaled by a
//! factor linear in `(mass - reference_mass)` and the period by its inverse,
//! so `v * T` still equals the orbit circumference. Disabled by default.

const MIN_FACTOR: f64 = 0.5;
const MAX_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPerturbation {
    pub enabled: bool,
    pub reference_mass_kg: f64,
    pub coefficient_per_kg: f64,
}

impl MassPerturbation {
    /// Strict two-body mechanics.
    pub const fn disabled() -> Self {
        Self { enabled: false, reference_mass_kg: 1_000.0, coefficient_per_kg: 1e-7 }
    }

    /// The pedagogical correction with its stock coefficients.
    pub const fn enabled() -> Self {
        Self { enabled: true, ..Self::disabled() }
    }

    /// Velocity scale factor for a satellite of `mass_kg`. Exactly 1 when disabled.
    pub fn factor(&self, mass_kg: f64) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        let f = 1.0 + self.coefficient_per_kg * (mass_kg - self.reference_mass_kg);
        if f.is_finite() { f.clamp(MIN_FACTOR, MAX_FACTOR) } else { 1.0 }
    }
}

impl Default for MassPerturbation {
    fn default() -> Self {
        Self::disabled()
    }
}
