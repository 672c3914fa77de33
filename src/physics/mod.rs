pub mod orbit;
pub mod perturbation;

pub use orbit::{
    distance_from_center, escape_velocity, gravitational_force, orbit_radius_meters,
    orbital_period_hours, orbital_velocity, OrbitalMetrics,
};
pub use perturbation::MassPerturbation;

/// Newtonian constant of gravitation, m^3/(kg s^2).
pub const G: f64 = 6.674e-11;
