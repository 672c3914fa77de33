use std::f64::consts::PI;

use crate::bodies::CelestialBody;
use crate::error::{Result, SimError};
use crate::sim::SatelliteState;

use super::perturbation::MassPerturbation;
use super::G;

// ---------------------------------------------------------------------------
// Circular two-body formulas (closed form, SI internally)
// ---------------------------------------------------------------------------

/// Distance from body centre to satellite, km.
#[inline]
pub fn distance_from_center(body: &CelestialBody, altitude_km: f64) -> f64 {
    body.radius + altitude_km
}

/// Orbit radius in metres. Rejects non-positive (or non-finite) radii.
pub fn orbit_radius_meters(body: &CelestialBody, altitude_km: f64) -> Result<f64> {
    let radius_km = distance_from_center(body, altitude_km);
    if !(radius_km > 0.0) || !radius_km.is_finite() {
        return Err(SimError::InvalidGeometry { radius_km });
    }
    Ok(radius_km * 1000.0)
}

/// Circular orbital speed, km/s: v = sqrt(GM / r)
pub fn orbital_velocity(body: &CelestialBody, altitude_km: f64) -> Result<f64> {
    let r = orbit_radius_meters(body, altitude_km)?;
    Ok((G * body.mass / r).sqrt() / 1000.0)
}

/// Circular orbital period, hours: T = 2*pi*sqrt(r^3 / GM)
pub fn orbital_period_hours(body: &CelestialBody, altitude_km: f64) -> Result<f64> {
    let r = orbit_radius_meters(body, altitude_km)?;
    Ok(2.0 * PI * (r.powi(3) / (G * body.mass)).sqrt() / 3600.0)
}

/// Escape speed at the orbit radius, km/s: v_esc = sqrt(2 GM / r)
pub fn escape_velocity(body: &CelestialBody, altitude_km: f64) -> Result<f64> {
    let r = orbit_radius_meters(body, altitude_km)?;
    Ok((2.0 * G * body.mass / r).sqrt() / 1000.0)
}

/// Gravitational pull on the satellite, N: F = G M m / r^2
pub fn gravitational_force(
    body: &CelestialBody,
    altitude_km: f64,
    satellite_mass_kg: f64,
) -> Result<f64> {
    let r = orbit_radius_meters(body, altitude_km)?;
    Ok(G * body.mass * satellite_mass_kg / (r * r))
}

// ---------------------------------------------------------------------------
// Derived metrics bundle
// ---------------------------------------------------------------------------

/// All derived quantities for one (body, satellite) pair, metric units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMetrics {
    pub orbital_velocity: f64,     // km/s
    pub period_hours: f64,         // h
    pub escape_velocity: f64,      // km/s
    pub gravitational_force: f64,  // N
    pub distance_from_center: f64, // km
}

impl OrbitalMetrics {
    /// Compute every metric. Velocity and period go through `perturbation`;
    /// escape velocity and force never do.
    pub fn compute(
        body: &CelestialBody,
        satellite: &SatelliteState,
        perturbation: &MassPerturbation,
    ) -> Result<Self> {
        let alt = satellite.altitude;
        let factor = perturbation.factor(satellite.mass);
        Ok(OrbitalMetrics {
            orbital_velocity: orbital_velocity(body, alt)? * factor,
            period_hours: orbital_period_hours(body, alt)? / factor,
            escape_velocity: escape_velocity(body, alt)?,
            gravitational_force: gravitational_force(body, alt, satellite.mass)?,
            distance_from_center: distance_from_center(body, alt),
        })
    }
}
