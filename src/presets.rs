use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::bodies::CelestialBody;
use crate::error::{Result, SimError};
use crate::physics::orbital_velocity;

// ---------------------------------------------------------------------------
// Body-relative preset orbits
// ---------------------------------------------------------------------------

/// Absolute floor for any preset altitude, km.
pub const MIN_ALTITUDE_KM: f64 = 200.0;

const LOW_FRACTION: f64 = 0.05;
const MEDIUM_FRACTION: f64 = 0.5;
const HIGH_FRACTION: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PresetKey {
    Low,
    Medium,
    High,
}

impl PresetKey {
    pub const ALL: [PresetKey; 3] = [PresetKey::Low, PresetKey::Medium, PresetKey::High];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetKey::Low => "low",
            PresetKey::Medium => "medium",
            PresetKey::High => "high",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PresetKey::Low => "Low Orbit",
            PresetKey::Medium => "Medium Orbit",
            PresetKey::High => "High Orbit",
        }
    }

    fn radius_fraction(self) -> f64 {
        match self {
            PresetKey::Low => LOW_FRACTION,
            PresetKey::Medium => MEDIUM_FRACTION,
            PresetKey::High => HIGH_FRACTION,
        }
    }

    /// Typical craft for the tier: station, small sat, comms sat.
    fn mass(self) -> f64 {
        match self {
            PresetKey::Low => 420_000.0,
            PresetKey::Medium => 2_000.0,
            PresetKey::High => 5_000.0,
        }
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKey {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        PresetKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::invalid("preset", s))
    }
}

/// Concrete satellite parameters for one preset on one body.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDefinition {
    pub key: PresetKey,
    pub display_name: &'static str,
    pub altitude: f64,         // km
    pub derived_velocity: f64, // km/s
    pub mass: f64,             // kg
}

/// Altitude for a tier: a fraction of the body radius, never below the low
/// orbit floor `max(200 km, 5% radius)`.
pub fn preset_altitude(body: &CelestialBody, key: PresetKey) -> f64 {
    let floor = MIN_ALTITUDE_KM.max(body.radius * LOW_FRACTION);
    (body.radius * key.radius_fraction()).max(floor)
}

/// Resolve a single preset against `body`.
pub fn resolve(body: &CelestialBody, key: PresetKey) -> Result<PresetDefinition> {
    let altitude = preset_altitude(body, key);
    Ok(PresetDefinition {
        key,
        display_name: key.display_name(),
        altitude,
        derived_velocity: orbital_velocity(body, altitude)?,
        mass: key.mass(),
    })
}

/// Resolve every preset tier against `body`.
pub fn resolve_presets(body: &CelestialBody) -> Result<BTreeMap<PresetKey, PresetDefinition>> {
    PresetKey::ALL
        .into_iter()
        .map(|key| resolve(body, key).map(|def| (key, def)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies;

    #[test]
    fn moon_low_orbit_hits_absolute_floor() {
        let moon = bodies::lookup("moon").unwrap();
        let low = resolve(moon, PresetKey::Low).unwrap();
        assert_eq!(low.altitude, 200.0);
        assert!(low.derived_velocity > 1.5 && low.derived_velocity < 1.7,
            "lunar low orbit speed {:.3} km/s", low.derived_velocity);
    }

    #[test]
    fn earth_low_orbit_uses_fraction() {
        let earth = bodies::lookup("earth").unwrap();
        let low = resolve(earth, PresetKey::Low).unwrap();
        assert!((low.altitude - 318.55).abs() < 1e-9);
    }

    #[test]
    fn tiers_are_ordered_and_consistent() {
        for body in bodies::all() {
            let presets = resolve_presets(body).unwrap();
            assert_eq!(presets.len(), 3);
            let low = &presets[&PresetKey::Low];
            let med = &presets[&PresetKey::Medium];
            let high = &presets[&PresetKey::High];
            assert!(low.altitude > 0.0);
            assert!(low.altitude <= med.altitude && med.altitude < high.altitude, "{}", body.name);
            assert!(low.derived_velocity >= med.derived_velocity);
            for def in presets.values() {
                let v = orbital_velocity(body, def.altitude).unwrap();
                assert_eq!(def.derived_velocity, v);
                assert!(def.mass > 0.0);
            }
        }
    }

    #[test]
    fn parse_keys() {
        assert_eq!("LOW".parse::<PresetKey>().unwrap(), PresetKey::Low);
        assert_eq!(" high ".parse::<PresetKey>().unwrap(), PresetKey::High);
        assert!(matches!(
            "geo".parse::<PresetKey>(),
            Err(SimError::InvalidParameter { name: "preset", .. })
        ));
        assert_eq!(PresetKey::Medium.to_string(), "medium");
    }
}
