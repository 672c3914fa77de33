//! Presentation-boundary unit conversion. Internal state is always metric.

use crate::physics::OrbitalMetrics;

pub const KM_TO_MI: f64 = 0.621_371;
pub const KMPS_TO_MPH: f64 = 2_236.94;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    pub fn velocity_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

/// Kilometres to the display unit.
#[inline]
pub fn to_display_distance(km: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => km,
        UnitSystem::Imperial => km * KM_TO_MI,
    }
}

/// Kilometres per second to the display unit.
#[inline]
pub fn to_display_velocity(kmps: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => kmps,
        UnitSystem::Imperial => kmps * KMPS_TO_MPH,
    }
}

/// Derived metrics converted for display. Force stays in newtons and
/// period in hours under both systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub units: UnitSystem,
    pub orbital_velocity: f64,
    pub period_hours: f64,
    pub escape_velocity: f64,
    pub gravitational_force: f64,
    pub distance_from_center: f64,
}

impl DisplayMetrics {
    pub fn from_metrics(m: &OrbitalMetrics, units: UnitSystem) -> Self {
        Self {
            units,
            orbital_velocity: to_display_velocity(m.orbital_velocity, units),
            period_hours: m.period_hours,
            escape_velocity: to_display_velocity(m.escape_velocity, units),
            gravitational_force: m.gravitational_force,
            distance_from_center: to_display_distance(m.distance_from_center, units),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_is_identity() {
        assert_eq!(to_display_distance(6771.0, UnitSystem::Metric), 6771.0);
        assert_eq!(to_display_velocity(7.67, UnitSystem::Metric), 7.67);
    }

    #[test]
    fn imperial_factors() {
        assert!((to_display_distance(100.0, UnitSystem::Imperial) - 62.1371).abs() < 1e-9);
        // 1 km/s ~ 2237 mph
        assert!((to_display_velocity(1.0, UnitSystem::Imperial) - 2236.94).abs() < 1e-9);
    }

    #[test]
    fn toggle_round_trips() {
        let u = UnitSystem::default();
        assert_eq!(u, UnitSystem::Metric);
        assert_eq!(u.toggled(), UnitSystem::Imperial);
        assert_eq!(u.toggled().toggled(), UnitSystem::Metric);
        assert_eq!(UnitSystem::Imperial.velocity_label(), "mph");
    }

    #[test]
    fn display_metrics_convert_only_distances_and_speeds() {
        let m = OrbitalMetrics {
            orbital_velocity: 7.0,
            period_hours: 1.5,
            escape_velocity: 10.0,
            gravitational_force: 8_000.0,
            distance_from_center: 7_000.0,
        };
        let d = DisplayMetrics::from_metrics(&m, UnitSystem::Imperial);
        assert!((d.orbital_velocity - 7.0 * KMPS_TO_MPH).abs() < 1e-9);
        assert!((d.distance_from_center - 7_000.0 * KM_TO_MI).abs() < 1e-9);
        assert_eq!(d.period_hours, 1.5);
        assert_eq!(d.gravitational_force, 8_000.0);
        assert_eq!(DisplayMetrics::from_metrics(&m, UnitSystem::Metric).escape_velocity, 10.0);
    }
}
