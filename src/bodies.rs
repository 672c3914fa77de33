use tracing::warn;

use crate::error::{Result, SimError};
use crate::render::Rgba;

// ---------------------------------------------------------------------------
// Celestial body catalog
// ---------------------------------------------------------------------------

/// Two-tone radial gradient used to paint a body disc (centre to limb).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyColors {
    pub core: Rgba,
    pub limb: Rgba,
}

/// Immutable physical description of a central body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub key: &'static str,
    pub name: &'static str,
    pub radius: f64,          // km, mean
    pub mass: f64,            // kg
    pub surface_gravity: f64, // m/s^2, informational only
    pub colors: BodyColors,
}

impl CelestialBody {
    /// Gravitational parameter GM (m^3/s^2).
    pub fn mu(&self) -> f64 {
        crate::physics::G * self.mass
    }
}

pub const DEFAULT_BODY: &str = "earth";

static CATALOG: [CelestialBody; 7] = [
    CelestialBody {
        key: "mercury",
        name: "Mercury",
        radius: 2_439.7,
        mass: 3.301e23,
        surface_gravity: 3.70,
        colors: BodyColors { core: Rgba::rgb(0xa8, 0xa2, 0x9e), limb: Rgba::rgb(0x57, 0x53, 0x4e) },
    },
    CelestialBody {
        key: "venus",
        name: "Venus",
        radius: 6_051.8,
        mass: 4.867e24,
        surface_gravity: 8.87,
        colors: BodyColors { core: Rgba::rgb(0xfd, 0xe6, 0x8a), limb: Rgba::rgb(0xd9, 0x77, 0x06) },
    },
    CelestialBody {
        key: "earth",
        name: "Earth",
        radius: 6_371.0,
        mass: 5.972e24,
        surface_gravity: 9.81,
        colors: BodyColors { core: Rgba::rgb(0x10, 0xb9, 0x81), limb: Rgba::rgb(0x3b, 0x82, 0xf6) },
    },
    CelestialBody {
        key: "moon",
        name: "Moon",
        radius: 1_737.0,
        mass: 7.342e22,
        surface_gravity: 1.62,
        colors: BodyColors { core: Rgba::rgb(0xe5, 0xe7, 0xeb), limb: Rgba::rgb(0x6b, 0x72, 0x80) },
    },
    CelestialBody {
        key: "mars",
        name: "Mars",
        radius: 3_389.5,
        mass: 6.417e23,
        surface_gravity: 3.72,
        colors: BodyColors { core: Rgba::rgb(0xf9, 0x73, 0x16), limb: Rgba::rgb(0x99, 0x1b, 0x1b) },
    },
    CelestialBody {
        key: "jupiter",
        name: "Jupiter",
        radius: 69_911.0,
        mass: 1.898e27,
        surface_gravity: 24.79,
        colors: BodyColors { core: Rgba::rgb(0xfe, 0xd7, 0xaa), limb: Rgba::rgb(0xb4, 0x53, 0x09) },
    },
    CelestialBody {
        key: "saturn",
        name: "Saturn",
        radius: 58_232.0,
        mass: 5.683e26,
        surface_gravity: 10.44,
        colors: BodyColors { core: Rgba::rgb(0xfe, 0xf3, 0xc7), limb: Rgba::rgb(0xca, 0x8a, 0x04) },
    },
];

/// Every catalogued body, in display order.
pub fn all() -> &'static [CelestialBody] {
    &CATALOG
}

/// Find a body by key (case-insensitive).
pub fn lookup(key: &str) -> Result<&'static CelestialBody> {
    let key = key.trim();
    CATALOG
        .iter()
        .find(|b| b.key.eq_ignore_ascii_case(key))
        .ok_or_else(|| SimError::UnknownBody { key: key.to_string() })
}

/// Like [`lookup`], but falls back to the default body instead of failing.
pub fn lookup_or_default(key: &str) -> &'static CelestialBody {
    match lookup(key) {
        Ok(body) => body,
        Err(err) => {
            warn!(%err, fallback = DEFAULT_BODY, "falling back to default body");
            default_body()
        }
    }
}

pub fn default_body() -> &'static CelestialBody {
    lookup(DEFAULT_BODY).unwrap_or(&CATALOG[0])
}
