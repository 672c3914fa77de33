use nalgebra::Point2;
use tracing::{debug, info};

use crate::bodies::{self, CelestialBody};
use crate::error::{Result, SimError};
use crate::physics::{orbit_radius_meters, orbital_velocity, MassPerturbation, OrbitalMetrics};
use crate::presets::{self, PresetKey};
use crate::units::UnitSystem;

use super::config::SimConfig;
use super::trail::TrailHistory;

// ---------------------------------------------------------------------------
// Zoom limits
// ---------------------------------------------------------------------------

pub const MIN_ZOOM: f64 = 0.005; // px per km
pub const MAX_ZOOM: f64 = 0.1;

/// On-screen body radius the automatic zoom aims for, px.
const DEFAULT_BODY_PIXELS: f64 = 80.0;

/// Zoom that shows `body` at a comfortable size: small bodies get magnified,
/// giants get shrunk, both within the zoom limits.
pub fn default_zoom(body: &CelestialBody) -> f64 {
    (DEFAULT_BODY_PIXELS / body.radius).clamp(MIN_ZOOM, MAX_ZOOM)
}

// ---------------------------------------------------------------------------
// Satellite
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitKind {
    #[default]
    Circular,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteState {
    pub mass: f64,     // kg
    pub altitude: f64, // km above the surface
    pub velocity: f64, // km/s, display only; physics derives speed from altitude
    pub orbit_kind: OrbitKind,
}

impl SatelliteState {
    pub fn circular(altitude: f64, mass: f64, velocity: f64) -> Self {
        Self { mass, altitude, velocity, orbit_kind: OrbitKind::Circular }
    }
}

/// Which preset produced the current satellite, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Preset(PresetKey),
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// The mutable model. Every mutation goes through a validated operation; a
/// rejected one leaves the state exactly as it was.
#[derive(Debug, Clone)]
pub struct SimulationState {
    body: &'static CelestialBody,
    satellite: SatelliteState,
    selection: Selection,
    phase_angle: f64, // rad, unbounded
    trail: TrailHistory,
    zoom: f64,
    run_state: RunState,
    unit_system: UnitSystem,
    perturbation: MassPerturbation,
}

impl SimulationState {
    /// Idle state around `body` with its low-orbit preset.
    pub fn new(body: &'static CelestialBody) -> Result<Self> {
        let low = presets::resolve(body, PresetKey::Low)?;
        Ok(Self {
            body,
            satellite: SatelliteState::circular(low.altitude, low.mass, low.derived_velocity),
            selection: Selection::Preset(PresetKey::Low),
            phase_angle: 0.0,
            trail: TrailHistory::new(),
            zoom: default_zoom(body),
            run_state: RunState::Idle,
            unit_system: UnitSystem::Metric,
            perturbation: MassPerturbation::disabled(),
        })
    }

    /// Build from config; an unknown default body falls back to Earth.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let mut state = Self::new(bodies::lookup_or_default(&config.default_body))?;
        state.unit_system = config.unit_system;
        state.perturbation = config.perturbation;
        Ok(state)
    }

    pub fn body(&self) -> &'static CelestialBody { self.body }
    pub fn satellite(&self) -> &SatelliteState { &self.satellite }
    pub fn selection(&self) -> Selection { self.selection }
    pub fn phase_angle(&self) -> f64 { self.phase_angle }
    pub fn trail(&self) -> &TrailHistory { &self.trail }
    pub fn zoom(&self) -> f64 { self.zoom }
    pub fn run_state(&self) -> RunState { self.run_state }
    pub fn is_running(&self) -> bool { self.run_state == RunState::Running }
    pub fn unit_system(&self) -> UnitSystem { self.unit_system }
    pub fn perturbation(&self) -> &MassPerturbation { &self.perturbation }

    /// Orbit radius in km (body radius + altitude).
    pub fn orbit_radius(&self) -> f64 {
        self.body.radius + self.satellite.altitude
    }

    pub fn metrics(&self) -> Result<OrbitalMetrics> {
        OrbitalMetrics::compute(self.body, &self.satellite, &self.perturbation)
    }

    // -----------------------------------------------------------------------
    // Run state
    // -----------------------------------------------------------------------

    /// Idle -> Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        debug!("simulation started");
        self.run_state = RunState::Running;
        true
    }

    /// Running -> Idle. Returns false if already idle.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        debug!(phase = self.phase_angle, "simulation paused");
        self.run_state = RunState::Idle;
        true
    }

    /// Rewind the satellite to phase 0 and forget its trail.
    pub fn reset(&mut self) {
        self.phase_angle = 0.0;
        self.trail.clear();
    }

    // -----------------------------------------------------------------------
    // Body and satellite
    // -----------------------------------------------------------------------

    /// Switch central body: low-orbit preset, fresh trail, phase 0, zoom
    /// fitted to the new body.
    pub fn change_body(&mut self, body: &'static CelestialBody) -> Result<()> {
        let low = presets::resolve(body, PresetKey::Low)?;
        info!(from = self.body.key, to = body.key, altitude = low.altitude, "body changed");
        self.body = body;
        self.satellite = SatelliteState::circular(low.altitude, low.mass, low.derived_velocity);
        self.selection = Selection::Preset(PresetKey::Low);
        self.zoom = default_zoom(body);
        self.reset();
        Ok(())
    }

    /// Apply a preset for the active body. Zoom and trail are untouched.
    pub fn select_preset(&mut self, key: PresetKey) -> Result<()> {
        let def = presets::resolve(self.body, key)?;
        info!(body = self.body.key, preset = %key, altitude = def.altitude, "preset selected");
        self.satellite.altitude = def.altitude;
        self.satellite.velocity = def.derived_velocity;
        self.satellite.mass = def.mass;
        self.selection = Selection::Preset(key);
        Ok(())
    }

    pub fn set_altitude(&mut self, km: f64) -> Result<()> {
        if !km.is_finite() || km < 0.0 {
            return Err(SimError::invalid("altitude", km));
        }
        orbit_radius_meters(self.body, km)?;
        self.satellite.velocity = orbital_velocity(self.body, km)?;
        self.satellite.altitude = km;
        self.selection = Selection::Custom;
        Ok(())
    }

    pub fn set_mass(&mut self, kg: f64) -> Result<()> {
        if !kg.is_finite() || kg <= 0.0 {
            return Err(SimError::invalid("mass", kg));
        }
        self.satellite.mass = kg;
        self.selection = Selection::Custom;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    /// Set zoom, clamped to [MIN_ZOOM, MAX_ZOOM]. Returns the applied level.
    pub fn set_zoom(&mut self, level: f64) -> Result<f64> {
        if level.is_nan() {
            return Err(SimError::invalid("zoom", level));
        }
        self.zoom = level.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(self.zoom)
    }

    /// Multiply zoom by `factor` (> 1 zooms in), then clamp.
    pub fn zoom_by(&mut self, factor: f64) -> Result<f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SimError::invalid("zoom factor", factor));
        }
        self.set_zoom(self.zoom * factor)
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.zoom = default_zoom(self.body);
        self.zoom
    }

    pub fn toggle_unit_system(&mut self) -> UnitSystem {
        self.unit_system = self.unit_system.toggled();
        self.unit_system
    }

    pub fn set_perturbation(&mut self, perturbation: MassPerturbation) {
        self.perturbation = perturbation;
    }

    // -----------------------------------------------------------------------
    // Tick / render hooks
    // -----------------------------------------------------------------------

    pub(crate) fn advance_phase(&mut self, step: f64) {
        self.phase_angle += step;
    }

    pub(crate) fn record_trail_point(&mut self, point: Point2<f64>) {
        self.trail.push(point);
    }
}
