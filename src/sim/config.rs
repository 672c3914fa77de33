use crate::bodies::DEFAULT_BODY;
use crate::physics::MassPerturbation;
use crate::units::UnitSystem;

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub step_size: f64,     // rad of phase per tick (tick-count scaled, not wall clock)
    pub canvas_width: f64,  // px
    pub canvas_height: f64, // px
    pub default_body: String,
    pub unit_system: UnitSystem,
    pub perturbation: MassPerturbation,
}

impl SimConfig {
    pub fn with_step_size(mut self, v: f64) -> Self { self.step_size = v; self }
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }
    pub fn with_body(mut self, key: impl Into<String>) -> Self { self.default_body = key.into(); self }
    pub fn with_units(mut self, v: UnitSystem) -> Self { self.unit_system = v; self }
    pub fn with_perturbation(mut self, v: MassPerturbation) -> Self { self.perturbation = v; self }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_size: 0.02,
            canvas_width: 800.0,
            canvas_height: 800.0,
            default_body: DEFAULT_BODY.to_string(),
            unit_system: UnitSystem::Metric,
            perturbation: MassPerturbation::disabled(),
        }
    }
}
