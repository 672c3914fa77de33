pub mod bodies;
pub mod error;
pub mod physics;
pub mod presets;
pub mod render;
pub mod sim;
pub mod units;

pub use bodies::CelestialBody;
pub use error::{Result, SimError};
pub use sim::{Command, SimConfig, SimulationState, Simulator};
pub use units::UnitSystem;
