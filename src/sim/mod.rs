pub mod command;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod state;
pub mod trail;

pub use command::Command;
pub use config::SimConfig;
pub use runner::Simulator;
pub use scheduler::{AnimationScheduler, FrameClock, ManualClock, TickOutcome, TickToken};
pub use state::{
    default_zoom, OrbitKind, RunState, SatelliteState, Selection, SimulationState, MAX_ZOOM,
    MIN_ZOOM,
};
pub use trail::{TrailHistory, TRAIL_CAPACITY};
