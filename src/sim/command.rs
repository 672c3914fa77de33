use std::fmt;

use crate::presets::PresetKey;

// ---------------------------------------------------------------------------
// Control commands from the host UI
// ---------------------------------------------------------------------------

/// Discrete inputs from the controls. Each is applied whole, between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Pause,
    ToggleRunning,
    Reset,
    SelectBody(String),
    SelectPreset(PresetKey),
    SetAltitude(f64), // km
    SetMass(f64),     // kg
    SetZoom(f64),     // px per km
    ZoomBy(f64),      // multiplicative, > 1 zooms in
    ResetZoom,
    ToggleUnits,
}

impl Command {
    /// Whether the command can move the satellite discontinuously (and so
    /// invalidates the trail on its own).
    pub fn resets_trail(&self) -> bool {
        matches!(self, Command::Reset | Command::SelectBody(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("start"),
            Command::Pause => f.write_str("pause"),
            Command::ToggleRunning => f.write_str("toggle-running"),
            Command::Reset => f.write_str("reset"),
            Command::SelectBody(key) => write!(f, "select-body({})", key),
            Command::SelectPreset(key) => write!(f, "select-preset({})", key),
            Command::SetAltitude(km) => write!(f, "set-altitude({} km)", km),
            Command::SetMass(kg) => write!(f, "set-mass({} kg)", kg),
            Command::SetZoom(z) => write!(f, "set-zoom({})", z),
            Command::ZoomBy(factor) => write!(f, "zoom-by({})", factor),
            Command::ResetZoom => f.write_str("reset-zoom"),
            Command::ToggleUnits => f.write_str("toggle-units"),
        }
    }
}
