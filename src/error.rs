use thiserror::Error;

// ---------------------------------------------------------------------------
// Simulation errors
// ---------------------------------------------------------------------------

/// Every failure the core can report. All of them are recoverable: the
/// offending mutation is refused and the last valid state is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("unknown celestial body `{key}`")]
    UnknownBody { key: String },

    #[error("orbit radius must be positive, got {radius_km} km")]
    InvalidGeometry { radius_km: f64 },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        SimError::InvalidParameter { name, value: value.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
