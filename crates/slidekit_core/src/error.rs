//! Configuration error types
//!
//! Geometry and drag input never error; they are clamped. Only configuration
//! supplied by the application can be rejected.

use thiserror::Error;

/// Invalid slide configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Commit threshold outside `(0, 1]`
    #[error("fractional threshold must be in (0, 1], got {0}")]
    FractionalThreshold(f32),

    /// Velocity threshold not a positive finite number
    #[error("velocity threshold must be positive and finite, got {0}")]
    VelocityThreshold(f32),

    /// Negative or non-finite geometry value
    #[error("invalid geometry for {field}: {value}")]
    Geometry { field: &'static str, value: f32 },

    /// Settle animation parameters out of range
    #[error("invalid settle animation: {0}")]
    Settle(String),

    /// Colour string that is not `#RRGGBB` / `#RRGGBBAA`
    #[error("invalid colour '{0}'")]
    Color(String),

    /// TOML could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
