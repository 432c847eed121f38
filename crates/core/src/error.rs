//! Error types for the lowpoly core.

use thiserror::Error;

/// Errors produced while validating parameters or generating a pattern.
///
/// Every variant is raised before the random source is touched, so a failed
/// call never leaves a partially consumed stream behind.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid dimensions {width}x{height}: width and height must be positive and finite")]
    InvalidDimensions { width: f64, height: f64 },

    /// The palette has no colors to pick from.
    #[error("palette requires at least 1 color")]
    EmptyPalette,

    /// A generation parameter had an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The triangle target implies a lattice too large to address.
    #[error("triangle count {0} is too large")]
    CountTooLarge(usize),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No built-in palette with this name exists.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Writing rendered output failed.
    #[error("i/o error: {0}")]
    Io(String),
}
