//! Error Types
//!
//! Construction-time failures of the layout engine. Once an engine is built,
//! nothing in the per-frame path returns a `HudError`; per-report traffic
//! failures use [`BugError`](crate::traffic::BugError) instead.

use thiserror::Error;

/// Errors raised while building the engine and its lookup tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HudError {
    /// Framebuffer dimensions that cannot hold any symbology
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreenSize { width: i32, height: i32 },

    /// A configuration value outside its allowed domain
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A lookup table key outside the precomputed domain
    #[error("Key {key} outside precomputed {table} domain [{min}, {max}]")]
    OutOfDomain {
        table: &'static str,
        key: i32,
        min: i32,
        max: i32,
    },
}

impl HudError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        HudError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
