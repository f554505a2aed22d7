//! Error types for the nebula core.
//!
//! Every failure here is recoverable: callers log it and keep rendering with
//! the previous state.

use thiserror::Error;

/// Errors raised while building a particle field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("particle count must be greater than zero")]
    EmptyField,
}

/// Errors raised while parsing or installing a color theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("`{0}` is not a hex color (expected #RRGGBB or #RGB)")]
    InvalidHex(String),
    #[error("`{0}` is not a gradient stop (expected near, mid or far)")]
    UnknownStop(String),
    #[error("palette field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("palette payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors raised when a palette generation request cannot be issued or fails.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("theme generation is disabled (no credential configured)")]
    Disabled,
    #[error("a theme generation request is already in flight")]
    Busy,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("palette service failed: {0}")]
    Service(String),
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Errors raised by the hand tracker lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("gesture model is still loading")]
    Loading,
    #[error("gesture model has not been loaded")]
    NotLoaded,
    #[error("gesture model unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while reading configuration overrides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}={value} is not a valid {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}
