//! Core error types for tminus-core.
//!
//! Projection functions never fail; these errors cover the surfaces around
//! them: catalog lookups, configuration files and the geolocation call.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tminus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Geolocation lookup errors
    #[error("Geolocation error: {0}")]
    Geo(#[from] GeoError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested id is not part of the catalog
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Geolocation-specific errors.
///
/// [`crate::geo::GeoLocator::locate`] swallows these into a fallback fix;
/// they only escape through `try_locate`.
#[derive(Error, Debug)]
pub enum GeoError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Lookup returned HTTP {status}")]
    Status { status: u16 },

    /// Body did not carry usable coordinates
    #[error("Malformed lookup response: {0}")]
    Malformed(String),

    /// Endpoint is not a valid URL
    #[error("Invalid lookup endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Coordinates outside the valid lat/lng ranges
    #[error("Invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
