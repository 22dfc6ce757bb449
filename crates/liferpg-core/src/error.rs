//! Core error types for liferpg-core.
//!
//! This module defines the error hierarchy using thiserror. Each subsystem
//! gets its own enum and `CoreError` ties them together for callers that
//! run a whole daily flow.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for liferpg-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quest table and completion validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification relay errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors for quest definitions and day input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Quest id is empty
    #[error("Quest at position {index} has an empty id")]
    EmptyId { index: usize },

    /// Quest id appears more than once
    #[error("Duplicate quest id '{0}'")]
    DuplicateId(String),

    /// Hour outside 0-23 or minute outside 0-59
    #[error("Invalid time for quest '{id}': {hour}:{minute:02} is not a wall-clock time")]
    InvalidTime { id: String, hour: u32, minute: u32 },

    /// Duration is zero or longer than a day
    #[error("Invalid duration for quest '{id}': {minutes} minutes (expected 1-1440)")]
    InvalidDuration { id: String, minutes: u32 },

    /// Completion refers to a quest that is not in the table
    #[error("Unknown quest id '{0}'")]
    UnknownQuest(String),

    /// Completion claims a bonus the quest does not offer
    #[error("Quest '{quest}' has no bonus '{code}'")]
    UnknownBonus { quest: String, code: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised while publishing to the notification relay.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Publish URL could not be built from server and topic
    #[error("Invalid publish URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The request never produced a response
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The relay answered with a non-success status
    #[error("Relay rejected message (HTTP {status}): {body}")]
    Status { status: u16, body: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
