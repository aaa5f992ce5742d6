//! Error types for mounting the viewer and loading its model.

use thiserror::Error;

/// Result type for mount operations.
pub type MountResult<T> = Result<T, MountError>;

/// Errors that stop a viewer instance from starting. The host page keeps running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MountError {
    #[error("mount container #{0} not found")]
    ContainerMissing(String),

    #[error("browser window or document unavailable")]
    NoDocument,

    #[error("failed to create render surface: {0}")]
    Surface(String),

    #[error("failed to bind host listener: {0}")]
    Listener(String),

    #[error("invalid viewer config on #{container}: {reason}")]
    InvalidConfig { container: String, reason: String },
}

/// Errors reported when the model cannot be shown. Never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to load model {path}: {reason}")]
    Failed { path: String, reason: String },

    #[error("model {0} contains no scene")]
    MissingScene(String),
}
