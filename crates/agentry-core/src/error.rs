//! Error types for Agentry

use std::path::PathBuf;

use thiserror::Error;

use crate::roles::Role;

/// Main error type for component resolution
#[derive(Error, Debug)]
pub enum AgentryError {
    #[error("invalid component reference `{reference}`: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("no {role} implementation declared in {}", path.display())]
    RoleNotFound { role: Role, path: PathBuf },

    #[error("cannot resolve `{id}` as {role}: {reason}")]
    Unresolved {
        id: String,
        role: Role,
        reason: String,
    },

    #[error("agent configuration {} is missing required section [{section}]", path.display())]
    MissingSection { path: PathBuf, section: Role },

    #[error("{0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, AgentryError>;
