//! Zoning error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::scene::ObjectId;
use crate::zones::ZoneId;

/// Errors reported by the zone manager
#[derive(Debug, Error)]
pub enum ZoningError {
    /// Object (or zone space) registered twice
    #[error("object {0} is already registered")]
    AlreadyRegistered(ObjectId),

    /// Object is not known to the manager
    #[error("object {0} is not registered")]
    NotRegistered(ObjectId),

    /// Operation needs a zone space but got a plain object
    #[error("object {0} is not a zone space")]
    NotAZoneSpace(ObjectId),

    /// Zone spaces must define at least one zone
    #[error("zone space {0} must define at least one zone")]
    NoZones(ObjectId),

    /// The scene dropped a zone space without unregistering it first
    #[error("zone space {0} was dropped while still registered")]
    ZoneSpaceDropped(ObjectId),

    /// Zone ID outside the allocated range or in a hole
    #[error("zone {0} is not allocated")]
    InvalidZone(ZoneId),

    /// Invalid manager configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Internal bookkeeping found inconsistent by `verify_state`
    #[error("zoning state corrupt: {0}")]
    Corrupt(String),
}

/// Result type for zoning operations
pub type ZoningResult<T> = Result<T, ZoningError>;
