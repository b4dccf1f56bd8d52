//! Error types for MTD name resolution

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// MTD index errors
#[derive(Debug, Error)]
pub enum MtdIndexError {
    /// The device table could not be opened
    #[error("Error opening {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Reading the device table failed part way through
    #[error("Error scanning {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The unit number of a device entry is not a non-negative integer
    #[error("Error converting {field:?} to unit: {source}")]
    InvalidUnit {
        field: String,
        #[source]
        source: ParseIntError,
    },

    /// A device entry line lacks the name field
    #[error("Malformed MTD entry: {line:?}")]
    MalformedEntry { line: String },

    /// No partition with this name exists in the device table
    #[error("MTD device not found: {0}")]
    NotFound(String),

    /// Missing required parameter
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },
}

impl MtdIndexError {
    /// The device table was unavailable or unreadable
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read { .. })
    }

    /// The device table contained a corrupt device entry
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::InvalidUnit { .. } | Self::MalformedEntry { .. })
    }

    /// The table was read fine but has no such partition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for MTD index operations
pub type Result<T> = std::result::Result<T, MtdIndexError>;
