//! # Assembly Error Types
//!
//! All errors that can occur while loading a catalog or assembling a maze.
//!
//! Only config loading is fallible in the `Result` sense. During a run these
//! values are recorded as diagnostics and the run carries on.

use thiserror::Error;

use crate::geometry::AnchorName;
use crate::placement::SectionRole;

/// Errors that can occur in the assembly system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The catalog has no entry for a required role (start, end, dead end).
    #[error("no {role} section configured in the catalog")]
    MissingSection {
        /// The role with no catalog entry.
        role: SectionRole,
    },

    /// A connector anchor needed for alignment is absent from a geometry.
    #[error("{anchor} not found on {section}")]
    MissingConnector {
        /// Geometry name of the section.
        section: String,
        /// The anchor that could not be resolved.
        anchor: AnchorName,
    },

    /// A non-connector anchor (such as the spawn point) is absent.
    #[error("{anchor} not found in the {section} section")]
    MissingAnchor {
        /// Geometry name of the section.
        section: String,
        /// The anchor that could not be resolved.
        anchor: AnchorName,
    },

    /// A start or end section whose quota allows no placement.
    #[error("{role} section quota allows no placement")]
    QuotaExhausted {
        /// The role whose single entry could not be placed.
        role: SectionRole,
    },

    /// A consumer queried the maze before generation completed.
    #[error("maze generation has not completed")]
    NotReady,

    /// Catalog configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A section entry references a geometry that was never defined.
    #[error("unknown geometry: {0}")]
    UnknownGeometry(String),

    /// Catalog file is not valid TOML for the expected schema.
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// Catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(String),
}

impl From<toml::de::Error> for AssemblyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AssemblyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
