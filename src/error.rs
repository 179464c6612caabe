//! Error types for the badge pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while reading inputs, building the template, or
/// writing badges
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The delimiter/quoting convention of a table could not be inferred
    #[error("format detection failed for '{}': {reason}", path.display())]
    FormatDetection { path: PathBuf, reason: String },

    /// A row does not provide the cells the configuration addresses
    #[error(
        "malformed row {row} in '{}': expected at least {expected} fields, found {found} [{content}]",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    /// An input file (roster, schedule, logo) is missing or unreadable
    #[error("cannot read '{}': {source}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table could not be decoded under the detected dialect
    #[error("failed to parse table '{}': {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A badge file could not be written
    #[error("failed to write badge '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BadgeError {
    /// Create a format detection error
    pub fn format_detection(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FormatDetection {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing/unreadable resource error
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed row error from the offending cells
    pub fn malformed_row(
        path: impl Into<PathBuf>,
        row: usize,
        expected: usize,
        cells: &[String],
    ) -> Self {
        Self::MalformedRow {
            path: path.into(),
            row,
            expected,
            found: cells.len(),
            content: cells.join(", "),
        }
    }

    /// Whether the error only affects a single badge
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
