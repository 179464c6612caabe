//! Run configuration
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line overrides applied by the binary through the `with_*`
//! builders.
//!
//! ```toml
//! badge-width = 90
//! badge-height = 55
//! output-dir = "out"
//! csv-fields = [0, 1, 2, 3, 4]
//! logo = "logo.png"
//! delimiter = ";"
//! keep-going = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::attendee::FieldMapping;
use crate::table::{Dialect, TableFormat};

/// Errors that can occur when loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Physical badge size, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for BadgeDimensions {
    fn default() -> Self {
        Self {
            width: 90.0,
            height: 55.0,
        }
    }
}

impl BadgeDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Configuration for a badge generation run
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeConfig {
    /// Roster table path
    pub attendees: PathBuf,
    /// Schedule table path
    pub meals: PathBuf,
    pub dimensions: BadgeDimensions,
    pub output_dir: PathBuf,
    /// Roster column mapping (last, first, institution, role, diet)
    pub fields: FieldMapping,
    pub logo: Option<PathBuf>,
    /// Explicit delimiter; `None` sniffs each table
    pub delimiter: Option<u8>,
    /// Skip badges that fail to write instead of aborting
    pub keep_going: bool,
}

/// TOML structure for deserializing config files
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TomlConfig {
    badge_width: Option<f64>,
    badge_height: Option<f64>,
    output_dir: Option<PathBuf>,
    csv_fields: Option<[usize; 5]>,
    logo: Option<PathBuf>,
    delimiter: Option<char>,
    keep_going: Option<bool>,
}

impl BadgeConfig {
    /// Create a configuration with default options for the given inputs
    pub fn new(attendees: impl Into<PathBuf>, meals: impl Into<PathBuf>) -> Self {
        Self {
            attendees: attendees.into(),
            meals: meals.into(),
            dimensions: BadgeDimensions::default(),
            output_dir: PathBuf::from("out"),
            fields: FieldMapping::default(),
            logo: None,
            delimiter: None,
            keep_going: false,
        }
    }

    /// Apply the options of a TOML config file
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_str(&content)
    }

    /// Apply the options of a TOML string
    pub fn merge_str(mut self, content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        if let Some(width) = parsed.badge_width {
            self.dimensions.width = width;
        }
        if let Some(height) = parsed.badge_height {
            self.dimensions.height = height;
        }
        if let Some(dir) = parsed.output_dir {
            self.output_dir = dir;
        }
        if let Some(fields) = parsed.csv_fields {
            self.fields = FieldMapping::new(fields);
        }
        if parsed.logo.is_some() {
            self.logo = parsed.logo;
        }
        if let Some(delimiter) = parsed.delimiter {
            self.delimiter = Some(delimiter_byte(delimiter)?);
        }
        if let Some(keep_going) = parsed.keep_going {
            self.keep_going = keep_going;
        }
        Ok(self)
    }

    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.dimensions = BadgeDimensions::new(width, height);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.dimensions.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.dimensions.height = height;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_fields(mut self, fields: FieldMapping) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Table format used for both input tables
    pub fn table_format(&self) -> TableFormat {
        match self.delimiter {
            Some(delimiter) => TableFormat::Explicit(Dialect::with_delimiter(delimiter)),
            None => TableFormat::Sniff,
        }
    }

    /// Reject values the template cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let BadgeDimensions { width, height } = self.dimensions;
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "badge width must be positive, got {width}"
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "badge height must be positive, got {height}"
            )));
        }
        Ok(())
    }
}

/// Convert a delimiter character to the single byte the table reader uses
pub fn delimiter_byte(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::Invalid(format!(
            "delimiter must be a single ASCII character, got {delimiter:?}"
        )))
    }
}
