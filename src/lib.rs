//! Badge Forge - printable conference badges from an attendee roster and a
//! meal schedule
//!
//! The pipeline reads two delimited tables, builds one SVG template from the
//! schedule, and renders one badge file per attendee.
//!
//! # Example
//!
//! ```rust,no_run
//! use badge_forge::{generate, BadgeConfig};
//!
//! let config = BadgeConfig::new("attendees.csv", "meals.csv").with_output_dir("badges");
//! let report = generate(&config).unwrap();
//! println!("{} badges written", report.written.len());
//! ```

pub mod attendee;
pub mod config;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod renderer;
pub mod session;
pub mod table;
pub mod template;
pub mod writer;

use std::path::PathBuf;

use tracing::{info, warn};

pub use attendee::{AttendeeRecord, FieldMapping};
pub use config::{BadgeConfig, BadgeDimensions, ConfigError};
pub use error::BadgeError;
pub use palette::{RoleColorTable, Rgb};
pub use renderer::{SlotId, SvgConfig};
pub use session::SessionSlot;
pub use table::{read_table, Dialect, TableFormat};
pub use template::{BadgeTemplate, LogoImage, SlotValues};
pub use writer::BadgeWriter;

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written, in attendee order
    pub written: Vec<PathBuf>,
    /// Badges skipped because their file could not be written
    pub failed: Vec<BadgeError>,
    /// Files that replaced a badge written earlier in the same run
    pub overwritten: Vec<PathBuf>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read the inputs of a run: attendees, sessions and the optional logo
pub fn load_inputs(
    config: &BadgeConfig,
) -> Result<(Vec<AttendeeRecord>, Vec<SessionSlot>, Option<LogoImage>), BadgeError> {
    let format = config.table_format();
    let colors = RoleColorTable::default();

    let roster = read_table(&config.attendees, format)?;
    let attendees =
        attendee::attendees_from_rows(&roster.rows, &config.fields, &colors, &roster.path)?;

    let schedule = read_table(&config.meals, format)?;
    let sessions = session::sessions_from_rows(&schedule.rows, &schedule.path)?;

    let logo = config
        .logo
        .as_deref()
        .map(LogoImage::load)
        .transpose()?;

    info!(
        attendees = attendees.len(),
        sessions = sessions.len(),
        logo = logo.is_some(),
        "inputs loaded"
    );
    Ok((attendees, sessions, logo))
}

/// Generate one badge file per attendee
///
/// All input errors abort before anything is written. A failed badge write
/// aborts the run unless `keep_going` is set, in which case it is recorded in
/// the report and the next attendee is processed.
pub fn generate(config: &BadgeConfig) -> Result<RunReport, BadgeError> {
    config.validate()?;
    let (attendees, sessions, logo) = load_inputs(config)?;

    let template = BadgeTemplate::build(&config.dimensions, &sessions, logo.as_ref());

    let mut writer = BadgeWriter::new(&config.output_dir);
    writer.prepare()?;

    let mut report = RunReport::default();
    for (index, record) in attendees.iter().enumerate() {
        let svg = template.render_attendee(record);
        match writer.write(index, record, &svg) {
            Ok(overwritten) => {
                let path = writer.path_for(record);
                if overwritten {
                    report.overwritten.push(path.clone());
                }
                report.written.push(path);
            }
            Err(err) if config.keep_going && err.is_local() => {
                warn!(error = %err, "skipping badge");
                report.failed.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        output_dir = %config.output_dir.display(),
        "badge generation finished"
    );
    Ok(report)
}
