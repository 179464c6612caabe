//! Badge output files

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::attendee::AttendeeRecord;
use crate::error::BadgeError;

/// Writes rendered badges into an output directory
#[derive(Debug)]
pub struct BadgeWriter {
    output_dir: PathBuf,
    /// File name -> index of the attendee that last wrote it
    written: HashMap<String, usize>,
}

impl BadgeWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: HashMap::new(),
        }
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare(&self) -> Result<(), BadgeError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| BadgeError::Write {
            path: self.output_dir.clone(),
            source,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, record: &AttendeeRecord) -> PathBuf {
        self.output_dir.join(&record.file_name)
    }

    /// Write one badge. An existing file is replaced; replacing a file
    /// written earlier in the same run is reported as `Ok(true)`.
    ///
    /// A file name that would leave the output directory is a write failure.
    pub fn write(
        &mut self,
        index: usize,
        record: &AttendeeRecord,
        svg: &str,
    ) -> Result<bool, BadgeError> {
        let path = self.path_for(record);
        if !is_plain_file_name(&record.file_name) {
            return Err(BadgeError::Write {
                path,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "badge file name is not a plain file name",
                ),
            });
        }
        std::fs::write(&path, svg).map_err(|source| BadgeError::Write {
            path: path.clone(),
            source,
        })?;

        let overwritten = match self.written.insert(record.file_name.clone(), index) {
            Some(previous) => {
                warn!(
                    file = %path.display(),
                    previous = previous + 1,
                    current = index + 1,
                    "badge file name collision, earlier badge overwritten"
                );
                true
            }
            None => false,
        };
        info!(file = %path.display(), "wrote badge");
        Ok(overwritten)
    }
}

/// A single normal path component with no separators
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::RoleColorTable;

    fn record(last: &str, first: &str) -> AttendeeRecord {
        AttendeeRecord::new(last, first, "Acme", "Speaker", "veg", &RoleColorTable::default())
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BadgeWriter::new(dir.path().join("a/b"));
        writer.prepare().unwrap();
        writer.prepare().unwrap();
        assert!(writer.output_dir().is_dir());
    }

    #[test]
    fn test_write_and_collision() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BadgeWriter::new(dir.path());
        writer.prepare().unwrap();

        assert!(!writer.write(0, &record("Doe", "Jane"), "first").unwrap());
        assert!(!writer.write(1, &record("Roe", "Rick"), "other").unwrap());
        assert!(writer.write(2, &record("doe", "jane"), "second").unwrap());

        let content = std::fs::read_to_string(dir.path().join("DOE_Jane_badge.svg")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BadgeWriter::new(dir.path().join("missing"));
        let err = writer.write(0, &record("Doe", "Jane"), "x").unwrap_err();
        assert!(err.is_local());
    }

    #[test]
    fn test_name_with_path_parts_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut writer = BadgeWriter::new(&out);
        writer.prepare().unwrap();

        for last in ["../evil", "a/b", "..\\evil"] {
            let err = writer.write(0, &record(last, "Jane"), "x").unwrap_err();
            match err {
                BadgeError::Write { ref source, .. } => {
                    assert_eq!(source.kind(), io::ErrorKind::InvalidInput)
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(!dir.path().join("EVIL_Jane_badge.svg").exists());
        assert!(std::fs::read_dir(&out).unwrap().next().is_none());
    }

    #[test]
    fn test_plain_file_name() {
        assert!(is_plain_file_name("DOE_Jane_badge.svg"));
        assert!(is_plain_file_name("DE LA CRUZ_Ana_badge.svg"));
        assert!(!is_plain_file_name("../EVIL_Jane_badge.svg"));
        assert!(!is_plain_file_name("/EVIL_Jane_badge.svg"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }
}
