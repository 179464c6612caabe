//! End-to-end tests for badge generation

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use badge_forge::palette::{DEFAULT_ROLE_COLOR, SPEAKER_COLOR};
use badge_forge::{generate, BadgeConfig, BadgeError, FieldMapping};

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn setup(roster: &str, meals: &str) -> (TempDir, BadgeConfig) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let attendees = write(dir.path(), "attendees.csv", roster.as_bytes());
    let meals = write(dir.path(), "meals.csv", meals.as_bytes());
    let config = BadgeConfig::new(attendees, meals).with_output_dir(dir.path().join("out"));
    (dir, config)
}

fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => vec![],
    };
    names.sort();
    names
}

#[test]
fn test_single_attendee_single_session() {
    let (dir, config) = setup(
        "Doe,Jane,Acme Univ,Speaker,veg\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );

    let report = generate(&config).expect("Should generate");
    assert!(report.is_success());
    assert_eq!(output_files(&dir.path().join("out")), vec!["DOE_Jane_badge.svg"]);

    let svg = fs::read_to_string(dir.path().join("out/DOE_Jane_badge.svg")).unwrap();
    assert!(svg.contains(r#"<tspan x="0" y="0">Jane</tspan>"#));
    assert!(svg.contains(r#"<tspan x="0" y="680">DOE</tspan>"#));
    assert!(svg.contains(">Acme Univ</text>"));
    assert!(svg.contains(">VEG</text>"));
    assert!(svg.contains(&format!(r#"<g fill="{}">"#, SPEAKER_COLOR)));
    // the only session band spans the left half of the canvas
    assert!(svg.contains(r#"viewBox="0 0 18000 5500""#));
    assert_eq!(svg.matches("<line").count(), 1);
    assert!(svg.contains(r#"<line x1="9000" "#));
    for text in ["Mon", "2024-01-01", "09:00", "Breakfast", "Buffet"] {
        assert!(svg.contains(&format!(">{}<", text)), "missing {text}");
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let (dir, config) = setup(
        "Doe,Jane,Acme Univ,Speaker,veg\nRoe,Rick,Foo,Organizer,\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\nMon,2024-01-01,12:30,Lunch,Hall B\n",
    );
    generate(&config).unwrap();
    let first = fs::read(dir.path().join("out/ROE_Rick_badge.svg")).unwrap();
    generate(&config).unwrap();
    let second = fs::read(dir.path().join("out/ROE_Rick_badge.svg")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_row_aborts_before_writing() {
    let (dir, config) = setup(
        "Doe,Jane,Acme,Speaker,veg\nRoe,Rick,Foo\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::MalformedRow { row: 2, found: 3, .. }));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_short_row_among_consistent_rows_is_a_row_error() {
    let (dir, config) = setup(
        "Doe,Jane,Acme,Speaker,veg
Roe,Rick,Foo,Organizer
Poe,Ed,Bar,Speaker,none
",
        "Mon,2024-01-01,09:00,Breakfast,Buffet
",
    );
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::MalformedRow { row: 2, expected: 5, found: 4, .. }));
    assert!(err.to_string().contains("malformed row 2"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_name_collision_keeps_last_attendee() {
    let (dir, config) = setup(
        "Doe,Jane,First Inst,Speaker,veg\nDOE,jane,second inst,Guest,\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    let report = generate(&config).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.overwritten.len(), 1);
    assert_eq!(output_files(&dir.path().join("out")), vec!["DOE_Jane_badge.svg"]);

    let svg = fs::read_to_string(dir.path().join("out/DOE_Jane_badge.svg")).unwrap();
    assert!(svg.contains("Second Inst"));
    assert!(!svg.contains("First Inst"));
    assert!(svg.contains(&format!(r#"<g fill="{}">"#, DEFAULT_ROLE_COLOR)));
}

#[test]
fn test_format_detection_failure_is_fatal() {
    let (dir, config) = setup("Doe\nRoe\n", "Mon,2024-01-01,09:00,Breakfast,Buffet\n");
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::FormatDetection { .. }));
    assert!(err.to_string().contains("format detection"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_schedule_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let attendees = write(dir.path(), "attendees.csv", b"Doe,Jane,Acme,Speaker,veg\n");
    let config = BadgeConfig::new(attendees, dir.path().join("nope.csv"))
        .with_output_dir(dir.path().join("out"));
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::ResourceNotFound { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_missing_logo_is_fatal() {
    let (dir, config) = setup(
        "Doe,Jane,Acme,Speaker,veg\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    let config = config.with_logo(dir.path().join("logo.png"));
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::ResourceNotFound { .. }));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_logo_and_reordered_semicolon_roster() {
    let (dir, config) = setup(
        "jane;doe;VEGAN;Organizer;acme univ\nrick;roe;;Speaker;foo\n",
        "Mon;2024-01-01;09:00;Breakfast;Buffet\nMon;2024-01-01;12:30;Lunch;Hall B\n",
    );
    let logo = write(dir.path(), "logo.png", b"\x89PNG\r\n");
    let config = config
        .with_fields(FieldMapping::new([1, 0, 4, 3, 2]))
        .with_logo(logo);

    generate(&config).unwrap();
    assert_eq!(
        output_files(&dir.path().join("out")),
        vec!["DOE_Jane_badge.svg", "ROE_Rick_badge.svg"]
    );

    let svg = fs::read_to_string(dir.path().join("out/DOE_Jane_badge.svg")).unwrap();
    assert!(svg.contains(">Acme Univ</text>"));
    assert!(svg.contains(">VEGAN</text>"));
    assert!(svg.contains("data:image/png;base64,iVBORw0K"));
    assert_eq!(svg.matches(r##"xlink:href="#logo""##).count(), 3);
    assert_eq!(svg.matches(r##"xlink:href="#diet""##).count(), 2);
}

#[test]
fn test_explicit_delimiter() {
    let (dir, config) = setup(
        "Doe|Jane|Acme|Speaker|veg\n",
        "Mon|2024-01-01|09:00|Breakfast|Buffet\n",
    );
    let config = config.with_delimiter(b'|');
    generate(&config).unwrap();
    assert_eq!(output_files(&dir.path().join("out")), vec!["DOE_Jane_badge.svg"]);
}

#[test]
fn test_write_failure_aborts_by_default() {
    let (dir, config) = setup(
        "Doe,Jane,Acme,Speaker,veg\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    // a regular file where the output directory should be
    let blocker = write(dir.path(), "blocked", b"");
    let config = config.with_output_dir(&blocker);
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::Write { .. }));
}

#[test]
fn test_keep_going_skips_failed_badges() {
    let (dir, config) = setup(
        "Doe,Jane,Acme,Speaker,veg\nRoe,Rick,Foo,Organizer,\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    // a directory squatting on the first badge's file name
    fs::create_dir_all(dir.path().join("out/DOE_Jane_badge.svg")).unwrap();
    let config = config.with_keep_going(true);

    let report = generate(&config).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.written, vec![dir.path().join("out/ROE_Rick_badge.svg")]);
}

#[test]
fn test_name_with_path_parts_stays_in_output_dir() {
    let (dir, config) = setup(
        "../evil,Jane,Acme,Speaker,veg\nRoe,Rick,Foo,Organizer,none\n",
        "Mon,2024-01-01,09:00,Breakfast,Buffet\n",
    );
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BadgeError::Write { .. }));
    assert!(!dir.path().join("EVIL_Jane_badge.svg").exists());

    let report = generate(&config.with_keep_going(true)).unwrap();
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.written, vec![dir.path().join("out/ROE_Rick_badge.svg")]);
    assert!(!dir.path().join("EVIL_Jane_badge.svg").exists());
}
