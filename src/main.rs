//! Badge Forge CLI
//!
//! Usage:
//!   badge-forge [OPTIONS] <ATTENDEES_CSV> <MEALS_CSV>
//!
//! Options:
//!   -f, --csv-fields <N>...      Roster columns of last, first, institution, role, diet
//!   -w, --badge-width <W>        Badge width in millimeters
//!   -h, --badge-height <H>       Badge height in millimeters
//!       --logo <FILE>            Logo image placed on every badge
//!   -o, --output-dir <DIR>       Output directory
//!   -c, --config <FILE>          TOML config file
//!   -d, --delimiter <C>          Table delimiter (disables detection)
//!       --keep-going             Skip badges that cannot be written
//!   -v, --verbose                More log output (repeatable)
//!       --help                   Print help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::Level;

use badge_forge::config::delimiter_byte;
use badge_forge::{generate, BadgeConfig, BadgeError, FieldMapping};

#[derive(Parser)]
#[command(name = "badge-forge")]
#[command(about = "Generate printable conference badges from an attendee roster and a meal schedule")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Attendee roster (delimited text)
    attendees_csv: PathBuf,

    /// Meal/session schedule: day, date, hour, label, sub-label
    meals_csv: PathBuf,

    /// Roster column indices of last name, first name, institution, role, diet
    #[arg(short = 'f', long, num_args = 5, value_name = "N")]
    csv_fields: Option<Vec<usize>>,

    /// Badge width in millimeters [default: 90]
    #[arg(short = 'w', long)]
    badge_width: Option<f64>,

    /// Badge height in millimeters [default: 55]
    #[arg(short = 'h', long)]
    badge_height: Option<f64>,

    /// Logo image placed on every badge
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output directory [default: out]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML config file; command-line options take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Table delimiter; disables format detection
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Skip badges that cannot be written instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn build_config(cli: &Cli) -> Result<BadgeConfig, BadgeError> {
    let mut config = BadgeConfig::new(&cli.attendees_csv, &cli.meals_csv);
    if let Some(path) = &cli.config {
        config = config.merge_file(path)?;
    }

    if let Some(fields) = &cli.csv_fields {
        // clap enforces exactly five values
        let mut indices = [0usize; 5];
        indices.copy_from_slice(&fields[..5]);
        config = config.with_fields(FieldMapping::new(indices));
    }
    if let Some(width) = cli.badge_width {
        config = config.with_width(width);
    }
    if let Some(height) = cli.badge_height {
        config = config.with_height(height);
    }
    if let Some(logo) = &cli.logo {
        config = config.with_logo(logo);
    }
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter_byte(delimiter)?);
    }
    if cli.keep_going {
        config = config.with_keep_going(true);
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = build_config(&cli).and_then(|config| generate(&config));
    match result {
        Ok(report) if report.is_success() => {
            eprintln!("{} badge(s) written", report.written.len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for err in &report.failed {
                eprintln!("error: {}", err);
            }
            eprintln!(
                "{} badge(s) written, {} failed",
                report.written.len(),
                report.failed.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badge_forge::BadgeDimensions;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["badge-forge", "a.csv", "m.csv"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config, BadgeConfig::new("a.csv", "m.csv"));
    }

    #[test]
    fn test_short_h_is_height() {
        let cli = Cli::try_parse_from([
            "badge-forge", "a.csv", "m.csv", "-w", "100", "-h", "60", "-f", "1", "0", "2", "3", "4",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.dimensions, BadgeDimensions::new(100.0, 60.0));
        assert_eq!(config.fields, FieldMapping::new([1, 0, 2, 3, 4]));
    }

    #[test]
    fn test_csv_fields_requires_five_values() {
        let result = Cli::try_parse_from(["badge-forge", "a.csv", "m.csv", "-f", "0", "1", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delimiter_option() {
        let cli = Cli::try_parse_from(["badge-forge", "a.csv", "m.csv", "-d", ";"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.delimiter, Some(b';'));
    }
}
