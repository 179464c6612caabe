//! Delimited text tables
//!
//! Tables are read without a header row. Unless an explicit [`Dialect`] is
//! given, the delimiter and quote character are sniffed from the first
//! [`SAMPLE_SIZE`] bytes of the file.

mod sniffer;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BadgeError;

pub use sniffer::{sniff, Dialect, SniffError, SAMPLE_SIZE};

/// How the dialect of a table is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Infer the dialect from a leading sample
    #[default]
    Sniff,
    /// Use the given dialect as is
    Explicit(Dialect),
}

/// One data row with its line number in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line on which the row starts
    pub line: usize,
    pub cells: Vec<String>,
}

/// The rows of a table file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub rows: Vec<Row>,
}

/// Read a table file, sniffing or applying its dialect
pub fn read_table(path: &Path, format: TableFormat) -> Result<Table, BadgeError> {
    let bytes = std::fs::read(path).map_err(|e| BadgeError::resource(path, e))?;
    parse_table(path, &bytes, format)
}

/// Parse table contents already in memory; `path` is only used for reporting
pub fn parse_table(path: &Path, bytes: &[u8], format: TableFormat) -> Result<Table, BadgeError> {
    let dialect = match format {
        TableFormat::Explicit(dialect) => dialect,
        TableFormat::Sniff => {
            let end = bytes.len().min(SAMPLE_SIZE);
            let sample = String::from_utf8_lossy(&bytes[..end]);
            let dialect = sniff(&sample, bytes.len() > SAMPLE_SIZE)
                .map_err(|e| BadgeError::format_detection(path, e.to_string()))?;
            debug!(
                path = %path.display(),
                delimiter = %(dialect.delimiter as char).escape_default(),
                quote = %(dialect.quote as char),
                "sniffed table dialect"
            );
            dialect
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .from_reader(bytes);

    let mut rows = vec![];
    for record in reader.records() {
        let record = record.map_err(|source| BadgeError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 1);
        // only the spaces right after a delimiter go; trailing ones stay
        let cells = record
            .iter()
            .map(|cell| {
                if dialect.skip_initial_space {
                    cell.trim_start_matches(' ').to_string()
                } else {
                    cell.to_string()
                }
            })
            .collect();
        rows.push(Row { line, cells });
    }

    Ok(Table {
        path: path.to_path_buf(),
        dialect,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(table: &Table) -> Vec<Vec<&str>> {
        table
            .rows
            .iter()
            .map(|r| r.cells.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_parse_sniffed_table() {
        let data = b"Doe;Jane;Acme, Inc;Speaker;veg\nRoe;Rick;Foo;Organizer;\n";
        let table = parse_table(Path::new("roster.csv"), data, TableFormat::Sniff).unwrap();
        assert_eq!(
            cells(&table),
            vec![
                vec!["Doe", "Jane", "Acme, Inc", "Speaker", "veg"],
                vec!["Roe", "Rick", "Foo", "Organizer", ""],
            ]
        );
        assert_eq!(table.rows[1].line, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let data = b"a,b\n\nc,d\n";
        let table = parse_table(Path::new("t.csv"), data, TableFormat::Sniff).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn test_quoted_cells() {
        let data = b"\"Doe\",\"Jane\",\"Acme, Univ\",\"Speaker\",\"veg\"\n";
        let table = parse_table(Path::new("t.csv"), data, TableFormat::Sniff).unwrap();
        assert_eq!(cells(&table)[0][2], "Acme, Univ");
    }

    #[test]
    fn test_explicit_dialect_skips_sniffing() {
        let data = b"single\ncolumn\n";
        assert!(matches!(
            parse_table(Path::new("t.csv"), data, TableFormat::Sniff),
            Err(BadgeError::FormatDetection { .. })
        ));
        let table = parse_table(
            Path::new("t.csv"),
            data,
            TableFormat::Explicit(Dialect::with_delimiter(b',')),
        )
        .unwrap();
        assert_eq!(cells(&table), vec![vec!["single"], vec!["column"]]);
    }

    #[test]
    fn test_initial_space_trimmed() {
        let data = b"Doe, Jane, Acme, Speaker, veg\n";
        let table = parse_table(Path::new("t.csv"), data, TableFormat::Sniff).unwrap();
        assert_eq!(cells(&table)[0], vec!["Doe", "Jane", "Acme", "Speaker", "veg"]);
    }

    #[test]
    fn test_trailing_space_kept() {
        let data = b"Doe, Jane , Acme,Speaker, veg\nRoe, Rick , Foo, Organizer, none\n";
        let table = parse_table(Path::new("t.csv"), data, TableFormat::Sniff).unwrap();
        assert!(!table.dialect.skip_initial_space);

        let data = b"Doe, Jane , Acme, Speaker, veg\nRoe, Rick , Foo, Organizer, none\n";
        let table = parse_table(Path::new("t.csv"), data, TableFormat::Sniff).unwrap();
        assert!(table.dialect.skip_initial_space);
        assert_eq!(cells(&table)[1], vec!["Roe", "Rick ", "Foo", "Organizer", "none"]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_table(Path::new("/nonexistent/roster.csv"), TableFormat::Sniff).unwrap_err();
        assert!(matches!(err, BadgeError::ResourceNotFound { .. }));
    }
}
