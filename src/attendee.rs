//! Attendee records normalized from roster rows

use std::path::Path;

use crate::error::BadgeError;
use crate::palette::{RoleColorTable, Rgb};
use crate::table::Row;

/// Extension of the generated badge files
pub const BADGE_EXTENSION: &str = "svg";

/// Column indices of the roster fields: last name, first name, institution,
/// role, dietary code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping(pub [usize; 5]);

impl Default for FieldMapping {
    fn default() -> Self {
        Self([0, 1, 2, 3, 4])
    }
}

impl FieldMapping {
    pub fn new(indices: [usize; 5]) -> Self {
        Self(indices)
    }

    /// Number of cells a row needs for every index to be addressable
    pub fn required_cells(&self) -> usize {
        self.0.iter().max().map_or(0, |max| max + 1)
    }

    /// Pick the five logical fields out of a row, in canonical order
    fn select<'a>(&self, cells: &'a [String]) -> Option<[&'a str; 5]> {
        let mut out = [""; 5];
        for (slot, index) in out.iter_mut().zip(self.0) {
            *slot = cells.get(index)?.as_str();
        }
        Some(out)
    }
}

/// A display-ready attendee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRecord {
    pub last_name: String,
    pub first_name: String,
    pub institution: String,
    pub role: String,
    pub dietary_code: String,
    pub accent_color: Rgb,
    pub file_name: String,
}

impl AttendeeRecord {
    /// Normalize raw field values
    pub fn new(
        last: &str,
        first: &str,
        institution: &str,
        role: &str,
        diet: &str,
        colors: &RoleColorTable,
    ) -> Self {
        let last_name = last.to_uppercase();
        let first_name = title_case(first);
        let file_name = badge_file_name(&last_name, &first_name);
        Self {
            last_name,
            first_name,
            institution: title_case(institution),
            role: role.to_string(),
            dietary_code: diet.to_uppercase(),
            accent_color: colors.color_of(role),
            file_name,
        }
    }

    /// Normalize a roster row through a column mapping
    pub fn from_row(
        row: &Row,
        mapping: &FieldMapping,
        colors: &RoleColorTable,
        source: &Path,
    ) -> Result<Self, BadgeError> {
        let [last, first, institution, role, diet] = mapping.select(&row.cells).ok_or_else(|| {
            BadgeError::malformed_row(source, row.line, mapping.required_cells(), &row.cells)
        })?;
        Ok(Self::new(last, first, institution, role, diet, colors))
    }
}

/// Normalize every row of a roster
pub fn attendees_from_rows(
    rows: &[Row],
    mapping: &FieldMapping,
    colors: &RoleColorTable,
    source: &Path,
) -> Result<Vec<AttendeeRecord>, BadgeError> {
    rows.iter()
        .map(|row| AttendeeRecord::from_row(row, mapping, colors, source))
        .collect()
}

/// `{LAST}_{First}_badge.svg`, from already-normalized names
pub fn badge_file_name(last_name: &str, first_name: &str) -> String {
    format!("{}_{}_badge.{}", last_name, first_name, BADGE_EXTENSION)
}

/// Capitalize the first letter of every run of letters and lower-case the
/// rest, so `jean-luc o'neil` becomes `Jean-Luc O'Neil`
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
