//! Meal/session schedule entries

use std::path::Path;

use crate::error::BadgeError;
use crate::table::Row;

/// Number of cells a schedule row must provide
pub const SESSION_FIELDS: usize = 5;

/// One column of the session strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSlot {
    pub day: String,
    pub date: String,
    pub hour: String,
    pub label: String,
    pub sub_label: String,
}

impl SessionSlot {
    pub fn new(day: &str, date: &str, hour: &str, label: &str, sub_label: &str) -> Self {
        Self {
            day: day.to_string(),
            date: date.to_string(),
            hour: hour.to_string(),
            label: label.to_string(),
            sub_label: sub_label.to_string(),
        }
    }

    /// Take the fields positionally; cells past the fifth are ignored
    pub fn from_row(row: &Row, source: &Path) -> Result<Self, BadgeError> {
        match row.cells.as_slice() {
            [day, date, hour, label, sub_label, ..] => {
                Ok(Self::new(day, date, hour, label, sub_label))
            }
            cells => Err(BadgeError::malformed_row(
                source,
                row.line,
                SESSION_FIELDS,
                cells,
            )),
        }
    }
}

/// Convert every schedule row, keeping file order
pub fn sessions_from_rows(rows: &[Row], source: &Path) -> Result<Vec<SessionSlot>, BadgeError> {
    rows.iter()
        .map(|row| SessionSlot::from_row(row, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row {
            line: 1,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_from_row() {
        let slot = SessionSlot::from_row(
            &row(&["Mon", "2024-01-01", "09:00", "Breakfast", "Buffet"]),
            Path::new("meals.csv"),
        )
        .unwrap();
        assert_eq!(
            slot,
            SessionSlot::new("Mon", "2024-01-01", "09:00", "Breakfast", "Buffet")
        );
    }

    #[test]
    fn test_extra_cells_ignored() {
        let slot = SessionSlot::from_row(
            &row(&["Mon", "2024-01-01", "09:00", "Lunch", "Hall B", "note"]),
            Path::new("meals.csv"),
        )
        .unwrap();
        assert_eq!(slot.sub_label, "Hall B");
    }

    #[test]
    fn test_short_row() {
        let result = SessionSlot::from_row(&row(&["Mon", "09:00"]), Path::new("meals.csv"));
        assert!(matches!(
            result,
            Err(BadgeError::MalformedRow {
                expected: 5,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            row(&["Mon", "d", "h", "Lunch", ""]),
            row(&["Tue", "d", "h", "Dinner", ""]),
        ];
        let slots = sessions_from_rows(&rows, Path::new("meals.csv")).unwrap();
        let labels: Vec<_> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Lunch", "Dinner"]);
    }
}
