//! Role accent colors
//!
//! The accent color of a badge is looked up from the attendee's role. The
//! table is closed: two named roles have their own color and every other
//! role falls back to [`DEFAULT_ROLE_COLOR`].

use std::fmt;

/// An sRGB color, written as `rgb(r,g,b)` in SVG attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 150, 0);

pub const ORGANIZER_ROLE: &str = "Organizer";
pub const SPEAKER_ROLE: &str = "Speaker";

pub const ORGANIZER_COLOR: Rgb = RED;
pub const SPEAKER_COLOR: Rgb = GREEN;
pub const DEFAULT_ROLE_COLOR: Rgb = WHITE;

/// Fill of the dietary marker text
pub const DIET_COLOR: Rgb = GREEN;

/// Mapping from role name to accent color
#[derive(Debug, Clone, PartialEq)]
pub struct RoleColorTable {
    entries: Vec<(&'static str, Rgb)>,
    default: Rgb,
}

impl Default for RoleColorTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (ORGANIZER_ROLE, ORGANIZER_COLOR),
                (SPEAKER_ROLE, SPEAKER_COLOR),
            ],
            default: DEFAULT_ROLE_COLOR,
        }
    }
}

impl RoleColorTable {
    /// Color for a role; roles are matched exactly and unknown roles get the
    /// default color
    pub fn color_of(&self, role: &str) -> Rgb {
        self.entries
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, color)| *color)
            .unwrap_or(self.default)
    }

    pub fn default_color(&self) -> Rgb {
        self.default
    }
}
