//! Badge geometry
//!
//! Positions are fractions of the canvas width `w` and height `h`, origin at
//! the top-left corner. The right half of the canvas is the badge face; the
//! left half is the session strip, split into equal bands.

use crate::config::BadgeDimensions;
use crate::geometry::Point;

/// Logical units per physical width unit
pub const UNITS_PER_WIDTH: f64 = 200.0;
/// Logical units per physical height unit
pub const UNITS_PER_HEIGHT: f64 = 100.0;

/// Share of the canvas width taken by the session strip
pub const SESSION_STRIP_FRACTION: f64 = 0.5;

pub const BORDER_STROKE_WIDTH: f64 = 10.0;

pub const NAME_ANCHOR: (f64, f64) = (0.81, 0.4);
pub const NAME_FONT_SIZE: f64 = 640.0;
/// Offset of the last-name line below the first-name line
pub const NAME_LINE_HEIGHT: f64 = 680.0;

pub const INSTITUTION_ANCHOR: (f64, f64) = (0.81, 0.75);
pub const INSTITUTION_FONT_SIZE: f64 = 480.0;

/// The two role ribbons, bottom-right and top-right
pub const ROLE_POLYGONS: [[(f64, f64); 4]; 2] = [
    [(0.99, 0.99), (0.58, 0.99), (0.66, 0.82), (0.96, 0.82)],
    [(0.99, 0.01), (0.58, 0.01), (0.66, 0.2), (0.96, 0.2)],
];

/// Logo side is the smaller of these fractions of `w` and `h`
pub const LOGO_SIZE: (f64, f64) = (0.2, 0.33);
pub const LOGO_ANCHOR: (f64, f64) = (0.58, 0.5);
pub const BAND_LOGO_Y: f64 = 0.87;
pub const BAND_LOGO_SCALE: f64 = 0.6;

pub const DIET_FONT_SIZE: f64 = 480.0;
pub const DIET_OPACITY: f64 = 0.4;
pub const DIET_ROTATION: f64 = -75.0;
/// Horizontal position of the diet marker within its band (0 = right edge,
/// 1 = left edge)
pub const DIET_BAND_OFFSET: f64 = 0.45;
pub const DIET_Y: f64 = 0.5;

pub const DIVIDER_TOP: f64 = 0.05;
pub const DIVIDER_BOTTOM: f64 = 0.95;
pub const DIVIDER_STROKE_WIDTH: f64 = 10.0;
/// Dash length as a fraction of `h`
pub const DIVIDER_DASH: f64 = 0.06;

/// Day, date and hour rows at the top of each band: (y fraction, font size)
pub const DAY_ROW: (f64, f64) = (0.1, 320.0);
pub const DATE_ROW: (f64, f64) = (0.17, 280.0);
pub const HOUR_ROW: (f64, f64) = (0.24, 280.0);

pub const SESSION_LABEL_Y: f64 = 0.5;
pub const SESSION_LABEL_FONT_SIZE: f64 = 280.0;
pub const SESSION_LABEL_LINE_HEIGHT: f64 = 320.0;
pub const SESSION_LABEL_ROTATION: f64 = -90.0;

/// The logical coordinate space of a badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(dimensions: &BadgeDimensions) -> Self {
        Self {
            width: UNITS_PER_WIDTH * dimensions.width,
            height: UNITS_PER_HEIGHT * dimensions.height,
        }
    }

    /// Point at fractions of the canvas size
    pub fn at(&self, (fx, fy): (f64, f64)) -> Point {
        Point::new(fx * self.width, fy * self.height)
    }

    pub fn y(&self, fraction: f64) -> f64 {
        fraction * self.height
    }

    pub fn strip_width(&self) -> f64 {
        SESSION_STRIP_FRACTION * self.width
    }

    /// Width of each of `n` session bands
    pub fn band_width(&self, n: usize) -> f64 {
        self.strip_width() / n as f64
    }

    /// x of the right edge of band `i` (1-based)
    pub fn band_boundary(&self, i: usize, n: usize) -> f64 {
        self.band_x(i as f64, n)
    }

    /// x of the center of band `i` (1-based)
    pub fn band_center(&self, i: usize, n: usize) -> f64 {
        self.band_x(i as f64 - 0.5, n)
    }

    /// x at a fractional band position; band `i` spans `i - 1 ..= i`
    pub fn band_x(&self, position: f64, n: usize) -> f64 {
        self.strip_width() * position / n as f64
    }

    pub fn logo_size(&self) -> f64 {
        (LOGO_SIZE.0 * self.width).min(LOGO_SIZE.1 * self.height)
    }
}
