//! Points, transforms and number formatting for SVG output

use std::fmt;

/// A 2D point in the document coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single SVG transform step. Steps are applied in list order, as written
/// in the `transform` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
    /// Rotation in degrees around the current origin, clockwise in SVG's
    /// Y-down space
    Rotate(f64),
    Scale(f64),
}

impl Transform {
    pub fn translate(p: Point) -> Self {
        Self::Translate(p.x, p.y)
    }

    /// Map a point through this step
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Transform::Translate(dx, dy) => Point::new(p.x + dx, p.y + dy),
            Transform::Rotate(deg) => {
                let (sin, cos) = deg.to_radians().sin_cos();
                Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
            }
            Transform::Scale(s) => Point::new(p.x * s, p.y * s),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::Translate(x, y) => write!(f, "translate({},{})", fmt_num(x), fmt_num(y)),
            Transform::Rotate(deg) => write!(f, "rotate({})", fmt_num(deg)),
            Transform::Scale(s) => write!(f, "scale({})", fmt_num(s)),
        }
    }
}

/// Value of a `transform` attribute for a list of steps
pub fn transform_attr(steps: &[Transform]) -> String {
    steps
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a point through a transform list the way an SVG viewer does: the
/// last step is applied to the point first
pub fn apply_all(steps: &[Transform], p: Point) -> Point {
    steps.iter().rev().fold(p, |acc, t| t.apply(acc))
}

/// Format a coordinate with at most three decimals and no trailing zeros
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
