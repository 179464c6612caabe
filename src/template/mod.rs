//! The shared badge template
//!
//! The geometry of a badge depends only on the badge size, the schedule and
//! the logo, so it is built once per run. Attendee-specific values live in
//! [`SlotId`] holes and are substituted by [`BadgeTemplate::render`], which
//! leaves the template untouched:
//!
//! ```rust
//! use badge_forge::{BadgeTemplate, BadgeDimensions, SessionSlot, SlotValues};
//! use badge_forge::palette::SPEAKER_COLOR;
//!
//! let sessions = vec![SessionSlot::new("Mon", "2024-01-01", "09:00", "Breakfast", "Buffet")];
//! let template = BadgeTemplate::build(&BadgeDimensions::default(), &sessions, None);
//!
//! let svg = template.render(&SlotValues {
//!     first_name: "Jane".into(),
//!     last_name: "DOE".into(),
//!     institution: "Acme Univ".into(),
//!     role_fill: SPEAKER_COLOR,
//!     diet: "VEG".into(),
//! });
//! assert!(svg.contains("Breakfast"));
//! assert!(svg.contains(">DOE<"));
//! ```

pub mod layout;
mod logo;

use std::borrow::Cow;

use crate::attendee::AttendeeRecord;
use crate::config::BadgeDimensions;
use crate::geometry::{fmt_num, Point, Transform};
use crate::palette::{Rgb, BLACK, DIET_COLOR, WHITE};
use crate::renderer::{Content, Markup, SlotId, Style, SvgBuilder, SvgConfig, TextLine};
use crate::session::SessionSlot;

pub use layout::Canvas;
pub use logo::{mime_for_path, LogoImage};

use layout::*;

/// Id of the logo image definition
pub const LOGO_ID: &str = "logo";
/// Id of the dietary-code text definition
pub const DIET_ID: &str = "diet";

/// Per-attendee values for every slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotValues {
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub role_fill: Rgb,
    pub diet: String,
}

impl SlotValues {
    pub fn get(&self, slot: SlotId) -> Cow<'_, str> {
        match slot {
            SlotId::FirstName => Cow::Borrowed(&self.first_name),
            SlotId::LastName => Cow::Borrowed(&self.last_name),
            SlotId::Institution => Cow::Borrowed(&self.institution),
            SlotId::RoleFill => Cow::Owned(self.role_fill.to_string()),
            SlotId::Diet => Cow::Borrowed(&self.diet),
        }
    }
}

impl From<&AttendeeRecord> for SlotValues {
    fn from(record: &AttendeeRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            institution: record.institution.clone(),
            role_fill: record.accent_color,
            diet: record.dietary_code.clone(),
        }
    }
}

/// A badge document with holes for the attendee values
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeTemplate {
    markup: Markup,
    canvas: Canvas,
    session_count: usize,
    has_logo: bool,
}

impl BadgeTemplate {
    /// Build the template with default SVG output options
    pub fn build(
        dimensions: &BadgeDimensions,
        sessions: &[SessionSlot],
        logo: Option<&LogoImage>,
    ) -> Self {
        Self::build_with_config(dimensions, sessions, logo, &SvgConfig::default())
    }

    pub fn build_with_config(
        dimensions: &BadgeDimensions,
        sessions: &[SessionSlot],
        logo: Option<&LogoImage>,
        config: &SvgConfig,
    ) -> Self {
        let canvas = Canvas::new(dimensions);
        let (w, h) = (canvas.width, canvas.height);
        let mut svg = SvgBuilder::new(config.clone());

        svg.add_rect(
            0.0,
            0.0,
            w,
            h,
            &Style::new().stroke(BLACK, BORDER_STROKE_WIDTH).fill(WHITE),
        );

        svg.add_multiline_text(
            &[
                TextLine::new(Content::Slot(SlotId::FirstName), 0.0),
                TextLine::new(Content::Slot(SlotId::LastName), NAME_LINE_HEIGHT),
            ],
            &Style::new().centered().font_size(NAME_FONT_SIZE),
            &[Transform::translate(canvas.at(NAME_ANCHOR))],
        );

        svg.add_text(
            Content::Slot(SlotId::Institution),
            Some(canvas.at(INSTITUTION_ANCHOR)),
            &Style::new().centered().font_size(INSTITUTION_FONT_SIZE),
            &[],
        );

        svg.start_group(&Style::new().fill_slot(SlotId::RoleFill));
        for polygon in ROLE_POLYGONS {
            let points: Vec<Point> = polygon.iter().map(|f| canvas.at(*f)).collect();
            svg.add_polygon(&points, &Style::new());
        }
        svg.end_group();

        if let Some(logo) = logo {
            let size = canvas.logo_size();
            svg.define_image(
                LOGO_ID,
                &logo.data_uri(),
                size,
                size,
                &[Transform::Translate(-0.5 * size, -0.5 * size)],
            );
            svg.add_use(LOGO_ID, Some(canvas.at(LOGO_ANCHOR)), &[]);
        }

        svg.define_text(
            DIET_ID,
            Content::Slot(SlotId::Diet),
            &Style::new()
                .centered()
                .font_size(DIET_FONT_SIZE)
                .opacity(DIET_OPACITY)
                .fill(DIET_COLOR),
        );

        let n = sessions.len();
        let divider = Style::new()
            .stroke(BLACK, DIVIDER_STROKE_WIDTH)
            .dashed(canvas.y(DIVIDER_DASH).round());
        for (i, session) in (1..).zip(sessions) {
            let x = canvas.band_boundary(i, n);
            svg.add_line(
                Point::new(x, canvas.y(DIVIDER_TOP)),
                Point::new(x, canvas.y(DIVIDER_BOTTOM)),
                &divider,
            );

            svg.add_use(
                DIET_ID,
                None,
                &[
                    Transform::Translate(
                        canvas.band_x(i as f64 - DIET_BAND_OFFSET, n),
                        canvas.y(DIET_Y),
                    ),
                    Transform::Rotate(DIET_ROTATION),
                ],
            );

            let center = canvas.band_center(i, n);
            for (text, (fy, font_size)) in [
                (&session.day, DAY_ROW),
                (&session.date, DATE_ROW),
                (&session.hour, HOUR_ROW),
            ] {
                svg.add_text(
                    Content::Text(text),
                    Some(Point::new(center, canvas.y(fy))),
                    &Style::new().centered().font_size(font_size),
                    &[],
                );
            }

            svg.add_multiline_text(
                &[
                    TextLine::new(Content::Text(&session.label), 0.0),
                    TextLine::new(Content::Text(&session.sub_label), SESSION_LABEL_LINE_HEIGHT),
                ],
                &Style::new().centered().font_size(SESSION_LABEL_FONT_SIZE),
                &[
                    Transform::Translate(center, canvas.y(SESSION_LABEL_Y)),
                    Transform::Rotate(SESSION_LABEL_ROTATION),
                ],
            );

            if logo.is_some() {
                svg.add_use(
                    LOGO_ID,
                    None,
                    &[
                        Transform::Translate(center, canvas.y(BAND_LOGO_Y)),
                        Transform::Scale(BAND_LOGO_SCALE),
                    ],
                );
            }
        }

        let markup = svg.build(
            &format!("{}mm", fmt_num(2.0 * dimensions.width)),
            &format!("{}mm", fmt_num(dimensions.height)),
            w,
            h,
        );

        Self {
            markup,
            canvas,
            session_count: n,
            has_logo: logo.is_some(),
        }
    }

    /// Substitute the slot values and serialize the document
    pub fn render(&self, values: &SlotValues) -> String {
        self.markup.render(|slot| values.get(slot))
    }

    /// Render the badge of one attendee
    pub fn render_attendee(&self, record: &AttendeeRecord) -> String {
        self.render(&SlotValues::from(record))
    }

    /// The distinct slots of the template, in [`SlotId`] order
    pub fn slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self.markup.slots().collect();
        slots.sort();
        slots.dedup();
        slots
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn session_count(&self) -> usize {
        self.session_count
    }

    pub fn has_logo(&self) -> bool {
        self.has_logo
    }
}
