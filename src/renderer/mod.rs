//! SVG renderer
//!
//! Documents are assembled as [`Markup`]: literal SVG text interleaved with
//! [`SlotId`] holes that are filled in when a badge is rendered.

pub mod config;
pub mod markup;
pub mod svg;

pub use config::SvgConfig;
pub use markup::{escape_xml, Content, Fragment, Markup, SlotId};
pub use svg::{Paint, Style, SvgBuilder, TextLine};
