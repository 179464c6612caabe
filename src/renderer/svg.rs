//! Incremental SVG construction with slot holes

use crate::geometry::{fmt_num, transform_attr, Point, Transform};
use crate::palette::Rgb;

use super::markup::{Content, Markup, SlotId};
use super::SvgConfig;

/// A fill color, fixed or filled in per badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Color(Rgb),
    Slot(SlotId),
}

/// Presentation attributes of an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Rgb>,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<f64>,
    pub font_size: Option<f64>,
    pub opacity: Option<f64>,
    /// Text is anchored at its horizontal middle
    pub centered: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Rgb) -> Self {
        self.fill = Some(Paint::Color(color));
        self
    }

    pub fn fill_slot(mut self, slot: SlotId) -> Self {
        self.fill = Some(Paint::Slot(slot));
        self
    }

    pub fn stroke(mut self, color: Rgb, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = Some(width);
        self
    }

    pub fn dashed(mut self, dash: f64) -> Self {
        self.stroke_dasharray = Some(dash);
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Append the attributes, each with a leading space
    fn write_to(&self, out: &mut Markup) {
        match self.fill {
            Some(Paint::Color(color)) => out.push_str(&format!(r#" fill="{}""#, color)),
            Some(Paint::Slot(slot)) => {
                out.push_str(r#" fill=""#);
                out.push_slot(slot);
                out.push_str(r#"""#);
            }
            None => {}
        }
        if let Some(stroke) = self.stroke {
            out.push_str(&format!(r#" stroke="{}""#, stroke));
        }
        if let Some(sw) = self.stroke_width {
            out.push_str(&format!(r#" stroke-width="{}""#, fmt_num(sw)));
        }
        if let Some(dash) = self.stroke_dasharray {
            out.push_str(&format!(r#" stroke-dasharray="{}""#, fmt_num(dash)));
        }
        if let Some(fs) = self.font_size {
            out.push_str(&format!(r#" font-size="{}""#, fmt_num(fs)));
        }
        if let Some(op) = self.opacity {
            out.push_str(&format!(r#" opacity="{}""#, fmt_num(op)));
        }
        if self.centered {
            out.push_str(r#" text-anchor="middle""#);
        }
    }
}

/// One line of a multi-line text, offset vertically from the text origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLine<'a> {
    pub content: Content<'a>,
    pub dy: f64,
}

impl<'a> TextLine<'a> {
    pub fn new(content: Content<'a>, dy: f64) -> Self {
        Self { content, dy }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<Markup>,
    elements: Vec<Markup>,
    indent: usize,
}

fn id_attr(id: Option<&str>) -> String {
    id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default()
}

fn transform_attr_str(transforms: &[Transform]) -> String {
    if transforms.is_empty() {
        String::new()
    } else {
        format!(r#" transform="{}""#, transform_attr(transforms))
    }
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn element_line(&self) -> Markup {
        Markup::from(self.config.indent(self.indent).as_str())
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        let mut m = self.element_line();
        m.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        ));
        style.write_to(&mut m);
        m.push_str("/>");
        self.elements.push(m);
    }

    /// Add a line element
    pub fn add_line(&mut self, from: Point, to: Point, style: &Style) {
        let mut m = self.element_line();
        m.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y)
        ));
        style.write_to(&mut m);
        m.push_str("/>");
        self.elements.push(m);
    }

    /// Add a polygon element
    pub fn add_polygon(&mut self, points: &[Point], style: &Style) {
        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");

        let mut m = self.element_line();
        m.push_str(&format!(r#"<polygon points="{}""#, points_str));
        style.write_to(&mut m);
        m.push_str("/>");
        self.elements.push(m);
    }

    /// Add a single-line text element, positioned at `at` when given
    pub fn add_text(
        &mut self,
        content: Content<'_>,
        at: Option<Point>,
        style: &Style,
        transforms: &[Transform],
    ) {
        let mut m = self.element_line();
        m.append(text_element(None, content, at, style, transforms));
        self.elements.push(m);
    }

    /// Add a text element made of stacked `<tspan>` lines sharing x = 0
    pub fn add_multiline_text(
        &mut self,
        lines: &[TextLine<'_>],
        style: &Style,
        transforms: &[Transform],
    ) {
        let mut m = self.element_line();
        m.push_str("<text");
        style.write_to(&mut m);
        m.push_str(&transform_attr_str(transforms));
        m.push_str(">");
        for line in lines {
            m.push_str(&format!(r#"<tspan x="0" y="{}">"#, fmt_num(line.dy)));
            m.push_content(line.content);
            m.push_str("</tspan>");
        }
        m.push_str("</text>");
        self.elements.push(m);
    }

    /// Reference a definition by id
    pub fn add_use(&mut self, href: &str, at: Option<Point>, transforms: &[Transform]) {
        let position = at
            .map(|p| format!(r#" x="{}" y="{}""#, fmt_num(p.x), fmt_num(p.y)))
            .unwrap_or_default();
        let mut m = self.element_line();
        m.push_str(&format!(
            r##"<use xlink:href="#{}"{}{}/>"##,
            href,
            position,
            transform_attr_str(transforms)
        ));
        self.elements.push(m);
    }

    /// Start a group element; the style is inherited by its children
    pub fn start_group(&mut self, style: &Style) {
        let mut m = self.element_line();
        m.push_str("<g");
        style.write_to(&mut m);
        m.push_str(">");
        self.elements.push(m);
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        let mut m = self.element_line();
        m.push_str("</g>");
        self.elements.push(m);
    }

    /// Define an embedded image, not drawn at its definition site
    pub fn define_image(
        &mut self,
        id: &str,
        data_uri: &str,
        width: f64,
        height: f64,
        transforms: &[Transform],
    ) {
        self.defs.push(Markup::from(
            format!(
                r#"<image id="{}" width="{}" height="{}"{} xlink:href="{}"/>"#,
                id,
                fmt_num(width),
                fmt_num(height),
                transform_attr_str(transforms),
                data_uri
            )
            .as_str(),
        ));
    }

    /// Define a text element, not drawn at its definition site
    pub fn define_text(&mut self, id: &str, content: Content<'_>, style: &Style) {
        self.defs
            .push(text_element(Some(id), content, None, style, &[]));
    }

    /// Build the final document
    pub fn build(self, width: &str, height: &str, view_width: f64, view_height: f64) -> Markup {
        let nl = self.config.line_end();
        let outer_indent = self.config.indent(1);
        let def_indent = self.config.indent(2);
        let mut svg = Markup::new();

        if self.config.xml_declaration {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1" baseProfile="full" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width,
            height,
            fmt_num(view_width),
            fmt_num(view_height)
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(&outer_indent);
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in self.defs {
                svg.push_str(&def_indent);
                svg.append(def);
                svg.push_str(nl);
            }
            svg.push_str(&outer_indent);
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in self.elements {
            svg.append(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

fn text_element(
    id: Option<&str>,
    content: Content<'_>,
    at: Option<Point>,
    style: &Style,
    transforms: &[Transform],
) -> Markup {
    let position = at
        .map(|p| format!(r#" x="{}" y="{}""#, fmt_num(p.x), fmt_num(p.y)))
        .unwrap_or_default();
    let mut m = Markup::new();
    m.push_str(&format!("<text{}{}", id_attr(id), position));
    style.write_to(&mut m);
    m.push_str(&transform_attr_str(transforms));
    m.push_str(">");
    m.push_content(content);
    m.push_str("</text>");
    m
}
