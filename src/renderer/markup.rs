//! SVG text with holes for per-badge values

use std::fmt;

/// A named region of the template that is filled in per attendee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotId {
    FirstName,
    LastName,
    Institution,
    /// Fill color shared by both role polygons
    RoleFill,
    /// Dietary code, defined once and referenced at every session band
    Diet,
}

impl SlotId {
    pub const ALL: [SlotId; 5] = [
        SlotId::FirstName,
        SlotId::LastName,
        SlotId::Institution,
        SlotId::RoleFill,
        SlotId::Diet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SlotId::FirstName => "first-name",
            SlotId::LastName => "last-name",
            SlotId::Institution => "institution",
            SlotId::RoleFill => "role-fill",
            SlotId::Diet => "diet",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text content or attribute value: fixed, or taken from a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content<'a> {
    Text(&'a str),
    Slot(SlotId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Already-escaped SVG text
    Literal(String),
    Slot(SlotId),
}

/// A sequence of literal SVG text and slot holes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    fragments: Vec<Fragment>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal SVG text (not escaped)
    pub fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Literal(last)) => last.push_str(s),
            _ => self.fragments.push(Fragment::Literal(s.to_string())),
        }
    }

    pub fn push_slot(&mut self, slot: SlotId) {
        self.fragments.push(Fragment::Slot(slot));
    }

    /// Append content, escaping fixed text
    pub fn push_content(&mut self, content: Content<'_>) {
        match content {
            Content::Text(text) => self.push_str(&escape_xml(text)),
            Content::Slot(slot) => self.push_slot(slot),
        }
    }

    pub fn append(&mut self, other: Markup) {
        for fragment in other.fragments {
            match fragment {
                Fragment::Literal(s) => self.push_str(&s),
                Fragment::Slot(slot) => self.push_slot(slot),
            }
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Slots in order of appearance
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Slot(slot) => Some(*slot),
            Fragment::Literal(_) => None,
        })
    }

    /// Produce the final text; slot values are escaped
    pub fn render<F, S>(&self, mut value_of: F) -> String
    where
        F: FnMut(SlotId) -> S,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(s) => out.push_str(s),
                Fragment::Slot(slot) => out.push_str(&escape_xml(value_of(*slot).as_ref())),
            }
        }
        out
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        let mut markup = Markup::new();
        markup.push_str(s);
        markup
    }
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
