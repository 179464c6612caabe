//! Output options for badge documents

/// Indentation step used by [`SvgConfig::default`]
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// How a badge document is laid out as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgConfig {
    /// Start the document with `<?xml ...?>`, as standalone `.svg` files do
    pub xml_declaration: bool,

    /// Spaces per nesting level; 0 puts the whole document on one line
    pub indent_width: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl SvgConfig {
    /// Single-line output without XML declaration, for embedding
    pub fn compact() -> Self {
        Self {
            xml_declaration: false,
            indent_width: 0,
        }
    }

    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn is_compact(&self) -> bool {
        self.indent_width == 0
    }

    pub(crate) fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    pub(crate) fn line_end(&self) -> &'static str {
        if self.is_compact() {
            ""
        } else {
            "\n"
        }
    }
}
