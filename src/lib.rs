//! smartmark: Markdown-derived markup to a typed tree and XHTML
//!
//! The pipeline runs in one direction:
//! - [`stream`]: line source with pushback and nested scopes
//! - [`block`]: recursive-descent block parser filling the side tables
//! - [`inline`]: span parser invoked per paragraph, heading and item
//! - [`typography`]: optional smart punctuation over each inline fragment
//! - [`xhtml`]: one walk over the finished [`Document`]
//!
//! Parsing never fails. Malformed syntax degrades to literal text, and the
//! only reportable problems (bad metadata values) are collected on the
//! document as diagnostics.

pub mod block;
pub mod cursor;
pub mod document;
pub mod error;
pub mod escape;
pub mod footnote;
pub mod inline;
pub mod limits;
pub mod link_ref;
pub mod metadata;
pub mod render;
pub mod stream;
pub mod tree;
pub mod typography;
pub mod xhtml;
pub mod xml;

// Re-export primary types
pub use block::BlockParser;
pub use document::Document;
pub use error::MetadataError;
pub use link_ref::{LinkRecord, LinkTable};
pub use render::HtmlWriter;
pub use tree::{Element, Node, Tag};

/// How dash runs map to typeset dashes under smart punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashStyle {
    /// `--` is an em dash; `---` stays as typed.
    DoubleEmdashNoEndash,
    /// `---` is an em dash, `--` an en dash.
    TripleEmdashDoubleEndash,
    /// `--` is an em dash, `---` an en dash.
    #[default]
    DoubleEmdashTripleEndash,
}

/// Parsing/rendering options.
///
/// Each parse works on its own copy, so metadata such as `Style: technical`
/// only affects the document that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Disable footnotes, the link and metadata side tables in the header,
    /// and metadata harvesting.
    pub plain: bool,
    /// Run the typographic pass (quotes, dashes, ellipses, sentence spacing).
    pub smart_punctuation: bool,
    /// Recognise `[[Page]]` and, with smart punctuation, `CamelCase` words.
    pub wiki_links: bool,
    /// Wikilink URL template; `{0}` is replaced by the link text.
    pub wiki_link_format: String,
    /// Indented blocks are literal code instead of quotations.
    pub technical_style: bool,
    pub dash_style: DashStyle,
    /// Em dashes absorb one space on each side and render with
    /// non-breaking spaces.
    pub spaces_around_dashes: bool,
    /// Write `class` attributes on paragraphs, links and the footnote list.
    pub emit_classes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            plain: false,
            smart_punctuation: false,
            wiki_links: false,
            wiki_link_format: "{0}".to_owned(),
            technical_style: false,
            dash_style: DashStyle::default(),
            spaces_around_dashes: true,
            emit_classes: true,
        }
    }
}

/// Parse with default options.
pub fn parse(input: &str) -> Document {
    parse_with_options(input, &Options::default())
}

/// Parse with the given options. The options are cloned for the session.
pub fn parse_with_options(input: &str, options: &Options) -> Document {
    BlockParser::new(input, options.clone()).parse()
}

/// Convert markup to an XHTML fragment.
///
/// # Example
/// ```
/// let html = smartmark::to_html("# Hello\n\nWorld");
/// assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
/// assert!(html.contains("<p class=\"first\">World</p>"));
/// ```
pub fn to_html(input: &str) -> String {
    parse(input).to_html()
}

/// Convert markup to an XHTML fragment with options.
///
/// # Example
/// ```
/// use smartmark::{Options, to_html_with_options};
///
/// let options = Options { smart_punctuation: true, ..Options::default() };
/// let html = to_html_with_options("\"Quoted\" -- text", &options);
/// assert_eq!(html, "<p class=\"first\">&#8220;Quoted&#8221;&nbsp;&#8212;&nbsp;text</p>\n");
/// ```
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    parse_with_options(input, options).to_html()
}

/// Convert markup to a complete XHTML 1.1 document.
pub fn to_html_document(input: &str, options: &Options) -> String {
    parse_with_options(input, options).to_html_document()
}

/// Dump the parsed tree as XML.
pub fn to_xml(input: &str, options: &Options) -> String {
    parse_with_options(input, options).to_xml()
}
