//! Markup output buffer.
//!
//! A thin writer over a byte buffer: tag helpers for the fixed XHTML
//! vocabulary plus escaped text and attribute writes.

use crate::escape;

/// Output writer with a pre-allocated buffer.
///
/// # Example
/// ```
/// use smartmark::render::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.open_tag("p");
/// writer.write_text("Fish & Chips");
/// writer.close_tag_nl("p");
/// assert_eq!(writer.into_string(), "<p>Fish &amp; Chips</p>\n");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Write a static string.
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a dynamic string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text content, escaping `<`, `>` and `&`.
    #[inline]
    pub fn write_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write `&name;`.
    #[inline]
    pub fn write_entity(&mut self, name: &str) {
        self.write_byte(b'&');
        self.write_string(name);
        self.write_byte(b';');
    }

    /// Write ` name="value"` with the value escaped.
    #[inline]
    pub fn write_attr(&mut self, name: &str, value: &str) {
        self.write_byte(b' ');
        self.write_string(name);
        self.write_str("=\"");
        escape::escape_attr_into(&mut self.out, value);
        self.write_byte(b'"');
    }

    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: only `&str` data and ASCII bytes are ever written.
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    // --- Tag helpers ---

    /// `<name` without the closing `>`, for tags that take attributes.
    #[inline]
    pub fn start_tag(&mut self, name: &str) {
        self.write_byte(b'<');
        self.write_string(name);
    }

    /// `<name>`
    #[inline]
    pub fn open_tag(&mut self, name: &str) {
        self.start_tag(name);
        self.write_byte(b'>');
    }

    /// `</name>`
    #[inline]
    pub fn close_tag(&mut self, name: &str) {
        self.write_str("</");
        self.write_string(name);
        self.write_byte(b'>');
    }

    /// `<name>\n`
    #[inline]
    pub fn open_tag_nl(&mut self, name: &str) {
        self.open_tag(name);
        self.newline();
    }

    /// `</name>\n`
    #[inline]
    pub fn close_tag_nl(&mut self, name: &str) {
        self.close_tag(name);
        self.newline();
    }

    /// `<hr />\n`
    #[inline]
    pub fn thematic_break(&mut self) {
        self.write_str("<hr />\n");
    }

    /// `<br />\n`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_str("<br />\n");
    }
}
