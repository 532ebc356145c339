//! A finished parse: the tree plus the side tables the renderer resolves
//! against.

use rustc_hash::FxHashMap;

use crate::Options;
use crate::error::MetadataError;
use crate::link_ref::LinkTable;
use crate::metadata::Metadata;
use crate::tree::Element;
use crate::xhtml::XhtmlRenderer;
use crate::xml;

/// Parsed document.
///
/// Built once by [`BlockParser`](crate::block::BlockParser) and read-only
/// afterwards, so rendering it any number of times gives the same output.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) header: Element,
    pub(crate) body: Element,
    pub(crate) links: LinkTable,
    /// Section id to heading title.
    pub(crate) sections: FxHashMap<String, String>,
    pub(crate) metadata: Metadata,
    pub(crate) options: Options,
    pub(crate) diagnostics: Vec<MetadataError>,
}

impl Document {
    /// Side tables: `notes`, then `links` and `metadata` outside plain mode.
    #[inline]
    pub fn header(&self) -> &Element {
        &self.header
    }

    #[inline]
    pub fn body(&self) -> &Element {
        &self.body
    }

    #[inline]
    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Options in effect at the end of the parse, metadata side effects
    /// included.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Metadata values that were dropped.
    #[inline]
    pub fn diagnostics(&self) -> &[MetadataError] {
        &self.diagnostics
    }

    /// Heading title of the section with the given id.
    pub fn section_title(&self, id: &str) -> Option<&str> {
        self.sections.get(id).map(String::as_str)
    }

    /// The `Title` metadata entry.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("Title")
    }

    /// Render the body and footnotes as an XHTML fragment.
    pub fn to_html(&self) -> String {
        XhtmlRenderer::new(self).render_fragment()
    }

    /// Render a complete XHTML 1.1 document.
    pub fn to_html_document(&self) -> String {
        XhtmlRenderer::new(self).render_document()
    }

    /// Dump the typed tree.
    pub fn to_xml(&self) -> String {
        xml::dump(self)
    }
}
