//! Block-level parser.
//!
//! Line-oriented recursive descent over a [`LineStream`](crate::stream::LineStream).
//! Handles, in precedence order:
//! - Link and footnote definitions
//! - Quotations
//! - Indented blocks (literal code or quotation)
//! - Horizontal rules
//! - Lists
//! - ATX and setext headings (opening sections)
//! - Leading metadata
//! - Paragraphs

mod line;
mod parser;

pub use line::ListMarker;
pub use parser::BlockParser;

use crate::tree::{BlockKind, Element, Node, Tag};

/// Unwrap the leading paragraph of every item in a list.
///
/// Items are parsed before the list knows whether it is tight, so the
/// paragraph wrappers are removed afterwards.
pub fn unwrap_tight_items(list: &mut Element) {
    for child in &mut list.children {
        if let Node::Element(item) = child {
            if item.tag == Tag::Block(BlockKind::ListItem) {
                item.unwrap_leading(Tag::Block(BlockKind::Paragraph));
            }
        }
    }
}
