//! Footnote collection.

use crate::tree::{BlockKind, Element, HeaderKind, Tag};

/// Footnote bodies in definition order.
#[derive(Debug, Default)]
pub struct FootnoteList {
    notes: Vec<Element>,
}

impl FootnoteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed `note` element. Duplicate keys are kept; each renders.
    pub fn push(&mut self, note: Element) {
        debug_assert_eq!(note.tag, Tag::Block(BlockKind::Note));
        self.notes.push(note);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Consume the list into a `notes` header element.
    pub fn into_element(self) -> Element {
        let mut notes = Element::header(HeaderKind::Notes);
        notes.children.extend(self.notes.into_iter().map(Into::into));
        notes
    }
}

/// Footnote key from a definition label: the label minus its caret.
pub fn footnote_key(label: &str) -> Option<&str> {
    label.strip_prefix('^').filter(|key| !key.is_empty())
}
