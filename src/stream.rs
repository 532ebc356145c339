//! Line source with pushback and scoped sub-buffers.
//!
//! The stream is a stack of finite line buffers. The bottom buffer holds the
//! whole input; a nested parse pushes a scope holding just its own lines, and
//! reaching the end of that buffer is end-of-input for the nested parse.
//! Pushed-back lines always return to the innermost scope.

use crate::tree::Element;

/// Whether a line contains nothing but whitespace.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_whitespace())
}

#[derive(Debug)]
pub struct LineStream {
    /// Each scope stores its lines reversed, so the next line is at the end.
    scopes: Vec<Vec<String>>,
    /// Pushed-back parsed blocks, most recent last. A section that ends on
    /// a shallower heading may hold it while an enclosing section pushes
    /// itself back too.
    pending: Vec<Element>,
}

impl LineStream {
    pub fn new(input: &str) -> Self {
        let mut lines: Vec<String> = input.lines().map(str::to_owned).collect();
        lines.reverse();
        Self {
            scopes: vec![lines],
            pending: Vec::new(),
        }
    }

    /// Next line of the current scope, pushed-back lines first.
    #[inline]
    pub fn next_line(&mut self) -> Option<String> {
        self.scopes.last_mut()?.pop()
    }

    /// Return a line to the front of the current scope.
    #[inline]
    pub fn push_line(&mut self, line: String) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(line);
        }
    }

    /// Next non-blank line of the current scope.
    pub fn next_block_line(&mut self) -> Option<String> {
        loop {
            let line = self.next_line()?;
            if !is_blank(&line) {
                return Some(line);
            }
        }
    }

    /// Start a nested scope that yields exactly `lines`.
    pub fn push_scope(&mut self, mut lines: Vec<String>) {
        lines.reverse();
        self.scopes.push(lines);
        tracing::trace!(depth = self.scopes.len(), "pushed line scope");
    }

    /// End the innermost scope and resume the enclosing one.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "popped the root scope");
        if self.scopes.len() > 1 {
            if let Some(rest) = self.scopes.pop() {
                if !rest.is_empty() {
                    tracing::trace!(lines = rest.len(), "discarding unread scoped lines");
                }
            }
        }
    }

    /// Number of open scopes, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Hold a parsed block for the next block request.
    pub fn push_block(&mut self, block: Element) {
        self.pending.push(block);
    }

    #[inline]
    pub fn take_block(&mut self) -> Option<Element> {
        self.pending.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{BlockKind, Element, Tag};

    #[test]
    fn test_lines_in_order() {
        let mut s = LineStream::new("a\nb\r\nc");
        assert_eq!(s.next_line().as_deref(), Some("a"));
        assert_eq!(s.next_line().as_deref(), Some("b"));
        assert_eq!(s.next_line().as_deref(), Some("c"));
        assert_eq!(s.next_line(), None);
    }

    #[test]
    fn test_pushback_is_lifo() {
        let mut s = LineStream::new("c");
        s.push_line("b".into());
        s.push_line("a".into());
        assert_eq!(s.next_line().as_deref(), Some("a"));
        assert_eq!(s.next_line().as_deref(), Some("b"));
        assert_eq!(s.next_line().as_deref(), Some("c"));
    }

    #[test]
    fn test_block_line_skips_blanks() {
        let mut s = LineStream::new("\n   \n\tx");
        assert_eq!(s.next_block_line().as_deref(), Some("\tx"));
        assert_eq!(s.next_block_line(), None);
    }

    #[test]
    fn test_scope_hides_outer_lines() {
        let mut s = LineStream::new("outer");
        s.push_scope(vec!["one".into(), "two".into()]);
        assert_eq!(s.depth(), 2);
        assert_eq!(s.next_line().as_deref(), Some("one"));
        s.push_line("back".into());
        assert_eq!(s.next_line().as_deref(), Some("back"));
        assert_eq!(s.next_line().as_deref(), Some("two"));
        assert_eq!(s.next_line(), None);
        s.pop_scope();
        assert_eq!(s.next_line().as_deref(), Some("outer"));
    }

    #[test]
    fn test_block_pushback() {
        let mut s = LineStream::new("");
        assert!(s.take_block().is_none());
        s.push_block(Element::block(BlockKind::Rule));
        s.push_block(Element::block(BlockKind::Paragraph));
        assert_eq!(s.take_block().map(|b| b.tag), Some(Tag::Block(BlockKind::Paragraph)));
        assert_eq!(s.take_block().map(|b| b.tag), Some(Tag::Block(BlockKind::Rule)));
        assert!(s.take_block().is_none());
    }
}
