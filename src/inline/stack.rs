//! Open-container stack for the inline scan.
//!
//! Text accumulates in a buffer and is flushed as a text node into the
//! innermost open container whenever a node boundary is reached. Containers
//! that never close are spliced into their parent when the scan ends.

use smallvec::SmallVec;

use crate::tree::{Element, InlineKind, Node};

/// What opened a container, and so what may close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `*` or `_` run of width 1-3.
    Emphasis { ch: u8, width: u8 },
    /// Backtick code span; `doubled` for the ``` `` ``` form.
    Code { doubled: bool },
}

#[derive(Debug)]
struct Frame {
    element: Element,
    marker: Marker,
}

/// Element kind for an emphasis run of `width` markers.
pub fn emphasis_kind(width: usize) -> InlineKind {
    match width {
        1 => InlineKind::Emphasis,
        2 => InlineKind::Strong,
        _ => InlineKind::EmphasisStrong,
    }
}

#[derive(Debug, Default)]
pub struct InlineStack {
    root: Vec<Node>,
    frames: SmallVec<[Frame; 8]>,
    buf: String,
    /// Output column on the current line, for tab stops.
    column: usize,
}

impl InlineStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn sink(&mut self) -> &mut Vec<Node> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.element.children,
            None => &mut self.root,
        }
    }

    /// Move buffered text into the innermost container.
    pub fn flush(&mut self) {
        if !self.buf.is_empty() {
            let text = std::mem::take(&mut self.buf);
            self.sink().push(Node::Text(text));
        }
    }

    pub fn push_str(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(nl) => self.column = text[nl + 1..].chars().count(),
            None => self.column += text.chars().count(),
        }
        self.buf.push_str(text);
    }

    pub fn push_char(&mut self, ch: char) {
        if ch == '\n' {
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.buf.push(ch);
    }

    /// Spaces up to the next four-column stop.
    pub fn push_tab(&mut self) {
        let spaces = 4 - self.column % 4;
        for _ in 0..spaces {
            self.buf.push(' ');
        }
        self.column += spaces;
    }

    pub fn push_node(&mut self, node: impl Into<Node>) {
        self.flush();
        self.sink().push(node.into());
    }

    pub fn reset_column(&mut self) {
        self.column = 0;
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Marker of the innermost open container.
    pub fn top(&self) -> Option<Marker> {
        self.frames.last().map(|frame| frame.marker)
    }

    /// Whether the innermost container is a code span, and if so whether
    /// it was opened by a doubled backtick.
    pub fn code_span(&self) -> Option<bool> {
        match self.top() {
            Some(Marker::Code { doubled }) => Some(doubled),
            _ => None,
        }
    }

    pub fn open(&mut self, kind: InlineKind, marker: Marker) {
        self.flush();
        self.frames.push(Frame {
            element: Element::inline(kind),
            marker,
        });
    }

    /// Close the innermost container into its parent.
    pub fn close(&mut self) {
        self.flush();
        if let Some(frame) = self.frames.pop() {
            let mut element = frame.element;
            if frame.marker == (Marker::Code { doubled: true }) {
                trim_code_padding(&mut element.children);
            }
            self.sink().push(Node::Element(element));
        }
    }

    /// Close emphasis containers opened by `ch` from the top while their
    /// widths fit in `width`. Returns how many markers were used.
    pub fn close_emphasis(&mut self, ch: u8, width: usize) -> usize {
        let mut remaining = width;
        while let Some(Marker::Emphasis { ch: open, width: w }) = self.top() {
            let w = usize::from(w);
            if open != ch || w > remaining {
                break;
            }
            self.close();
            remaining -= w;
        }
        width - remaining
    }

    /// Undo an open doubled code span: its content becomes plain text
    /// after a literal ``` `` ```.
    pub fn downgrade_code(&mut self) {
        self.flush();
        if let Some(frame) = self.frames.pop() {
            let sink = self.sink();
            sink.push(Node::Text("``".to_owned()));
            sink.extend(frame.element.children);
        }
    }

    /// Flush and splice every still-open container into its parent.
    pub fn finish(mut self) -> Vec<Node> {
        self.flush();
        while let Some(frame) = self.frames.pop() {
            self.sink().push(Node::Element(frame.element));
        }
        self.root
    }
}

/// Drop one leading and one trailing space of a doubled code span.
fn trim_code_padding(children: &mut [Node]) {
    if let Some(Node::Text(first)) = children.first_mut() {
        if first.starts_with(' ') {
            first.remove(0);
        }
    }
    if let Some(Node::Text(last)) = children.last_mut() {
        if last.ends_with(' ') {
            last.pop();
        }
    }
}
