//! Block parser implementation.

use rustc_hash::FxHashMap;

use crate::Options;
use crate::document::Document;
use crate::error::MetadataError;
use crate::footnote::{FootnoteList, footnote_key};
use crate::inline::InlineParser;
use crate::limits;
use crate::link_ref::{LinkTable, normalize_label};
use crate::metadata::{self, Metadata};
use crate::stream::{LineStream, is_blank};
use crate::tree::{BlockKind, Element, HeaderKind, InlineKind, Node};

use super::line::{self, ListMarker};
use super::unwrap_tight_items;

/// Which construct a continuation run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    ListItem,
    Footnote,
}

/// One parse session: the line stream plus every side table the recursive
/// descent fills in.
pub struct BlockParser {
    stream: LineStream,
    options: Options,
    links: LinkTable,
    footnotes: FootnoteList,
    metadata: Metadata,
    /// Section id to heading title.
    sections: FxHashMap<String, String>,
    diagnostics: Vec<MetadataError>,
    /// Metadata is only recognised in the first block.
    first_block: bool,
}

impl BlockParser {
    /// Create a session. The options are owned so metadata can adjust them.
    pub fn new(input: &str, options: Options) -> Self {
        Self {
            stream: LineStream::new(input),
            options,
            links: LinkTable::new(),
            footnotes: FootnoteList::new(),
            metadata: Metadata::new(),
            sections: FxHashMap::default(),
            diagnostics: Vec::new(),
            first_block: true,
        }
    }

    /// Parse the whole input and splice the side tables into the header.
    pub fn parse(mut self) -> Document {
        let mut body = Element::block(BlockKind::Body);
        self.parse_into(&mut body);

        let mut header = Element::header(HeaderKind::Header);
        if !self.footnotes.is_empty() {
            header.push(self.footnotes.into_element());
        }
        if !self.options.plain {
            if !self.links.is_empty() {
                header.push(self.links.to_element());
            }
            if !self.metadata.is_empty() {
                header.push(self.metadata.to_element());
            }
        }

        Document {
            header,
            body,
            links: self.links,
            sections: self.sections,
            metadata: self.metadata,
            options: self.options,
            diagnostics: self.diagnostics,
        }
    }

    fn parse_into(&mut self, container: &mut Element) {
        while let Some(block) = self.next_block(container) {
            container.push(block);
        }
    }

    fn next_block(&mut self, container: &mut Element) -> Option<Element> {
        match self.stream.take_block() {
            Some(block) => Some(block),
            None => self.read_block(container),
        }
    }

    /// Parse `lines` as the block content of `container`, isolated from the
    /// rest of the input.
    fn parse_scoped(&mut self, lines: Vec<String>, container: &mut Element) {
        if self.stream.depth() > limits::MAX_BLOCK_NESTING {
            tracing::debug!(depth = self.stream.depth(), "block nesting limit reached");
            let mut para = Element::block(BlockKind::Paragraph);
            self.parse_inline(&lines.join("\n"), &mut para);
            container.push(para);
            return;
        }
        self.stream.push_scope(lines);
        self.parse_into(container);
        self.stream.pop_scope();
    }

    fn parse_inline(&mut self, text: &str, context: &mut Element) {
        InlineParser::new(&self.options, &mut self.links).parse_into(text, context);
    }

    fn read_block(&mut self, container: &mut Element) -> Option<Element> {
        loop {
            let line = self.stream.next_block_line()?;

            if let Some(def) = line::link_definition(&line) {
                let key = if self.options.plain {
                    None
                } else {
                    footnote_key(def.label)
                };
                match key {
                    Some(key) => {
                        let key = key.to_owned();
                        let first = line[def.body_start..].to_owned();
                        self.read_footnote(key, first);
                    }
                    None => {
                        self.links.define(def.url, def.title, Some(def.label), true, false);
                    }
                }
                continue;
            }

            let first_block = std::mem::replace(&mut self.first_block, false);

            if line::quote_content(&line).is_some() {
                self.stream.push_line(line);
                let lines = self.read_quotation();
                let mut quote = Element::block(BlockKind::Quotation);
                self.parse_scoped(lines, &mut quote);
                return Some(quote);
            }

            if line::strip_indent(&line).is_some() {
                self.stream.push_line(line);
                if self.options.technical_style {
                    return Some(self.read_literal());
                }
                let lines = self.read_indented();
                let mut quote = Element::block(BlockKind::Quotation);
                self.parse_scoped(lines, &mut quote);
                return Some(quote);
            }

            if line::is_rule(&line) {
                return Some(Element::block(BlockKind::Rule));
            }

            if let Some((marker, _)) = line::list_marker(&line) {
                return Some(self.read_list(line, marker));
            }

            if let Some((depth, title)) = line::atx_heading(&line) {
                return Some(self.read_section(title, depth));
            }

            if let Some(next) = self.stream.next_line() {
                if let Some(depth) = line::setext_depth(&next) {
                    return Some(self.read_section(line.trim(), depth));
                }
                self.stream.push_line(next);
            }

            if first_block && !self.options.plain && line::metadata_key(&line).is_some() {
                self.stream.push_line(line);
                let text = self.read_paragraph();
                self.read_metadata(&text);
                continue;
            }

            let trimmed = line.trim_start_matches(' ');
            let markup = trimmed.starts_with('<');
            self.stream.push_line(trimmed.to_owned());
            let text = self.read_paragraph();
            if markup {
                self.parse_inline(&text, container);
                continue;
            }
            let mut para = Element::block(BlockKind::Paragraph);
            self.parse_inline(&text, &mut para);
            return Some(para);
        }
    }

    /// A heading and every following block deeper than it.
    fn read_section(&mut self, title: &str, depth: u8) -> Element {
        debug_assert!((1..=6).contains(&depth), "heading depth {depth}");
        let id = normalize_label(title);
        tracing::debug!(depth, id = %id, "opened section");
        self.sections.insert(id.clone(), title.to_owned());

        let mut heading = Element::block(BlockKind::Heading(depth));
        heading.set_attr("id", id);
        self.parse_inline(title, &mut heading);

        let mut section = Element::block(BlockKind::Section(depth));
        section.push(heading);
        while let Some(block) = self.next_block(&mut section) {
            if block.section_depth().is_some_and(|d| d <= depth) {
                self.stream.push_block(block);
                break;
            }
            section.push(block);
        }
        section
    }

    fn read_quotation(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.stream.next_line() {
            if is_blank(&line) {
                self.stream.push_line(line);
                break;
            }
            let content = line::quote_content(&line).map(str::to_owned);
            lines.push(content.unwrap_or(line));
        }
        lines
    }

    /// Consecutive indented lines, de-indented.
    fn read_indented(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.stream.next_line() {
            let content = if is_blank(&line) {
                None
            } else {
                line::strip_indent(&line).map(str::to_owned)
            };
            match content {
                Some(content) => lines.push(content),
                None => {
                    self.stream.push_line(line);
                    break;
                }
            }
        }
        lines
    }

    /// Indented lines as one verbatim `pre > code` block.
    fn read_literal(&mut self) -> Element {
        let mut text = String::new();
        while let Some(mut line) = self.stream.next_line() {
            if is_blank(&line) {
                match self.skip_blank_run(line) {
                    Some(next) => {
                        text.push('\n');
                        line = next;
                    }
                    None => break,
                }
            }
            match line::strip_indent(&line) {
                Some(content) => {
                    text.push_str(&line::expand_tabs(content));
                    text.push('\n');
                }
                None => {
                    self.stream.push_line(line);
                    break;
                }
            }
        }
        let mut pre = Element::block(BlockKind::Literal);
        let mut code = Element::inline(InlineKind::Code);
        code.push(Node::Text(text));
        pre.push(code);
        pre
    }

    /// Consume a run of blank lines starting with `first`. Returns the line
    /// after the run when it is indented; otherwise restores the run and the
    /// line and returns `None`.
    fn skip_blank_run(&mut self, first: String) -> Option<String> {
        let mut blanks = vec![first];
        loop {
            let line = self.stream.next_line()?;
            if is_blank(&line) {
                blanks.push(line);
                continue;
            }
            if line::strip_indent(&line).is_some() {
                return Some(line);
            }
            self.stream.push_line(line);
            while let Some(blank) = blanks.pop() {
                self.stream.push_line(blank);
            }
            return None;
        }
    }

    /// Lines after the first of a list item or footnote body.
    fn read_continuation(&mut self, lines: &mut Vec<String>, body: Body) {
        while let Some(mut line) = self.stream.next_line() {
            if is_blank(&line) {
                match self.skip_blank_run(line) {
                    Some(next) => {
                        lines.push(String::new());
                        line = next;
                    }
                    None => return,
                }
            }
            if body == Body::Footnote && line::link_definition(&line).is_some() {
                self.stream.push_line(line);
                return;
            }
            let content = line::strip_indent(&line).unwrap_or(line.as_str());
            if body == Body::ListItem && line::list_marker(content).is_some() {
                self.stream.push_line(line);
                return;
            }
            lines.push(content.to_owned());
        }
    }

    fn read_list(&mut self, first: String, marker: ListMarker) -> Element {
        let kind = match marker {
            ListMarker::Numbered => BlockKind::OrderedList,
            ListMarker::Bullet(_) => BlockKind::ItemizedList,
        };
        let mut list = Element::block(kind);
        // Separation style fixed by the first two items.
        let mut tight: Option<bool> = None;
        let mut line = first;
        loop {
            self.stream.push_line(line);
            let lines = self.read_list_item();
            let mut item = Element::block(BlockKind::ListItem);
            self.parse_scoped(lines, &mut item);
            let next = self.next_list_item_line(&mut item);
            list.push(item);

            let Some((next, immediate)) = next else {
                break;
            };
            let same_kind = line::list_marker(&next).is_some_and(|(m, _)| m.continues(marker));
            if !same_kind || *tight.get_or_insert(immediate) != immediate {
                self.stream.push_line(next);
                break;
            }
            line = next;
        }
        if tight.unwrap_or(true) {
            unwrap_tight_items(&mut list);
        }
        list
    }

    fn read_list_item(&mut self) -> Vec<String> {
        let Some(first) = self.stream.next_line() else {
            return Vec::new();
        };
        let offset = line::list_marker(&first).map_or(0, |(_, offset)| offset);
        let mut lines = vec![first[offset..].to_owned()];
        self.read_continuation(&mut lines, Body::ListItem);
        lines
    }

    /// Find the line that starts the next sibling item, parsing any indented
    /// nested list into `item` on the way. Returns the line and whether it
    /// followed without a blank line.
    fn next_list_item_line(&mut self, item: &mut Element) -> Option<(String, bool)> {
        let mut blanks = 0;
        let line = loop {
            let line = self.stream.next_line()?;
            if !is_blank(&line) {
                break line;
            }
            blanks += 1;
        };

        let indented = line::strip_indent(&line).is_some();
        let content = line::strip_indent(&line).unwrap_or(line.as_str());
        if line::is_rule(&line) || line::list_marker(content).is_none() {
            self.stream.push_line(line);
            return None;
        }
        if indented {
            self.stream.push_line(line);
            let lines = self.read_indented();
            self.parse_scoped(lines, item);
            return self.next_list_item_line(item);
        }
        Some((line, blanks == 0))
    }

    fn read_footnote(&mut self, key: String, first: String) {
        let mut lines = vec![first];
        self.read_continuation(&mut lines, Body::Footnote);
        let mut note = Element::block(BlockKind::Note);
        note.set_attr("id", key.clone());
        self.parse_scoped(lines, &mut note);
        tracing::debug!(key = %key, "collected footnote");
        self.footnotes.push(note);
    }

    /// Contiguous non-blank lines joined by newlines.
    fn read_paragraph(&mut self) -> String {
        let mut text = String::new();
        while let Some(line) = self.stream.next_line() {
            if is_blank(&line) {
                self.stream.push_line(line);
                break;
            }
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
        }
        text
    }

    fn read_metadata(&mut self, text: &str) {
        let mut entry: Option<(String, String)> = None;
        for raw in text.split('\n') {
            let line = raw.trim_end();
            if let Some((key, value)) = line::metadata_key(line) {
                if let Some((key, value)) = entry.take() {
                    self.set_metadata(key, value);
                }
                entry = Some((key.to_owned(), value.to_owned()));
            } else if let Some((_, value)) = entry.as_mut() {
                value.push('\n');
                value.push_str(line);
            }
        }
        if let Some((key, value)) = entry {
            self.set_metadata(key, value);
        }
    }

    fn set_metadata(&mut self, key: String, value: String) {
        match metadata::apply_entry(&key, &value, &mut self.options) {
            Ok(()) => {
                tracing::debug!(key = %key, "metadata entry");
                self.metadata.insert(key, value);
            }
            Err(err) => {
                tracing::warn!(%err, "dropping metadata entry");
                self.diagnostics.push(err);
            }
        }
    }
}
