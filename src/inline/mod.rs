//! Inline parsing.
//!
//! A single left-to-right scan over a block's text. Plain runs go straight
//! into a text buffer; syntax bytes dispatch to the handlers below, which
//! open and close containers on an `InlineStack`. Unmatched markers never
//! fail the parse: they stay literal, or their containers are closed when
//! the text ends.

mod links;
mod markup;
mod stack;

use crate::Options;
use crate::limits::{MAX_EMPHASIS_RUN, MAX_INLINE_NESTING};
use crate::link_ref::LinkTable;
use crate::tree::{Element, InlineKind, Node, SpecialKind, Tag};
use crate::typography;

use links::{LinkTarget, match_footnote_ref, match_link, match_wikilink};
use markup::{entity, looks_like_markup, scan_markup};
use stack::{InlineStack, Marker, emphasis_kind};

/// Bytes that end a plain run outside code spans.
const SPECIAL: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0;
    let bytes = b"\t\n \\<&![`*_";
    while i < bytes.len() {
        table[bytes[i] as usize] = true;
        i += 1;
    }
    table
};

/// Bytes that end a plain run inside a code span.
const CODE_SPECIAL: [bool; 256] = {
    let mut table = [false; 256];
    table[b'\t' as usize] = true;
    table[b'`' as usize] = true;
    table[b'\'' as usize] = true;
    table
};

/// Inline parser bound to one parse session's options and link table.
pub struct InlineParser<'s> {
    options: &'s Options,
    links: &'s mut LinkTable,
    /// Recursion depth of link-description parses.
    depth: usize,
}

impl<'s> InlineParser<'s> {
    pub fn new(options: &'s Options, links: &'s mut LinkTable) -> Self {
        Self {
            options,
            links,
            depth: 0,
        }
    }

    /// Parse `text` and append the resulting nodes to `context`.
    ///
    /// The typographic pass runs over the new nodes when enabled. A line
    /// ending in two spaces marks `context` as verse.
    pub fn parse_into(&mut self, text: &str, context: &mut Element) {
        let (nodes, verse) = self.parse_fragment(text);
        let nodes = if self.options.smart_punctuation {
            typography::smarten(nodes, self.options)
        } else {
            nodes
        };
        if verse {
            context.set_attr("verse", "true");
        }
        context.children.extend(nodes);
    }

    /// Scan one fragment. Returns its nodes and whether it held a hard
    /// line break.
    fn parse_fragment(&mut self, text: &str) -> (Vec<Node>, bool) {
        let bytes = text.as_bytes();
        let mut stack = InlineStack::new();
        let mut verse = false;
        let mut pos = 0;

        while pos < bytes.len() {
            if let Some(doubled) = stack.code_span() {
                pos = self.code_byte(text, pos, doubled, &mut stack);
                continue;
            }
            pos = match bytes[pos] {
                b'\t' => {
                    stack.push_tab();
                    pos + 1
                }
                b'\n' => {
                    stack.push_char('\n');
                    pos + 1
                }
                b' ' => match hard_break(bytes, pos) {
                    Some(end) => {
                        verse = true;
                        self.line_break(bytes, end, &mut stack)
                    }
                    None => {
                        stack.push_char(' ');
                        pos + 1
                    }
                },
                b'\\' => self.escape(text, pos, &mut stack),
                b'<' => angle(text, pos, &mut stack),
                b'&' => match entity(&text[pos..]) {
                    Some((len, name)) => {
                        stack.push_node(Node::Entity(name.to_owned()));
                        pos + len
                    }
                    None => {
                        stack.push_char('&');
                        pos + 1
                    }
                },
                b'!' if bytes.get(pos + 1) == Some(&b'[') => self.bracket(text, pos, true, &mut stack),
                b'[' => self.bracket(text, pos, false, &mut stack),
                b'`' => backtick(text, pos, &mut stack),
                b'*' | b'_' => emphasis(text, pos, &mut stack),
                _ => plain_run(text, pos, &SPECIAL, &mut stack),
            };
        }
        (stack.finish(), verse)
    }

    /// One step inside an open code span, where only backticks, the
    /// ``` '' ``` closer and tabs mean anything.
    fn code_byte(&self, text: &str, pos: usize, doubled: bool, stack: &mut InlineStack) -> usize {
        let bytes = text.as_bytes();
        match bytes[pos] {
            b'`' => backtick(text, pos, stack),
            b'\'' => {
                if doubled && bytes.get(pos + 1) == Some(&b'\'') {
                    stack.downgrade_code();
                }
                stack.push_char('\'');
                pos + 1
            }
            b'\t' => {
                stack.push_tab();
                pos + 1
            }
            _ => plain_run(text, pos, &CODE_SPECIAL, stack),
        }
    }

    /// Hard break at `end` (just past the two spaces): a `br`, then one
    /// `space` node per indent column of the next line.
    fn line_break(&self, bytes: &[u8], end: usize, stack: &mut InlineStack) -> usize {
        if end >= bytes.len() {
            return end;
        }
        stack.push_node(Element::special(SpecialKind::HardBreak));
        stack.reset_column();
        let mut pos = end + 1;
        loop {
            let count = match bytes.get(pos) {
                Some(b' ') => 1,
                Some(b'\t') => 4,
                _ => break,
            };
            for _ in 0..count {
                stack.push_node(Element::special(SpecialKind::Space));
            }
            pos += 1;
        }
        pos
    }

    /// `\X`. The backslash survives when the typographic pass will run, so
    /// the pass can leave `X` alone.
    fn escape(&self, text: &str, pos: usize, stack: &mut InlineStack) -> usize {
        match text[pos + 1..].chars().next() {
            Some(ch) => {
                if self.options.smart_punctuation {
                    stack.push_char('\\');
                }
                stack.push_char(ch);
                pos + 1 + ch.len_utf8()
            }
            None => {
                stack.push_char('\\');
                pos + 1
            }
        }
    }

    /// `[`-introduced syntax at `pos`; `image` when it follows a `!`.
    fn bracket(&mut self, text: &str, pos: usize, image: bool, stack: &mut InlineStack) -> usize {
        let start = if image { pos + 1 } else { pos };
        let rest = &text[start..];

        if image {
            if let Some((name, len)) = match_wikilink(rest) {
                self.link(name, LinkTarget::Reference { ident: name }, true, stack);
                return start + len;
            }
        } else {
            if self.options.wiki_links {
                if let Some((name, len)) = match_wikilink(rest) {
                    stack.push_node(Element::with_text(Tag::Inline(InlineKind::WikiLink), name));
                    return start + len;
                }
            }
            if !self.options.plain {
                if let Some((key, len)) = match_footnote_ref(rest) {
                    let mut fnref = Element::inline(InlineKind::FootnoteRef);
                    fnref.set_attr("key", key);
                    stack.push_node(fnref);
                    return start + len;
                }
            }
        }

        if let Some(m) = match_link(rest) {
            self.link(m.desc, m.target, image, stack);
            return start + m.len;
        }
        stack.push_str(&text[pos..=start]);
        start + 1
    }

    /// Record the link in the table and emit a `linkref` whose children are
    /// the parsed description.
    fn link(&mut self, desc: &str, target: LinkTarget<'_>, image: bool, stack: &mut InlineStack) {
        let (url, title, ident, defined) = match target {
            LinkTarget::Inline { url, title } => (url, title, None, true),
            LinkTarget::Reference { ident } => {
                let ident = if ident.is_empty() { desc } else { ident };
                (None, None, Some(ident), false)
            }
        };
        let desc = if self.options.plain {
            desc
        } else {
            desc.strip_prefix('^').unwrap_or(desc)
        };

        let record = self.links.define(url, title, ident, defined, image);
        record.text = Some(desc.to_owned());
        let key = record.id.clone();

        let mut link = Element::inline(InlineKind::LinkRef);
        link.set_attr("key", key);
        if self.depth < MAX_INLINE_NESTING {
            self.depth += 1;
            let (children, _) = self.parse_fragment(desc);
            self.depth -= 1;
            link.children = children;
        } else {
            link.push(Node::Text(desc.to_owned()));
        }
        stack.push_node(link);
    }
}

/// Two spaces closing a line: returns the offset just past them.
fn hard_break(bytes: &[u8], pos: usize) -> Option<usize> {
    let end = pos + 2;
    let closes_line = bytes.get(pos + 1) == Some(&b' ') && matches!(bytes.get(end), None | Some(b'\n'));
    closes_line.then_some(end)
}

/// Copy bytes up to the next one flagged in `table`.
fn plain_run(text: &str, pos: usize, table: &[bool; 256], stack: &mut InlineStack) -> usize {
    let bytes = text.as_bytes();
    let mut end = pos + 1;
    while end < bytes.len() && !table[bytes[end] as usize] {
        end += 1;
    }
    stack.push_str(&text[pos..end]);
    end
}

/// Raw markup, autolinks, or a literal `<`.
fn angle(text: &str, pos: usize, stack: &mut InlineStack) -> usize {
    let rest = &text[pos..];
    if looks_like_markup(rest) {
        return match scan_markup(rest) {
            Some(len) => {
                stack.push_node(Node::Markup(rest[..len].to_owned()));
                pos + len
            }
            None => {
                let len = markup::unterminated_len(rest);
                tracing::trace!(len, "malformed markup kept as text");
                stack.push_str(&rest[..len]);
                pos + len
            }
        };
    }
    if let Some((len, address)) = markup::email_autolink(rest) {
        stack.push_node(Element::with_text(Tag::Inline(InlineKind::Email), address));
        return pos + len;
    }
    if let Some((len, url)) = markup::url_autolink(rest) {
        stack.push_node(Element::with_text(Tag::Inline(InlineKind::HyperLink), url));
        return pos + len;
    }
    stack.push_char('<');
    pos + 1
}

/// Backtick at `pos`, inside or outside a code span.
fn backtick(text: &str, pos: usize, stack: &mut InlineStack) -> usize {
    let bytes = text.as_bytes();
    let doubled = bytes.get(pos + 1) == Some(&b'`');
    match stack.code_span() {
        Some(_) if doubled => {
            stack.close();
            pos + 2
        }
        Some(true) => {
            stack.push_char('`');
            pos + 1
        }
        Some(false) => {
            stack.close();
            pos + 1
        }
        None if stack.depth() >= MAX_INLINE_NESTING => {
            stack.push_char('`');
            pos + 1
        }
        None if doubled => {
            stack.open(InlineKind::Code, Marker::Code { doubled: true });
            pos + 2
        }
        None if preceded_by_space(text, pos) => {
            stack.open(InlineKind::Code, Marker::Code { doubled: false });
            pos + 1
        }
        None => {
            stack.push_char('`');
            pos + 1
        }
    }
}

/// A run of `*` or `_`: closes what it can, else opens, else is literal.
fn emphasis(text: &str, pos: usize, stack: &mut InlineStack) -> usize {
    let bytes = text.as_bytes();
    let ch = bytes[pos];
    let run = bytes[pos..].iter().take_while(|&&b| b == ch).count();
    let width = run.min(MAX_EMPHASIS_RUN);

    if !preceded_by_space(text, pos) {
        let used = stack.close_emphasis(ch, width);
        if used > 0 {
            return pos + used;
        }
    }

    let followed_by_text = text[pos + width..].chars().next().is_some_and(|c| !c.is_whitespace());
    if preceded_by_space(text, pos) && followed_by_text && stack.depth() < MAX_INLINE_NESTING {
        let marker = Marker::Emphasis {
            ch,
            width: width as u8,
        };
        stack.open(emphasis_kind(width), marker);
        return pos + width;
    }

    stack.push_str(&text[pos..pos + run]);
    pos + run
}

/// Start of text or whitespace before `pos`.
#[inline]
fn preceded_by_space(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().is_none_or(char::is_whitespace)
}
