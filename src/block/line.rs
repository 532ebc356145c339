//! Single-line classifiers used by the block parser.

use crate::cursor::Cursor;

/// List marker kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `+` or `*`.
    Bullet(u8),
    /// `N.`
    Numbered,
}

impl ListMarker {
    /// Whether two markers belong to the same list.
    #[inline]
    pub fn continues(self, other: ListMarker) -> bool {
        self == other
    }
}

/// A `[label]: url "title"` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDefinition<'a> {
    pub label: &'a str,
    pub url: Option<&'a str>,
    pub title: Option<&'a str>,
    /// Byte offset just past `[label]:` and following whitespace.
    pub body_start: usize,
}

/// Content after a four-space or tab indent.
#[inline]
pub fn strip_indent(line: &str) -> Option<&str> {
    line.strip_prefix("    ").or_else(|| line.strip_prefix('\t'))
}

/// Content after a quotation marker: up to three spaces, `>`, one optional
/// space.
pub fn quote_content(line: &str) -> Option<&str> {
    let mut c = Cursor::new(line);
    c.skip_spaces_max(3);
    if !c.eat(b'>') {
        return None;
    }
    c.eat(b' ');
    Some(c.rest())
}

/// Three or more of one of `-`, `*`, `_`, optionally spaced, after at most
/// three spaces.
pub fn is_rule(line: &str) -> bool {
    let mut c = Cursor::new(line);
    c.skip_spaces_max(3);
    let Some(marker) = c.peek().filter(|&b| matches!(b, b'-' | b'*' | b'_')) else {
        return false;
    };
    let mut count = 0;
    while let Some(b) = c.peek() {
        if b == marker {
            count += 1;
            c.advance(1);
        } else if b.is_ascii_whitespace() {
            c.advance(1);
        } else {
            return false;
        }
    }
    count >= 3
}

/// List marker and the offset of the item text.
pub fn list_marker(line: &str) -> Option<(ListMarker, usize)> {
    let mut c = Cursor::new(line);
    c.skip_spaces_max(3);
    let marker = match c.peek()? {
        b @ (b'-' | b'+' | b'*') => {
            c.advance(1);
            ListMarker::Bullet(b)
        }
        b'1'..=b'9' => {
            c.skip_while(|b| b.is_ascii_digit());
            if !c.eat(b'.') {
                return None;
            }
            ListMarker::Numbered
        }
        _ => return None,
    };
    if c.skip_whitespace() == 0 {
        return None;
    }
    Some((marker, c.offset()))
}

/// ATX heading depth and title.
pub fn atx_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    let title = rest.trim_start();
    if title.len() == rest.len() {
        return None;
    }
    let mut title = title.trim_end();
    // Optional closing run of `#`, which must be preceded by whitespace.
    let without_hashes = title.trim_end_matches('#');
    if without_hashes.len() < title.len() {
        let body = without_hashes.trim_end();
        if !body.is_empty() && body.len() < without_hashes.len() {
            title = body;
        }
    }
    if title.is_empty() {
        return None;
    }
    Some((hashes as u8, title))
}

/// Depth for a setext underline: all `=` is 1, all `-` is 2.
pub fn setext_depth(line: &str) -> Option<u8> {
    let body = line.trim_end();
    let first = body.bytes().next()?;
    if !body.bytes().all(|b| b == b'=' || b == b'-') {
        return None;
    }
    Some(if first == b'=' { 1 } else { 2 })
}

/// `[label]: url "title"`, with the destination and title optional.
pub fn link_definition(line: &str) -> Option<LinkDefinition<'_>> {
    let mut c = Cursor::new(line);
    c.skip_spaces_max(3);
    if !c.eat(b'[') {
        return None;
    }
    let label_start = c.offset();
    if c.skip_while(|b| b != b']') == 0 {
        return None;
    }
    let label = c.slice_from(label_start);
    c.advance(1);
    if !c.eat(b':') {
        return None;
    }
    c.skip_whitespace();
    let body_start = c.offset();

    let url_start = c.offset();
    c.skip_while(|b| !b.is_ascii_whitespace());
    let url = Some(c.slice_from(url_start)).filter(|u| !u.is_empty());

    let mut title = None;
    if url.is_some() {
        let mut t = c;
        if t.skip_whitespace() > 0 && t.eat(b'"') {
            let title_start = t.offset();
            if t.skip_while(|b| b != b'"') > 0 && t.at(b'"') {
                title = Some(t.slice_from(title_start));
            }
        }
    }

    Some(LinkDefinition {
        label,
        url,
        title,
        body_start,
    })
}

/// `Key: value` metadata line: key characters are ASCII letters, digits,
/// space, `_`, `/` and `-`; at least one whitespace follows the colon.
pub fn metadata_key(line: &str) -> Option<(&str, &str)> {
    let mut c = Cursor::new(line);
    let n = c.skip_while(|b| b.is_ascii_alphanumeric() || matches!(b, b' ' | b'_' | b'/' | b'-'));
    if n == 0 {
        return None;
    }
    let key = c.slice_from(0);
    if !c.eat(b':') || c.skip_whitespace() == 0 {
        return None;
    }
    Some((key, c.rest()))
}

/// Expand tabs to four-column stops.
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_owned();
    }
    let mut out = String::with_capacity(line.len() + 8);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = 4 - column % 4;
            out.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}
