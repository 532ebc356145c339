//! Bracket syntax: links, images, wikilinks and footnote references.
//!
//! Each matcher looks at text starting at the opening `[` and returns the
//! captured pieces plus the byte length of the whole construct.

use memchr::memchr2;

use crate::cursor::Cursor;

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `(url "title")`, both parts optional.
    Inline {
        url: Option<&'a str>,
        title: Option<&'a str>,
    },
    /// `[ident]`; empty for the `[desc][]` shorthand.
    Reference { ident: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub desc: &'a str,
    pub target: LinkTarget<'a>,
    pub len: usize,
}

/// `[desc](url "title")`, `[desc][ident]` or `[desc][]`.
///
/// The description is non-empty and stays on one line. Every `]` is tried
/// as its end, so `[a] b][c]` takes `a] b` as the description.
pub fn match_link(text: &str) -> Option<LinkMatch<'_>> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let mut from = 1;
    loop {
        let close = from + memchr2(b']', b'\n', bytes.get(from..)?)?;
        if bytes[close] == b'\n' {
            return None;
        }
        if close > 1 {
            if let Some((target, len)) = match_target(text, close + 1) {
                return Some(LinkMatch {
                    desc: &text[1..close],
                    target,
                    len,
                });
            }
        }
        from = close + 1;
    }
}

/// The part after `]`. Returns the target and the offset just past it.
fn match_target(text: &str, start: usize) -> Option<(LinkTarget<'_>, usize)> {
    let mut c = Cursor::new_at(text, start);
    if c.eat(b'(') {
        let url_start = c.offset();
        c.skip_while(|b| !matches!(b, b' ' | b'\t' | b'"' | b')'));
        let url = Some(c.slice_from(url_start)).filter(|u| !u.is_empty());
        if c.eat(b')') {
            return Some((LinkTarget::Inline { url, title: None }, c.offset()));
        }
        c.skip_whitespace();
        if !c.eat(b'"') {
            return None;
        }
        let (title, len) = quoted_title(c.rest())?;
        let end = c.offset() + len;
        return Some((LinkTarget::Inline { url, title: Some(title) }, end));
    }

    c.skip_whitespace();
    if !c.eat(b'[') {
        return None;
    }
    let ident_start = c.offset();
    let close = c.find(b']')?;
    let ident = &text[ident_start..close];
    Some((LinkTarget::Reference { ident }, close + 1))
}

/// Shortest non-empty one-line title followed by `")`. `rest` starts just
/// after the opening quote; the returned length covers the closing `")`.
fn quoted_title(rest: &str) -> Option<(&str, usize)> {
    let bytes = rest.as_bytes();
    if matches!(bytes.first(), None | Some(b'\n')) {
        return None;
    }
    let mut from = 1;
    loop {
        let quote = from + memchr2(b'"', b'\n', bytes.get(from..)?)?;
        if bytes[quote] == b'\n' {
            return None;
        }
        if bytes.get(quote + 1) == Some(&b')') {
            return Some((&rest[..quote], quote + 2));
        }
        from = quote + 1;
    }
}

/// `[[name]]`: the shortest one-line name followed by `]]`.
pub fn match_wikilink(text: &str) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if !text.starts_with("[[") || matches!(bytes.get(2), None | Some(b'\n')) {
        return None;
    }
    let mut from = 3;
    loop {
        let close = from + memchr2(b']', b'\n', bytes.get(from..)?)?;
        if bytes[close] == b'\n' {
            return None;
        }
        if bytes.get(close + 1) == Some(&b']') {
            return Some((&text[2..close], close + 2));
        }
        from = close + 1;
    }
}

/// `[^key]` footnote reference.
pub fn match_footnote_ref(text: &str) -> Option<(&str, usize)> {
    let rest = text.strip_prefix("[^")?;
    let close = memchr::memchr(b']', rest.as_bytes())?;
    if close == 0 {
        return None;
    }
    Some((&rest[..close], close + 3))
}
