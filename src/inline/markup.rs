//! Raw markup, autolinks and entity references.
//!
//! Text that looks like a tag is accepted verbatim only when it forms one
//! well-formed node: a comment, a self-closing tag, or an element whose
//! content balances. Anything else degrades to literal text.

use crate::cursor::Cursor;
use crate::limits::MAX_MARKUP_DEPTH;

#[inline]
fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

/// Whether `text` (at a `<`) starts like a tag or comment: `<!--`,
/// `<name>`, `<name/>`, `<name />`, `</name>` or `<name attr=`.
pub fn looks_like_markup(text: &str) -> bool {
    let mut c = Cursor::new(text);
    if !c.eat(b'<') {
        return false;
    }
    if c.eat_str("!--") {
        return true;
    }
    c.eat(b'/');
    if c.skip_while(is_tag_byte) == 0 {
        return false;
    }
    let after_name = c;

    if c.skip_whitespace() > 0 && c.skip_while(is_tag_byte) > 0 && c.at(b'=') {
        return true;
    }

    let mut c = after_name;
    if c.at(b'>') {
        return true;
    }
    c.eat(b' ');
    c.eat(b'/') && c.at(b'>')
}

/// Length of the well-formed node at the start of `text`, if there is one.
pub fn scan_markup(text: &str) -> Option<usize> {
    let mut c = Cursor::new(text);
    if c.eat_str("<!--") {
        skip_past(&mut c, "-->")?;
    } else {
        scan_element(&mut c, 0)?;
    }
    Some(c.offset())
}

fn scan_element(c: &mut Cursor<'_>, depth: usize) -> Option<()> {
    if depth > MAX_MARKUP_DEPTH || !c.eat(b'<') {
        return None;
    }
    let name = scan_name(c)?;

    loop {
        let spaced = c.skip_whitespace() > 0;
        if c.eat_str("/>") {
            return Some(());
        }
        if c.eat(b'>') {
            break;
        }
        if !spaced {
            return None;
        }
        scan_name(c)?;
        c.skip_whitespace();
        if !c.eat(b'=') {
            return None;
        }
        c.skip_whitespace();
        let quote = c.peek().filter(|&q| q == b'"' || q == b'\'')?;
        c.advance(1);
        let start = c.offset();
        let end = c.find(quote)?;
        let value = &c.rest()[..end - start];
        if value.contains('<') || !entities_well_formed(value) {
            return None;
        }
        c.advance(end - start + 1);
    }

    loop {
        let start = c.offset();
        let lt = c.find(b'<')?;
        if !entities_well_formed(&c.rest()[..lt - start]) {
            return None;
        }
        c.advance(lt - start);

        if c.eat_str("</") {
            let close = scan_name(c)?;
            c.skip_whitespace();
            return (close == name && c.eat(b'>')).then_some(());
        }
        if c.eat_str("<!--") {
            skip_past(c, "-->")?;
        } else if c.eat_str("<![CDATA[") {
            skip_past(c, "]]>")?;
        } else {
            scan_element(c, depth + 1)?;
        }
    }
}

/// XML-style name: a letter, `_` or `:`, then letters, digits, `_:.-`.
fn scan_name<'a>(c: &mut Cursor<'a>) -> Option<&'a str> {
    let start = c.offset();
    if !c.peek().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b':') {
        return None;
    }
    c.skip_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'.' | b'-'));
    Some(c.slice_from(start))
}

fn skip_past(c: &mut Cursor<'_>, terminator: &str) -> Option<()> {
    let at = c.rest().find(terminator)?;
    c.advance(at + terminator.len());
    Some(())
}

/// Every `&` starts an `&name;` or `&#digits;` reference.
fn entities_well_formed(text: &str) -> bool {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        match entity(&rest[amp..]) {
            Some((len, _)) => rest = &rest[amp + len..],
            None => return false,
        }
    }
    true
}

/// Length of a tag that failed to scan: up to and including the first `>`
/// outside double quotes, skipping backslash-escaped bytes. The whole text
/// when there is none.
pub fn unterminated_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut in_quote = false;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'"' => in_quote = !in_quote,
            b'>' if !in_quote => return i + 1,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// `<user@host>`. Returns the length and the address.
pub fn email_autolink(text: &str) -> Option<(usize, &str)> {
    let mut c = Cursor::new(text);
    if !c.eat(b'<') {
        return None;
    }
    let local = c.skip_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-'));
    if local == 0 || !c.eat(b'@') {
        return None;
    }
    close_autolink(text, c)
}

/// `<scheme://rest>`. Returns the length and the URL.
pub fn url_autolink(text: &str) -> Option<(usize, &str)> {
    let mut c = Cursor::new(text);
    if !c.eat(b'<') || c.skip_while(|b| b.is_ascii_lowercase()) == 0 || !c.eat_str("://") {
        return None;
    }
    close_autolink(text, c)
}

fn close_autolink<'a>(text: &'a str, c: Cursor<'a>) -> Option<(usize, &'a str)> {
    let close = c.find(b'>')?;
    if close == c.offset() {
        return None;
    }
    Some((close + 1, &text[1..close]))
}

/// `&name;` with a name of `#`, letters and digits. Returns the length and
/// the name.
pub fn entity(text: &str) -> Option<(usize, &str)> {
    let mut c = Cursor::new(text);
    if !c.eat(b'&') || c.skip_while(|b| b.is_ascii_alphanumeric() || b == b'#') == 0 {
        return None;
    }
    let end = c.offset();
    c.eat(b';').then(|| (end + 1, &text[1..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_markup() {
        assert!(looks_like_markup("<div>"));
        assert!(looks_like_markup("</span>"));
        assert!(looks_like_markup("<br/>"));
        assert!(looks_like_markup("<br />"));
        assert!(looks_like_markup("<a href=\"x\">"));
        assert!(looks_like_markup("<!-- c -->"));
        assert!(!looks_like_markup("<Div>"));
        assert!(!looks_like_markup("< div>"));
        assert!(!looks_like_markup("<a b>"));
        assert!(!looks_like_markup("<3"));
    }

    #[test]
    fn test_scan_balanced_elements() {
        assert_eq!(scan_markup("<b>bold</b> after"), Some(11));
        assert_eq!(scan_markup("<br/>x"), Some(5));
        assert_eq!(scan_markup("<br />"), Some(6));
        assert_eq!(scan_markup("<a href=\"x>y\">t</a>"), Some(19));
        assert_eq!(scan_markup("<div><p>a &amp; b</p><!-- c --></div>"), Some(37));
        assert_eq!(scan_markup("<x><![CDATA[<>]]></x>"), Some(21));
        assert_eq!(scan_markup("<!-- note -->rest"), Some(13));
    }

    #[test]
    fn test_scan_rejects_malformed() {
        assert_eq!(scan_markup("<b>open"), None);
        assert_eq!(scan_markup("<b>x</i>"), None);
        assert_eq!(scan_markup("<a href=x>t</a>"), None);
        assert_eq!(scan_markup("<p>a & b</p>"), None);
        assert_eq!(scan_markup("<!-- open"), None);
    }

    #[test]
    fn test_scan_depth_is_bounded() {
        let deep = format!("{}{}", "<b>".repeat(100), "</b>".repeat(100));
        assert_eq!(scan_markup(&deep), None);
        let shallow = format!("{}{}", "<b>".repeat(10), "</b>".repeat(10));
        assert_eq!(scan_markup(&shallow), Some(shallow.len()));
    }

    #[test]
    fn test_unterminated_len() {
        assert_eq!(unterminated_len("<b>open"), 3);
        assert_eq!(unterminated_len("<a title=\"x>y\">t"), 15);
        assert_eq!(unterminated_len("<a \\> b>"), 8);
        assert_eq!(unterminated_len("<a"), 2);
    }

    #[test]
    fn test_autolinks() {
        assert_eq!(email_autolink("<me@x.com> z"), Some((10, "me@x.com")));
        assert_eq!(email_autolink("<Me@x.com>"), None);
        assert_eq!(email_autolink("<me@>"), None);
        assert_eq!(url_autolink("<http://x.com/a?b>"), Some((18, "http://x.com/a?b")));
        assert_eq!(url_autolink("<x.com>"), None);
    }

    #[test]
    fn test_entities() {
        assert_eq!(entity("&amp; x"), Some((5, "amp")));
        assert_eq!(entity("&#8212;"), Some((7, "#8212")));
        assert_eq!(entity("& x;"), None);
        assert_eq!(entity("&amp"), None);
    }
}
