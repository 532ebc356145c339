//! Tree dump.
//!
//! Writes the typed tree as XML under a `markdown` root: the header side
//! tables first, then the body. Attributes come out sorted; sections carry
//! their depth. Block and header elements end with a newline so the dump
//! diffs line by line.

use crate::document::Document;
use crate::render::HtmlWriter;
use crate::tree::{Element, Node, Tag};

/// Serialize `doc` as XML.
pub fn dump(doc: &Document) -> String {
    let mut out = HtmlWriter::new();
    out.open_tag_nl("markdown");
    element(&mut out, doc.header());
    element(&mut out, doc.body());
    out.close_tag_nl("markdown");
    out.into_string()
}

fn element(out: &mut HtmlWriter, element: &Element) {
    let name = element.tag.name();
    out.start_tag(name);
    if let Some(depth) = element.section_depth() {
        out.write_attr("depth", &depth.to_string());
    }
    for (key, value) in element.sorted_attrs() {
        out.write_attr(key, value);
    }
    if element.children.is_empty() {
        out.write_str(" />");
    } else {
        out.write_byte(b'>');
        for child in &element.children {
            node(out, child);
        }
        out.close_tag(name);
    }
    if matches!(element.tag, Tag::Block(_) | Tag::Header(_)) {
        out.newline();
    }
}

fn node(out: &mut HtmlWriter, node: &Node) {
    match node {
        Node::Text(text) => out.write_text(text),
        Node::Entity(name) => out.write_entity(name),
        Node::Markup(raw) => out.write_string(raw),
        Node::Element(child) => element(out, child),
    }
}

#[cfg(test)]
mod tests {
    use crate::block::BlockParser;
    use crate::Options;

    fn dump(input: &str) -> String {
        BlockParser::new(input, Options::default()).parse().to_xml()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(dump(""), "<markdown>\n<header />\n<body />\n</markdown>\n");
    }

    #[test]
    fn test_sections_and_inlines() {
        let xml = dump("# Title\n\nSome *em* & <b>bold</b>.");
        assert_eq!(
            xml,
            "<markdown>\n<header />\n<body><sect depth=\"1\"><h1 id=\"title\">Title</h1>\n\
             <p>Some <em>em</em> &amp; <b>bold</b>.</p>\n</sect>\n</body>\n</markdown>\n"
        );
    }

    #[test]
    fn test_links_in_header() {
        let xml = dump("See [here][1].\n\n[1]: http://x.com \"T\"");
        assert!(xml.contains("<linkref key=\"1\">here</linkref>"), "{xml}");
        assert!(xml.contains("<links><link "), "{xml}");
        assert!(xml.contains("url=\"http://x.com\""), "{xml}");
    }

    #[test]
    fn test_entities_and_specials() {
        let options = Options {
            smart_punctuation: true,
            ..Options::default()
        };
        let xml = BlockParser::new("a &copy; b...", options).parse().to_xml();
        assert!(xml.contains("<p>a &copy; b<ellipsis /></p>"), "{xml}");
    }
}
