//! XHTML renderer.
//!
//! One recursive walk over the finished tree. Link references resolve
//! against the document's link table and section ids; footnotes render once,
//! after the body, as a definition list.

use crate::document::Document;
use crate::render::HtmlWriter;
use crate::tree::{BlockKind, Element, HeaderKind, InlineKind, Node, SpecialKind, Tag};

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.1//EN\" \
                       \"http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd\">\n";

/// Renders one document.
pub struct XhtmlRenderer<'d> {
    doc: &'d Document,
    out: HtmlWriter,
}

impl<'d> XhtmlRenderer<'d> {
    pub fn new(doc: &'d Document) -> Self {
        Self {
            doc,
            out: HtmlWriter::new(),
        }
    }

    /// Body content followed by the footnote list.
    pub fn render_fragment(mut self) -> String {
        self.write_fragment();
        self.out.into_string()
    }

    /// The fragment inside a complete XHTML 1.1 document.
    pub fn render_document(mut self) -> String {
        self.out.write_str(DOCTYPE);
        self.out.start_tag("html");
        self.out.write_attr("xmlns", "http://www.w3.org/1999/xhtml");
        self.out.write_str(">\n");
        self.out.open_tag_nl("head");
        if let Some(title) = self.doc.title() {
            self.out.open_tag("title");
            self.out.write_text(title);
            self.out.close_tag_nl("title");
        }
        self.out.start_tag("meta");
        self.out.write_attr("http-equiv", "Content-Type");
        self.out.write_attr("content", "text/html; charset=utf-8");
        self.out.write_str(" />\n");
        self.out.close_tag_nl("head");
        self.out.open_tag_nl("body");
        self.write_fragment();
        self.out.close_tag_nl("body");
        self.out.close_tag_nl("html");
        self.out.into_string()
    }

    fn write_fragment(&mut self) {
        self.node_children(&self.doc.body().children);
        self.footnotes();
    }

    fn classes(&self) -> bool {
        self.doc.options().emit_classes
    }

    fn class(&mut self, class: &str) {
        if self.classes() {
            self.out.write_attr("class", class);
        }
    }

    fn footnotes(&mut self) {
        let doc = self.doc;
        let notes = doc
            .header()
            .children
            .iter()
            .filter_map(Node::as_element)
            .filter(|e| e.tag == Tag::Header(HeaderKind::Notes))
            .flat_map(|notes| notes.children.iter().filter_map(Node::as_element));

        let mut first = true;
        for note in notes {
            if first {
                self.out.thematic_break();
                self.out.start_tag("dl");
                self.class("notelist");
                self.out.write_str(">\n");
                first = false;
            }
            let key = note.attr("id").unwrap_or_default();
            self.out.start_tag("dt");
            self.class("notekey");
            self.out.write_byte(b'>');
            self.out.start_tag("a");
            self.class("notedef");
            self.out.write_attr("name", &format!("fn.{key}"));
            self.out.write_byte(b'>');
            self.out.write_text(key);
            self.out.close_tag("a");
            self.out.close_tag_nl("dt");

            self.out.start_tag("dd");
            self.class("notebody");
            self.out.write_byte(b'>');
            if starts_with_block(note) {
                self.out.newline();
            }
            self.node_children(&note.children);
            self.out.close_tag_nl("dd");
        }
        if !first {
            self.out.close_tag_nl("dl");
        }
    }

    /// Children of a container. The first paragraph, and the first after
    /// each heading, is marked `first`.
    fn node_children(&mut self, nodes: &[Node]) {
        let mut first = true;
        for node in nodes {
            self.node(node, first);
            first = matches!(node, Node::Element(e) if e.tag.is_heading());
        }
    }

    fn node(&mut self, node: &Node, first: bool) {
        match node {
            Node::Text(text) => self.out.write_text(text),
            Node::Entity(name) => self.out.write_entity(name),
            Node::Markup(raw) => self.out.write_string(raw),
            Node::Element(element) => match element.tag {
                Tag::Block(kind) => self.block(kind, element, first),
                Tag::Inline(kind) => self.inline(kind, element),
                Tag::Special(kind) => self.special(kind),
                // Side tables live in the header and never render in place.
                Tag::Header(_) => {}
            },
        }
    }

    /// `<name attrs>` with every attribute except the internal `verse`.
    fn open_with_attrs(&mut self, name: &str, element: &Element) {
        self.out.start_tag(name);
        for (key, value) in element.sorted_attrs() {
            if key != "verse" {
                self.out.write_attr(key, value);
            }
        }
        self.out.write_byte(b'>');
    }

    fn block(&mut self, kind: BlockKind, element: &Element, first: bool) {
        let name = element.tag.name();
        match kind {
            BlockKind::Body | BlockKind::Section(_) | BlockKind::Note => {
                self.node_children(&element.children);
            }
            BlockKind::Paragraph => {
                self.out.start_tag("p");
                if element.attr("verse").is_some() {
                    self.class("verse");
                } else if first {
                    self.class("first");
                }
                self.out.write_byte(b'>');
                self.node_children(&element.children);
                self.out.close_tag_nl("p");
            }
            BlockKind::Heading(_) => {
                self.open_with_attrs(name, element);
                self.node_children(&element.children);
                self.out.close_tag_nl(name);
            }
            BlockKind::Rule => self.out.thematic_break(),
            BlockKind::Literal => {
                self.open_with_attrs(name, element);
                self.node_children(&element.children);
                self.out.close_tag_nl(name);
            }
            BlockKind::Quotation
            | BlockKind::OrderedList
            | BlockKind::ItemizedList
            | BlockKind::DefinitionList => {
                self.open_with_attrs(name, element);
                self.out.newline();
                self.node_children(&element.children);
                self.out.close_tag_nl(name);
            }
            BlockKind::ListItem | BlockKind::DefinitionTerm | BlockKind::DefinitionItem => {
                self.open_with_attrs(name, element);
                if starts_with_block(element) {
                    self.out.newline();
                }
                self.node_children(&element.children);
                self.out.close_tag_nl(name);
            }
        }
    }

    fn inline(&mut self, kind: InlineKind, element: &Element) {
        match kind {
            InlineKind::Emphasis
            | InlineKind::Strong
            | InlineKind::Code
            | InlineKind::Monospace
            | InlineKind::Underline => {
                let name = element.tag.name();
                self.open_with_attrs(name, element);
                self.node_children(&element.children);
                self.out.close_tag(name);
            }
            InlineKind::EmphasisStrong => {
                self.out.open_tag("strong");
                self.out.open_tag("em");
                self.node_children(&element.children);
                self.out.close_tag("em");
                self.out.close_tag("strong");
            }
            InlineKind::WikiLink => {
                let target = element.text_content();
                let href = self.doc.options().wiki_link_format.replace("{0}", &target);
                self.out.start_tag("a");
                self.class("wikilink");
                self.out.write_attr("href", &href);
                self.out.write_byte(b'>');
                self.node_children(&element.children);
                self.out.close_tag("a");
            }
            InlineKind::Email => {
                let address = element.text_content();
                self.anchor("email", &format!("mailto:{address}"), &address);
            }
            InlineKind::HyperLink => {
                let url = element.text_content();
                self.anchor("hlink", &url, &url);
            }
            InlineKind::LinkRef => self.link_ref(element),
            InlineKind::FootnoteRef => {
                let key = element.attr("key").unwrap_or_default();
                self.anchor("fnref", &format!("#fn.{key}"), &format!("[{key}]"));
            }
        }
    }

    /// `<a class href>text</a>`, the class subject to `emit_classes`.
    fn anchor(&mut self, class: &str, href: &str, text: &str) {
        self.out.start_tag("a");
        self.class(class);
        self.out.write_attr("href", href);
        self.out.write_byte(b'>');
        self.out.write_text(text);
        self.out.close_tag("a");
    }

    fn link_ref(&mut self, element: &Element) {
        let doc = self.doc;
        let key = element.attr("key").unwrap_or_default();

        if let Some(title) = doc.section_title(key) {
            self.out.start_tag("a");
            self.class("xref");
            self.out.write_attr("href", &format!("#{key}"));
            self.out.write_attr("title", title);
            self.out.write_byte(b'>');
            self.node_children(&element.children);
            self.out.close_tag("a");
        }

        let Some(record) = doc.links().get(key) else {
            self.node_children(&element.children);
            return;
        };

        if !record.is_defined {
            let text = record.text.as_deref().unwrap_or_default();
            self.out.write_byte(b'[');
            self.out.write_text(text);
            self.out.write_str("][");
            if record.ident != text {
                self.out.write_text(&record.ident);
            }
            self.out.write_byte(b']');
            return;
        }

        let url = record.url.as_deref().unwrap_or_default();
        let title = record.title.as_deref().filter(|t| !t.is_empty());
        if record.is_image {
            self.out.start_tag("img");
            self.class("image");
            self.out.write_attr("src", url);
            if let Some(title) = title {
                self.out.write_attr("title", title);
            }
            self.out.write_attr("alt", &alt_text(element));
            self.out.write_str(" />");
        } else {
            self.out.start_tag("a");
            self.class("link");
            self.out.write_attr("href", url);
            if let Some(title) = title {
                self.out.write_attr("title", title);
            }
            self.out.write_byte(b'>');
            self.node_children(&element.children);
            self.out.close_tag("a");
        }
    }

    fn special(&mut self, kind: SpecialKind) {
        match kind {
            SpecialKind::HardBreak => self.out.line_break(),
            SpecialKind::Space => self.out.write_str("&nbsp;"),
            SpecialKind::EndOfSentence => self.out.write_str("&nbsp;&nbsp;"),
            SpecialKind::Hyphen => {}
            SpecialKind::OpenDoubleQuote => self.out.write_str("&#8220;"),
            SpecialKind::CloseDoubleQuote => self.out.write_str("&#8221;"),
            SpecialKind::OpenSingleQuote => self.out.write_str("&#8216;"),
            SpecialKind::CloseSingleQuote => self.out.write_str("&#8217;"),
            SpecialKind::Ellipsis => self.out.write_str("&#8230;"),
            SpecialKind::EnDash => self.out.write_str("&#8211;"),
            SpecialKind::EmDash => {
                if self.doc.options().spaces_around_dashes {
                    self.out.write_str("&nbsp;&#8212;&nbsp;");
                } else {
                    self.out.write_str("&#8212;");
                }
            }
        }
    }
}

fn starts_with_block(element: &Element) -> bool {
    matches!(element.children.first(), Some(Node::Element(e)) if matches!(e.tag, Tag::Block(_)))
}

/// Descendant text for an `alt` attribute, with typographic specials
/// written as the characters they stand for.
fn alt_text(element: &Element) -> String {
    let mut out = String::new();
    collect_alt(&element.children, &mut out);
    out
}

fn collect_alt(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Entity(name) => {
                out.push_str(&html_escape::decode_html_entities(&format!("&{name};")));
            }
            Node::Markup(_) => {}
            Node::Element(e) => match e.tag {
                Tag::Special(kind) => out.push_str(special_text(kind)),
                _ => collect_alt(&e.children, out),
            },
        }
    }
}

fn special_text(kind: SpecialKind) -> &'static str {
    match kind {
        SpecialKind::HardBreak | SpecialKind::Space | SpecialKind::EndOfSentence => " ",
        SpecialKind::Hyphen => "",
        SpecialKind::OpenDoubleQuote => "\u{201c}",
        SpecialKind::CloseDoubleQuote => "\u{201d}",
        SpecialKind::OpenSingleQuote => "\u{2018}",
        SpecialKind::CloseSingleQuote => "\u{2019}",
        SpecialKind::Ellipsis => "\u{2026}",
        SpecialKind::EmDash => "\u{2014}",
        SpecialKind::EnDash => "\u{2013}",
    }
}
