//! Typed markup tree.
//!
//! Every element carries a [`Tag`] from a closed vocabulary, an unordered
//! attribute map and an ordered child list. Leaves are text, entity
//! references or verbatim foreign markup.

use rustc_hash::FxHashMap;

/// Structural block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Document body.
    Body,
    /// A heading plus the blocks it owns. Depth 1-6.
    Section(u8),
    /// Heading line. Depth 1-6.
    Heading(u8),
    Paragraph,
    Quotation,
    /// Footnote body.
    Note,
    Rule,
    /// Verbatim block (`pre`).
    Literal,
    ListItem,
    OrderedList,
    ItemizedList,
    DefinitionList,
    DefinitionTerm,
    DefinitionItem,
}

/// Span-level kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Emphasis,
    Strong,
    EmphasisStrong,
    Code,
    Monospace,
    Underline,
    WikiLink,
    Email,
    HyperLink,
    /// Reference into the link table, keyed by the `key` attribute.
    LinkRef,
    /// Footnote reference, keyed by the `key` attribute.
    FootnoteRef,
}

/// Typographic and spacing nodes. Always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    HardBreak,
    Space,
    EndOfSentence,
    Hyphen,
    OpenDoubleQuote,
    CloseDoubleQuote,
    OpenSingleQuote,
    CloseSingleQuote,
    Ellipsis,
    EmDash,
    EnDash,
}

/// Side tables spliced into the document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Header,
    Metadata,
    Item,
    Links,
    Link,
    Notes,
}

/// Element tag, one variant per tag family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Block(BlockKind),
    Inline(InlineKind),
    Special(SpecialKind),
    Header(HeaderKind),
}

const HEADING_NAMES: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl Tag {
    /// Symbolic name used by the tree dump.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Block(kind) => match kind {
                BlockKind::Body => "body",
                BlockKind::Section(_) => "sect",
                BlockKind::Heading(depth) => {
                    HEADING_NAMES[usize::from(depth.clamp(1, 6)) - 1]
                }
                BlockKind::Paragraph => "p",
                BlockKind::Quotation => "blockquote",
                BlockKind::Note => "note",
                BlockKind::Rule => "hr",
                BlockKind::Literal => "pre",
                BlockKind::ListItem => "li",
                BlockKind::OrderedList => "ol",
                BlockKind::ItemizedList => "ul",
                BlockKind::DefinitionList => "dl",
                BlockKind::DefinitionTerm => "dt",
                BlockKind::DefinitionItem => "dd",
            },
            Tag::Inline(kind) => match kind {
                InlineKind::Emphasis => "em",
                InlineKind::Strong => "strong",
                InlineKind::EmphasisStrong => "emstrong",
                InlineKind::Code => "code",
                InlineKind::Monospace => "tt",
                InlineKind::Underline => "u",
                InlineKind::WikiLink => "wikilink",
                InlineKind::Email => "email",
                InlineKind::HyperLink => "hlink",
                InlineKind::LinkRef => "linkref",
                InlineKind::FootnoteRef => "fnref",
            },
            Tag::Special(kind) => match kind {
                SpecialKind::HardBreak => "br",
                SpecialKind::Space => "space",
                SpecialKind::EndOfSentence => "eos",
                SpecialKind::Hyphen => "hyphen",
                SpecialKind::OpenDoubleQuote => "ldq",
                SpecialKind::CloseDoubleQuote => "rdq",
                SpecialKind::OpenSingleQuote => "lsq",
                SpecialKind::CloseSingleQuote => "rsq",
                SpecialKind::Ellipsis => "ellipsis",
                SpecialKind::EmDash => "emdash",
                SpecialKind::EnDash => "endash",
            },
            Tag::Header(kind) => match kind {
                HeaderKind::Header => "header",
                HeaderKind::Metadata => "metadata",
                HeaderKind::Item => "item",
                HeaderKind::Links => "links",
                HeaderKind::Link => "link",
                HeaderKind::Notes => "notes",
            },
        }
    }

    /// Whether this is a heading tag (`h1`..`h6`).
    #[inline]
    pub fn is_heading(self) -> bool {
        matches!(self, Tag::Block(BlockKind::Heading(_)))
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    /// Entity reference, stored without `&` and `;`.
    Entity(String),
    /// Well-formed foreign markup, emitted verbatim.
    Markup(String),
    Element(Element),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Attribute map. Keys come from a fixed set, so they are static.
pub type Attributes = FxHashMap<&'static str, String>;

/// A tagged element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Attributes::default(),
            children: Vec::new(),
        }
    }

    /// Element holding one text child.
    pub fn with_text(tag: Tag, text: impl Into<String>) -> Self {
        let mut element = Self::new(tag);
        element.children.push(Node::Text(text.into()));
        element
    }

    pub fn block(kind: BlockKind) -> Self {
        Self::new(Tag::Block(kind))
    }

    pub fn inline(kind: InlineKind) -> Self {
        Self::new(Tag::Inline(kind))
    }

    pub fn special(kind: SpecialKind) -> Self {
        Self::new(Tag::Special(kind))
    }

    pub fn header(kind: HeaderKind) -> Self {
        Self::new(Tag::Header(kind))
    }

    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[inline]
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        self.attrs.insert(name, value.into());
    }

    /// Attributes sorted by name.
    pub fn sorted_attrs(&self) -> Vec<(&'static str, &str)> {
        let mut attrs: Vec<_> = self.attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        attrs.sort_unstable_by_key(|(k, _)| *k);
        attrs
    }

    #[inline]
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Section depth, if this is a section.
    pub fn section_depth(&self) -> Option<u8> {
        match self.tag {
            Tag::Block(BlockKind::Section(depth)) => Some(depth),
            _ => None,
        }
    }

    /// Replace a leading child of the given tag with that child's own
    /// children. Returns whether anything changed.
    pub fn unwrap_leading(&mut self, tag: Tag) -> bool {
        let matches = matches!(self.children.first(), Some(Node::Element(e)) if e.tag == tag);
        if !matches {
            return false;
        }
        if let Node::Element(first) = self.children.remove(0) {
            self.children.splice(0..0, first.children);
        }
        true
    }

    /// Concatenated descendant text, with entity references decoded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Entity(name) => {
                let entity = format!("&{name};");
                out.push_str(&html_escape::decode_html_entities(&entity));
            }
            Node::Markup(_) => {}
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of [`Tag::name`]. Sections come back with depth 0.
    fn tag_from_name(name: &str) -> Option<Tag> {
        let tag = match name {
            "body" => Tag::Block(BlockKind::Body),
            "sect" => Tag::Block(BlockKind::Section(0)),
            "p" => Tag::Block(BlockKind::Paragraph),
            "blockquote" => Tag::Block(BlockKind::Quotation),
            "note" => Tag::Block(BlockKind::Note),
            "hr" => Tag::Block(BlockKind::Rule),
            "pre" => Tag::Block(BlockKind::Literal),
            "li" => Tag::Block(BlockKind::ListItem),
            "ol" => Tag::Block(BlockKind::OrderedList),
            "ul" => Tag::Block(BlockKind::ItemizedList),
            "dl" => Tag::Block(BlockKind::DefinitionList),
            "dt" => Tag::Block(BlockKind::DefinitionTerm),
            "dd" => Tag::Block(BlockKind::DefinitionItem),
            "em" => Tag::Inline(InlineKind::Emphasis),
            "strong" => Tag::Inline(InlineKind::Strong),
            "emstrong" => Tag::Inline(InlineKind::EmphasisStrong),
            "code" => Tag::Inline(InlineKind::Code),
            "tt" => Tag::Inline(InlineKind::Monospace),
            "u" => Tag::Inline(InlineKind::Underline),
            "wikilink" => Tag::Inline(InlineKind::WikiLink),
            "email" => Tag::Inline(InlineKind::Email),
            "hlink" => Tag::Inline(InlineKind::HyperLink),
            "linkref" => Tag::Inline(InlineKind::LinkRef),
            "fnref" => Tag::Inline(InlineKind::FootnoteRef),
            "br" => Tag::Special(SpecialKind::HardBreak),
            "space" => Tag::Special(SpecialKind::Space),
            "eos" => Tag::Special(SpecialKind::EndOfSentence),
            "hyphen" => Tag::Special(SpecialKind::Hyphen),
            "ldq" => Tag::Special(SpecialKind::OpenDoubleQuote),
            "rdq" => Tag::Special(SpecialKind::CloseDoubleQuote),
            "lsq" => Tag::Special(SpecialKind::OpenSingleQuote),
            "rsq" => Tag::Special(SpecialKind::CloseSingleQuote),
            "ellipsis" => Tag::Special(SpecialKind::Ellipsis),
            "emdash" => Tag::Special(SpecialKind::EmDash),
            "endash" => Tag::Special(SpecialKind::EnDash),
            "header" => Tag::Header(HeaderKind::Header),
            "metadata" => Tag::Header(HeaderKind::Metadata),
            "item" => Tag::Header(HeaderKind::Item),
            "links" => Tag::Header(HeaderKind::Links),
            "link" => Tag::Header(HeaderKind::Link),
            "notes" => Tag::Header(HeaderKind::Notes),
            _ => {
                let depth = name.strip_prefix('h')?.parse::<u8>().ok()?;
                if !(1..=6).contains(&depth) || name.len() != 2 {
                    return None;
                }
                Tag::Block(BlockKind::Heading(depth))
            }
        };
        Some(tag)
    }

    #[test]
    fn test_names_round_trip() {
        let names = [
            "p", "blockquote", "note", "hr", "pre", "li", "ol", "ul", "dl", "dt", "dd", "h1", "h2",
            "h3", "h4", "h5", "h6", "em", "strong", "emstrong", "code", "tt", "u", "wikilink",
            "email", "hlink", "linkref", "fnref", "space", "eos", "hyphen", "ldq", "rdq", "lsq",
            "rsq", "ellipsis", "emdash", "endash", "br", "body", "header", "metadata", "item",
            "links", "link", "notes",
        ];
        for name in names {
            let tag = tag_from_name(name).unwrap_or_else(|| panic!("unknown tag {name}"));
            assert_eq!(tag.name(), name);
        }
        assert_eq!(tag_from_name("sect").map(Tag::name), Some("sect"));
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(tag_from_name("div"), None);
        assert_eq!(tag_from_name("h7"), None);
        assert_eq!(tag_from_name("h0"), None);
        assert_eq!(tag_from_name("h10"), None);
    }

    #[test]
    fn test_unwrap_leading_splices_children() {
        let mut item = Element::block(BlockKind::ListItem);
        let mut para = Element::block(BlockKind::Paragraph);
        para.push(Node::Text("a ".into()));
        para.push(Element::with_text(Tag::Inline(InlineKind::Emphasis), "b"));
        item.push(para);
        item.push(Element::block(BlockKind::ItemizedList));

        assert!(item.unwrap_leading(Tag::Block(BlockKind::Paragraph)));
        assert_eq!(item.children.len(), 3);
        assert_eq!(item.children[0], Node::Text("a ".into()));
        assert!(!item.unwrap_leading(Tag::Block(BlockKind::Paragraph)));
    }

    #[test]
    fn test_text_content_decodes_entities() {
        let mut p = Element::block(BlockKind::Paragraph);
        p.push(Node::Text("Fish ".into()));
        p.push(Node::Entity("amp".into()));
        p.push(Element::with_text(Tag::Inline(InlineKind::Strong), " Chips"));
        p.push(Node::Markup("<br/>".into()));
        assert_eq!(p.text_content(), "Fish & Chips");
    }

    #[test]
    fn test_sorted_attrs() {
        let mut link = Element::header(HeaderKind::Link);
        link.set_attr("url", "http://x.com");
        link.set_attr("id", "one");
        assert_eq!(link.sorted_attrs(), vec![("id", "one"), ("url", "http://x.com")]);
    }
}
