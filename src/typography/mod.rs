//! Smart punctuation.
//!
//! Rewrites the text of an inline fragment into typographic nodes: curly
//! quotes, dashes, ellipses and sentence-end spacing. The whole fragment is
//! tokenized as one sequence, with child nodes standing in as opaque
//! referral tokens, so a quote opened before an `em` can close after it.
//! Child elements get their own pass first, except code spans and links
//! whose text is used verbatim.

mod token;

use crate::cursor::Cursor;
use crate::tree::{Element, InlineKind, Node, SpecialKind, Tag};
use crate::{DashStyle, Options};

pub use token::{Symbol, Token, Tokenizer};

/// Run the typographic pass over `nodes`.
pub fn smarten(nodes: Vec<Node>, options: &Options) -> Vec<Node> {
    enum Piece {
        Text(usize),
        Held(usize),
    }

    let mut texts = Vec::new();
    let mut held = Vec::new();
    let mut pieces = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => {
                pieces.push(Piece::Text(texts.len()));
                texts.push(text);
            }
            Node::Element(mut element) => {
                if descends_into(&element) {
                    let children = std::mem::take(&mut element.children);
                    element.children = smarten(children, options);
                }
                pieces.push(Piece::Held(held.len()));
                held.push(Some(Node::Element(element)));
            }
            other => {
                pieces.push(Piece::Held(held.len()));
                held.push(Some(other));
            }
        }
    }

    let mut tokens = Vec::new();
    for piece in &pieces {
        match *piece {
            Piece::Text(i) => tokens.extend(Tokenizer::new(&texts[i])),
            Piece::Held(i) => tokens.push(Token::Referral(i)),
        }
    }

    let mut writer = Writer {
        options,
        held,
        out: Vec::new(),
        buf: String::new(),
    };
    writer.run(&tokens);
    writer.finish()
}

/// Whether the pass rewrites an element's own children.
fn descends_into(element: &Element) -> bool {
    !matches!(
        element.tag,
        Tag::Inline(InlineKind::Code | InlineKind::WikiLink | InlineKind::Email | InlineKind::HyperLink)
    )
}

/// Typographic dash for a `--` or `---` run under `style`.
pub fn dash_kind(style: DashStyle, dash: Symbol) -> Option<SpecialKind> {
    match (style, dash) {
        (DashStyle::DoubleEmdashNoEndash, Symbol::DoubleDash) => Some(SpecialKind::EmDash),
        (DashStyle::DoubleEmdashTripleEndash, Symbol::DoubleDash) => Some(SpecialKind::EmDash),
        (DashStyle::DoubleEmdashTripleEndash, Symbol::TripleDash) => Some(SpecialKind::EnDash),
        (DashStyle::TripleEmdashDoubleEndash, Symbol::DoubleDash) => Some(SpecialKind::EnDash),
        (DashStyle::TripleEmdashDoubleEndash, Symbol::TripleDash) => Some(SpecialKind::EmDash),
        _ => None,
    }
}

/// `^[A-Z][a-z]+[A-Z][a-z]+$`
fn is_camel_case(word: &str) -> bool {
    let mut c = Cursor::new(word);
    for _ in 0..2 {
        if !c.peek().is_some_and(|b| b.is_ascii_uppercase()) {
            return false;
        }
        c.advance(1);
        if c.skip_while(|b| b.is_ascii_lowercase()) == 0 {
            return false;
        }
    }
    c.is_eof()
}

/// Text ending in `p.`, `pp.`, `Dr.`, `Drs.`, `Mr.`, `Mrs.` or `Ms.` as a
/// whole word.
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(stem) = text.strip_suffix('.') else {
        return false;
    };
    let word = stem.rsplit(char::is_whitespace).next().unwrap_or(stem);
    matches!(word, "p" | "pp" | "Dr" | "Drs" | "Mr" | "Mrs" | "Ms")
}

fn opens_quote(last: Option<Token<'_>>) -> bool {
    matches!(last, None | Some(Token::Whitespace(_)))
}

struct Writer<'o> {
    options: &'o Options,
    held: Vec<Option<Node>>,
    out: Vec<Node>,
    buf: String,
}

impl Writer<'_> {
    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.out.push(Node::Text(std::mem::take(&mut self.buf)));
        }
    }

    fn special(&mut self, kind: SpecialKind) {
        self.flush();
        self.out.push(Node::Element(Element::special(kind)));
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.out
    }

    fn run(&mut self, tokens: &[Token<'_>]) {
        let mut last: Option<Token<'_>> = None;
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            let mut seen = token;
            match token {
                Token::Symbol(Symbol::Backslash) => match tokens.get(i + 1) {
                    None | Some(Token::Referral(_)) => self.buf.push('\\'),
                    Some(next) => {
                        self.buf.push_str(next.text());
                        i += 1;
                    }
                },
                Token::Referral(index) => {
                    if let Some(node) = self.held[index].take() {
                        self.flush();
                        self.out.push(node);
                    }
                }
                Token::Symbol(dash @ (Symbol::DoubleDash | Symbol::TripleDash)) => {
                    match dash_kind(self.options.dash_style, dash) {
                        Some(kind) => self.special(kind),
                        None => self.buf.push_str(dash.as_str()),
                    }
                }
                Token::Symbol(Symbol::Ellipsis | Symbol::SpacedEllipsis) => {
                    self.special(SpecialKind::Ellipsis);
                    self.sentence_end(tokens, &mut i, &mut seen);
                }
                Token::Symbol(Symbol::OpenDoubleQuote) => self.special(SpecialKind::OpenDoubleQuote),
                Token::Symbol(Symbol::CloseDoubleQuote) => {
                    self.special(SpecialKind::CloseDoubleQuote);
                    self.sentence_end(tokens, &mut i, &mut seen);
                }
                Token::Symbol(Symbol::SingleQuote) => {
                    let closes = matches!(
                        tokens.get(i + 1),
                        None | Some(Token::Whitespace(_))
                            | Some(Token::Symbol(
                                Symbol::QuestionMark
                                    | Symbol::ExclamationMark
                                    | Symbol::Comma
                                    | Symbol::Period
                                    | Symbol::Semicolon
                                    | Symbol::Colon
                                    | Symbol::CloseParen
                            ))
                    );
                    if opens_quote(last) {
                        self.special(SpecialKind::OpenSingleQuote);
                    } else if closes {
                        self.special(SpecialKind::CloseSingleQuote);
                        self.sentence_end(tokens, &mut i, &mut seen);
                    } else {
                        self.buf.push('\'');
                    }
                }
                Token::Symbol(Symbol::DoubleQuote) => {
                    let after_stop = matches!(
                        last,
                        Some(Token::Symbol(
                            Symbol::QuestionMark
                                | Symbol::ExclamationMark
                                | Symbol::Ellipsis
                                | Symbol::SpacedEllipsis
                                | Symbol::Period
                        ))
                    );
                    let closes = matches!(
                        tokens.get(i + 1),
                        None | Some(Token::Whitespace(_))
                            | Some(Token::Referral(_))
                            | Some(Token::Symbol(
                                Symbol::QuestionMark
                                    | Symbol::ExclamationMark
                                    | Symbol::Comma
                                    | Symbol::Period
                                    | Symbol::Semicolon
                                    | Symbol::Colon
                                    | Symbol::CloseParen
                                    | Symbol::SingleQuote
                                    | Symbol::SingleDash
                                    | Symbol::DoubleDash
                                    | Symbol::TripleDash
                                    | Symbol::Ellipsis
                                    | Symbol::SpacedEllipsis
                            ))
                    );
                    if opens_quote(last) {
                        self.special(SpecialKind::OpenDoubleQuote);
                    } else if after_stop || closes {
                        self.special(SpecialKind::CloseDoubleQuote);
                        self.sentence_end(tokens, &mut i, &mut seen);
                    } else {
                        self.buf.push('"');
                    }
                }
                Token::Symbol(
                    symbol @ (Symbol::QuestionMark
                    | Symbol::ExclamationMark
                    | Symbol::CloseParen
                    | Symbol::Period),
                ) => {
                    self.buf.push_str(symbol.as_str());
                    self.sentence_end(tokens, &mut i, &mut seen);
                }
                Token::Symbol(symbol) => self.buf.push_str(symbol.as_str()),
                Token::Text(text) => {
                    if self.options.wiki_links && is_camel_case(text) {
                        self.flush();
                        self.out
                            .push(Element::with_text(Tag::Inline(InlineKind::WikiLink), text).into());
                    } else {
                        self.buf.push_str(text);
                    }
                }
                Token::Whitespace(space) => {
                    if !self.absorb_dash(tokens, &mut i) {
                        self.buf.push_str(space);
                    }
                }
            }
            last = Some(seen);
            i += 1;
        }
    }

    /// Whitespace before a dash run: emit the dash in place of the
    /// whitespace, the run and one following whitespace token.
    fn absorb_dash(&mut self, tokens: &[Token<'_>], i: &mut usize) -> bool {
        if !self.options.spaces_around_dashes {
            return false;
        }
        let Some(Token::Symbol(dash)) = tokens.get(*i + 1) else {
            return false;
        };
        let Some(kind) = dash_kind(self.options.dash_style, *dash) else {
            return false;
        };
        self.special(kind);
        *i += 1;
        if matches!(tokens.get(*i + 1), Some(Token::Whitespace(_))) {
            *i += 1;
        }
        true
    }

    /// After sentence punctuation at `i`: when whitespace and then a quote
    /// or a capitalised word follow, emit an end-of-sentence marker in place
    /// of the whitespace. Trailing whitespace at the end is dropped.
    fn sentence_end<'t>(&mut self, tokens: &[Token<'t>], i: &mut usize, seen: &mut Token<'t>) {
        let Some(&space @ Token::Whitespace(_)) = tokens.get(*i + 1) else {
            return;
        };
        let Some(&next) = tokens.get(*i + 2) else {
            *i += 1;
            return;
        };
        let starts_sentence = match next {
            Token::Symbol(
                Symbol::BackQuote | Symbol::SingleQuote | Symbol::DoubleQuote | Symbol::OpenDoubleQuote,
            ) => true,
            Token::Text(text) => {
                text.starts_with(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit())
                    && !ends_with_abbreviation(&self.buf)
            }
            _ => false,
        };
        if starts_sentence {
            self.special(SpecialKind::EndOfSentence);
            *i += 1;
            *seen = space;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smart_options() -> Options {
        Options {
            smart_punctuation: true,
            ..Options::default()
        }
    }

    fn run(text: &str, options: &Options) -> String {
        dump(&smarten(vec![Node::Text(text.to_owned())], options))
    }

    fn smart(text: &str) -> String {
        run(text, &smart_options())
    }

    /// Specials as `{name}`, other elements as `name(children)`.
    fn dump(nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Entity(name) => out.push_str(&format!("&{name};")),
                Node::Markup(raw) => out.push_str(raw),
                Node::Element(e) => match e.tag {
                    Tag::Special(_) => out.push_str(&format!("{{{}}}", e.tag.name())),
                    _ => out.push_str(&format!("{}({})", e.tag.name(), dump(&e.children))),
                },
            }
        }
        out
    }

    #[test]
    fn test_quotes_and_em_dash() {
        assert_eq!(smart("\"Quoted\" -- text"), "{ldq}Quoted{rdq}{emdash}text");
    }

    #[test]
    fn test_apostrophe_stays_literal() {
        assert_eq!(smart("don't"), "don't");
        assert_eq!(smart("'single' quotes"), "{lsq}single{rsq} quotes");
    }

    #[test]
    fn test_double_quote_after_stop() {
        assert_eq!(smart("She asked \"why?\""), "She asked {ldq}why?{rdq}");
    }

    #[test]
    fn test_tex_quotes() {
        assert_eq!(smart("``TeX'' style"), "{ldq}TeX{rdq} style");
    }

    #[test]
    fn test_sentence_end() {
        assert_eq!(smart("Hello. World"), "Hello.{eos}World");
        assert_eq!(smart("Is it? 42 is."), "Is it?{eos}42 is.");
        assert_eq!(smart("Wait... What"), "Wait{ellipsis}{eos}What");
        assert_eq!(smart("lower. case"), "lower. case");
    }

    #[test]
    fn test_abbreviations_do_not_end_sentences() {
        assert_eq!(smart("Mr. Smith and Dr. Who"), "Mr. Smith and Dr. Who");
        assert_eq!(smart("see p. 4"), "see p. 4");
        assert_eq!(smart("Ramp. Up"), "Ramp.{eos}Up");
    }

    #[test]
    fn test_quote_opens_after_sentence_end() {
        assert_eq!(smart("He left. \"Go\""), "He left.{eos}{ldq}Go{rdq}");
    }

    #[test]
    fn test_trailing_whitespace_after_stop_is_dropped() {
        assert_eq!(smart("End. "), "End.");
    }

    #[test]
    fn test_dash_styles() {
        assert_eq!(smart("a--b a---b"), "a{emdash}b a{endash}b");

        let swapped = Options {
            dash_style: DashStyle::TripleEmdashDoubleEndash,
            ..smart_options()
        };
        assert_eq!(run("a--b a---b", &swapped), "a{endash}b a{emdash}b");

        let no_endash = Options {
            dash_style: DashStyle::DoubleEmdashNoEndash,
            ..smart_options()
        };
        assert_eq!(run("a--b a --- b", &no_endash), "a{emdash}b a --- b");
    }

    #[test]
    fn test_tight_dashes_keep_spaces() {
        let tight = Options {
            spaces_around_dashes: false,
            ..smart_options()
        };
        assert_eq!(run("a -- b", &tight), "a {emdash} b");
    }

    #[test]
    fn test_ellipsis_forms() {
        assert_eq!(smart("so. . . and... yes"), "so{ellipsis} and{ellipsis} yes");
    }

    #[test]
    fn test_backslash_protects_next_token() {
        assert_eq!(smart("\\\"x\\--y"), "\"x--y");
        assert_eq!(smart("end\\"), "end\\");
    }

    #[test]
    fn test_camel_case_wikilinks() {
        let wiki = Options {
            wiki_links: true,
            ..smart_options()
        };
        assert_eq!(run("See HomePage now", &wiki), "See wikilink(HomePage) now");
        assert_eq!(smart("See HomePage now"), "See HomePage now");
        assert!(!is_camel_case("HTTPServer"));
        assert!(!is_camel_case("Homepage"));
    }

    #[test]
    fn test_quotes_span_child_elements() {
        let em = Element::with_text(Tag::Inline(InlineKind::Emphasis), "really");
        let nodes = vec![Node::Text("\"".into()), Node::Element(em), Node::Text("\" said".into())];
        let out = smarten(nodes, &smart_options());
        assert_eq!(dump(&out), "{ldq}em(really){rdq} said");
    }

    #[test]
    fn test_code_is_left_alone() {
        let code = Element::with_text(Tag::Inline(InlineKind::Code), "\"x\" -- y");
        let out = smarten(vec![Node::Element(code)], &smart_options());
        assert_eq!(dump(&out), "code(\"x\" -- y)");
    }

    #[test]
    fn test_nested_elements_are_smartened() {
        let strong = Element::with_text(Tag::Inline(InlineKind::Strong), "it's \"so\"");
        let out = smarten(vec![Node::Element(strong)], &smart_options());
        assert_eq!(dump(&out), "strong(it's {ldq}so{rdq})");
    }
}
