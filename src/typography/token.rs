//! Tokenizer for the typographic pass.

/// Fixed-spelling punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Backslash,
    SingleDash,
    DoubleDash,
    TripleDash,
    /// `...`
    Ellipsis,
    /// `. . .`
    SpacedEllipsis,
    DoubleQuote,
    /// ``` `` ```
    OpenDoubleQuote,
    /// `''`
    CloseDoubleQuote,
    SingleQuote,
    BackQuote,
    QuestionMark,
    ExclamationMark,
    Comma,
    Period,
    Semicolon,
    Colon,
    OpenParen,
    CloseParen,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Backslash => "\\",
            Symbol::SingleDash => "-",
            Symbol::DoubleDash => "--",
            Symbol::TripleDash => "---",
            Symbol::Ellipsis => "...",
            Symbol::SpacedEllipsis => ". . .",
            Symbol::DoubleQuote => "\"",
            Symbol::OpenDoubleQuote => "``",
            Symbol::CloseDoubleQuote => "''",
            Symbol::SingleQuote => "'",
            Symbol::BackQuote => "`",
            Symbol::QuestionMark => "?",
            Symbol::ExclamationMark => "!",
            Symbol::Comma => ",",
            Symbol::Period => ".",
            Symbol::Semicolon => ";",
            Symbol::Colon => ":",
            Symbol::OpenParen => "(",
            Symbol::CloseParen => ")",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Symbol(Symbol),
    Whitespace(&'a str),
    Text(&'a str),
    /// A child node, by index into the pass's held nodes.
    Referral(usize),
}

impl<'a> Token<'a> {
    /// Source spelling; empty for referrals.
    pub fn text(self) -> &'a str {
        match self {
            Token::Symbol(symbol) => symbol.as_str(),
            Token::Whitespace(text) | Token::Text(text) => text,
            Token::Referral(_) => "",
        }
    }
}

#[inline]
fn is_special(b: u8) -> bool {
    matches!(
        b,
        b'\\' | b'\'' | b'"' | b'`' | b'-' | b'.' | b'?' | b'!' | b',' | b';' | b':' | b'(' | b')'
    ) || is_ascii_space(b)
}

#[inline]
fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Splits one text node into tokens.
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn symbol(&mut self, symbol: Symbol) -> Token<'a> {
        self.pos += symbol.as_str().len();
        Token::Symbol(symbol)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.text[self.pos..];
        let first = *rest.as_bytes().first()?;
        let token = match first {
            b'\'' if rest.starts_with("''") => self.symbol(Symbol::CloseDoubleQuote),
            b'\'' => self.symbol(Symbol::SingleQuote),
            b'"' => self.symbol(Symbol::DoubleQuote),
            b'`' if rest.starts_with("``") => self.symbol(Symbol::OpenDoubleQuote),
            b'`' => self.symbol(Symbol::BackQuote),
            b'-' if rest.starts_with("---") => self.symbol(Symbol::TripleDash),
            b'-' if rest.starts_with("--") => self.symbol(Symbol::DoubleDash),
            b'-' => self.symbol(Symbol::SingleDash),
            b'.' if rest.starts_with(". . .") => self.symbol(Symbol::SpacedEllipsis),
            b'.' if rest.starts_with("...") => self.symbol(Symbol::Ellipsis),
            b'.' => self.symbol(Symbol::Period),
            b'\\' => self.symbol(Symbol::Backslash),
            b'?' => self.symbol(Symbol::QuestionMark),
            b'!' => self.symbol(Symbol::ExclamationMark),
            b',' => self.symbol(Symbol::Comma),
            b';' => self.symbol(Symbol::Semicolon),
            b':' => self.symbol(Symbol::Colon),
            b'(' => self.symbol(Symbol::OpenParen),
            b')' => self.symbol(Symbol::CloseParen),
            b if is_ascii_space(b) => {
                let len = rest
                    .char_indices()
                    .find(|&(_, c)| !c.is_whitespace())
                    .map_or(rest.len(), |(i, _)| i);
                self.pos += len;
                Token::Whitespace(&rest[..len])
            }
            _ => {
                let len = rest.bytes().skip(1).position(is_special).map_or(rest.len(), |i| i + 1);
                self.pos += len;
                Token::Text(&rest[..len])
            }
        };
        Some(token)
    }
}
