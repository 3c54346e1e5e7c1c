//! Token values exchanged between the lexer and the parser
//!
//! A [`Token`] is a classified slice of the source: its [`TokenKind`], the
//! exact matched text (quotes and escape backslashes included) and the
//! character offset where the match starts.

use std::fmt;

/// Classification tag for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl TokenKind {
    /// Upper-case tag name, as used in token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Character => "CHARACTER",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Words the parser gives meaning to. The lexer does not reserve them: they
/// are ordinary [`TokenKind::Identifier`] tokens matched by text.
pub const KEYWORDS: &[&str] = &[
    "LIST", "VAR", "VAL", "FUN", "DO", "END", "LET", "IF", "ELSE", "SWITCH", "CASE",
    "DEFAULT", "WHILE", "RETURN", "NIL", "TRUE", "FALSE",
];

/// Returns true if `text` is one of the parser's keywords.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// An immutable lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Character offset of the first matched character.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Length of the matched text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Tokens always cover at least one character.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last matched character.
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }

    /// True if this token's text is exactly `text`, regardless of kind.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    /// True for identifiers spelling one of [`KEYWORDS`].
    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Identifier && is_keyword(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier if self.is_keyword() => write!(f, "'{}'", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Integer | TokenKind::Decimal => write!(f, "number {}", self.text),
            TokenKind::Character => write!(f, "character literal {}", self.text),
            TokenKind::String => write!(f, "string literal {}", self.text),
            TokenKind::Operator => write!(f, "'{}'", self.text),
        }
    }
}
