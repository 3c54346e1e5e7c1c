//! Read cursors over characters and tokens
//!
//! [`CharCursor`] backs the lexer and [`TokenCursor`] backs the parser. Both
//! own their input for the duration of one call and only move forward; all
//! lookahead is bounded and non-consuming.

use crate::parser::token::{Token, TokenKind};

/// Cursor over the source characters.
///
/// Besides the read position it tracks how many characters have been
/// advanced over since the last [`emit`](CharCursor::emit) or
/// [`skip`](CharCursor::skip), which is the extent of the token being built.
pub struct CharCursor {
    input: Vec<char>,
    position: usize,
    length: usize,
}

impl CharCursor {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            length: 0,
        }
    }

    /// True if a character exists `offset` places past the read position.
    pub fn has(&self, offset: usize) -> bool {
        self.position + offset < self.input.len()
    }

    /// Character `offset` places past the read position, if any.
    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Move past one character, adding it to the pending token.
    pub fn advance(&mut self) {
        debug_assert!(self.has(0), "advanced past end of input");
        self.position += 1;
        self.length += 1;
    }

    /// Drop the pending token (used after skipping whitespace).
    pub fn skip(&mut self) {
        self.length = 0;
    }

    /// Build a token from every character advanced over since the last
    /// emit or skip.
    pub fn emit(&mut self, kind: TokenKind) -> Token {
        let start = self.position - self.length;
        self.length = 0;
        let text: String = self.input[start..self.position].iter().collect();
        Token::new(kind, text, start)
    }

    /// Current read offset into the source.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Cursor over a lexed token sequence.
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// True if a token exists `offset` places past the read position.
    pub fn has(&self, offset: usize) -> bool {
        self.position + offset < self.tokens.len()
    }

    /// Token `offset` places past the read position, if any.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    /// Most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    pub fn advance(&mut self) {
        debug_assert!(self.has(0), "advanced past last token");
        self.position += 1;
    }

    /// Index of the next unread token.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_cursor_emits_advanced_span() {
        let mut cursor = CharCursor::new("  ab");
        cursor.advance();
        cursor.advance();
        cursor.skip();
        assert_eq!(cursor.peek_char(0), Some('a'));
        assert_eq!(cursor.peek_char(1), Some('b'));
        assert!(!cursor.has(2));
        cursor.advance();
        cursor.advance();
        let token = cursor.emit(TokenKind::Identifier);
        assert_eq!(token, Token::new(TokenKind::Identifier, "ab", 2));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_token_cursor_lookahead() {
        let mut cursor = TokenCursor::new(vec![
            Token::new(TokenKind::Identifier, "x", 0),
            Token::new(TokenKind::Operator, ";", 1),
        ]);
        assert!(cursor.previous().is_none());
        assert_eq!(cursor.peek(1).map(|t| t.text.as_str()), Some(";"));
        cursor.advance();
        assert_eq!(cursor.previous().map(|t| t.text.as_str()), Some("x"));
        cursor.advance();
        assert!(!cursor.has(0));
        assert!(cursor.peek(0).is_none());
    }
}
