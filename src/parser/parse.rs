//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token matching helpers, error construction and the `source` entry rule.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar rule:
//! - This module: Parser struct, helper methods, and the `source` rule
//! - `declarations`: globals (`LIST`, `VAR`, `VAL`) and functions (`FUN`)
//! - `statements`: blocks and statements (`LET`, `IF`, `SWITCH`, ...)
//! - `expressions`: the binary precedence chain and primary expressions
//!
//! Every alternative is chosen by a fixed keyword or token-kind lookahead, so
//! the parser never backtracks. The first violated rule aborts the parse.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared token cursor.

use crate::parser::ast::*;
use crate::parser::cursor::TokenCursor;
use crate::parser::error::SyntaxError;
use crate::parser::token::{Token, TokenKind};
use tracing::debug;

/// Parse a complete token sequence into a [`Source`].
pub fn parse(tokens: Vec<Token>) -> Result<Source, SyntaxError> {
    Parser::new(tokens).parse_source()
}

/// Recursive descent parser for PLC
pub struct Parser {
    pub(crate) tokens: TokenCursor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: TokenCursor::new(tokens),
        }
    }

    /// Parse the `source` rule: all globals, then all functions, then nothing.
    pub fn parse_source(&mut self) -> Result<Source, SyntaxError> {
        let mut source = Source::new();

        while self.peek_any(&["LIST", "VAR", "VAL"]) {
            source.globals.push(self.parse_global()?);
        }

        while self.check("FUN") {
            source.functions.push(self.parse_function()?);
        }

        if self.tokens.has(0) {
            let message = if self.peek_any(&["LIST", "VAR", "VAL"]) {
                "Globals must be declared before functions"
            } else {
                "Expected 'FUN' or end of input"
            };
            return Err(self.error(message));
        }

        debug!(
            globals = source.globals.len(),
            functions = source.functions.len(),
            "parsed source"
        );
        Ok(source)
    }

    // ===== Helper methods =====

    /// True if the next token's text is exactly `text`.
    pub(crate) fn check(&self, text: &str) -> bool {
        self.tokens.peek(0).is_some_and(|token| token.is(text))
    }

    pub(crate) fn peek_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.check(text))
    }

    /// Consume the next token if its text is `text`.
    pub(crate) fn match_token(&mut self, text: &str) -> bool {
        if self.check(text) {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    /// Consume and return the next token's text if it is one of `texts`.
    pub(crate) fn match_any(&mut self, texts: &[&str]) -> Option<String> {
        let text = self
            .tokens
            .peek(0)
            .filter(|token| texts.contains(&token.text.as_str()))?
            .text
            .clone();
        self.tokens.advance();
        Some(text)
    }

    pub(crate) fn expect_token(&mut self, text: &str) -> Result<(), SyntaxError> {
        if self.match_token(text) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", text)))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.tokens.peek(0) {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.text.clone();
                self.tokens.advance();
                Ok(name)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// Offset of the next token, or one past the last token at end of input.
    pub(crate) fn error_offset(&self) -> usize {
        match self.tokens.peek(0) {
            Some(token) => token.offset,
            None => self.tokens.previous().map_or(0, Token::end),
        }
    }

    pub(crate) fn error(&self, message: &str) -> SyntaxError {
        let offset = self.error_offset();
        debug!(offset, reason = message, "parsing failed");
        SyntaxError::new(message, offset)
    }

    /// "Expected X, found Y" error at the current position.
    pub(crate) fn expected(&self, what: &str) -> SyntaxError {
        let found = match self.tokens.peek(0) {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        self.error(&format!("Expected {}, found {}", what, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_text(source: &str) -> Result<Source, SyntaxError> {
        parse(tokenize(source).unwrap())
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(parse_text("").unwrap(), Source::new());
    }

    #[test]
    fn test_parse_globals_then_functions() {
        let source = parse_text("VAR x; VAL y = 1; FUN main() DO END").unwrap();

        assert_eq!(source.globals.len(), 2);
        assert_eq!(source.functions.len(), 1);
        assert_eq!(source.functions[0].name, "main");
        assert!(source.functions[0].parameters.is_empty());
        assert!(source.functions[0].statements.is_empty());
    }

    #[test]
    fn test_global_after_function_rejected() {
        let err = parse_text("FUN f() DO END VAR x;").unwrap_err();
        assert_eq!(err.offset, 15);
        assert!(err.message.contains("before functions"));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_text("VAR x; x").unwrap_err();
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_error_offset_at_end_of_input() {
        let err = parse_text("VAR x").unwrap_err();
        assert_eq!(err.offset, 5);
        assert_eq!(err.message, "Expected ';', found end of input");
    }

    #[test]
    fn test_error_offset_on_empty_token_sequence() {
        let err = Parser::new(Vec::new()).parse_expression().unwrap_err();
        assert_eq!(err.offset, 0);
    }
}
