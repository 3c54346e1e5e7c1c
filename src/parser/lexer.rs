//! Lexer (tokenizer) for PLC source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. Whitespace is skipped one character at a time and never produces a
//! token; every other character starts exactly one token, chosen by a one- or
//! two-character lookahead that is never consumed:
//!
//! ```text
//! identifier ::= ( "@" | [A-Za-z] ) [A-Za-z0-9_-]*
//! number     ::= "-"? ( "0" | [1-9] [0-9]* ) ( "." [0-9]+ )?
//! character  ::= "'" ( escape | [^'\\\b\n\r\t] ) "'"
//! string     ::= '"' ( escape | [^"\n\r\\] )* '"'
//! escape     ::= "\" [bnrt'"\\]
//! operator   ::= [<>!=] "=" | "&&" | "||" | any non-whitespace character
//! ```
//!
//! Literal tokens keep their raw source text, delimiters and escape
//! backslashes included. Turning them into values is the parser's job.

use crate::parser::cursor::CharCursor;
use crate::parser::error::LexError;
use crate::parser::token::{Token, TokenKind};
use tracing::{debug, trace};

/// Tokenize `text` in one call.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\u{8}' | '\n' | '\r' | '\t')
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '@'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_nonzero_digit(ch: char) -> bool {
    matches!(ch, '1'..='9')
}

fn is_escape_code(ch: char) -> bool {
    matches!(ch, 'b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')
}

/// Lexer for PLC source code
pub struct Lexer {
    chars: CharCursor,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            chars: CharCursor::new(input),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.chars.has(0) {
            if self.check(0, is_whitespace) {
                self.chars.advance();
                self.chars.skip();
                continue;
            }

            let token = self.next_token().inspect_err(|err| {
                debug!(offset = err.offset, reason = %err.message, "lexing failed");
            })?;
            trace!(kind = %token.kind, text = %token.text, offset = token.offset, "token");
            tokens.push(token);
        }

        debug!(count = tokens.len(), "tokenized");
        Ok(tokens)
    }

    /// Dispatch on lookahead to the sub-lexer for the next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        if self.check(0, is_identifier_start) {
            Ok(self.identifier())
        } else if self.check(0, is_digit)
            || (self.check(0, |c| c == '-') && self.check(1, is_nonzero_digit))
            || (self.check(0, |c| c == '-')
                && self.check(1, |c| c == '0')
                && self.check(2, |c| c == '.')
                && self.check(3, is_digit))
        {
            self.number()
        } else if self.check(0, |c| c == '\'') {
            self.character()
        } else if self.check(0, |c| c == '"') {
            self.string()
        } else {
            self.operator()
        }
    }

    fn identifier(&mut self) -> Token {
        self.chars.advance();
        while self.eat(is_identifier_part) {}
        self.chars.emit(TokenKind::Identifier)
    }

    /// Integer or decimal literal, with an optional leading '-'
    fn number(&mut self) -> Result<Token, LexError> {
        self.eat(|c| c == '-');

        if self.eat(|c| c == '0') {
            if self.check(0, is_digit) {
                return Err(LexError::new(
                    "leading zero in integer literal",
                    self.chars.position(),
                ));
            }
            // A lone zero leaves an undigited '.' for the operator lexer.
            if self.check(0, |c| c == '.') && self.check(1, is_digit) {
                return Ok(self.fraction());
            }
            return Ok(self.chars.emit(TokenKind::Integer));
        }

        self.chars.advance();
        while self.eat(is_digit) {}

        if self.check(0, |c| c == '.') {
            if self.check(1, is_digit) {
                return Ok(self.fraction());
            }
            return Err(LexError::new(
                "expected digit after '.'",
                self.chars.position() + 1,
            ));
        }

        Ok(self.chars.emit(TokenKind::Integer))
    }

    /// Fractional part; the cursor sits on a '.' followed by a digit
    fn fraction(&mut self) -> Token {
        self.chars.advance();
        while self.eat(is_digit) {}
        self.chars.emit(TokenKind::Decimal)
    }

    fn character(&mut self) -> Result<Token, LexError> {
        self.chars.advance(); // opening quote

        if self.check(0, |c| c == '\\') {
            self.escape()?;
        } else if self.check(0, |c| !matches!(c, '\'' | '\\' | '\u{8}' | '\n' | '\r' | '\t')) {
            self.chars.advance();
        } else {
            let message = if self.chars.has(0) {
                "invalid character literal"
            } else {
                "unterminated character literal"
            };
            return Err(LexError::new(message, self.chars.position()));
        }

        if !self.eat(|c| c == '\'') {
            return Err(LexError::new(
                "unterminated character literal",
                self.chars.position(),
            ));
        }

        Ok(self.chars.emit(TokenKind::Character))
    }

    fn string(&mut self) -> Result<Token, LexError> {
        self.chars.advance(); // opening quote

        loop {
            match self.chars.peek_char(0) {
                None | Some('\n') | Some('\r') => {
                    return Err(LexError::new(
                        "unterminated string literal",
                        self.chars.position(),
                    ));
                }
                Some('"') => {
                    self.chars.advance();
                    return Ok(self.chars.emit(TokenKind::String));
                }
                Some('\\') => self.escape()?,
                Some(_) => self.chars.advance(),
            }
        }
    }

    /// Two-character escape sequence; the cursor sits on the backslash
    fn escape(&mut self) -> Result<(), LexError> {
        if !self.check(1, is_escape_code) {
            return Err(LexError::new(
                "invalid escape sequence",
                self.chars.position() + 1,
            ));
        }
        self.chars.advance();
        self.chars.advance();
        Ok(())
    }

    fn operator(&mut self) -> Result<Token, LexError> {
        let two_char = (self.check(0, |c| matches!(c, '<' | '>' | '!' | '='))
            && self.check(1, |c| c == '='))
            || (self.check(0, |c| c == '&') && self.check(1, |c| c == '&'))
            || (self.check(0, |c| c == '|') && self.check(1, |c| c == '|'));

        if two_char {
            self.chars.advance();
            self.chars.advance();
        } else if self.check(0, |c| !is_whitespace(c)) {
            self.chars.advance();
        } else {
            return Err(LexError::new("expected an operator", self.chars.position()));
        }

        Ok(self.chars.emit(TokenKind::Operator))
    }

    /// Does the character `offset` ahead satisfy `pred`?
    fn check(&self, offset: usize, pred: impl Fn(char) -> bool) -> bool {
        self.chars.peek_char(offset).is_some_and(pred)
    }

    /// Advance past the next character if it satisfies `pred`
    fn eat(&mut self, pred: impl Fn(char) -> bool) -> bool {
        if self.check(0, pred) {
            self.chars.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String, usize)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text, t.offset))
            .collect()
    }

    fn single(source: &str) -> (TokenKind, String) {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1, "expected one token for {:?}", source);
        (tokens[0].kind, tokens[0].text.clone())
    }

    fn error_offset(source: &str) -> usize {
        tokenize(source).unwrap_err().offset
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("LET x = 5;");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "LET".to_string(), 0),
                (TokenKind::Identifier, "x".to_string(), 4),
                (TokenKind::Operator, "=".to_string(), 6),
                (TokenKind::Integer, "5".to_string(), 8),
                (TokenKind::Operator, ";".to_string(), 9),
            ]
        );
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t\r\n\u{8}").unwrap().is_empty());
        assert_eq!(lex(" \t\r\n\u{8}x"), vec![(TokenKind::Identifier, "x".to_string(), 5)]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(single("getName"), (TokenKind::Identifier, "getName".to_string()));
        assert_eq!(single("@thing"), (TokenKind::Identifier, "@thing".to_string()));
        assert_eq!(single("a-b_c9"), (TokenKind::Identifier, "a-b_c9".to_string()));

        let tokens = lex("_x");
        assert_eq!(tokens[0], (TokenKind::Operator, "_".to_string(), 0));
        assert_eq!(tokens[1], (TokenKind::Identifier, "x".to_string(), 1));
    }

    #[test]
    fn test_integers() {
        assert_eq!(single("0"), (TokenKind::Integer, "0".to_string()));
        assert_eq!(single("1234"), (TokenKind::Integer, "1234".to_string()));
        assert_eq!(single("-17"), (TokenKind::Integer, "-17".to_string()));
    }

    #[test]
    fn test_minus_without_nonzero_digit_is_operator() {
        let tokens = lex("- 5");
        assert_eq!(tokens[0], (TokenKind::Operator, "-".to_string(), 0));
        assert_eq!(tokens[1], (TokenKind::Integer, "5".to_string(), 2));

        let tokens = lex("-0");
        assert_eq!(tokens[0], (TokenKind::Operator, "-".to_string(), 0));
        assert_eq!(tokens[1], (TokenKind::Integer, "0".to_string(), 1));
    }

    #[test]
    fn test_decimals() {
        assert_eq!(single("3.14"), (TokenKind::Decimal, "3.14".to_string()));
        assert_eq!(single("0.5"), (TokenKind::Decimal, "0.5".to_string()));
        assert_eq!(single("-10.250"), (TokenKind::Decimal, "-10.250".to_string()));
    }

    #[test]
    fn test_negative_zero_decimal() {
        assert_eq!(single("-0.5"), (TokenKind::Decimal, "-0.5".to_string()));
        assert_eq!(
            lex("-0 -0."),
            vec![
                (TokenKind::Operator, "-".to_string(), 0),
                (TokenKind::Integer, "0".to_string(), 1),
                (TokenKind::Operator, "-".to_string(), 3),
                (TokenKind::Integer, "0".to_string(), 4),
                (TokenKind::Operator, ".".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_leading_zero_rejected() {
        assert_eq!(error_offset("01"), 1);
        assert_eq!(error_offset("x = 007;"), 5);
    }

    #[test]
    fn test_decimal_requires_trailing_digit() {
        let err = tokenize("1.").unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(err.message.contains("digit"));
    }

    #[test]
    fn test_zero_leaves_dot_for_operator() {
        let tokens = lex("0.");
        assert_eq!(tokens[0], (TokenKind::Integer, "0".to_string(), 0));
        assert_eq!(tokens[1], (TokenKind::Operator, ".".to_string(), 1));
    }

    #[test]
    fn test_character_literals() {
        assert_eq!(single("'c'"), (TokenKind::Character, "'c'".to_string()));
        assert_eq!(single(r"'\n'"), (TokenKind::Character, r"'\n'".to_string()));
        assert_eq!(single(r"'\''"), (TokenKind::Character, r"'\''".to_string()));
        assert_eq!(single("' '"), (TokenKind::Character, "' '".to_string()));
    }

    #[test]
    fn test_character_literal_errors() {
        assert_eq!(error_offset(r"'\q'"), 2);
        assert_eq!(error_offset("''"), 1);
        assert_eq!(error_offset("'ab'"), 2);
        assert_eq!(error_offset("'a"), 2);
        assert_eq!(error_offset("'"), 1);
        assert_eq!(error_offset("'\n'"), 1);
        assert_eq!(error_offset("'\t'"), 1);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(single("\"\""), (TokenKind::String, "\"\"".to_string()));
        assert_eq!(
            single(r#""a\nb""#),
            (TokenKind::String, r#""a\nb""#.to_string())
        );
        assert_eq!(
            single(r#""say \"hi\"\\""#),
            (TokenKind::String, r#""say \"hi\"\\""#.to_string())
        );
        assert_eq!(single("\"tab\there\""), (TokenKind::String, "\"tab\there\"".to_string()));
    }

    #[test]
    fn test_string_literal_errors() {
        assert_eq!(error_offset("\"abc"), 4);
        assert_eq!(error_offset("\"a\nb\""), 2);
        assert_eq!(error_offset("\"a\rb\""), 2);
        assert_eq!(error_offset(r#""bad \q""#), 6);
        assert_eq!(error_offset("\"trailing\\"), 10);
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(single("<="), (TokenKind::Operator, "<=".to_string()));
        assert_eq!(single(">="), (TokenKind::Operator, ">=".to_string()));
        assert_eq!(single("=="), (TokenKind::Operator, "==".to_string()));
        assert_eq!(single("!="), (TokenKind::Operator, "!=".to_string()));
        assert_eq!(single("&&"), (TokenKind::Operator, "&&".to_string()));
        assert_eq!(single("||"), (TokenKind::Operator, "||".to_string()));

        let texts: Vec<String> = lex("< = & | === ").into_iter().map(|t| t.1).collect();
        assert_eq!(texts, vec!["<", "=", "&", "|", "==", "="]);
    }

    #[test]
    fn test_any_other_character_is_operator() {
        let texts: Vec<String> = lex("(#$);").into_iter().map(|t| t.1).collect();
        assert_eq!(texts, vec!["(", "#", "$", ")", ";"]);
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokens = lex("\"é\" x");
        assert_eq!(tokens[1], (TokenKind::Identifier, "x".to_string(), 4));
    }
}
