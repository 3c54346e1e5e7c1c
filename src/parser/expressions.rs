//! Expression parsing implementation
//!
//! This module handles parsing of PLC expressions: a chain of left-associative
//! binary precedence levels over primary expressions.
//!
//! # Supported Expressions
//!
//! - Literals: `NIL`, `TRUE`, `FALSE`, integers, decimals, characters, strings
//! - Variables and list subscripts: `x`, `xs[i + 1]`
//! - Function calls: `f()`, `max(a, b)`
//! - Parenthesized groups: `(a + b)`
//! - Binary operators
//!
//! # Precedence
//!
//! ```text
//! logical        ::= comparison ( ( "&&" | "||" ) comparison )*
//! comparison     ::= additive ( ( "<" | ">" | "==" | "!=" ) additive )*
//! additive       ::= multiplicative ( ( "+" | "-" ) multiplicative )*
//! multiplicative ::= primary ( ( "*" | "/" | "^" ) primary )*
//! ```
//!
//! Literal tokens arrive as raw source text; numbers are parsed into
//! arbitrary-precision values and character/string escapes are resolved here.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::error::SyntaxError;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;
use tracing::trace;

const LOGICAL_OPERATORS: &[&str] = &["&&", "||"];
const COMPARISON_OPERATORS: &[&str] = &["<", ">", "==", "!="];
const ADDITIVE_OPERATORS: &[&str] = &["+", "-"];
const MULTIPLICATIVE_OPERATORS: &[&str] = &["*", "/", "^"];

/// Resolve the escape sequences of a raw character or string literal and
/// strip its surrounding delimiters.
pub fn unescape(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();

    let mut value = String::new();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => value.push('\u{8}'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            // \' \" and \\ stand for themselves
            Some(other) => value.push(other),
            None => break,
        }
    }
    value
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.parse_logical()
    }

    /// Parse logical (&& ||)
    fn parse_logical(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_comparison()?;

        while let Some(operator) = self.match_any(LOGICAL_OPERATORS) {
            let right = self.parse_comparison()?;
            left = Expression::binary(operator, left, right);
        }

        Ok(left)
    }

    /// Parse comparison (< > == !=)
    fn parse_comparison(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_additive()?;

        while let Some(operator) = self.match_any(COMPARISON_OPERATORS) {
            let right = self.parse_additive()?;
            left = Expression::binary(operator, left, right);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(operator) = self.match_any(ADDITIVE_OPERATORS) {
            let right = self.parse_multiplicative()?;
            left = Expression::binary(operator, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* / ^)
    fn parse_multiplicative(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_primary()?;

        while let Some(operator) = self.match_any(MULTIPLICATIVE_OPERATORS) {
            let right = self.parse_primary()?;
            left = Expression::binary(operator, left, right);
        }

        Ok(left)
    }

    /// Parse primary (literals, groups, variables, calls)
    fn parse_primary(&mut self) -> Result<Expression, SyntaxError> {
        let Some(token) = self.tokens.peek(0).cloned() else {
            return Err(self.expected("an expression"));
        };
        trace!(text = %token.text, offset = token.offset, "parse_primary");

        if self.match_token("NIL") {
            return Ok(Expression::Literal(Literal::Nil));
        }
        if self.match_token("TRUE") {
            return Ok(Expression::Literal(Literal::Boolean(true)));
        }
        if self.match_token("FALSE") {
            return Ok(Expression::Literal(Literal::Boolean(false)));
        }

        match token.kind {
            TokenKind::Integer => {
                let value = BigInt::from_str(&token.text)
                    .map_err(|_| self.error(&format!("Invalid integer literal {}", token.text)))?;
                self.tokens.advance();
                Ok(Expression::Literal(Literal::Integer(value)))
            }
            TokenKind::Decimal => {
                let value = BigDecimal::from_str(&token.text)
                    .map_err(|_| self.error(&format!("Invalid decimal literal {}", token.text)))?;
                self.tokens.advance();
                Ok(Expression::Literal(Literal::Decimal(value)))
            }
            TokenKind::Character => {
                let value = unescape(&token.text)
                    .chars()
                    .next()
                    .ok_or_else(|| self.error("Empty character literal"))?;
                self.tokens.advance();
                Ok(Expression::Literal(Literal::Character(value)))
            }
            TokenKind::String => {
                self.tokens.advance();
                Ok(Expression::Literal(Literal::String(unescape(&token.text))))
            }
            TokenKind::Operator if token.is("(") => self.parse_group(),
            TokenKind::Identifier => self.parse_identifier_expression(),
            TokenKind::Operator => Err(self.expected("an expression")),
        }
    }

    /// Parse a parenthesized expression
    fn parse_group(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_token("(")?;
        let inner = self.parse_expression()?;
        self.expect_token(")")?;
        Ok(Expression::group(inner))
    }

    /// Parse a variable access, subscript, or function call
    fn parse_identifier_expression(&mut self) -> Result<Expression, SyntaxError> {
        let name = self.expect_identifier()?;

        if self.match_token("(") {
            let arguments = self.parse_argument_list()?;
            self.expect_token(")")?;
            return Ok(Expression::call(name, arguments));
        }

        if self.match_token("[") {
            let offset = self.parse_expression()?;
            self.expect_token("]")?;
            return Ok(Expression::index(name, offset));
        }

        Ok(Expression::access(name))
    }

    /// Parse argument list: expr, expr, ... (without the parentheses)
    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        let mut arguments = Vec::new();

        if self.check(")") {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);

            if !self.match_token(",") {
                break;
            }
            if self.check(")") {
                return Err(self.error("Expected argument after ',', found ')'"));
            }
        }

        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn expr(source: &str) -> Result<Expression, SyntaxError> {
        Parser::new(tokenize(source).unwrap()).parse_expression()
    }

    fn int(n: i64) -> Expression {
        Expression::Literal(Literal::Integer(BigInt::from(n)))
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(expr("NIL").unwrap(), Expression::Literal(Literal::Nil));
        assert_eq!(expr("TRUE").unwrap(), Expression::Literal(Literal::Boolean(true)));
        assert_eq!(expr("FALSE").unwrap(), Expression::Literal(Literal::Boolean(false)));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(expr("-42").unwrap(), int(-42));
        assert_eq!(
            expr("123456789012345678901234567890").unwrap(),
            Expression::Literal(Literal::Integer(
                BigInt::from_str("123456789012345678901234567890").unwrap()
            ))
        );
        assert_eq!(
            expr("2.50").unwrap(),
            Expression::Literal(Literal::Decimal(BigDecimal::from_str("2.50").unwrap()))
        );
    }

    #[test]
    fn test_character_literals() {
        assert_eq!(expr("'a'").unwrap(), Expression::Literal(Literal::Character('a')));
        assert_eq!(expr(r"'\n'").unwrap(), Expression::Literal(Literal::Character('\n')));
        assert_eq!(expr(r"'\''").unwrap(), Expression::Literal(Literal::Character('\'')));
        assert_eq!(expr(r"'\\'").unwrap(), Expression::Literal(Literal::Character('\\')));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            expr(r#""a\nb""#).unwrap(),
            Expression::Literal(Literal::String("a\nb".to_string()))
        );
        assert_eq!(
            expr(r#""\b\r\t\"\\\'""#).unwrap(),
            Expression::Literal(Literal::String("\u{8}\r\t\"\\'".to_string()))
        );
        // an escaped backslash followed by 'n' is not a newline
        assert_eq!(
            expr(r#""\\n""#).unwrap(),
            Expression::Literal(Literal::String("\\n".to_string()))
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            expr("1 - 2 - 3").unwrap(),
            Expression::binary("-", Expression::binary("-", int(1), int(2)), int(3))
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("a || b < c + d * e").unwrap(),
            Expression::binary(
                "||",
                Expression::access("a"),
                Expression::binary(
                    "<",
                    Expression::access("b"),
                    Expression::binary(
                        "+",
                        Expression::access("c"),
                        Expression::binary("*", Expression::access("d"), Expression::access("e")),
                    ),
                ),
            )
        );
    }

    #[test]
    fn test_group_preserved() {
        assert_eq!(
            expr("(1 + 2) * 3").unwrap(),
            Expression::binary(
                "*",
                Expression::group(Expression::binary("+", int(1), int(2))),
                int(3)
            )
        );
    }

    #[test]
    fn test_unmatched_paren() {
        let err = expr("(1 + 2").unwrap_err();
        assert_eq!(err.offset, 6);
        let err = expr("(1 + 2;").unwrap_err();
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(expr("f()").unwrap(), Expression::call("f", Vec::new()));
        assert_eq!(
            expr("max(a, 1)").unwrap(),
            Expression::call("max", vec![Expression::access("a"), int(1)])
        );
        assert_eq!(expr("f(a, )").unwrap_err().offset, 5);
        assert_eq!(expr("f(a b)").unwrap_err().offset, 4);
    }

    #[test]
    fn test_index_access() {
        assert_eq!(
            expr("xs[i + 1]").unwrap(),
            Expression::index("xs", Expression::binary("+", Expression::access("i"), int(1)))
        );
        assert_eq!(expr("xs[1").unwrap_err().offset, 4);
    }

    #[test]
    fn test_not_an_expression() {
        let err = expr(";").unwrap_err();
        assert_eq!(err.offset, 0);
        assert_eq!(err.message, "Expected an expression, found ';'");

        let err = expr("1 +").unwrap_err();
        assert_eq!(err.offset, 3);
        assert_eq!(err.message, "Expected an expression, found end of input");
    }
}
