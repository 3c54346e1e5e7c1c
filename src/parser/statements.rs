//! Statement parsing implementation
//!
//! This module handles parsing of blocks and all PLC statement types:
//!
//! - Local declarations: `LET x = 1;`
//! - Control flow: `IF`, `SWITCH`, `WHILE`
//! - `RETURN value;`
//! - Expression statements and assignments: `f(x);`, `xs[i] = 2;`
//!
//! # Grammar
//!
//! ```text
//! block       ::= statement* (until "END")
//! statement   ::= return | switch | while | if | declaration | expr_or_assign
//! return      ::= "RETURN" expression ";"
//! declaration ::= "LET" identifier ( "=" expression )? ";"
//! if          ::= "IF" expression "DO" statement* ( "ELSE" block )? "END"
//! switch      ::= "SWITCH" expression case* "END"
//! case        ::= ( "CASE" expression ":" | "DEFAULT" ) statement*
//! while       ::= "WHILE" expression "DO" block "END"
//! expr_or_assign ::= expression ( "=" expression )? ";"
//! ```
//!
//! A `SWITCH` must contain exactly one `DEFAULT` case and it must come last.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::error::SyntaxError;
use crate::parser::parse::Parser;
use tracing::trace;

impl Parser {
    /// Parse statements up to (not including) the closing `END`
    pub fn parse_block(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        self.parse_statements_until(&["END"])
    }

    /// Collect statements until one of `terminators` is next. Running out of
    /// tokens first is an unclosed block.
    fn parse_statements_until(
        &mut self,
        terminators: &[&str],
    ) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();

        while !self.peek_any(terminators) {
            if !self.tokens.has(0) {
                return Err(self.error("Unclosed block: expected 'END', found end of input"));
            }
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        trace!(position = self.tokens.position(), "parse_statement");

        if self.check("RETURN") {
            self.parse_return_statement()
        } else if self.check("SWITCH") {
            self.parse_switch_statement()
        } else if self.check("WHILE") {
            self.parse_while_statement()
        } else if self.check("IF") {
            self.parse_if_statement()
        } else if self.check("LET") {
            self.parse_declaration_statement()
        } else {
            self.parse_expression_statement()
        }
    }

    /// Expression statement, or an assignment when '=' follows the expression
    fn parse_expression_statement(&mut self) -> Result<Statement, SyntaxError> {
        let expression = self.parse_expression()?;

        if self.match_token("=") {
            let value = self.parse_expression()?;
            self.expect_token(";")?;
            return Ok(Statement::Assignment {
                receiver: expression,
                value,
            });
        }

        self.expect_token(";")?;
        Ok(Statement::Expression(expression))
    }

    fn parse_declaration_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_token("LET")?;
        let name = self.expect_identifier()?;

        let value = if self.match_token("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_token(";")?;
        Ok(Statement::Declaration { name, value })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_token("IF")?;
        let condition = self.parse_expression()?;
        self.expect_token("DO")?;

        let then_statements = self.parse_statements_until(&["ELSE", "END"])?;
        let else_statements = if self.match_token("ELSE") {
            self.parse_block()?
        } else {
            Vec::new()
        };

        self.expect_token("END")?;

        Ok(Statement::If {
            condition,
            then_statements,
            else_statements,
        })
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_token("SWITCH")?;
        let condition = self.parse_expression()?;

        let mut cases = Vec::new();
        while self.tokens.has(0) && !self.check("END") {
            if self.check("CASE") {
                cases.push(self.parse_case()?);
            } else if self.check("DEFAULT") {
                cases.push(self.parse_case()?);
                break;
            } else {
                return Err(self.expected("'CASE', 'DEFAULT' or 'END'"));
            }
        }

        if !cases.iter().any(Case::is_default) {
            return Err(self.error("Switch requires a DEFAULT case"));
        }
        if self.peek_any(&["CASE", "DEFAULT"]) {
            return Err(self.error("DEFAULT must be the last case of a switch"));
        }

        self.expect_token("END")?;

        Ok(Statement::Switch { condition, cases })
    }

    /// Parse a `CASE value:` or `DEFAULT` arm and its statements
    fn parse_case(&mut self) -> Result<Case, SyntaxError> {
        let condition = if self.match_token("CASE") {
            let value = self.parse_expression()?;
            self.expect_token(":")?;
            Some(value)
        } else {
            self.expect_token("DEFAULT")?;
            None
        };

        let statements = self.parse_statements_until(&["CASE", "DEFAULT", "END"])?;

        Ok(Case {
            condition,
            statements,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_token("WHILE")?;
        let condition = self.parse_expression()?;
        self.expect_token("DO")?;
        let statements = self.parse_block()?;
        self.expect_token("END")?;

        Ok(Statement::While {
            condition,
            statements,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_token("RETURN")?;
        let value = self.parse_expression()?;
        self.expect_token(";")?;

        Ok(Statement::Return(value))
    }
}
