//! Declaration parsing implementation
//!
//! This module handles parsing of top-level declarations in PLC programs:
//!
//! - Lists: `LIST xs = [1, 2, 3];`
//! - Mutable globals: `VAR x;` or `VAR x = 1;`
//! - Immutable globals: `VAL pi = 3.14;`
//! - Functions: `FUN name(a, b) DO ... END`
//!
//! # Grammar
//!
//! ```text
//! global    ::= ( list | mutable | immutable ) ";"
//! list      ::= "LIST" identifier "=" "[" expression ( "," expression )* "]"
//! mutable   ::= "VAR" identifier ( "=" expression )?
//! immutable ::= "VAL" identifier "=" expression
//! function  ::= "FUN" identifier "(" ( identifier ( "," identifier )* )? ")" "DO" block "END"
//! ```
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::error::SyntaxError;
use crate::parser::parse::Parser;
use tracing::trace;

impl Parser {
    /// Parse the `global` rule, including the terminating ';'
    pub fn parse_global(&mut self) -> Result<Global, SyntaxError> {
        let global = if self.check("LIST") {
            self.parse_list()?
        } else if self.check("VAR") {
            self.parse_mutable()?
        } else if self.check("VAL") {
            self.parse_immutable()?
        } else {
            return Err(self.expected("'LIST', 'VAR' or 'VAL'"));
        };

        self.expect_token(";")?;
        trace!(name = %global.name, mutable = global.mutable, "global");
        Ok(global)
    }

    fn parse_list(&mut self) -> Result<Global, SyntaxError> {
        self.expect_token("LIST")?;
        let name = self.expect_identifier()?;
        self.expect_token("=")?;
        self.expect_token("[")?;

        let mut elements = vec![self.parse_expression()?];
        while self.match_token(",") {
            if self.check("]") {
                return Err(self.error("Expected expression after ',', found ']'"));
            }
            elements.push(self.parse_expression()?);
        }

        self.expect_token("]")?;

        Ok(Global {
            name,
            mutable: true,
            value: Some(Expression::PlcList(elements)),
        })
    }

    fn parse_mutable(&mut self) -> Result<Global, SyntaxError> {
        self.expect_token("VAR")?;
        let name = self.expect_identifier()?;

        let value = if self.match_token("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Global {
            name,
            mutable: true,
            value,
        })
    }

    fn parse_immutable(&mut self) -> Result<Global, SyntaxError> {
        self.expect_token("VAL")?;
        let name = self.expect_identifier()?;
        self.expect_token("=")?;
        let value = self.parse_expression()?;

        Ok(Global {
            name,
            mutable: false,
            value: Some(value),
        })
    }

    /// Parse the `function` rule
    pub fn parse_function(&mut self) -> Result<Function, SyntaxError> {
        self.expect_token("FUN")?;
        let name = self.expect_identifier()?;
        self.expect_token("(")?;

        let mut parameters = Vec::new();
        if !self.check(")") {
            loop {
                parameters.push(self.expect_identifier()?);

                if !self.match_token(",") {
                    break;
                }
                if self.check(")") {
                    return Err(self.error("Expected parameter after ',', found ')'"));
                }
            }
        }

        self.expect_token(")")?;
        self.expect_token("DO")?;
        let statements = self.parse_block()?;
        self.expect_token("END")?;

        trace!(name = %name, parameters = parameters.len(), "function");
        Ok(Function {
            name,
            parameters,
            statements,
        })
    }
}
