//! PLC source code parser
//!
//! This module transforms PLC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with the grammar rules split across
//!   `declarations`, `statements` and `expressions`
//! - [`ast`]: AST node definitions
//! - [`pretty`]: Rendering the AST back to text
//!
//! # Language
//!
//! A program is a list of globals (`LIST`, `VAR`, `VAL`) followed by a list
//! of functions (`FUN name(params) DO ... END`). Statements are `LET`,
//! assignment, expression statements, `IF`/`ELSE`, `SWITCH`/`CASE`/`DEFAULT`,
//! `WHILE` and `RETURN`. Expressions have four left-associative binary
//! precedence levels above literals, groups, variables, subscripts and calls.
//!
//! # Parser Implementation
//!
//! Hand-written lexer and recursive descent parser, both fail-fast: the first
//! malformed character or violated grammar rule aborts with an error carrying
//! its character offset.

pub mod ast;
pub mod cursor;
mod declarations;
pub mod error;
mod expressions;
pub mod lexer;
pub mod location;
pub mod parse;
pub mod pretty;
mod statements;
pub mod token;

pub use error::{Error, LexError, SyntaxError};
pub use expressions::unescape;

/// Lex and parse a complete program.
pub fn parse_program(text: &str) -> Result<ast::Source, Error> {
    let tokens = lexer::tokenize(text)?;
    let source = parse::parse(tokens)?;
    Ok(source)
}
