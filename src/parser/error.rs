//! Error types for the two front-end stages
//!
//! Both stages are fail-fast: the first fault aborts the call and is returned
//! as a single error value carrying the character offset it was found at.

use thiserror::Error;

/// Malformed character sequence found by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at offset {offset}: {message}")]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Token sequence that violates the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {offset}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Failure of a full lex + parse run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Character offset the failure was reported at.
    pub fn offset(&self) -> usize {
        match self {
            Error::Lex(err) => err.offset,
            Error::Syntax(err) => err.offset,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Lex(err) => &err.message,
            Error::Syntax(err) => &err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offset() {
        let err = Error::from(SyntaxError::new("expected ';'", 12));
        assert_eq!(err.to_string(), "syntax error at offset 12: expected ';'");
        assert_eq!(err.offset(), 12);

        let err = Error::from(LexError::new("unterminated string", 3));
        assert_eq!(err.to_string(), "lexical error at offset 3: unterminated string");
        assert_eq!(err.message(), "unterminated string");
    }
}
