//! # Introduction
//!
//! `plc` is the front end of a small imperative toy language. It turns source
//! text into a token sequence and then into an abstract syntax tree, or
//! reports the first lexical or syntax error with its character offset. The
//! binary adds token/tree dumps and a terminal explorer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → (dump | TUI)
//! ```
//!
//! 1. [`parser`]: lexer, parser, AST definitions and pretty printing.
//! 2. [`config`]: command-line options and tunables for the binary.
//! 3. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let source = plc::parser::parse_program("VAL answer = 42;").unwrap();
//! assert_eq!(source.globals[0].name, "answer");
//! ```

pub mod config;
pub mod parser;
pub mod ui;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=plc=debug` or `RUST_LOG=plc=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
