//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text coloured by token, with current token and error markers
//! - [`tokens`]: Token list with offsets and kinds
//! - [`tree`]: Rendered syntax tree, or the error report
//! - [`status`]: Status bar with keybindings and cursor position
//!
//! Each pane module exports a `render_*` function plus the scroll state or
//! render data it takes.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::{render_tokens_pane, TokensScrollState};
pub use tree::render_tree_pane;
