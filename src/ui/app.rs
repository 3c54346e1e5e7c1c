//! Main TUI application state and logic

use crate::config::{KEY_DEBOUNCE, PLAY_INTERVAL, POLL_INTERVAL};
use crate::parser::ast::Source;
use crate::parser::lexer::tokenize;
use crate::parser::location::SourceLocation;
use crate::parser::parse::parse;
use crate::parser::pretty::render_tree;
use crate::parser::token::Token;
use crate::parser::Error;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Instant;
use tracing::debug;

use super::panes::{
    render_source_pane, render_status_bar, render_tokens_pane, render_tree_pane,
    SourceRenderData, SourceScrollState, StatusRenderData, TokensScrollState,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source text being explored
    pub source_code: String,

    /// Tokens produced by the lexer (empty after a lexical error)
    pub tokens: Vec<Token>,

    /// Token index by start offset
    pub token_starts: FxHashMap<usize, usize>,

    /// Parse result for the whole program
    pub outcome: Result<Source, Error>,

    /// Lines shown in the tree pane: the rendered tree or the error report
    pub tree_lines: Vec<String>,

    /// Index of the current token
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tokens_scroll: TokensScrollState,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Option<Instant>,
}

impl App {
    /// Lex and parse `source_code` and set up the explorer state
    pub fn new(source_code: String) -> Self {
        let (tokens, outcome) = match tokenize(&source_code) {
            Ok(tokens) => {
                let outcome = parse(tokens.clone()).map_err(Error::from);
                (tokens, outcome)
            }
            Err(err) => (Vec::new(), Err(Error::from(err))),
        };

        let token_starts: FxHashMap<usize, usize> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (token.offset, index))
            .collect();

        let (tree_lines, status_message) = match &outcome {
            Ok(source) => (
                render_tree(source).lines().map(str::to_string).collect(),
                format!("Parsed {} token(s)", tokens.len()),
            ),
            Err(err) => {
                let location = SourceLocation::locate(&source_code, err.offset());
                (
                    vec![
                        format!("line {}, column {}", location.line, location.column),
                        err.to_string(),
                    ],
                    err.message().to_string(),
                )
            }
        };

        // Start on the offending token so the error is visible right away
        let position = match &outcome {
            Err(Error::Syntax(err)) => token_starts
                .get(&err.offset)
                .copied()
                .unwrap_or(tokens.len().saturating_sub(1)),
            _ => 0,
        };
        debug!(tokens = tokens.len(), position, ok = outcome.is_ok(), "explorer ready");

        App {
            source_code,
            tokens,
            token_starts,
            outcome,
            tree_lines,
            position,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tokens_scroll: TokensScrollState::default(),
            tree_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: None,
        }
    }

    /// The token under the cursor, if any were produced
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Character offset of the lexical or syntax error, if any
    pub fn error_offset(&self) -> Option<usize> {
        self.outcome.as_ref().err().map(Error::offset)
    }

    /// Index of the token the syntax error points at
    pub fn error_token(&self) -> Option<usize> {
        self.error_offset()
            .and_then(|offset| self.token_starts.get(&offset).copied())
    }

    /// 1-based line of the current token (or of the error when there are no tokens)
    pub fn current_line(&self) -> usize {
        let offset = match self.current_token() {
            Some(token) => token.offset,
            None => self.error_offset().unwrap_or(0),
        };
        SourceLocation::locate(&self.source_code, offset).line
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.tokens.len()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Source | Right column: Tokens (top), Tree (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        let current_line = self.current_line();
        let error_offset = self.error_offset();
        render_source_pane(
            frame,
            columns[0],
            &SourceRenderData {
                source_code: &self.source_code,
                tokens: &self.tokens,
                current: self.tokens.get(self.position),
                current_line,
                error_offset,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.position,
            self.error_token(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        render_tree_pane(
            frame,
            right_rows[1],
            &self.tree_lines,
            self.outcome.is_err(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                position: self.position,
                total_tokens: self.tokens.len(),
                is_error: self.outcome.is_err(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.status_message = format!("Stepped forward {} token(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at first token".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at last token".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll.offset = self.tokens_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll.offset = self.tokens_scroll.offset.saturating_add(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode, ignoring key repeat
                let debounced = self
                    .last_space_press
                    .map_or(true, |pressed| pressed.elapsed() >= KEY_DEBOUNCE);
                if debounced {
                    self.last_space_press = Some(Instant::now());
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.jump_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        if self.is_playing {
            // Take the first step on the next loop iteration
            self.last_play_time = Instant::now()
                .checked_sub(PLAY_INTERVAL)
                .unwrap_or_else(Instant::now);
            self.status_message = "Playing...".to_string();
        } else {
            self.status_message = "Paused".to_string();
        }
    }

    /// Move to the next token. Returns false at the last token.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Move to the previous token. Returns false at the first token.
    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.tokens.len().saturating_sub(1);
    }

    pub fn jump_to_start(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    #[test]
    fn test_valid_program() {
        let app = App::new("VAL x = 1;".to_string());
        assert_eq!(app.tokens.len(), 5);
        assert!(app.outcome.is_ok());
        assert_eq!(app.position, 0);
        assert_eq!(app.tree_lines, vec!["Source", "└── VAL x = 1"]);
        assert_eq!(app.error_offset(), None);
    }

    #[test]
    fn test_stepping() {
        let mut app = App::new("VAL x = 1;".to_string());
        assert!(!app.step_backward());
        assert!(app.step_forward());
        assert_eq!(app.current_token().map(|t| t.text.as_str()), Some("x"));

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.position, 4);
        assert_eq!(app.status_message, "Stepped forward 3 token(s)");
        assert!(!app.step_forward());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.position, 4);
    }

    #[test]
    fn test_lex_error_has_no_tokens() {
        let mut app = App::new("VAL x = 01;".to_string());
        assert!(app.tokens.is_empty());
        assert_eq!(app.error_offset(), Some(9));
        assert_eq!(app.current_token(), None);
        assert!(!app.step_forward());
        assert_eq!(app.current_line(), 1);
    }

    #[test]
    fn test_syntax_error_starts_at_offending_token() {
        let app = App::new("VAL x = 1\nFUN f() DO END".to_string());
        assert_eq!(app.error_offset(), Some(10));
        assert_eq!(app.position, 4);
        assert_eq!(app.error_token(), Some(4));
        assert_eq!(app.current_line(), 2);
        assert_eq!(app.tree_lines[0], "line 2, column 1");
    }

    #[test]
    fn test_syntax_error_at_end_of_input() {
        let app = App::new("VAL x = 1".to_string());
        assert_eq!(app.error_offset(), Some(9));
        assert_eq!(app.position, 3);
        assert_eq!(app.error_token(), None);
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = App::new(String::new());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
