//! Source code pane rendering with token highlighting
//!
//! This module renders the program text coloured by the lexer's own tokens,
//! so what is shown is exactly what the parser sees.
//!
//! # Features
//!
//! - Colouring by token kind (keywords, function names, numbers, literals)
//! - Current token highlighting and current line indicator
//! - Error position highlighting, including errors past the last character
//! - Line numbering and a scroll state that keeps the current line in place

use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the source pane shows
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub tokens: &'a [Token],
    pub current: Option<&'a Token>,
    /// 1-based line holding the current token
    pub current_line: usize,
    pub error_offset: Option<usize>,
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Target visual row for the current line (None = not initialized yet)
    pub target_line_row: Option<usize>,
}

fn error_style() -> Style {
    Style::default()
        .bg(DEFAULT_THEME.error)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// One style per source character
fn character_styles(data: &SourceRenderData, length: usize) -> Vec<Style> {
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); length];

    for (index, token) in data.tokens.iter().enumerate() {
        let style = DEFAULT_THEME.token_style(token, data.tokens.get(index + 1));
        for slot in styles.iter_mut().take(token.end()).skip(token.offset) {
            *slot = style;
        }
    }

    if let Some(current) = data.current {
        let highlight = Style::default()
            .bg(DEFAULT_THEME.current_token_bg)
            .add_modifier(Modifier::BOLD);
        for slot in styles.iter_mut().take(current.end()).skip(current.offset) {
            *slot = slot.patch(highlight);
        }
    }

    if let Some(slot) = data.error_offset.and_then(|offset| styles.get_mut(offset)) {
        *slot = error_style();
    }

    styles
}

/// Split the source into display lines of styled spans
fn highlight_source(data: &SourceRenderData) -> Vec<Vec<Span<'static>>> {
    let chars: Vec<char> = data.source_code.chars().collect();
    let styles = character_styles(data, chars.len());

    let mut lines = vec![Vec::new()];
    let mut run = String::new();
    let mut run_style = Style::default();

    for (offset, (&ch, &style)) in chars.iter().zip(&styles).enumerate() {
        if style != run_style && !run.is_empty() {
            push_span(&mut lines, &mut run, run_style);
        }
        run_style = style;

        match ch {
            '\n' => {
                if data.error_offset == Some(offset) {
                    push_span(&mut lines, &mut run, run_style);
                    run.push(' ');
                }
                push_span(&mut lines, &mut run, run_style);
                lines.push(Vec::new());
            }
            '\r' => {}
            '\t' => run.push_str("    "),
            '\u{8}' => run.push(' '),
            _ => run.push(ch),
        }
    }
    push_span(&mut lines, &mut run, run_style);

    // Errors at end of input sit just past the last character
    if data.error_offset == Some(chars.len()) {
        if let Some(last) = lines.last_mut() {
            last.push(Span::styled(" ", error_style()));
        }
    }

    lines
}

fn push_span(lines: &mut [Vec<Span<'static>>], run: &mut String, style: Style) {
    if run.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(Span::styled(std::mem::take(run), style));
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let lines = highlight_source(data);
    let total_lines = lines.len();

    // Calculate visible range
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Initialize target_line_row to center if not set, then clamp to the visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Calculate scroll offset to keep current line at target visual row
    if data.current_line > 0 && data.current_line <= total_lines {
        let target_line_idx = data.current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let is_error_line = |line_num: usize| {
        data.error_offset.is_some() && data.current.is_none() && line_num == data.current_line
    };

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, spans)| {
            let line_num = idx + 1;
            let is_current = line_num == data.current_line;

            let num_style = if is_error_line(line_num) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            if is_current {
                let line_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                // Token and error backgrounds stay on top of the line background
                final_spans.extend(spans.into_iter().map(|mut span| {
                    span.style = line_bg.patch(span.style);
                    span
                }));
            } else {
                final_spans.extend(spans);
            }

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
