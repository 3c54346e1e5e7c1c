//! Token list pane rendering

use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the token pane
#[derive(Debug, Default)]
pub struct TokensScrollState {
    pub offset: usize,
    /// Cursor position seen by the previous render, used to follow the cursor
    /// only when it moves so manual scrolling sticks
    pub followed: Option<usize>,
}

impl TokensScrollState {
    /// Bring `position` into view if it moved, then clamp to the content.
    fn update(&mut self, position: usize, total: usize, visible_height: usize) {
        if self.followed != Some(position) {
            self.followed = Some(position);
            if position < self.offset {
                self.offset = position;
            } else if position >= self.offset + visible_height {
                self.offset = position + 1 - visible_height;
            }
        }
        self.offset = self.offset.min(total.saturating_sub(visible_height));
    }
}

/// Render the token list, one row per token: index, offset, kind, text
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    position: usize,
    error_token: Option<usize>,
    is_focused: bool,
    scroll_state: &mut TokensScrollState,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    scroll_state.update(position, tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(index, token)| {
            let is_current = index == position;
            let marker = if is_current { "▶" } else { " " };

            let text_style = if error_token == Some(index) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                DEFAULT_THEME.token_style(token, tokens.get(index + 1))
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{} {:>4} ", marker, index),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
                Span::styled(
                    format!("{:>6}  ", token.offset),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<10} ", token.kind.name()),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(token.text.clone(), text_style),
            ]);

            let item = ListItem::new(line);
            if is_current {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
