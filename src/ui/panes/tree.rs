//! Syntax tree pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Render the syntax tree, or the error report when parsing failed
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    is_error: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = if is_error { " Error " } else { " Syntax Tree " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let text_style = if is_error {
        Style::default().fg(DEFAULT_THEME.error)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line.as_str()).style(text_style))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
