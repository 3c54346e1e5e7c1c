use crate::parser::token::{Token, TokenKind};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub current_token_bg: Color,
    pub function: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(166, 227, 161),         // Green for characters and strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    current_token_bg: Color::Rgb(88, 91, 112),
    function: Color::Rgb(249, 226, 175), // Yellow for functions
};

impl Theme {
    /// Foreground style for a token, given the token that follows it.
    pub fn token_style(&self, token: &Token, next: Option<&Token>) -> Style {
        match token.kind {
            TokenKind::Identifier if token.is_keyword() => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::Identifier if next.is_some_and(|next| next.is("(")) => {
                Style::default().fg(self.function)
            }
            TokenKind::Identifier => Style::default().fg(self.fg),
            TokenKind::Integer | TokenKind::Decimal => Style::default().fg(self.number),
            TokenKind::Character | TokenKind::String => Style::default().fg(self.string),
            TokenKind::Operator => match token.text.as_str() {
                "(" | ")" | "[" | "]" => Style::default().fg(self.primary),
                _ => Style::default().fg(self.fg),
            },
        }
    }

    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}
