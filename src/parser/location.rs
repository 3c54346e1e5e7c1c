//! Offset to line/column mapping for display

/// Line and column of a character, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate the character at `offset` in `text`. Offsets past the end map
    /// to the position just after the last character.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut location = SourceLocation::new(1, 1);
        for ch in text.chars().take(offset) {
            if ch == '\n' {
                location.line += 1;
                location.column = 1;
            } else {
                location.column += 1;
            }
        }
        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let text = "VAR x;\nFUN f() DO\nEND";
        assert_eq!(SourceLocation::locate(text, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::locate(text, 4), SourceLocation::new(1, 5));
        assert_eq!(SourceLocation::locate(text, 7), SourceLocation::new(2, 1));
        assert_eq!(SourceLocation::locate(text, 100), SourceLocation::new(3, 4));
    }
}
