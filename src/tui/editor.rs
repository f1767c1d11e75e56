//! Minimal multi-line text area with cursor.
//!
//! Stores a `String` and a character-offset cursor. Handles insert, delete,
//! newline, and arrow movement. No soft wrapping — long lines scroll out of
//! the pane instead of reflowing, which keeps the cursor math simple.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A multi-line text buffer with cursor position (character offset).
#[derive(Debug, Default)]
pub struct TextArea {
    content: String,
    /// Cursor position as a character offset (0 = before first char).
    cursor: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set content and move cursor to the start.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.replace("\r\n", "\n").replace('\r', "");
        self.cursor = 0;
    }

    /// Cursor position as (line, column) in characters.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.content.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Insert a character at the cursor position.
    /// Bare `\r` is silently dropped; `\n` starts a new line.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' {
            return;
        }
        let byte_offset = self.byte_offset();
        self.content.insert(byte_offset, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    /// Normalizes `\r\n` → `\n` and strips bare `\r`.
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace("\r\n", "\n").replace('\r', "");
        let byte_offset = self.byte_offset();
        self.content.insert_str(byte_offset, &clean);
        self.cursor += clean.chars().count();
    }

    /// Delete the character before the cursor (Backspace).
    pub fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_char_at_cursor();
    }

    /// Delete the character at the cursor (Delete key).
    pub fn delete_forward(&mut self) {
        self.remove_char_at_cursor();
    }

    /// Move cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor one character right.
    pub fn move_right(&mut self) {
        let max = self.content.chars().count();
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    /// Move cursor up one line, clamping to the shorter line's end.
    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        let starts = self.line_starts();
        let target = line - 1;
        self.cursor = starts[target] + col.min(self.line_len(&starts, target));
    }

    /// Move cursor down one line, clamping to the shorter line's end.
    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        let starts = self.line_starts();
        if line + 1 >= starts.len() {
            return;
        }
        let target = line + 1;
        self.cursor = starts[target] + col.min(self.line_len(&starts, target));
    }

    /// Move cursor to the start of the current line.
    pub fn move_home(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.line_starts()[line];
    }

    /// Move cursor to the end of the current line.
    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_line_col();
        let starts = self.line_starts();
        self.cursor = starts[line] + self.line_len(&starts, line);
    }

    /// Apply a key event to the buffer. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
                true
            }
            KeyCode::Enter => {
                self.insert_char('\n');
                true
            }
            KeyCode::Backspace => {
                self.delete_back();
                true
            }
            KeyCode::Delete => {
                self.delete_forward();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Up => {
                self.move_up();
                true
            }
            KeyCode::Down => {
                self.move_down();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }

    /// Byte offset of the cursor into the content string.
    fn byte_offset(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Character offsets where each line starts.
    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, ch) in self.content.chars().enumerate() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    /// Length in characters of a line, excluding its newline.
    fn line_len(&self, starts: &[usize], line: usize) -> usize {
        let total = self.content.chars().count();
        match starts.get(line + 1) {
            Some(next) => next - starts[line] - 1,
            None => total - starts[line],
        }
    }

    fn remove_char_at_cursor(&mut self) {
        let byte_offset = self.byte_offset();
        if byte_offset >= self.content.len() {
            return;
        }
        let ch = match self.content[byte_offset..].chars().next() {
            Some(ch) => ch,
            None => return,
        };
        self.content
            .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn insert_and_content() {
        let mut ta = TextArea::new();
        ta.insert_str("SELECT 1");
        assert_eq!(ta.content(), "SELECT 1");
        assert_eq!(ta.cursor_line_col(), (0, 8));
    }

    #[test]
    fn carriage_returns_are_normalized() {
        let mut ta = TextArea::new();
        ta.insert_str("a\r\nb\rc");
        assert_eq!(ta.content(), "a\nbc");
        ta.insert_char('\r');
        assert_eq!(ta.content(), "a\nbc");
    }

    #[test]
    fn enter_starts_new_line() {
        let mut ta = TextArea::new();
        ta.handle_key(key(KeyCode::Char('a')));
        ta.handle_key(key(KeyCode::Enter));
        ta.handle_key(key(KeyCode::Char('b')));
        assert_eq!(ta.content(), "a\nb");
        assert_eq!(ta.cursor_line_col(), (1, 1));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ta = TextArea::new();
        ta.insert_str("ab\ncd");
        ta.move_up();
        // cursor at (0,2) → end of "ab"; move down then home, backspace eats '\n'
        ta.move_down();
        ta.move_home();
        ta.delete_back();
        assert_eq!(ta.content(), "abcd");
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut ta = TextArea::new();
        ta.insert_str("x");
        ta.delete_forward();
        assert_eq!(ta.content(), "x");
    }

    #[test]
    fn up_down_clamp_to_line_length() {
        let mut ta = TextArea::new();
        ta.insert_str("short\na much longer line");
        ta.move_end();
        assert_eq!(ta.cursor_line_col(), (1, 18));
        ta.move_up();
        assert_eq!(ta.cursor_line_col(), (0, 5));
        ta.move_down();
        assert_eq!(ta.cursor_line_col(), (1, 5));
    }

    #[test]
    fn home_and_end_work_per_line() {
        let mut ta = TextArea::new();
        ta.insert_str("first\nsecond");
        ta.move_home();
        assert_eq!(ta.cursor_line_col(), (1, 0));
        ta.move_end();
        assert_eq!(ta.cursor_line_col(), (1, 6));
    }

    #[test]
    fn set_content_resets_cursor() {
        let mut ta = TextArea::new();
        ta.insert_str("old");
        ta.set_content("new text\nwith lines");
        assert_eq!(ta.cursor_line_col(), (0, 0));
        assert_eq!(ta.content(), "new text\nwith lines");
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut ta = TextArea::new();
        let consumed = ta.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!consumed);
        assert!(ta.content().is_empty());
    }

    #[test]
    fn multibyte_chars_delete_cleanly() {
        let mut ta = TextArea::new();
        ta.insert_str("héllo");
        ta.move_left();
        ta.move_left();
        ta.move_left();
        ta.delete_back();
        assert_eq!(ta.content(), "hllo");
    }
}
