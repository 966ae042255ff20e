//! Single line text input with a cursor and a character limit.

/// Default maximum annotation length in characters
pub const DEFAULT_CHAR_LIMIT: usize = 156;

/// Terminal independent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    /// Ctrl+C
    Interrupt,
    Other,
}

/// Editable line of text
///
/// The cursor is a character index into the buffer, `0..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    chars: Vec<char>,
    cursor: usize,
    char_limit: usize,
}

impl LineInput {
    /// Create an empty input; a limit of 0 means unlimited
    pub fn new(char_limit: usize) -> Self {
        LineInput {
            chars: Vec::new(),
            cursor: 0,
            char_limit,
        }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before and after the cursor
    pub fn split_at_cursor(&self) -> (String, String) {
        let (before, after) = self.chars.split_at(self.cursor);
        (before.iter().collect(), after.iter().collect())
    }

    /// Replace the buffer, truncated to the limit, cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.chars = value.chars().collect();
        if self.char_limit > 0 {
            self.chars.truncate(self.char_limit);
        }
        self.cursor = self.chars.len();
    }

    /// Apply an editing key. Keys without an editing meaning are ignored.
    pub fn apply(&mut self, key: InputKey) {
        match key {
            InputKey::Char(c) if !c.is_control() => self.insert(c),
            InputKey::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            InputKey::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            InputKey::Left => self.cursor = self.cursor.saturating_sub(1),
            InputKey::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            InputKey::Home => self.cursor = 0,
            InputKey::End => self.cursor = self.chars.len(),
            _ => {}
        }
    }

    fn insert(&mut self, c: char) {
        if self.char_limit > 0 && self.chars.len() >= self.char_limit {
            return;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT)
    }
}
