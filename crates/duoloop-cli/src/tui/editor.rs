//! Minimal line-buffer editor for the performer panes.
//!
//! Deliberately small: insert, delete, newline and cursor movement.
//! Anything richer (selection, undo, syntax highlighting) belongs to a
//! real editing surface, not this desk.

/// Cursor movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A plain text buffer with a cursor.
#[derive(Clone, Debug)]
pub struct EditorBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl EditorBuffer {
    /// Create a buffer from existing text, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        Self {
            lines,
            row: 0,
            col: 0,
        }
    }

    /// The buffer contents as a single string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Cursor position as (row, column), both zero-based. The column
    /// counts characters, not bytes.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col.min(self.line_len(self.row)))
    }

    /// Lines of the buffer, for rendering.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn insert_char(&mut self, c: char) {
        self.clamp_col();
        let byte = self.byte_at(self.row, self.col);
        self.lines[self.row].insert(byte, c);
        self.col += 1;
    }

    pub fn insert_newline(&mut self) {
        self.clamp_col();
        let byte = self.byte_at(self.row, self.col);
        let rest = self.lines[self.row].split_off(byte);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Delete the character before the cursor, joining lines at column
    /// zero.
    pub fn backspace(&mut self) {
        self.clamp_col();
        if self.col > 0 {
            self.col -= 1;
            let byte = self.byte_at(self.row, self.col);
            self.lines[self.row].remove(byte);
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.clamp_col();
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                }
            }
            Direction::Right => {
                self.clamp_col();
                if self.col < self.line_len(self.row) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
            }
            Direction::Up => {
                self.row = self.row.saturating_sub(1);
            }
            Direction::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                }
            }
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.line_len(self.row));
    }

    fn byte_at(&self, row: usize, col: usize) -> usize {
        self.lines[row]
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.lines[row].len())
    }
}
