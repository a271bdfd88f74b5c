//! Editor host
//!
//! Adapts a `tui_textarea::TextArea` to [`DocumentHost`]. Each line of the
//! textarea is one text block; positions are character offsets into the
//! whole buffer with `\n` between lines.

use ratatui::crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

use crate::document::{ChangeOrigin, DocumentHost, Position};

pub struct TextAreaHost {
    pub textarea: TextArea<'static>,
}

impl TextAreaHost {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
        }
    }

    /// Load `text` with the caret at the end of the last line
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = if text.is_empty() {
            vec![String::new()]
        } else {
            text.lines().map(str::to_string).collect()
        };
        let mut textarea = TextArea::new(lines);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        Self { textarea }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// (row, col) of the caret
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Feed a key to the textarea and classify what it did
    ///
    /// Returns `None` when the key changed neither the text nor the caret.
    pub fn input(&mut self, key: KeyEvent) -> Option<ChangeOrigin> {
        let before = self.textarea.cursor();
        if self.textarea.input(key) {
            Some(ChangeOrigin::Input)
        } else if self.textarea.cursor() != before {
            Some(ChangeOrigin::Selection)
        } else {
            None
        }
    }

    fn offset_of(&self, row: usize, col: usize) -> Position {
        let preceding: usize = self
            .textarea
            .lines()
            .iter()
            .take(row)
            .map(|line| line.chars().count() + 1)
            .sum();
        preceding + col
    }

    /// `CursorMove::Jump` only addresses the first 65536 rows and columns;
    /// past that the caret is walked the rest of the way
    fn move_caret_to(&mut self, row: usize, col: usize) {
        if let (Ok(r), Ok(c)) = (u16::try_from(row), u16::try_from(col)) {
            self.textarea.move_cursor(CursorMove::Jump(r, c));
            return;
        }

        let jump_row = u16::try_from(row).unwrap_or(u16::MAX);
        self.textarea.move_cursor(CursorMove::Jump(jump_row, 0));
        for _ in usize::from(jump_row)..row {
            self.textarea.move_cursor(CursorMove::Down);
        }
        for _ in 0..col {
            self.textarea.move_cursor(CursorMove::Forward);
        }
    }

    /// Inverse of `offset_of`, clamped to the buffer
    fn row_col_of(&self, position: Position) -> (usize, usize) {
        let lines = self.textarea.lines();
        let mut remaining = position;
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return (row, remaining);
            }
            remaining -= len + 1;
        }

        let last = lines.len().saturating_sub(1);
        (last, lines.get(last).map_or(0, |l| l.chars().count()))
    }
}

impl Default for TextAreaHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost for TextAreaHost {
    fn caret(&self) -> Position {
        let (row, col) = self.textarea.cursor();
        self.offset_of(row, col)
    }

    fn current_block_text(&self) -> String {
        let (row, _) = self.textarea.cursor();
        self.textarea.lines().get(row).cloned().unwrap_or_default()
    }

    fn is_caret_at_block_end(&self) -> bool {
        let (row, col) = self.textarea.cursor();
        self.textarea
            .lines()
            .get(row)
            .is_some_and(|line| line.chars().count() == col)
    }

    fn insert_text(&mut self, text: &str, position: Position) {
        let (row, col) = self.row_col_of(position);
        self.move_caret_to(row, col);

        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.textarea.insert_newline();
            }
            self.textarea.insert_str(segment);
        }
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;
