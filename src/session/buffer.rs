//! Line buffer with statuses anchored to line text.
//!
//! Each line owns its status, so inserting or deleting lines above a tagged
//! line carries the tag along with its text. Line numbers are only assigned
//! when statuses are collected for saving.

use crate::document::LineStatuses;
use crate::status::StatusKey;

use super::position::Position;

#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    text: String,
    status: Option<StatusKey>,
}

impl Line {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            status: None,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text split into lines; never empty (an empty buffer is one empty line)
#[derive(Debug, Clone, PartialEq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl LineBuffer {
    /// Buffer holding `text` with no statuses
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::plain).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.get(line).map(|l| l.text.as_str())
    }

    pub fn status(&self, line: usize) -> Option<StatusKey> {
        self.get(line).and_then(|l| l.status)
    }

    /// Replace the status of one line; `false` when the line does not exist
    pub fn set_status(&mut self, line: usize, status: Option<StatusKey>) -> bool {
        match line.checked_sub(1).and_then(|idx| self.lines.get_mut(idx)) {
            Some(l) => {
                l.status = status;
                true
            }
            None => false,
        }
    }

    /// Sparse line number to status map of the current content
    pub fn statuses(&self) -> LineStatuses {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| line.status.map(|status| (idx + 1, status)))
            .collect()
    }

    /// Move `pos` onto the nearest existing position
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.lines.len());
        let column = pos.column.min(self.lines[line - 1].char_len());
        Position { line, column }
    }

    /// Insert `text` at `pos`, returning the position just past it.
    ///
    /// Splitting a line at column 0 pushes the whole line, status included,
    /// below the inserted lines. Splitting anywhere else leaves the status on
    /// the first half.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        let pos = self.clamp(pos);
        let idx = pos.line - 1;
        let at = byte_offset(&self.lines[idx].text, pos.column);

        let mut pieces: Vec<&str> = text.split('\n').collect();
        let last = pieces.pop().unwrap_or_default();

        if pieces.is_empty() {
            self.lines[idx].text.insert_str(at, last);
            return Position::new(pos.line, pos.column + last.chars().count());
        }

        let line = &mut self.lines[idx];
        let tail = line.text.split_off(at);
        let carried = if at == 0 { line.status.take() } else { None };
        line.text.push_str(pieces[0]);

        let mut inserted: Vec<Line> = pieces[1..].iter().map(|piece| Line::plain(piece)).collect();
        inserted.push(Line {
            text: format!("{}{}", last, tail),
            status: carried,
        });

        let end_line = pos.line + inserted.len();
        self.lines.splice(idx + 1..idx + 1, inserted);

        Position::new(end_line, last.chars().count())
    }

    /// Delete the text between two positions (in either order).
    ///
    /// When lines are joined, the merged line keeps the first line's status
    /// if any of the first line's text survives, otherwise the status of the
    /// line that supplies the remaining text.
    pub fn delete(&mut self, a: Position, b: Position) {
        let (start, end) = {
            let (a, b) = (self.clamp(a), self.clamp(b));
            if a <= b { (a, b) } else { (b, a) }
        };
        if start == end {
            return;
        }

        let (si, ei) = (start.line - 1, end.line - 1);

        if si == ei {
            let line = &mut self.lines[si];
            let from = byte_offset(&line.text, start.column);
            let to = byte_offset(&line.text, end.column);
            line.text.replace_range(from..to, "");
            return;
        }

        let last = &self.lines[ei];
        let tail = last.text[byte_offset(&last.text, end.column)..].to_string();
        let tail_status = last.status;

        let first = &mut self.lines[si];
        first.text.truncate(byte_offset(&first.text, start.column));
        if first.text.is_empty() && !tail.is_empty() {
            first.status = tail_status;
        }
        first.text.push_str(&tail);

        self.lines.drain(si + 1..=ei);
    }

    fn get(&self, line: usize) -> Option<&Line> {
        line.checked_sub(1).and_then(|idx| self.lines.get(idx))
    }
}

/// Byte offset of character `column`, or the end of `s`
fn byte_offset(s: &str, column: usize) -> usize {
    s.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(s.len())
}
