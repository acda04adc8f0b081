//! Editor Session
//!
//! In-memory note text plus per-line status tags, with an explicit method
//! contract in place of a toolkit text widget:
//! - apply or clear a status on a line range
//! - resolve the target range from the selection or the cursor
//! - collect the sparse status map for saving
//! - replace content on import, load a persisted document on startup

pub mod buffer;
pub mod position;

pub use buffer::LineBuffer;
pub use position::{LineRange, Position, Selection};

use crate::document::{Document, LineStatuses};
use crate::status::StatusKey;

/// The live editing state of the pad
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    buffer: LineBuffer,
    cursor: Position,
    selection: Option<Selection>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session holding `text` with no statuses
    pub fn with_text(text: &str) -> Self {
        let mut session = Self::new();
        session.replace_content(text);
        session
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.buffer.line(line)
    }

    pub fn status(&self, line: usize) -> Option<StatusKey> {
        self.buffer.status(line)
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Active, non-empty selection
    pub fn selection(&self) -> Option<Selection> {
        self.selection.filter(|s| !s.is_empty())
    }

    /// Move the insertion cursor, dropping any selection
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.buffer.clamp(pos);
        self.selection = None;
    }

    /// Select from `anchor` to `head`; the cursor follows `head`
    pub fn select(&mut self, anchor: Position, head: Position) {
        let anchor = self.buffer.clamp(anchor);
        let head = self.buffer.clamp(head);
        self.selection = Some(Selection { anchor, head });
        self.cursor = head;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Lines a status action applies to: every line the selection touches,
    /// or the cursor's line when nothing is selected
    pub fn target_lines(&self) -> LineRange {
        match self.selection() {
            Some(selection) => selection.lines(),
            None => LineRange::single(self.cursor.line),
        }
    }

    /// Give every line in `range` exactly `status`, replacing what was there
    pub fn set_line_status(&mut self, range: LineRange, status: StatusKey) {
        for line in self.existing_lines(range) {
            self.buffer.set_status(line, Some(status));
        }
    }

    /// Remove the status from every line in `range`
    pub fn clear_line_status(&mut self, range: LineRange) {
        for line in self.existing_lines(range) {
            self.buffer.set_status(line, None);
        }
    }

    /// Apply `status` to the target lines and return them
    pub fn apply_status(&mut self, status: StatusKey) -> LineRange {
        let range = self.target_lines();
        self.set_line_status(range, status);
        range
    }

    /// Clear the target lines and return them
    pub fn clear_status(&mut self) -> LineRange {
        let range = self.target_lines();
        self.clear_line_status(range);
        range
    }

    /// Sparse line to status map read from the live buffer
    pub fn collect_line_statuses(&self) -> LineStatuses {
        self.buffer.statuses()
    }

    /// Replace all text and drop every status
    pub fn replace_content(&mut self, text: &str) {
        self.buffer = LineBuffer::from_text(text);
        self.cursor = Position::START;
        self.selection = None;
    }

    /// Show a persisted document, dropping statuses for lines it no longer has
    pub fn load_document(&mut self, document: &Document) {
        self.replace_content(&document.text);

        let mut dropped = 0;
        for (&line, &status) in &document.line_status {
            if !self.buffer.set_status(line, Some(status)) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!(
                "Dropped {} line statuses beyond line {}",
                dropped,
                self.line_count()
            );
        }
    }

    /// Type `text` at the cursor, replacing the selection if there is one
    pub fn insert_at_cursor(&mut self, text: &str) {
        if let Some(selection) = self.selection() {
            let (start, end) = selection.ordered();
            self.buffer.delete(start, end);
            self.cursor = start;
        }
        self.cursor = self.buffer.insert(self.cursor, text);
        self.selection = None;
    }

    /// Insert `text` at `pos`; the cursor moves past it
    pub fn insert(&mut self, pos: Position, text: &str) {
        self.cursor = self.buffer.insert(pos, text);
        self.selection = None;
    }

    /// Delete between two positions; the cursor moves to the earlier one
    pub fn delete(&mut self, a: Position, b: Position) {
        let start = self.buffer.clamp(a.min(b));
        self.buffer.delete(a, b);
        self.cursor = self.buffer.clamp(start);
        self.selection = None;
    }

    /// Delete the selected text; `false` when nothing is selected
    pub fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some(selection) => {
                let (start, end) = selection.ordered();
                self.delete(start, end);
                true
            }
            None => false,
        }
    }

    fn existing_lines(&self, range: LineRange) -> std::ops::RangeInclusive<usize> {
        range.first.max(1)..=range.last.min(self.line_count())
    }
}
