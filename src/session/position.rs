//! Positions, selections and line ranges inside the editor buffer.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// A place in the buffer: 1-based line, 0-based character column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of `line`
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Parses `line` or `line:column`
impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (line, column) = match s.trim().split_once(':') {
            Some((line, column)) => (line, Some(column)),
            None => (s.trim(), None),
        };

        let line: usize = line
            .parse()
            .with_context(|| format!("invalid line number in '{}'", s))?;
        if line == 0 {
            return Err(anyhow!("line numbers start at 1"));
        }
        let column = column
            .map(|c| c.parse::<usize>())
            .transpose()
            .with_context(|| format!("invalid column in '{}'", s))?
            .unwrap_or(0);

        Ok(Self { line, column })
    }
}

/// Text selection; `head` is where the cursor sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Selection endpoints in document order
    pub fn ordered(&self) -> (Position, Position) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    /// Every line the selection touches, even partially
    pub fn lines(&self) -> LineRange {
        LineRange::new(self.anchor.line, self.head.line)
    }
}

/// Inclusive range of 1-based line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub first: usize,
    pub last: usize,
}

impl LineRange {
    /// Range between two lines given in any order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    pub fn single(line: usize) -> Self {
        Self {
            first: line,
            last: line,
        }
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "line {}", self.first)
        } else {
            write!(f, "lines {}-{}", self.first, self.last)
        }
    }
}
