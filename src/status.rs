//! Line status markers.
//!
//! A line carries at most one status. The set is closed: there are no
//! user-defined statuses.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Progress state of a todo line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKey {
    /// Done
    Green,
    /// Due soon
    Yellow,
    /// Overdue
    Red,
    /// In progress
    Blue,
}

impl StatusKey {
    /// Every status, in toolbar order
    pub const ALL: [StatusKey; 4] = [
        StatusKey::Green,
        StatusKey::Yellow,
        StatusKey::Red,
        StatusKey::Blue,
    ];

    /// Key used in the persisted `styles` map
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKey::Green => "green",
            StatusKey::Yellow => "yellow",
            StatusKey::Red => "red",
            StatusKey::Blue => "blue",
        }
    }

    /// Background color painted behind a line with this status
    pub fn color(self) -> &'static str {
        match self {
            StatusKey::Green => "#d1f2d1",
            StatusKey::Yellow => "#fff3cd",
            StatusKey::Red => "#f8d7da",
            StatusKey::Blue => "#d1ecf1",
        }
    }

    /// Human readable label shown in menus and the status bar
    pub fn label(self) -> &'static str {
        match self {
            StatusKey::Green => "Done",
            StatusKey::Yellow => "Due soon",
            StatusKey::Red => "Overdue",
            StatusKey::Blue => "In progress",
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        StatusKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown status '{}'", s))
    }
}
