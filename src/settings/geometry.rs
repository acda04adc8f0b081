//! Window geometry in the `WxH+X+Y` form window toolkits use.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use regex::Regex;

use super::Settings;

/// Smallest window the pad can be shrunk to
pub const MIN_WIDTH: u32 = 300;
pub const MIN_HEIGHT: u32 = 260;

const GEOMETRY_PATTERN: &str = r"^(\d+)x(\d+)(?:\+(-?\d+)\+(-?\d+))?$";

/// Size and optional position of the pad window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl WindowGeometry {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            x: settings.x,
            y: settings.y,
        }
        .clamped()
    }

    /// Enforce the minimum window size
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(MIN_WIDTH),
            height: self.height.max(MIN_HEIGHT),
            ..self
        }
    }

    /// Position, only when both coordinates are known
    pub fn position(&self) -> Option<(i32, i32)> {
        self.x.zip(self.y)
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if let Some((x, y)) = self.position() {
            write!(f, "+{}+{}", x, y)?;
        }
        Ok(())
    }
}

impl FromStr for WindowGeometry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let re = Regex::new(GEOMETRY_PATTERN)?;
        let captures = re
            .captures(s.trim())
            .ok_or_else(|| anyhow!("invalid geometry '{}', expected WxH or WxH+X+Y", s))?;

        let number = |idx: usize| captures.get(idx).map(|m| m.as_str());

        let width: u32 = number(1).unwrap_or_default().parse()?;
        let height: u32 = number(2).unwrap_or_default().parse()?;
        let x = number(3).map(str::parse::<i32>).transpose()?;
        let y = number(4).map(str::parse::<i32>).transpose()?;

        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }
}
