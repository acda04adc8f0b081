//! Persisted appearance and window settings.
//!
//! Handles:
//! - Defaults used on first run or when the state file is corrupt
//! - Layering a partial settings object over the defaults key by key
//! - Background color validation
//! - Window geometry and font resolution (see submodules)

pub mod font;
pub mod geometry;

use std::time::Duration;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use font::{resolve_font, FontCatalog, FontChoice};
pub use geometry::WindowGeometry;

/// Default background (a warm off-white)
pub const DEFAULT_BG_COLOR: &str = "#fdf6e3";

const COLOR_PATTERN: &str = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

/// Appearance and window settings stored under `settings` in the state file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bg_color: String,
    pub topmost: bool,
    pub width: u32,
    pub height: u32,
    /// Window position; `None` lets the window manager place the window
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub font_family: String,
    pub font_size: u32,
    /// Autosave period in seconds; zero or negative disables autosave
    pub auto_save_sec: i64,
    /// Keys this version does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bg_color: DEFAULT_BG_COLOR.to_string(),
            topmost: true,
            width: 420,
            height: 520,
            x: None,
            y: None,
            font_family: "Microsoft YaHei".to_string(),
            font_size: 11,
            auto_save_sec: 60,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Layer whatever settings object was persisted over the defaults.
    ///
    /// Each known key is taken from `value` when it has the right type and
    /// keeps its default otherwise. Anything that is not a JSON object yields
    /// plain defaults.
    pub fn layered(value: Option<&Value>) -> Self {
        let mut settings = Settings::default();

        let map = match value {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => return settings,
            Some(other) => {
                log::warn!("Ignoring settings that are not an object: {}", other);
                return settings;
            }
        };

        for (key, value) in map {
            match key.as_str() {
                "bg_color" => {
                    let mut color = String::new();
                    if assign(&mut color, key, value) {
                        if is_valid_color(&color) {
                            settings.bg_color = color;
                        } else {
                            log::warn!("Ignoring invalid settings.bg_color '{}'", color);
                        }
                    }
                }
                "topmost" => {
                    assign(&mut settings.topmost, key, value);
                }
                "width" => {
                    assign(&mut settings.width, key, value);
                }
                "height" => {
                    assign(&mut settings.height, key, value);
                }
                "x" => {
                    assign(&mut settings.x, key, value);
                }
                "y" => {
                    assign(&mut settings.y, key, value);
                }
                "font_family" => {
                    assign(&mut settings.font_family, key, value);
                }
                "font_size" => {
                    assign(&mut settings.font_size, key, value);
                }
                "auto_save_sec" => {
                    assign(&mut settings.auto_save_sec, key, value);
                }
                _ => {
                    settings.extra.insert(key.clone(), value.clone());
                }
            }
        }

        settings
    }

    /// Autosave period, or `None` when autosave is disabled
    pub fn autosave_interval(&self) -> Option<Duration> {
        u64::try_from(self.auto_save_sec)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Window geometry described by these settings
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry::from_settings(self)
    }

    /// Record a window geometry, typically the one captured at save time
    pub fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.width = geometry.width;
        self.height = geometry.height;
        self.x = geometry.x;
        self.y = geometry.y;
    }
}

/// Deserialize `value` into `slot`, keeping the current value on a type mismatch
fn assign<T: DeserializeOwned>(slot: &mut T, key: &str, value: &Value) -> bool {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(e) => {
            log::warn!("Ignoring settings.{} = {}: {}", key, value, e);
            false
        }
    }
}

/// Check that a color is a `#rgb` or `#rrggbb` hex string
pub fn is_valid_color(color: &str) -> bool {
    Regex::new(COLOR_PATTERN)
        .map(|re| re.is_match(color))
        .unwrap_or(false)
}
