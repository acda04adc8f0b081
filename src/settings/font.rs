//! Font resolution with fallback to the toolkit default.

use super::Settings;

/// Font families the front end can actually render
pub trait FontCatalog {
    fn has_family(&self, family: &str) -> bool;
}

/// The font a front end should use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontChoice {
    /// `None` means the toolkit default family
    pub family: Option<String>,
    pub size: u32,
}

/// Pick the configured family if the catalog knows it, else the toolkit default.
pub fn resolve_font(settings: &Settings, catalog: &dyn FontCatalog) -> FontChoice {
    let wanted = settings.font_family.trim();

    let family = if wanted.is_empty() {
        None
    } else if catalog.has_family(wanted) {
        Some(wanted.to_string())
    } else {
        log::info!("Font family '{}' unavailable, using default font", wanted);
        None
    };

    FontChoice {
        family,
        size: settings.font_size,
    }
}
