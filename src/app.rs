//! Application controller.
//!
//! Owns the store, the editor session and the settings, and implements every
//! user-facing control against a [`View`], the toolkit side of the pad.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::controls::Action;
use crate::session::EditorSession;
use crate::settings::{is_valid_color, resolve_font, FontCatalog, FontChoice, Settings, WindowGeometry};
use crate::status::StatusKey;
use crate::store::{import_text, StateStore};

/// What the pad needs from a window toolkit
pub trait View: FontCatalog {
    fn set_background(&mut self, color: &str);
    fn set_topmost(&mut self, topmost: bool);
    fn set_font(&mut self, font: &FontChoice);
    fn set_geometry(&mut self, geometry: WindowGeometry);
    /// Current window geometry, captured at save time
    fn geometry(&self) -> WindowGeometry;
    /// Status bar message
    fn show_status(&mut self, message: &str);
    /// Blocking error notification
    fn notify_error(&mut self, title: &str, message: &str);
    /// Modal file dialog; `None` when cancelled
    fn pick_import_file(&mut self) -> Option<PathBuf>;
    /// Modal color picker seeded with `current`; `None` when cancelled
    fn pick_color(&mut self, current: &str) -> Option<String>;
}

pub struct App<V: View> {
    store: StateStore,
    session: EditorSession,
    settings: Settings,
    view: V,
    last_saved: Option<String>,
}

impl<V: View> App<V> {
    /// Load the configured state file and bring the view up to date
    pub fn start(config: &Config, view: V) -> Self {
        Self::with_store(StateStore::new(&config.state_file), view)
    }

    pub fn with_store(store: StateStore, mut view: V) -> Self {
        let document = store.load();
        let settings = document.settings.clone();

        let font = resolve_font(&settings, &view);
        view.set_font(&font);
        view.set_background(&settings.bg_color);
        view.set_topmost(settings.topmost);
        view.set_geometry(settings.geometry());

        let mut session = EditorSession::new();
        session.load_document(&document);

        view.show_status("Loaded");

        Self {
            store,
            session,
            settings,
            view,
            last_saved: None,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Local time (`HH:MM:SS`) of the last successful save
    pub fn last_saved(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    /// Run a toolbar, menu or shortcut action. Failures have already been
    /// reported to the user by the time this returns.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("Dispatching {:?}", action);
        match action {
            Action::SetStatus(status) => self.apply_status(status),
            Action::ClearStatus => self.clear_status(),
            Action::Save => {
                let _ = self.save();
            }
            Action::Import => {
                let _ = self.import();
            }
            Action::PickBackground => self.pick_background(),
            Action::ToggleTopmost => self.toggle_topmost(),
        }
    }

    /// Mark the selected lines (or the cursor line) with `status`
    pub fn apply_status(&mut self, status: StatusKey) {
        let range = self.session.apply_status(status);
        log::debug!("Marked {} as {}", range, status);
        self.view
            .show_status(&format!("Marked as {}", status.label()));
    }

    /// Remove statuses from the selected lines (or the cursor line)
    pub fn clear_status(&mut self) {
        let range = self.session.clear_status();
        log::debug!("Cleared {}", range);
        self.view.show_status("Cleared line status");
    }

    /// Persist text, statuses and settings, including the current window geometry
    pub fn save(&mut self) -> Result<()> {
        self.settings.set_geometry(self.view.geometry().clamped());

        let text = self.session.text();
        let styles = self.session.collect_line_statuses();

        match self.store.save(&text, &styles, &self.settings) {
            Ok(()) => {
                let now = chrono::Local::now().format("%H:%M:%S").to_string();
                self.view.show_status(&format!("Saved ({})", now));
                self.last_saved = Some(now);
                Ok(())
            }
            Err(e) => {
                log::error!("Save failed: {:#}", e);
                self.view.notify_error("Save failed", &format!("{:#}", e));
                Err(e)
            }
        }
    }

    /// Timer-driven save; identical to an explicit save
    pub fn autosave(&mut self) -> Result<()> {
        log::trace!("Autosave");
        self.save()
    }

    /// Ask the view for a file and import it. Cancelling the dialog is not an error.
    pub fn import(&mut self) -> Result<()> {
        match self.view.pick_import_file() {
            Some(path) => self.import_file(&path),
            None => Ok(()),
        }
    }

    /// Replace the note with the contents of `path`, clearing every status.
    /// Settings are untouched; on failure the note is left as it was.
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        match import_text(path) {
            Ok(text) => {
                self.session.replace_content(&text);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                log::info!("Imported {}", path.display());
                self.view.show_status(&format!("Imported {}", name));
                Ok(())
            }
            Err(e) => {
                log::warn!("Import failed: {:#}", e);
                self.view.notify_error("Import failed", &format!("{:#}", e));
                Err(e)
            }
        }
    }

    /// Let the user pick a new background color
    pub fn pick_background(&mut self) {
        if let Some(color) = self.view.pick_color(&self.settings.bg_color) {
            let _ = self.set_background(&color);
        }
    }

    pub fn set_background(&mut self, color: &str) -> Result<()> {
        if !is_valid_color(color) {
            self.view.show_status(&format!("Invalid color: {}", color));
            return Err(anyhow!("invalid color '{}', expected #rrggbb", color));
        }

        self.settings.bg_color = color.to_string();
        self.view.set_background(color);
        self.view
            .show_status(&format!("Background updated: {}", color));
        Ok(())
    }

    pub fn toggle_topmost(&mut self) {
        self.set_topmost(!self.settings.topmost);
    }

    pub fn set_topmost(&mut self, topmost: bool) {
        self.settings.topmost = topmost;
        self.view.set_topmost(topmost);
        self.view
            .show_status(if topmost { "Pinned on top" } else { "Unpinned" });
    }

    /// Save before the window goes away. On error the caller should keep
    /// the window open rather than lose the session.
    pub fn close(&mut self) -> Result<()> {
        log::info!("Closing, saving to {}", self.store.path().display());
        self.save()
    }
}
