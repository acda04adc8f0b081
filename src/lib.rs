//! Sticky Todo
//!
//! A floating todo pad whose lines carry color-coded status markers.
//!
//! This library provides:
//! - The persisted document and its JSON state store
//! - An editor session with per-line statuses anchored to line text
//! - Settings with key-by-key defaults, window geometry and font fallback
//! - The application controller, its controls and the autosave timer
//! - A terminal front end driving all of the above

pub mod app;
pub mod autosave;
pub mod config;
pub mod controls;
pub mod document;
pub mod session;
pub mod settings;
pub mod status;
pub mod store;
pub mod terminal;

// Re-exports for clean public API
pub use app::{App, View};
pub use config::Config;
pub use document::{Document, LineStatuses};
pub use session::{EditorSession, LineRange, Position};
pub use settings::Settings;
pub use status::StatusKey;
pub use store::StateStore;
