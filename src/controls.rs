//! User-facing controls: the actions and the affordances that trigger them.
//!
//! The same actions are reachable from the toolbar, the context menu and
//! keyboard shortcuts; front ends render these tables however they like.

use std::fmt;

use crate::status::StatusKey;

/// Something the user can ask the pad to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetStatus(StatusKey),
    ClearStatus,
    Save,
    Import,
    PickBackground,
    ToggleTopmost,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetStatus(status) => write!(f, "Mark as {}", status.label()),
            Action::ClearStatus => f.write_str("Clear line status"),
            Action::Save => f.write_str("Save"),
            Action::Import => f.write_str("Import"),
            Action::PickBackground => f.write_str("Background"),
            Action::ToggleTopmost => f.write_str("Topmost"),
        }
    }
}

/// A labelled entry in the toolbar or context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub action: Action,
}

impl Control {
    fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Keyboard shortcuts, as written in menus
pub const SHORTCUTS: &[(&str, Action)] = &[
    ("Ctrl+S", Action::Save),
    ("Ctrl+O", Action::Import),
    ("F2", Action::ToggleTopmost),
    ("Ctrl+1", Action::SetStatus(StatusKey::Green)),
    ("Ctrl+2", Action::SetStatus(StatusKey::Yellow)),
    ("Ctrl+3", Action::SetStatus(StatusKey::Red)),
    ("Ctrl+4", Action::SetStatus(StatusKey::Blue)),
    ("Ctrl+0", Action::ClearStatus),
    ("Ctrl+,", Action::PickBackground),
];

/// Toolbar buttons: status buttons on the left, the rest on the right
pub fn toolbar() -> Vec<Control> {
    let mut controls: Vec<Control> = StatusKey::ALL
        .into_iter()
        .map(|status| Control::new(status.label(), Action::SetStatus(status)))
        .collect();
    controls.push(Control::new("Clear", Action::ClearStatus));
    controls.push(Control::new("Topmost", Action::ToggleTopmost));
    controls.push(Control::new("Background", Action::PickBackground));
    controls.push(Control::new("Import", Action::Import));
    controls.push(Control::new("Save", Action::Save));
    controls
}

/// Status entries of the editor's context menu
pub fn context_menu() -> Vec<Control> {
    StatusKey::ALL
        .into_iter()
        .map(Action::SetStatus)
        .chain(std::iter::once(Action::ClearStatus))
        .map(|action| Control::new(action.to_string(), action))
        .collect()
}

/// Look up the action bound to a key combination such as `ctrl+1`
pub fn action_for_shortcut(keys: &str) -> Option<Action> {
    let wanted = normalize_keys(keys);
    SHORTCUTS
        .iter()
        .find(|(binding, _)| normalize_keys(binding) == wanted)
        .map(|(_, action)| *action)
}

/// Shortcut bound to `action`, for display next to menu entries
pub fn shortcut_for(action: Action) -> Option<&'static str> {
    SHORTCUTS
        .iter()
        .find(|(_, bound)| *bound == action)
        .map(|(binding, _)| *binding)
}

fn normalize_keys(keys: &str) -> String {
    keys.split('+')
        .map(|part| match part.trim().to_ascii_lowercase().as_str() {
            "control" => "ctrl".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("+")
}
