//! Terminal implementation of the pad's [`View`].
//!
//! Dialogs cannot block on stdin while the event loop owns it, so their
//! answers are queued by the command that opens them.

use std::io::Write;
use std::path::PathBuf;

use crate::app::View;
use crate::controls;
use crate::session::EditorSession;
use crate::settings::{FontCatalog, FontChoice, Settings, WindowGeometry};

use super::command::USAGE;

pub struct TerminalView<W: Write> {
    out: W,
    geometry: WindowGeometry,
    background: String,
    topmost: bool,
    font: Option<FontChoice>,
    status: String,
    queued_import: Option<PathBuf>,
    queued_color: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            geometry: Settings::default().geometry(),
            background: Settings::default().bg_color,
            topmost: false,
            font: None,
            status: "Ready".to_string(),
            queued_import: None,
            queued_color: None,
        }
    }

    /// Answer for the next file dialog
    pub fn queue_import(&mut self, path: PathBuf) {
        self.queued_import = Some(path);
    }

    /// Answer for the next color picker
    pub fn queue_color(&mut self, color: String) {
        self.queued_color = Some(color);
    }

    /// The pad as text: a header with the window state, then one numbered
    /// line per buffer line
    pub fn render(&self, session: &EditorSession) -> String {
        let font = match &self.font {
            Some(FontChoice {
                family: Some(family),
                size,
            }) => format!("{} {}", family, size),
            Some(FontChoice { family: None, size }) => format!("default {}", size),
            None => "default".to_string(),
        };
        let mut screen = format!(
            "[{}] bg {} | topmost {} | font {} | cursor {} | {}",
            self.geometry,
            self.background,
            if self.topmost { "on" } else { "off" },
            font,
            session.cursor(),
            self.status
        );

        let width = session.line_count().to_string().len();
        for number in 1..=session.line_count() {
            let marker = session
                .status(number)
                .map(|status| status.as_str())
                .unwrap_or("");
            let text = session.line(number).unwrap_or_default();
            screen.push_str(&format!("\n{:>width$} {:<6} | {}", number, marker, text));
        }

        screen
    }

    pub fn print(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FontCatalog for TerminalView<W> {
    /// The terminal renders with its own font
    fn has_family(&self, _family: &str) -> bool {
        false
    }
}

impl<W: Write> View for TerminalView<W> {
    fn set_background(&mut self, color: &str) {
        self.background = color.to_string();
    }

    fn set_topmost(&mut self, topmost: bool) {
        self.topmost = topmost;
    }

    fn set_font(&mut self, font: &FontChoice) {
        self.font = Some(font.clone());
    }

    fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.geometry = geometry.clamped();
    }

    fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    fn show_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.print(&format!("-- {}", message));
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        self.print(&format!("!! {}: {}", title, message));
    }

    fn pick_import_file(&mut self) -> Option<PathBuf> {
        let path = self.queued_import.take();
        if path.is_none() {
            self.print("-- usage: import <path>");
        }
        path
    }

    fn pick_color(&mut self, current: &str) -> Option<String> {
        let color = self.queued_color.take();
        if color.is_none() {
            self.print(&format!("-- current background {}, usage: bg <#rrggbb>", current));
        }
        color
    }
}

/// Controls with their shortcuts, followed by the command reference
pub fn help() -> String {
    let mut text = String::from("Toolbar:\n");
    for control in controls::toolbar() {
        let shortcut = controls::shortcut_for(control.action).unwrap_or("");
        text.push_str(&format!("  {:<12} {}\n", control.label, shortcut));
    }
    text.push_str(USAGE);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKey;

    #[test]
    fn renders_markers_next_to_lines() {
        let mut session = EditorSession::with_text("buy milk\nwalk dog");
        session.set_cursor(crate::session::Position::new(2, 0));
        session.apply_status(StatusKey::Red);

        let mut view = TerminalView::new(Vec::new());
        view.set_topmost(true);
        view.set_font(&FontChoice {
            family: None,
            size: 11,
        });
        view.show_status("Marked as Overdue");

        let screen = view.render(&session);
        let lines: Vec<&str> = screen.lines().collect();

        assert_eq!(
            lines[0],
            "[420x520] bg #fdf6e3 | topmost on | font default 11 | cursor 2:0 | Marked as Overdue"
        );
        assert_eq!(lines[1], "1        | buy milk");
        assert_eq!(lines[2], "2 red    | walk dog");
    }

    #[test]
    fn dialogs_consume_queued_answers() {
        let mut view = TerminalView::new(Vec::new());
        assert_eq!(view.pick_import_file(), None);

        view.queue_import(PathBuf::from("todo.txt"));
        assert_eq!(view.pick_import_file(), Some(PathBuf::from("todo.txt")));
        assert_eq!(view.pick_import_file(), None);

        view.queue_color("#123456".to_string());
        assert_eq!(view.pick_color("#fdf6e3").as_deref(), Some("#123456"));

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.contains("usage: import <path>"));
    }

    #[test]
    fn help_lists_shortcuts() {
        let text = help();
        assert!(text.contains("Ctrl+1"));
        assert!(text.contains("quit"));
    }
}
