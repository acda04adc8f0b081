//! Terminal front end.
//!
//! A single-threaded event loop multiplexing three sources on one task:
//! commands read from stdin, the autosave timer and Ctrl-C. Because nothing
//! runs concurrently, a save can never interleave with an edit.

pub mod command;
pub mod view;

use std::future::Future;
use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::app::{App, View};
use crate::autosave::Autosave;
use crate::config::Config;
use crate::controls::{self, Action};

pub use command::Command;
pub use view::TerminalView;

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the pad on stdin/stdout until `quit`, end of input or Ctrl-C
pub async fn run(config: &Config) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_with(config, input, std::io::stdout(), shutdown).await
}

/// Event loop over arbitrary input and output, used by [`run`] and tests
pub async fn run_with<R, W, S>(config: &Config, input: R, output: W, shutdown: S) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let mut app = App::start(config, TerminalView::new(output));
    let mut autosave = Autosave::new(app.settings().autosave_interval());
    if !autosave.is_enabled() {
        log::info!("Autosave disabled");
    }

    let mut lines = input.split(b'\n');
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            segment = lines.next_segment() => match segment {
                Ok(Some(bytes)) => match String::from_utf8(bytes) {
                    Ok(line) => {
                        if execute_line(&mut app, &line) == Flow::Quit {
                            if app.close().is_ok() {
                                return Ok(());
                            }
                            app.view_mut()
                                .print("-- not saved; fix the problem and quit again");
                        }
                    }
                    Err(_) => {
                        log::warn!("Skipping input line that is not valid UTF-8");
                        app.view_mut()
                            .print("-- skipped a line that is not valid UTF-8");
                    }
                },
                Ok(None) => {
                    log::info!("Input closed");
                    return app.close();
                }
                Err(e) => {
                    let _ = app.close();
                    return Err(e).context("Failed to read command");
                }
            },
            _ = autosave.tick() => {
                let _ = app.autosave();
            }
            _ = &mut shutdown => {
                log::info!("Interrupted");
                return app.close();
            }
        }
    }
}

/// Parse and run one input line
pub fn execute_line<W: Write>(app: &mut App<TerminalView<W>>, line: &str) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    match line.parse::<Command>() {
        Ok(command) => execute(app, command),
        Err(e) => {
            app.view_mut().print(&format!("-- {:#}", e));
            Flow::Continue
        }
    }
}

/// Run one parsed command against the app
pub fn execute<W: Write>(app: &mut App<TerminalView<W>>, command: Command) -> Flow {
    match command {
        Command::Show => {
            let screen = app.view().render(app.session());
            app.view_mut().print(&screen);
        }
        Command::Help => app.view_mut().print(&view::help()),
        Command::Type(text) => app.session_mut().insert_at_cursor(&text),
        Command::Newline => app.session_mut().insert_at_cursor("\n"),
        Command::Goto(pos) => app.session_mut().set_cursor(pos),
        Command::Select(anchor, head) => app.session_mut().select(anchor, head),
        Command::Deselect => app.session_mut().clear_selection(),
        Command::Delete(a, b) => app.session_mut().delete(a, b),
        Command::DeleteSelection => {
            if !app.session_mut().delete_selection() {
                app.view_mut().print("-- nothing selected");
            }
        }
        Command::Action(action) => app.dispatch(action),
        Command::Import(path) => {
            app.view_mut().queue_import(path);
            app.dispatch(Action::Import);
        }
        Command::Background(color) => {
            app.view_mut().queue_color(color);
            app.dispatch(Action::PickBackground);
        }
        Command::Geometry(geometry) => app.view_mut().set_geometry(geometry),
        Command::Key(keys) => match controls::action_for_shortcut(&keys) {
            Some(action) => app.dispatch(action),
            None => app
                .view_mut()
                .print(&format!("-- no action bound to {}", keys)),
        },
        Command::Quit => return Flow::Quit,
    }

    Flow::Continue
}
