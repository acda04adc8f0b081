//! Commands accepted by the terminal front end, one per input line.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::controls::Action;
use crate::session::Position;
use crate::settings::WindowGeometry;
use crate::status::StatusKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Help,
    /// Type text at the cursor
    Type(String),
    Newline,
    Goto(Position),
    Select(Position, Position),
    Deselect,
    Delete(Position, Position),
    DeleteSelection,
    Action(Action),
    /// Import a file, answering the file dialog up front
    Import(PathBuf),
    /// Change the background, answering the color picker up front
    Background(String),
    Geometry(WindowGeometry),
    Key(String),
    Quit,
}

pub const USAGE: &str = "\
Editing:
  show                      print the pad
  type <text>               type text at the cursor
  newline                   break the line at the cursor
  goto <line>[:<col>]       move the cursor
  select <pos> <pos>        select text, e.g. select 1:0 3:2
  deselect                  drop the selection
  delete [<pos> <pos>]      delete text between two positions or the selection
Controls:
  green|yellow|red|blue     mark the selected lines or the cursor line
  clear                     clear their status
  save                      save now
  import [<path>]           replace the note with a text file
  bg [<#rrggbb>]            change the background color
  topmost                   toggle always-on-top
  geometry <WxH[+X+Y]>      resize or move the window
  key <shortcut>            press a shortcut, e.g. key ctrl+1
  quit                      save and exit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };
        let args = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "type" => Command::Type(rest.to_string()),
            "newline" => Command::Newline,
            "goto" => Command::Goto(one_position(args)?),
            "select" => {
                let (a, b) = two_positions(args)?;
                Command::Select(a, b)
            }
            "deselect" => Command::Deselect,
            "delete" if args.is_empty() => Command::DeleteSelection,
            "delete" => {
                let (a, b) = two_positions(args)?;
                Command::Delete(a, b)
            }
            "clear" => Command::Action(Action::ClearStatus),
            "save" => Command::Action(Action::Save),
            "topmost" => Command::Action(Action::ToggleTopmost),
            "import" if args.is_empty() => Command::Action(Action::Import),
            "import" => Command::Import(PathBuf::from(args)),
            "bg" if args.is_empty() => Command::Action(Action::PickBackground),
            "bg" => Command::Background(args.to_string()),
            "geometry" => Command::Geometry(args.parse()?),
            "key" if args.is_empty() => bail!("usage: key <shortcut>"),
            "key" => Command::Key(args.to_string()),
            "quit" | "exit" => Command::Quit,
            "" => bail!("empty command"),
            other => match other.parse::<StatusKey>() {
                Ok(status) => Command::Action(Action::SetStatus(status)),
                Err(_) => bail!("unknown command '{}', try 'help'", other),
            },
        };

        Ok(command)
    }
}

fn one_position(args: &str) -> Result<Position> {
    if args.is_empty() {
        bail!("expected a position like 3 or 3:5");
    }
    args.parse()
}

fn two_positions(args: &str) -> Result<(Position, Position)> {
    let mut parts = args.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(anyhow!("expected two positions, e.g. 1:0 2:4"));
    };
    let a = a.parse().context("first position")?;
    let b = b.parse().context("second position")?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_words() {
        assert_eq!(
            "red".parse::<Command>().unwrap(),
            Command::Action(Action::SetStatus(StatusKey::Red))
        );
        assert_eq!(
            "Green".parse::<Command>().unwrap(),
            Command::Action(Action::SetStatus(StatusKey::Green))
        );
        assert_eq!(
            "clear".parse::<Command>().unwrap(),
            Command::Action(Action::ClearStatus)
        );
    }

    #[test]
    fn type_keeps_inner_spacing() {
        assert_eq!(
            "type  two  spaces".parse::<Command>().unwrap(),
            Command::Type(" two  spaces".to_string())
        );
    }

    #[test]
    fn parses_positions_and_geometry() {
        assert_eq!(
            "select 1:2 3".parse::<Command>().unwrap(),
            Command::Select(Position::new(1, 2), Position::new(3, 0))
        );
        assert_eq!(
            "goto 4:1".parse::<Command>().unwrap(),
            Command::Goto(Position::new(4, 1))
        );
        assert!("select 1".parse::<Command>().is_err());
        assert!("goto".parse::<Command>().is_err());
        assert_eq!(
            "delete".parse::<Command>().unwrap(),
            Command::DeleteSelection
        );

        let Command::Geometry(geo) = "geometry 500x400+10+20".parse::<Command>().unwrap() else {
            panic!("expected geometry");
        };
        assert_eq!(geo.position(), Some((10, 20)));
    }

    #[test]
    fn dialogs_without_arguments_open_the_dialog() {
        assert_eq!(
            "import".parse::<Command>().unwrap(),
            Command::Action(Action::Import)
        );
        assert_eq!(
            "import notes/todo.txt".parse::<Command>().unwrap(),
            Command::Import(PathBuf::from("notes/todo.txt"))
        );
        assert_eq!(
            "bg #000000".parse::<Command>().unwrap(),
            Command::Background("#000000".to_string())
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!("fly".parse::<Command>().is_err());
        assert!("   ".parse::<Command>().is_err());
        assert!("key".parse::<Command>().is_err());
    }
}
