//! Line-oriented command shell.

use std::io::Write;
use std::str::FromStr;

use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;

use crate::app::App;
use crate::app::Flow;
use crate::app::Screen;
use crate::error::CliError;

pub const HELP: &str = "\
Commands:
  login <username> <password>   sign in
  logout                        sign out
  whoami                        show the signed-in user
  dashboard | holdings | orders open a screen
  go <route>                    open a screen by route, e.g. /orders
  sort <column>                 toggle sorting on a column
  next | prev | first | last    move between pages
  page <n>                      jump to page n
  size <n>                      set rows per page
  help                          show this help
  quit                          exit";

/// Paging and sorting requests for the table on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Sort(String),
    Next,
    Previous,
    First,
    Last,
    /// One-based page number, as typed.
    Page(usize),
    Size(usize),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Show(Screen),
    Table(TableAction),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
}

fn number(arg: Option<&str>, usage: &'static str) -> Result<usize, ParseError> {
    let arg = arg.ok_or(ParseError::Usage(usage))?;
    arg.parse()
        .map_err(|_| ParseError::NotANumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "login" => match args.as_slice() {
                [username, password] => Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => return Err(ParseError::Usage("login <username> <password>")),
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "dashboard" => Command::Show(Screen::Dashboard),
            "holdings" | "assets" => Command::Show(Screen::Holdings),
            "orders" => Command::Show(Screen::Orders),
            "go" => match args.as_slice() {
                [route] => Command::Show(Screen::from_route(route)),
                _ => return Err(ParseError::Usage("go <route>")),
            },
            "sort" => match args.as_slice() {
                [column] => Command::Table(TableAction::Sort(column.to_string())),
                _ => return Err(ParseError::Usage("sort <column>")),
            },
            "next" => Command::Table(TableAction::Next),
            "prev" | "previous" => Command::Table(TableAction::Previous),
            "first" => Command::Table(TableAction::First),
            "last" => Command::Table(TableAction::Last),
            "page" => Command::Table(TableAction::Page(number(
                args.first().copied(),
                "page <n>",
            )?)),
            "size" => Command::Table(TableAction::Size(number(
                args.first().copied(),
                "size <n>",
            )?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Read commands until `quit` or end of input.
pub async fn run<I, W>(app: &mut App, input: I, out: &mut W) -> Result<(), CliError>
where
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    app.start(out).await?;

    loop {
        write!(out, "{}> ", app.screen().map_or("login", |s| s.name()))?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if app.execute(command, out).await? == Flow::Quit {
                    break;
                }
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
    Ok(())
}
