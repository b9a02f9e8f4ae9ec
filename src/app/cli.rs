use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::library::{TrackId, TracksCursor};
use crate::notifications::NotificationKind;
use crate::store::Action;

/// tonearm - headless music player state store 🎵
#[derive(Parser, Debug)]
#[command(name = "tonearm", version, about)]
pub struct Args {
    /// JSON track list to load (overrides `library_file` in config.toml)
    #[arg(long, short = 'l')]
    pub library: Option<PathBuf>,

    /// Config file location (default: ~/.config/tonearm/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

/// One line typed on stdin.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Action),
    /// Ids are resolved against the library by the driver.
    Enqueue { ids: Vec<TrackId>, next: bool },
    Toast { kind: NotificationKind, content: String },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("{0}")]
    InvalidArgument(String),
}

pub const HELP: &str = "\
commands:
  play <id>                 play a track from the current view
  toggle | resume | pause | stop | next | prev
  shuffle | repeat          toggle shuffle, cycle repeat (off/all/one)
  seek <seconds>
  search [query]            filter the current view (no query resets)
  view library|playlist
  queue play <position> | clear | remove <offset> | add <id>.. | next <id>..
  folder add <path>.. | rm <index>
  toast <kind> <message>    kind: success, info, warning, danger
  show | help | quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let head = words.next().ok_or(CommandError::Empty)?;
    let rest: Vec<&str> = words.collect();

    let command = match head {
        "play" => Command::Dispatch(Action::SelectAndPlay {
            id: first(&rest, "track id")?.to_string(),
        }),
        "toggle" => Command::Dispatch(Action::Toggle),
        "resume" => Command::Dispatch(Action::Play),
        "pause" => Command::Dispatch(Action::Pause),
        "stop" => Command::Dispatch(Action::Stop),
        "next" => Command::Dispatch(Action::Next),
        "prev" | "previous" => Command::Dispatch(Action::Previous),
        "shuffle" => Command::Dispatch(Action::ToggleShuffle),
        "repeat" => Command::Dispatch(Action::CycleRepeat),
        "seek" => {
            let raw = first(&rest, "seconds")?;
            let seconds: f64 = raw
                .parse()
                .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
            Command::Dispatch(Action::JumpTo { seconds })
        }
        "search" => Command::Dispatch(Action::FilterSearch {
            query: rest.join(" "),
        }),
        "view" => {
            let cursor = match first(&rest, "view name")? {
                "library" => TracksCursor::Library,
                "playlist" => TracksCursor::Playlist,
                other => {
                    return Err(CommandError::InvalidArgument(format!(
                        "unknown view `{other}`"
                    )))
                }
            };
            Command::Dispatch(Action::SetTracksCursor { cursor })
        }
        "queue" => parse_queue(&rest)?,
        "folder" => parse_folder(&rest)?,
        "toast" => {
            let kind = first(&rest, "toast kind")?
                .parse::<NotificationKind>()
                .map_err(CommandError::InvalidArgument)?;
            let content = rest[1..].join(" ");
            if content.is_empty() {
                return Err(CommandError::MissingArgument("toast message"));
            }
            Command::Toast { kind, content }
        }
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn parse_queue(args: &[&str]) -> Result<Command, CommandError> {
    let action = match first(args, "queue subcommand")? {
        "play" => Action::QueuePlay {
            index: position(args.get(1))?,
        },
        "clear" => Action::QueueClear,
        "remove" | "rm" => Action::QueueRemove {
            offset: number(args.get(1), "offset")?,
        },
        "add" | "next" => {
            let ids: Vec<TrackId> = args[1..].iter().map(|s| s.to_string()).collect();
            if ids.is_empty() {
                return Err(CommandError::MissingArgument("track ids"));
            }
            return Ok(Command::Enqueue {
                ids,
                next: args[0] == "next",
            });
        }
        other => return Err(CommandError::Unknown(format!("queue {other}"))),
    };
    Ok(Command::Dispatch(action))
}

fn parse_folder(args: &[&str]) -> Result<Command, CommandError> {
    let action = match first(args, "folder subcommand")? {
        "add" => {
            let folders: Vec<PathBuf> = args[1..].iter().map(PathBuf::from).collect();
            if folders.is_empty() {
                return Err(CommandError::MissingArgument("folder path"));
            }
            Action::AddFolders {
                folders: Some(folders),
            }
        }
        "rm" | "remove" => Action::RemoveFolder {
            index: number(args.get(1), "index")?,
        },
        other => return Err(CommandError::Unknown(format!("folder {other}"))),
    };
    Ok(Command::Dispatch(action))
}

fn first<'a>(args: &[&'a str], what: &'static str) -> Result<&'a str, CommandError> {
    args.first().copied().ok_or(CommandError::MissingArgument(what))
}

fn number(arg: Option<&&str>, what: &'static str) -> Result<usize, CommandError> {
    let raw = arg.ok_or(CommandError::MissingArgument(what))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// 1-based queue position, as `show` prints it.
fn position(arg: Option<&&str>) -> Result<usize, CommandError> {
    match number(arg, "position")? {
        0 => Err(CommandError::InvalidArgument(
            "queue positions start at 1".to_string(),
        )),
        n => Ok(n - 1),
    }
}
