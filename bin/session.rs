use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use derive_more::{Display, Error};
use lib::chess::{Move, ParseMoveError};
use lib::game::Game;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing::{instrument, warn};

/// A command read from the terminal.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Play(Move),
    Rewind,
    Back,
    Forward,
    End,
    Restart,
    New,
    Load(String),
    Fen,
    Board,
    Moves,
    Quit,
}

/// The reason why the command could not be parsed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "unknown command `{}`", _0)]
struct UnknownCommand(#[error(not(source))] String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (cmd, arg) = s.split_once(' ').unwrap_or((s, ""));

        match (cmd, arg.trim()) {
            ("rewind", "") => Ok(Command::Rewind),
            ("back", "") => Ok(Command::Back),
            ("forward", "") => Ok(Command::Forward),
            ("end", "") => Ok(Command::End),
            ("restart", "") => Ok(Command::Restart),
            ("new", "") => Ok(Command::New),
            ("load", fen) if !fen.is_empty() => Ok(Command::Load(fen.into())),
            ("fen", "") => Ok(Command::Fen),
            ("board", "") => Ok(Command::Board),
            ("moves", "") => Ok(Command::Moves),
            ("quit", "") => Ok(Command::Quit),
            (m, "") => m
                .parse()
                .map(Command::Play)
                .map_err(|_: ParseMoveError| UnknownCommand(s.into())),
            _ => Err(UnknownCommand(s.into())),
        }
    }
}

/// An interactive game of chess played over line oriented io.
pub struct Session<W: Write, R: Read> {
    game: Game,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    pub fn new(game: Game, io: Io<W, R>) -> Self {
        Session { game, io }
    }

    /// Processes commands until `quit` or the end of input.
    #[instrument(level = "trace", skip(self), err)]
    pub fn run(&mut self) -> Result<(), Anyhow> {
        self.io.prompt(self.game.title())?;

        while let Some(line) = self.io.recv().context("failed to read command")? {
            match line.parse() {
                Err(e) => {
                    warn!("{}", e);
                    self.io.send(e)?;
                }

                Ok(Command::Quit) => break,
                Ok(cmd) => self.execute(cmd)?,
            }

            self.io.prompt(self.game.title())?;
        }

        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> Result<(), Anyhow> {
        match cmd {
            Command::Play(m) => match self.game.play(m) {
                Err(e) => self.io.send(e)?,
                Ok(mc) if mc.is_capture() => self.io.send(format_args!("{m} captures"))?,
                Ok(_) => {}
            },

            Command::Rewind => self.game.rewind(),
            Command::Back => self.game.skip_backward(),
            Command::Forward => self.game.skip(),
            Command::End => self.game.fast_forward(),
            Command::Restart => self.game.restart(),
            Command::New => self.game.restart_with_starting_position(),

            Command::Load(fen) => {
                if let Err(e) = self.game.restart_with(&fen) {
                    warn!("ignored {:?}", e);
                    self.io.send(format_args!("invalid position: {e}"))?;
                }
            }

            Command::Fen => self.io.send(self.game.position())?,
            Command::Board => self.io.send(format_args!("{:#}", self.game.position().board()))?,

            Command::Moves => {
                for pm in self.game.possible_moves() {
                    if !pm.destinations.is_empty() {
                        let destinations: Vec<_> =
                            pm.destinations.iter().map(|sq| sq.to_string()).collect();

                        self.io.send(format_args!(
                            "{} {}: {}",
                            pm.piece,
                            pm.square,
                            destinations.join(" ")
                        ))?;
                    }
                }
            }

            Command::Quit => {}
        }

        Ok(())
    }
}
