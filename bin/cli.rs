use crate::{io::Io, session::Session};
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::game::Game;
use std::{cmp::min, io::stderr, io::stdin, io::stdout};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Command line interface.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level.
    #[clap(short, long)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    /// The starting position in FEN.
    #[clap(short, long)]
    fen: Option<String>,
}

impl Cli {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let filter = Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib", self.verbosity)
            .with_default(min(Level::WARN, self.verbosity));

        let writer = layer()
            .pretty()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();

        let game = match self.fen {
            None => Game::default(),
            Some(fen) => fen.parse().context("invalid starting position")?,
        };

        let io = Io::new(stdout(), stdin());
        Session::new(game, io).run()
    }
}
