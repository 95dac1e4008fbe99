use anyhow::Error as Anyhow;
use clap::Parser;

mod cli;
mod io;
mod session;

fn main() -> Result<(), Anyhow> {
    cli::Cli::parse().execute()
}
