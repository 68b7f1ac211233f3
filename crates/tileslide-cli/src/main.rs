//! Command-line front end for the tileslide puzzle.
//!
//! # Usage
//!
//! Solve a board given on the command line:
//!
//! ```sh
//! tileslide solve "1,2,3,4,5,6,7,0,8"
//! ```
//!
//! Solve a seeded 4×4 scramble with breadth-first search and print every step:
//!
//! ```sh
//! tileslide solve --size 4 --shuffle 30 --seed "daily" --algorithm bfs --replay
//! ```
//!
//! Check a hand-written board, or play interactively:
//!
//! ```sh
//! tileslide check "2,1,3,4,5,6,7,8,0"
//! tileslide play --size 3
//! ```
//!
//! Set `RUST_LOG=debug` to follow search progress.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::{
    commands::{CheckArgs, GenerateArgs, SolveArgs},
    play::PlayArgs,
};

mod commands;
mod error;
mod options;
mod play;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for a solution of a board.
    Solve(SolveArgs),
    /// Generate a scrambled board.
    Generate(GenerateArgs),
    /// Report problems with a board.
    Check(CheckArgs),
    /// Play a board interactively on standard input.
    Play(PlayArgs),
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Solve(args) => commands::solve(&args),
        Command::Generate(args) => commands::generate(&args),
        Command::Check(args) => commands::check(&args),
        Command::Play(args) => play::run(&args),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
