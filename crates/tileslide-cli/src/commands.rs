use std::process::ExitCode;

use clap::Args;
use tileslide_core::Board;
use tileslide_game::{Editor, Severity};
use tileslide_generator::{PuzzleSeed, ShuffleGenerator};
use tileslide_solver::{SearchEvent, SearchHost, SearchLimits, SearchOutcome, Strategy};

use crate::{
    error::CliError,
    options::{Algorithm, ScrambleArgs, parse_seed, print_board},
};

#[derive(Debug, Args)]
pub(crate) struct SolveArgs {
    /// Board to solve, as comma- or space-separated numbers. A scramble is
    /// generated when omitted.
    #[arg(value_name = "BOARD")]
    board: Option<Board>,

    #[command(flatten)]
    scramble: ScrambleArgs,

    /// Search algorithm.
    #[arg(long, value_enum, default_value_t)]
    algorithm: Algorithm,

    /// Explored-node cap.
    #[arg(long, value_name = "COUNT", default_value_t = SearchLimits::DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Search steps run per slice.
    #[arg(long, value_name = "COUNT", default_value_t = SearchLimits::DEFAULT_SLICE)]
    slice: usize,

    /// Print the board after every move of the solution.
    #[arg(long)]
    replay: bool,
}

pub(crate) fn solve(args: &SolveArgs) -> Result<ExitCode, CliError> {
    let board = match &args.board {
        Some(board) => board.clone(),
        None => {
            let puzzle = args.scramble.generate()?;
            println!("Seed: {}", puzzle.seed);
            puzzle.board
        }
    };
    print_board(&board);
    println!();

    let strategy = Strategy::from(args.algorithm);
    let limits = SearchLimits::default()
        .with_max_nodes(args.max_nodes)
        .with_slice(args.slice);
    let outcome = run_search(&board, strategy, limits)?;
    println!("{strategy}: {outcome}");

    let Some(solution) = outcome.solution() else {
        return Ok(ExitCode::FAILURE);
    };
    println!("Moves: {}", solution.len());
    println!("Nodes explored: {}", solution.nodes_explored());
    if !solution.is_empty() {
        println!("Solution: {solution}");
    }
    if args.replay {
        let mut current = board;
        for (i, &mv) in solution.moves().iter().enumerate() {
            current.slide(mv)?;
            println!();
            println!("{}. {}", i + 1, mv.name());
            println!("{current:#}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_search(
    board: &Board,
    strategy: Strategy,
    limits: SearchLimits,
) -> Result<SearchOutcome, CliError> {
    let mut host = SearchHost::new().with_limits(limits);
    let handle = host.start(board.clone(), strategy)?;
    log::debug!("started search {handle}");
    loop {
        match host.poll() {
            Some(SearchEvent::Progress { nodes_explored }) => {
                log::info!("search {handle}: {nodes_explored} nodes explored");
            }
            Some(SearchEvent::Finished(outcome)) => return Ok(outcome),
            None => unreachable!("search {handle} ended without a result"),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = ShuffleGenerator::STARTUP_SIZE)]
    size: u8,

    /// Random blank moves applied to the solved board. Defaults to 50 per unit
    /// of side length.
    #[arg(long, value_name = "COUNT")]
    moves: Option<usize>,

    /// Seed as 64 hex digits, or any phrase to hash into a seed.
    #[arg(long, value_name = "SEED", value_parser = parse_seed)]
    seed: Option<PuzzleSeed>,
}

pub(crate) fn generate(args: &GenerateArgs) -> Result<ExitCode, CliError> {
    let generator = ShuffleGenerator::new(args.size)?;
    let generator = match args.moves {
        Some(moves) => generator.with_moves(moves),
        None => generator,
    };
    let puzzle = generator.generate_with_seed(args.seed.unwrap_or_else(PuzzleSeed::random));

    println!("Seed: {}", puzzle.seed);
    print_board(&puzzle.board);
    let scramble = puzzle
        .scramble
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    println!("Scramble ({} moves): {}", scramble.len(), scramble.join(" "));
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    /// Board to check, as comma- or space-separated numbers.
    #[arg(value_name = "BOARD")]
    board: String,
}

pub(crate) fn check(args: &CheckArgs) -> Result<ExitCode, CliError> {
    let editor: Editor = args.board.parse()?;
    println!("{editor:#}");
    println!();

    let issues = editor.issues();
    if issues.is_empty() {
        println!("Valid puzzle configuration");
        return Ok(ExitCode::SUCCESS);
    }
    for issue in &issues {
        println!("{}: {issue}", issue.severity());
    }
    let failed = issues.iter().any(|issue| issue.severity() == Severity::Error);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
