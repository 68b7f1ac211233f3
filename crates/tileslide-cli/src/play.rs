use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    str::FromStr,
};

use clap::Args;
use tileslide_core::{Move, Position};
use tileslide_game::Game;
use tileslide_generator::{PuzzleSeed, ShuffleGenerator};
use tileslide_solver::{SearchLimits, Strategy};

use crate::{error::CliError, options::ScrambleArgs};

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[command(flatten)]
    scramble: ScrambleArgs,
}

pub(crate) fn run(args: &PlayArgs) -> Result<ExitCode, CliError> {
    let puzzle = args.scramble.generate()?;
    println!("Seed: {}", puzzle.seed);
    let mut session = Session::new(Game::from_puzzle(puzzle));
    session.run(io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

const HELP: &str = "\
commands:
  u, d, l, r        move the blank up, down, left or right
  tile ROW COL      slide the tile at ROW, COL (0-based) into the blank
  solve [a-star|bfs]
                    search for a solution from the current board
  step              play the next move of the solution
  shuffle [MOVES]   scramble the solved board
  reset             put the board back in order
  show              print the board
  help              print this message
  quit              leave the game";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
enum ParseCommandError {
    #[display("unknown command {word:?}, type `help` for a list")]
    Unknown { word: String },
    #[display("`{command}` expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Blank(Move),
    Tile(Position),
    Solve(Strategy),
    Step,
    Shuffle(usize),
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let word = words.next().unwrap_or_default().to_ascii_lowercase();
        let args = words.collect::<Vec<_>>();
        let bad = |command, expected| ParseCommandError::BadArguments { command, expected };

        let command = match (word.as_str(), args.as_slice()) {
            ("tile", [row, col]) => {
                let (Ok(row), Ok(col)) = (row.parse(), col.parse()) else {
                    return Err(bad("tile", "a row and a column"));
                };
                Self::Tile(Position::new(row, col))
            }
            ("tile", _) => return Err(bad("tile", "a row and a column")),
            ("solve", []) => Self::Solve(Strategy::AStar),
            ("solve", [name]) => match name.to_ascii_lowercase().as_str() {
                "a-star" | "astar" | "a*" => Self::Solve(Strategy::AStar),
                "bfs" => Self::Solve(Strategy::BreadthFirst),
                _ => return Err(bad("solve", "`a-star` or `bfs`")),
            },
            ("shuffle", []) => Self::Shuffle(ShuffleGenerator::QUICK_MOVES),
            ("shuffle", [moves]) => {
                Self::Shuffle(moves.parse().map_err(|_| bad("shuffle", "a move count"))?)
            }
            ("step", []) => Self::Step,
            ("reset", []) => Self::Reset,
            ("show", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            (name, []) => match name.parse() {
                Ok(mv) => Self::Blank(mv),
                Err(_) => {
                    return Err(ParseCommandError::Unknown {
                        word: name.to_owned(),
                    });
                }
            },
            ("solve", _) => return Err(bad("solve", "at most one argument")),
            ("shuffle", _) => return Err(bad("shuffle", "at most one argument")),
            ("step", _) => return Err(bad("step", "no arguments")),
            ("reset", _) => return Err(bad("reset", "no arguments")),
            ("show", _) => return Err(bad("show", "no arguments")),
            ("help" | "?", _) => return Err(bad("help", "no arguments")),
            ("quit" | "exit" | "q", _) => return Err(bad("quit", "no arguments")),
            (name, _) => {
                return Err(ParseCommandError::Unknown {
                    word: name.to_owned(),
                });
            }
        };
        Ok(command)
    }
}

/// A line-oriented play session.
#[derive(Debug)]
struct Session {
    game: Game,
    limits: SearchLimits,
}

impl Session {
    fn new(game: Game) -> Self {
        Self {
            game,
            limits: SearchLimits::default(),
        }
    }

    fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        self.show(out)?;
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match line.parse::<Command>() {
                    Ok(Command::Quit) => return Ok(()),
                    Ok(command) => self.execute(command, out)?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)
    }

    fn execute<W>(&mut self, command: Command, out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        log::debug!("play command {command:?}");
        match command {
            Command::Blank(mv) => match self.game.move_blank(mv) {
                Ok(()) => self.after_move(out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Tile(pos) => match self.game.slide_tile(pos) {
                Ok(_) => self.after_move(out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Solve(strategy) => {
                let outcome = self.game.solve(strategy, self.limits);
                writeln!(out, "{strategy}: {outcome}")?;
                if let Some(solution) = outcome.solution() {
                    writeln!(out, "{} moves, type `step` to play them", solution.len())?;
                }
            }
            Command::Step => match self.game.step_solution() {
                Ok(Some(mv)) => {
                    writeln!(out, "blank moved {}", mv.name())?;
                    self.after_move(out)?;
                }
                Ok(None) => writeln!(out, "the solution has been played")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Shuffle(moves) => {
                let seed = PuzzleSeed::random();
                self.game.scramble(moves, seed);
                writeln!(out, "Seed: {seed}")?;
                self.show(out)?;
            }
            Command::Reset => {
                self.game.reset();
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn after_move<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        self.show(out)?;
        if self.game.is_solved() {
            writeln!(out, "Solved in {} moves!", self.game.move_count())?;
        }
        Ok(())
    }

    fn show<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(out, "{:#}", self.game.board())?;
        writeln!(out, "Moves: {}", self.game.move_count())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tileslide_core::Board;

    use super::*;

    fn play(board: &str, input: &str) -> (Game, String) {
        let mut session = Session::new(Game::new(board.parse::<Board>().unwrap()));
        let mut out = Vec::new();
        session.run(Cursor::new(input), &mut out).unwrap();
        (session.game, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("u".parse::<Command>(), Ok(Command::Blank(Move::Up)));
        assert_eq!("Left".parse::<Command>(), Ok(Command::Blank(Move::Left)));
        assert_eq!("tile 1 2".parse::<Command>(), Ok(Command::Tile(Position::new(1, 2))));
        assert_eq!("solve".parse::<Command>(), Ok(Command::Solve(Strategy::AStar)));
        assert_eq!("solve BFS".parse::<Command>(), Ok(Command::Solve(Strategy::BreadthFirst)));
        assert_eq!("shuffle".parse::<Command>(), Ok(Command::Shuffle(100)));
        assert_eq!("shuffle 7".parse::<Command>(), Ok(Command::Shuffle(7)));
        assert_eq!("  quit ".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(ParseCommandError::Unknown { .. })
        ));
        assert!(matches!(
            "tile 1".parse::<Command>(),
            Err(ParseCommandError::BadArguments { command: "tile", .. })
        ));
        assert!(matches!(
            "solve ida".parse::<Command>(),
            Err(ParseCommandError::BadArguments { command: "solve", .. })
        ));
        assert_eq!(
            "step 2".parse::<Command>(),
            Err(ParseCommandError::BadArguments {
                command: "step",
                expected: "no arguments"
            })
        );
        for line in ["reset x", "show x", "help me", "quit now"] {
            assert!(matches!(
                line.parse::<Command>(),
                Err(ParseCommandError::BadArguments {
                    expected: "no arguments",
                    ..
                })
            ));
        }
        assert!(matches!(
            "jump 2".parse::<Command>(),
            Err(ParseCommandError::Unknown { .. })
        ));
    }

    #[test]
    fn test_manual_play_to_solved() {
        let (game, out) = play("1,2,3,4,5,6,7,0,8", "tile 0 0\nr\nquit\nd\n");
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 1);
        assert!(out.contains("is not next to the blank"));
        assert!(out.contains("Solved in 1 moves!"));
    }

    #[test]
    fn test_solve_and_step() {
        let (game, out) = play("1,2,3,4,0,5,7,8,6", "step\nsolve bfs\nstep\nstep\nstep\n");
        assert!(out.contains("no solution to step through"));
        assert!(out.contains("2 moves, type `step` to play them"));
        assert!(out.contains("blank moved right"));
        assert!(out.contains("the solution has been played"));
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_shuffle_and_reset() {
        let (game, out) = play("1,2,3,0", "shuffle 10\nreset\n");
        assert!(out.contains("Seed: "));
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 0);
    }
}
