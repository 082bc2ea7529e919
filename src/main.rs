use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use log::info;

use hnefatafl::{Coordinate, GameState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Hnefatafl in the terminal", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print every accepted move as a JSON report
    #[arg(long)]
    json: bool,
}

enum Command {
    Move(Coordinate, Coordinate),
    Destinations(Coordinate),
    Restart,
    Quit,
}

/// Parse one line of input.
/// "r c r c" moves, "moves r c" lists destinations, "restart", "quit".
fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    match first {
        "quit" | "exit" => return Some(Command::Quit),
        "restart" => return Some(Command::Restart),
        _ => {}
    }

    let numbers: Vec<usize> = if first == "moves" {
        words.map(|s| s.parse().ok()).collect::<Option<_>>()?
    } else {
        std::iter::once(first).chain(words).map(|s| s.parse().ok()).collect::<Option<_>>()?
    };

    match (first, numbers.as_slice()) {
        ("moves", &[r, c]) => Some(Command::Destinations(Coordinate::new(r, c))),
        (word, &[sr, sc, er, ec]) if word != "moves" => Some(Command::Move(Coordinate::new(sr, sc), Coordinate::new(er, ec))),
        _ => None,
    }
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut state = GameState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Welcome to Hnefatafl!\n");
    println!("Enter moves in the following format:");
    println!("start_row start_col end_row end_col");
    println!("Other commands: moves row col, restart, quit");

    loop {
        println!();
        print!("{}", state.board());
        if let Some(winner) = state.outcome().winner() {
            println!("\nGame Over! The winner is: {} ({:?})", winner, state.outcome());
            println!("Type restart to play again or quit to leave.");
        } else {
            println!(
                "\nCurrent player: {} (attackers {}, defenders {})",
                state.side_to_move(),
                state.attacker_count(),
                state.defender_count()
            );
        }
        print!("Enter move: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match parse_command(&input) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => state.restart(),
            Some(Command::Destinations(from)) => {
                let targets = state.legal_destinations(from);
                if targets.is_empty() {
                    println!("No legal moves from {}.", from);
                } else {
                    let list: Vec<String> = targets.iter().map(ToString::to_string).collect();
                    println!("Moves from {}: {}", from, list.join(" "));
                }
            }
            Some(Command::Move(from, to)) => match state.attempt_move(from, to) {
                Ok(report) => {
                    if !report.captured.is_empty() {
                        let list: Vec<String> = report.captured.iter().map(ToString::to_string).collect();
                        println!("Captured: {}", list.join(" "));
                    }
                    if report.king_captured {
                        println!("The king is surrounded!");
                    }
                    if args.json {
                        println!("{}", serde_json::to_string(&report)?);
                    }
                }
                Err(err) => println!("Invalid move: {}.", err),
            },
            None => println!("Invalid input. Try again."),
        }
    }

    info!("leaving after {:?}", state.outcome());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        match parse_command("0 3 2 3\n") {
            Some(Command::Move(from, to)) => {
                assert_eq!(from, Coordinate::new(0, 3));
                assert_eq!(to, Coordinate::new(2, 3));
            }
            _ => panic!("expected a move"),
        }
    }

    #[test]
    fn test_parse_other_commands() {
        assert!(matches!(parse_command("moves 5 5"), Some(Command::Destinations(c)) if c == Coordinate::new(5, 5)));
        assert!(matches!(parse_command("  restart "), Some(Command::Restart)));
        assert!(matches!(parse_command("quit"), Some(Command::Quit)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_command("").is_none());
        assert!(parse_command("0 3 2").is_none());
        assert!(parse_command("a b c d").is_none());
        assert!(parse_command("moves 1").is_none());
        assert!(parse_command("moves 1 2 3 4").is_none());
        assert!(parse_command("0 3 -2 3").is_none());
    }
}
