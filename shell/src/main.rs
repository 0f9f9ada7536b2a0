//! Interactive referee shell for Rock-Paper-Scissors-Plus
//!
//! Thin glue around `game_logic::Referee`: reads raw text, plays rounds,
//! renders the structured results. No game rules live here; malformed
//! input is the referee's concern.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use game_logic::{Move, Outcome, Referee, RoundResult, MAX_ROUNDS};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "rps-shell", about = "Play Rock-Paper-Scissors-Plus against the house bot")]
struct Args {
    /// Seed for the bot's move generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print raw tool-contract JSON instead of rendered rounds
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("bot seed: {seed}");

    let mut referee = Referee::seeded(seed);
    greet();

    while !referee.game_over() {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("GG! See you next time.");
            return Ok(());
        }

        match referee.play_round(input) {
            Ok(result) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    render(&result);
                }
            }
            Err(err) => println!("{}", err.to_string().red()),
        }
    }

    if let Some(final_result) = referee.final_result() {
        println!("\n{}", "=".repeat(50));
        println!("FINAL RESULT: {}", final_result.to_string().bold());
        println!("{}", "=".repeat(50));
    }

    Ok(())
}

fn greet() {
    println!("{}", "=".repeat(50));
    println!("{}", "ROCK-PAPER-SCISSORS-PLUS".bold());
    println!("{}", "=".repeat(50));
    for mv in Move::ALL {
        println!("  {:<8} - {}", mv.title(), mv.describe());
    }
    println!("Exactly {MAX_ROUNDS} rounds. Type 'exit' to stop.\n");
}

fn render(result: &RoundResult) {
    println!("\n{}", format!("Round {}", result.round).bold());
    let line = match result.outcome {
        Outcome::User => result.explanation.as_str().green(),
        Outcome::Bot => result.explanation.as_str().red(),
        Outcome::Draw => result.explanation.as_str().yellow(),
        Outcome::Wasted => result.explanation.as_str().dimmed(),
    };
    println!("{line}");
    println!(
        "Score - you {} : {} bot",
        result.current_scores.user, result.current_scores.bot
    );
}
