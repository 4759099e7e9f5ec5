//! Rock'n'Raft - Unified CLI
//!
//! Terminal play against the surrogate, or headless simulated games.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rocknraft::{SessionError, SessionHandle, SessionRegistry, Settings, parse_selection, simulate};
use rocknraft_engine::{
    MatchOutcome, Player, RenderMode, Renderer, TextRenderer, TurnAdvance, TurnReport, UserId,
    UserRef,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config)?;

    match cli.command {
        Command::Play {
            difficulty,
            seed,
            no_wait,
        } => {
            let settings = match difficulty {
                Some(difficulty) => settings.with_difficulty(difficulty),
                None => settings,
            };
            let settings = match seed {
                Some(seed) => settings.with_seed(seed),
                None => settings,
            };
            run_play(settings, no_wait).await
        }
        Command::Simulate { games, seed, json } => {
            let settings = match seed {
                Some(seed) => settings.with_seed(seed),
                None => settings,
            };
            run_simulate(settings, games, json).await
        }
    }
}

#[instrument]
fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::from_env()?,
    };
    info!(?settings, "Using settings");
    Ok(settings)
}

/// Interactive game against the surrogate.
#[instrument(skip(settings))]
async fn run_play(settings: Settings, no_wait: bool) -> Result<()> {
    let registry = SessionRegistry::new();
    let name = std::env::var("USER").unwrap_or_else(|_| "player".to_string());
    let me = UserId::from("local");
    let players = [Player::human(UserRef::new(me.clone(), name)), Player::surrogate()];

    let key = format!("local-{}", std::process::id());
    let handle = registry.create(key, settings.board_config(), players)?;
    let renderer = TextRenderer;

    println!("{}", renderer.render(&handle.snapshot(RenderMode::RevealAll).await)?);
    if !no_wait {
        let pause = settings.memorize_time();
        println!("\nMemorise the rocks! {} seconds...", pause.as_secs());
        tokio::time::sleep(pause).await;
        // clear the screen so the numbers are gone
        print!("\x1B[2J\x1B[H");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("\n{}", renderer.render(&handle.snapshot(RenderMode::MaskRevealed).await)?);
        println!("Score {} | pick `raft rock raft rock`:", score(&handle).await);

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let selection = match parse_selection(&line) {
            Ok(selection) => selection,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match handle.play_turn(&me, selection).await {
            Ok(report) => {
                print_report(&report);
                if report.completed {
                    println!("\n{}", renderer.render(&handle.snapshot(RenderMode::RevealAll).await)?);
                    println!("Every pair found! Final score {}", score(&handle).await);
                    break;
                }
            }
            Err(SessionError::Board(e)) => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }

    registry.remove(handle.key());
    Ok(())
}

async fn score(handle: &SessionHandle) -> u32 {
    handle.lock().await.players()[0].score()
}

fn print_report(report: &TurnReport) {
    match report.outcome {
        MatchOutcome::Matched => {
            println!("Rocks {} and {} match! Go again.", report.first, report.second)
        }
        MatchOutcome::NoMatch => {
            println!("Rocks {} and {} do not match.", report.first, report.second)
        }
    }
    if let TurnAdvance::Slid {
        slides,
        turn_passed,
    } = &report.advance
    {
        for slide in slides {
            println!("{slide}");
        }
        if *turn_passed {
            println!("Turn passes to {}", report.next_player);
        }
    }
}

/// Headless games between random players.
#[instrument(skip(settings))]
async fn run_simulate(settings: Settings, games: usize, json: bool) -> Result<()> {
    let registry = SessionRegistry::new();
    let summaries = simulate(&registry, &settings, games).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "{}: {} after {} turns, scores {} - {}",
            summary.session_key,
            if summary.completed { "complete" } else { "abandoned" },
            summary.turns,
            summary.scores[0],
            summary.scores[1],
        );
    }
    Ok(())
}
