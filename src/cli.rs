//! Command-line interface for rocknraft.

use clap::{Parser, Subcommand};
use rocknraft_engine::Difficulty;
use std::path::PathBuf;

/// Rock'n'Raft - memory pairs on sliding rafts
#[derive(Parser, Debug)]
#[command(name = "rocknraft")]
#[command(about = "Find the matching rocks before the rafts drift away", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Falls back to ROCKNRAFT_CONFIG, then defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the surrogate in the terminal
    Play {
        /// Rocks per raft: easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the memorise pause after the deal
        #[arg(long)]
        no_wait: bool,
    },

    /// Run headless games between random players
    Simulate {
        /// Number of boards played at once
        #[arg(short, long, default_value = "4")]
        games: usize,

        /// Base seed; each board adds its index
        #[arg(long)]
        seed: Option<u64>,

        /// Print the game summaries as JSON
        #[arg(long)]
        json: bool,
    },
}
