//! Flipbook CLI - inspect, validate and simulate sprite animation sets

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{inspect, simulate, validate};

#[derive(Parser)]
#[command(name = "flipbook")]
#[command(about = "Offline tools for frame-based sprite animations", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the animations in a sprite set with their derived timing
    Inspect {
        /// Path to a .sprite.toml file
        file: String,
    },

    /// Check a sprite set for unplayable animations and broken references
    Validate {
        /// Path to a .sprite.toml file
        file: String,
    },

    /// Drive an animation clock with a fixed time step and print the timeline
    Simulate {
        /// Path to a .sprite.toml file
        file: String,

        /// Animation to play (defaults to autoplay, then the first animation)
        #[arg(short, long)]
        animation: Option<String>,

        /// Frame to start from
        #[arg(long, default_value = "0")]
        start_frame: usize,

        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Seconds to simulate
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Reverse playback once this much time has passed
        #[arg(long)]
        reverse_at: Option<f64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Inspect { file } => inspect::run(&file),
        Commands::Validate { file } => validate::run(&file),
        Commands::Simulate {
            file,
            animation,
            start_frame,
            dt,
            duration,
            reverse_at,
            format,
        } => simulate::run(simulate::SimulateArgs {
            file,
            animation,
            start_frame,
            dt,
            duration,
            reverse_at,
            format,
        }),
    }
}
