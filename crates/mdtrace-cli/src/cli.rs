use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mdtrace",
    about = "mdtrace: gated markdown narration for running programs",
    version
)]
pub struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Narrate the salary walkthrough into a markdown report
    Demo {
        /// Report path, relative to the config base dir or the working directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// TOML config file (output, conditions, mute, header level)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output a JSON summary instead of text (disables console mirroring)
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a TOML config file
    ConfigCheck {
        /// Path to the config file
        path: PathBuf,

        /// Output the parsed config as JSON
        #[arg(long)]
        json: bool,
    },
}
