//! CLI argument parsing with clap.

use clap::Parser;

/// Room redesign backend: restyles room photos with Gemini.
#[derive(Parser, Debug)]
#[command(name = "respace", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Address to bind (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config and `PORT`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
