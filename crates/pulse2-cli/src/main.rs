//! Pulse2 CLI - offline renderer and inspection tools for the pulse2 voice.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulse2")]
#[command(author, version, about = "Pulse2 voice renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the voice to a WAV file
    Render(commands::render::RenderArgs),

    /// List the control-rate parameters
    Params(commands::params::ParamsArgs),

    /// Parse a JSON configuration message
    Message(commands::message::MessageArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Message(args) => commands::message::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
