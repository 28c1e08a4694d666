use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
use commands::scan::ScanCommand;

#[derive(Parser)]
#[command(name = "soliscan")]
#[command(about = "Heuristic security scanning for Solidity smart contracts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Scan {
        #[command(subcommand)]
        subcommand: ScanCommand,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { subcommand } => subcommand.execute(),
    }
}
