mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{import, init, ImportArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// Blockkit CLI - import markup, styles and content into pages
#[derive(Parser, Debug)]
#[command(name = "blockkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a blockkit.config.json
    Init(InitArgs),

    /// Import .html, .css and .json files into a page
    Import(ImportArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so printed pages stay clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match std::env::current_dir() {
        Ok(cwd) => match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Import(args) => import(args, &cwd).await,
        },
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
