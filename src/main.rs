//! moodjot - a guided mood journal for the terminal

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodjot::cli::{Cli, Commands};
use moodjot::error::Result;

mod commands;
mod utils;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("MOODJOT_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint.dimmed());
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Journal { emotion, mode, json } => runtime()?.block_on(commands::cmd_journal(emotion, mode, json)),
        Commands::Exercise { kind, minutes } => runtime()?.block_on(commands::cmd_exercise(kind, minutes)),
        Commands::Config { path } => commands::cmd_config(path),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread().enable_all().build()?)
}
