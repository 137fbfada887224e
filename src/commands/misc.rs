//! Miscellaneous commands: config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use moodjot::cli::{Cli, CompletionShell};
use moodjot::config::Config;
use moodjot::error::{MoodjotError, Result};

/// Show the effective configuration
pub fn cmd_config(path_only: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{} {}{}\n", "Config:".bold(), path.display(), source.dimmed());

    let rendered = toml::to_string_pretty(&config).map_err(|e| MoodjotError::ConfigError(e.to_string()))?;
    println!("{}", rendered);

    match config.remote.api_key() {
        Ok(_) => println!("{} {} is set", "API key:".bold(), config.remote.api_key_env),
        Err(e) => {
            println!("{} {}", "API key:".bold(), "not set, using built-in prompts".yellow());
            tracing::debug!(error = %e, "no api key");
        }
    }
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "moodjot", &mut io::stdout());
    Ok(())
}
