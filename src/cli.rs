use clap::{Parser, Subcommand, ValueEnum};

use crate::emotion::Emotion;
use crate::exercise::ExerciseKind;
use crate::wizard::QuestionMode;

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "moodjot")]
#[command(author, version, about = "A guided mood journal for the terminal", long_about = None)]
#[command(after_help = r#"Examples:
  moodjot journal                        Pick how you feel and start a check-in
  moodjot journal stressed               Start a check-in about feeling stressed
  moodjot journal sad --mode conversational
  moodjot exercise breathing --minutes 5 A five minute breathing session
  moodjot config --path                  Where the config file lives

Environment:
  GEMINI_API_KEY    Key for generated prompts and reflections (optional)
  MOODJOT_CONFIG    Use a different config file
  MOODJOT_LOG       Log filter, e.g. debug or moodjot=trace
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check in: rate the feeling, answer a few questions, write, and reflect
    #[command(after_help = r#"Examples:
  moodjot journal
  moodjot journal angry
  moodjot journal confused --mode conversational
  moodjot journal joyful --json          Print the finished entry as JSON
"#)]
    Journal {
        /// How you feel right now (asked interactively when omitted)
        #[arg(value_enum)]
        emotion: Option<Emotion>,

        /// Where questions come from (defaults to the config's question_mode)
        #[arg(long, value_enum)]
        mode: Option<QuestionMode>,

        /// Print the completed entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single calming exercise
    #[command(after_help = r#"Examples:
  moodjot exercise breathing              Three guided breaths
  moodjot exercise breathing --minutes 10
  moodjot exercise grounding              5-4-3-2-1 senses
  moodjot exercise gratitude              Three good things
"#)]
    Exercise {
        #[arg(value_enum)]
        kind: ExerciseKind,

        /// Breathe for 5 or 10 minutes instead of a fixed number of cycles
        #[arg(long, value_parser = ["5", "10"])]
        minutes: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  moodjot completions bash > ~/.local/share/bash-completion/completions/moodjot
  moodjot completions zsh > ~/.zfunc/_moodjot
  moodjot completions fish > ~/.config/fish/completions/moodjot.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
