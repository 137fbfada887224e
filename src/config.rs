use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::crisis::{CrisisScreener, DEFAULT_CRISIS_KEYWORDS};
use crate::emotion::Emotion;
use crate::error::{MoodjotError, Result};
use crate::exercise::{BreathingPattern, ExerciseKind, ExerciseTable};
use crate::wizard::{QuestionMode, WizardPolicy};

/// Global moodjot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Static question bank or AI-driven conversation
    #[serde(default)]
    pub question_mode: QuestionMode,

    /// Shortest journal text that may be submitted
    #[serde(default = "default_min_journal_chars")]
    pub min_journal_chars: usize,

    /// Upper bound on AI question/answer exchanges
    #[serde(default = "default_max_exchanges")]
    pub max_exchanges: usize,

    /// Phrases that route the writer to safety resources
    #[serde(default = "default_crisis_keywords")]
    pub crisis_keywords: Vec<String>,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub breathing: BreathingConfig,

    /// Per-emotion exercise overrides, e.g. `angry = "physical"`
    #[serde(default)]
    pub exercises: HashMap<String, ExerciseKind>,
}

/// Generative-text service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_inhale_secs")]
    pub inhale_secs: u64,
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u64,
    #[serde(default = "default_exhale_secs")]
    pub exhale_secs: u64,
    /// Cycles before a guided session ends on its own
    #[serde(default = "default_cycles")]
    pub cycles: u32,
}

fn default_min_journal_chars() -> usize {
    5
}

fn default_max_exchanges() -> usize {
    5
}

fn default_crisis_keywords() -> Vec<String> {
    DEFAULT_CRISIS_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_inhale_secs() -> u64 {
    5
}

fn default_hold_secs() -> u64 {
    4
}

fn default_exhale_secs() -> u64 {
    5
}

fn default_cycles() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_mode: QuestionMode::default(),
            min_journal_chars: default_min_journal_chars(),
            max_exchanges: default_max_exchanges(),
            crisis_keywords: default_crisis_keywords(),
            remote: RemoteConfig::default(),
            breathing: BreathingConfig::default(),
            exercises: HashMap::new(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_secs: default_inhale_secs(),
            hold_secs: default_hold_secs(),
            exhale_secs: default_exhale_secs(),
            cycles: default_cycles(),
        }
    }
}

impl RemoteConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(MoodjotError::MissingApiKey(self.api_key_env.clone())),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        // surface bad emotion names at load time rather than mid-session
        config.exercise_table()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| MoodjotError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports MOODJOT_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("MOODJOT_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "moodjot")
            .ok_or_else(|| MoodjotError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn wizard_policy(&self) -> Result<WizardPolicy> {
        Ok(WizardPolicy {
            mode: self.question_mode,
            min_journal_chars: self.min_journal_chars,
            max_exchanges: self.max_exchanges.max(1),
            screener: CrisisScreener::new(&self.crisis_keywords),
            exercises: self.exercise_table()?,
        })
    }

    pub fn breathing_pattern(&self) -> BreathingPattern {
        BreathingPattern {
            inhale: Duration::from_secs(self.breathing.inhale_secs.max(1)),
            hold: Duration::from_secs(self.breathing.hold_secs),
            exhale: Duration::from_secs(self.breathing.exhale_secs.max(1)),
        }
    }

    /// Default emotion→exercise table with the configured overrides applied
    pub fn exercise_table(&self) -> Result<ExerciseTable> {
        let mut table = ExerciseTable::default();
        for (name, kind) in &self.exercises {
            let emotion: Emotion = name.parse()?;
            table.set(emotion, *kind);
        }
        Ok(table)
    }
}
