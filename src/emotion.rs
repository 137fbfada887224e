//! Emotions, intensity, and the intensity classifier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MoodjotError;

/// The feeling a journaling session is about. Chosen once and fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sad,
    Joyful,
    Confused,
    Bored,
    Stressed,
    Angry,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Sad,
        Emotion::Joyful,
        Emotion::Confused,
        Emotion::Bored,
        Emotion::Stressed,
        Emotion::Angry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Sad => "Sad",
            Emotion::Joyful => "Joyful",
            Emotion::Confused => "Confused",
            Emotion::Bored => "Bored",
            Emotion::Stressed => "Stressed",
            Emotion::Angry => "Angry",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emotion {
    type Err = MoodjotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MoodjotError::ConfigError(format!("Unknown emotion: {}", s)))
    }
}

/// How strongly the emotion is felt, 1 through 10.
///
/// Construction clamps, so every value in circulation is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Self {
        Intensity(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> IntensityBand {
        IntensityBand::classify(self.0)
    }
}

impl Default for Intensity {
    /// Midpoint of the slider
    fn default() -> Self {
        Intensity(5)
    }
}

impl From<u8> for Intensity {
    fn from(value: u8) -> Self {
        Intensity::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityBand {
    Low,
    Medium,
    High,
}

impl IntensityBand {
    /// Map a raw intensity to its band.
    ///
    /// Total over `u8`: 0 is treated as low, anything above 10 as high.
    pub fn classify(value: u8) -> Self {
        match value {
            0..=3 => IntensityBand::Low,
            4..=6 => IntensityBand::Medium,
            _ => IntensityBand::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntensityBand::Low => "low",
            IntensityBand::Medium => "medium",
            IntensityBand::High => "high",
        }
    }
}
