//! Per-session journaling state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, Intensity, IntensityBand};
use crate::remote::Reflection;

/// One answered question: a bank choice or a conversational exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Question bank id; absent for generated questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub question: String,
    pub answer: String,
}

/// Answers in the order they were given. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(Vec<Answer>);

impl Answers {
    pub fn push(&mut self, answer: Answer) {
        self.0.push(answer);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&Answer> {
        self.0.last()
    }

    /// Whether a bank question with this id has been answered
    pub fn answered(&self, question_id: &str) -> bool {
        self.0.iter().any(|a| a.question_id.as_deref() == Some(question_id))
    }

    /// Numbered Q/A lines for prompt building
    pub fn transcript(&self) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}. Q: {}\n   A: {}", i + 1, a.question, a.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Everything collected during one pass through the wizard.
///
/// Lives only in memory; dropped when the wizard finishes or is abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalSession {
    emotion: Emotion,
    intensity: Intensity,
    answers: Answers,
    body: String,
    crisis: bool,
    opening_prompt: Option<String>,
    reflection: Option<Reflection>,
    started_at: DateTime<Utc>,
}

impl JournalSession {
    pub fn new(emotion: Emotion) -> Self {
        Self {
            emotion,
            intensity: Intensity::default(),
            answers: Answers::default(),
            body: String::new(),
            crisis: false,
            opening_prompt: None,
            reflection: None,
            started_at: Utc::now(),
        }
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Always derived from the current intensity
    pub fn band(&self) -> IntensityBand {
        self.intensity.band()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn crisis(&self) -> bool {
        self.crisis
    }

    pub fn opening_prompt(&self) -> Option<&str> {
        self.opening_prompt.as_deref()
    }

    pub fn reflection(&self) -> Option<&Reflection> {
        self.reflection.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn set_intensity(&mut self, intensity: Intensity) {
        self.intensity = intensity;
    }

    pub(crate) fn push_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
    }

    pub(crate) fn set_body(&mut self, body: String, crisis: bool) {
        self.body = body;
        self.crisis = crisis;
    }

    pub(crate) fn clear_crisis(&mut self) {
        self.crisis = false;
    }

    pub(crate) fn set_opening_prompt(&mut self, prompt: String) {
        self.opening_prompt = Some(prompt);
    }

    pub(crate) fn set_reflection(&mut self, reflection: Reflection) {
        // produced once per session
        if self.reflection.is_none() {
            self.reflection = Some(reflection);
        }
    }
}
