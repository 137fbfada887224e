//! Generative-text client: journaling prompts, conversational questions, and reflections.
//!
//! The [`Transport`] trait is the opaque remote call. [`ReflectionClient`] builds the
//! requests on top of it and turns every failure into a fixed fallback so the
//! journaling flow never stalls.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::RemoteConfig;
use crate::emotion::{Emotion, Intensity};
use crate::error::{MoodjotError, Result};
use crate::session::Answers;

/// Three-part reflection returned after the journal is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub acknowledgment: String,
    pub observation: String,
    pub reframe: String,
}

impl Reflection {
    pub fn fallback() -> Self {
        Self {
            acknowledgment: "Thank you for sharing.".to_string(),
            observation: "You're carrying a lot.".to_string(),
            reframe: "Be gentle with yourself.".to_string(),
        }
    }

    /// Headings paired with each field, in display order
    pub fn sections(&self) -> [(&'static str, &str); 3] {
        [
            ("I hear you", &self.acknowledgment),
            ("What I notice", &self.observation),
            ("A gentle thought", &self.reframe),
        ]
    }
}

/// Whether the service should answer in plain text or JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

/// A single prompt-in, text-out call to a generative model
pub trait Transport: Send + Sync {
    fn generate(&self, prompt: &str, format: ResponseFormat) -> Result<String>;
}

/// Google Gemini `generateContent` over HTTPS
pub struct GeminiTransport {
    agent: ureq::Agent,
    config: RemoteConfig,
}

impl GeminiTransport {
    pub fn new(config: RemoteConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();
        Self { agent, config }
    }

    fn endpoint(&self, api_key: &str) -> Result<url::Url> {
        let base = url::Url::parse(&self.config.endpoint)?;
        let mut url = base.join(&format!("models/{}:generateContent", self.config.model))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

impl Transport for GeminiTransport {
    fn generate(&self, prompt: &str, format: ResponseFormat) -> Result<String> {
        let api_key = self.config.api_key()?;
        let url = self.endpoint(&api_key)?;

        let mut body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if format == ResponseFormat::Json {
            body["generationConfig"] = serde_json::json!({ "responseMimeType": "application/json" });
        }

        tracing::debug!(model = %self.config.model, ?format, "calling generateContent");

        let response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .send_json(&body)?;
        let raw = response.into_body().read_to_string()?;
        let parsed: serde_json::Value = serde_json::from_str(&raw)?;

        parsed["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            })
            .ok_or_else(|| MoodjotError::MalformedResponse("no candidates in response".into()))
    }
}

/// One remote call, with the session context it needs captured by value
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRequest {
    /// Single-sentence journaling prompt after the question bank
    OpeningPrompt {
        emotion: Emotion,
        intensity: Intensity,
        answers: Answers,
    },
    /// First conversational question
    OpenQuestion { emotion: Emotion, intensity: Intensity },
    /// Next conversational question given everything said so far
    FollowUp {
        emotion: Emotion,
        intensity: Intensity,
        answers: Answers,
    },
    /// Structured reflection on the finished entry
    Reflect {
        emotion: Emotion,
        intensity: Intensity,
        answers: Answers,
        text: String,
    },
}

/// Result of a remote call after fallbacks are applied
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    Prompt(String),
    /// `None` when a follow-up could not be generated
    Question(Option<String>),
    Reflection(Reflection),
}

impl RemoteRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteRequest::OpeningPrompt { .. } => "opening_prompt",
            RemoteRequest::OpenQuestion { .. } => "open_question",
            RemoteRequest::FollowUp { .. } => "follow_up",
            RemoteRequest::Reflect { .. } => "reflect",
        }
    }

    /// What the flow uses when the call fails for any reason
    pub fn fallback(&self) -> RemoteOutcome {
        match self {
            RemoteRequest::OpeningPrompt { emotion, .. } => RemoteOutcome::Prompt(format!(
                "What is occupying your thoughts while feeling {} right now?",
                emotion
            )),
            RemoteRequest::OpenQuestion { emotion, .. } => RemoteOutcome::Question(Some(format!(
                "What's been on your mind since you started feeling {}?",
                emotion
            ))),
            RemoteRequest::FollowUp { .. } => RemoteOutcome::Question(None),
            RemoteRequest::Reflect { .. } => RemoteOutcome::Reflection(Reflection::fallback()),
        }
    }

    pub fn build_prompt(&self) -> String {
        match self {
            RemoteRequest::OpeningPrompt { emotion, intensity, answers } => OPENING_PROMPT
                .replace("{{emotion}}", emotion.label())
                .replace("{{intensity}}", &intensity.value().to_string())
                .replace("{{answers}}", &answers_section(answers)),
            RemoteRequest::OpenQuestion { emotion, intensity } => OPEN_QUESTION_PROMPT
                .replace("{{emotion}}", emotion.label())
                .replace("{{intensity}}", &intensity.value().to_string()),
            RemoteRequest::FollowUp { emotion, intensity, answers } => FOLLOW_UP_PROMPT
                .replace("{{emotion}}", emotion.label())
                .replace("{{intensity}}", &intensity.value().to_string())
                .replace("{{answers}}", &answers_section(answers)),
            RemoteRequest::Reflect { emotion, intensity, answers, text } => REFLECT_PROMPT
                .replace("{{emotion}}", emotion.label())
                .replace("{{intensity}}", &intensity.value().to_string())
                .replace("{{answers}}", &answers_section(answers))
                .replace("{{text}}", &truncate_content(text, MAX_JOURNAL_CHARS)),
        }
    }
}

const MAX_JOURNAL_CHARS: usize = 8000;

const OPENING_PROMPT: &str = r#"The user is feeling {{emotion}} (intensity {{intensity}}/10).

What they told us so far:
{{answers}}

Write one short, warm journaling prompt that invites them to write about this.
Address them directly as "you". Return ONLY the prompt text."#;

const OPEN_QUESTION_PROMPT: &str = r#"The user is feeling {{emotion}} (intensity {{intensity}}/10).

Ask one gentle, open-ended question that helps them explore why.
Keep it under 25 words. Return ONLY the question."#;

const FOLLOW_UP_PROMPT: &str = r#"The user is feeling {{emotion}} (intensity {{intensity}}/10).

Conversation so far:
{{answers}}

Ask one follow-up question that builds on their last answer.
Do not repeat earlier questions. Keep it under 25 words. Return ONLY the question."#;

const REFLECT_PROMPT: &str = r#"The user is feeling {{emotion}} (intensity {{intensity}}/10).

Context from their check-in:
{{answers}}

Their journal entry:
"""
{{text}}
"""

Respond ONLY with JSON, no other text:
{ "acknowledgment": string, "observation": string, "reframe": string }

Be supportive and brief. Do not give medical advice."#;

fn answers_section(answers: &Answers) -> String {
    if answers.is_empty() {
        "(nothing yet)".to_string()
    } else {
        answers.transcript()
    }
}

/// Truncate on a char boundary
fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...[truncated]", &content[..idx]),
        None => content.to_string(),
    }
}

/// Builds requests, calls the transport, and parses responses
#[derive(Clone)]
pub struct ReflectionClient {
    transport: Arc<dyn Transport>,
}

impl ReflectionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn gemini(config: RemoteConfig) -> Self {
        Self::new(Arc::new(GeminiTransport::new(config)))
    }

    pub fn opening_prompt(&self, emotion: Emotion, intensity: Intensity, answers: &Answers) -> Result<String> {
        let request = RemoteRequest::OpeningPrompt {
            emotion,
            intensity,
            answers: answers.clone(),
        };
        let text = self.transport.generate(&request.build_prompt(), ResponseFormat::Text)?;
        let text = clean_line(&text);
        if text.is_empty() {
            return Ok(format!("What's on your mind about feeling {}?", emotion));
        }
        Ok(text)
    }

    pub fn open_ended_question(&self, emotion: Emotion, intensity: Intensity) -> Result<String> {
        let request = RemoteRequest::OpenQuestion { emotion, intensity };
        self.question(&request)
    }

    pub fn follow_up_question(&self, emotion: Emotion, intensity: Intensity, answers: &Answers) -> Result<String> {
        let request = RemoteRequest::FollowUp {
            emotion,
            intensity,
            answers: answers.clone(),
        };
        self.question(&request)
    }

    pub fn reflect(&self, emotion: Emotion, intensity: Intensity, answers: &Answers, text: &str) -> Result<Reflection> {
        let request = RemoteRequest::Reflect {
            emotion,
            intensity,
            answers: answers.clone(),
            text: text.to_string(),
        };
        let raw = self.transport.generate(&request.build_prompt(), ResponseFormat::Json)?;
        parse_reflection(&raw)
    }

    fn question(&self, request: &RemoteRequest) -> Result<String> {
        let text = self.transport.generate(&request.build_prompt(), ResponseFormat::Text)?;
        let text = clean_line(&text);
        if text.is_empty() {
            return Err(MoodjotError::MalformedResponse("empty question".into()));
        }
        Ok(text)
    }

    /// Run a request, returning the raw result
    pub fn execute(&self, request: &RemoteRequest) -> Result<RemoteOutcome> {
        match request {
            RemoteRequest::OpeningPrompt { emotion, intensity, answers } => {
                self.opening_prompt(*emotion, *intensity, answers).map(RemoteOutcome::Prompt)
            }
            RemoteRequest::OpenQuestion { emotion, intensity } => self
                .open_ended_question(*emotion, *intensity)
                .map(|q| RemoteOutcome::Question(Some(q))),
            RemoteRequest::FollowUp { emotion, intensity, answers } => self
                .follow_up_question(*emotion, *intensity, answers)
                .map(|q| RemoteOutcome::Question(Some(q))),
            RemoteRequest::Reflect { emotion, intensity, answers, text } => self
                .reflect(*emotion, *intensity, answers, text)
                .map(RemoteOutcome::Reflection),
        }
    }

    /// Run a request; any failure becomes the request's fallback
    pub fn settle(&self, request: &RemoteRequest) -> RemoteOutcome {
        match self.execute(request) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(kind = request.kind(), error = %e, "remote call failed, using fallback");
                request.fallback()
            }
        }
    }
}

/// Parse a reflection, tolerating Markdown code fences around the JSON.
/// All three fields are required.
pub fn parse_reflection(raw: &str) -> Result<Reflection> {
    let json_text = strip_code_fencing(raw);
    serde_json::from_str(&json_text)
        .map_err(|e| MoodjotError::MalformedResponse(format!("Failed to parse reflection: {}", e)))
}

/// First non-empty line, without wrapping quotes
fn clean_line(s: &str) -> String {
    let line = s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    line.trim_matches(|c: char| c == '"' || c == '\u{201c}' || c == '\u{201d}')
        .trim()
        .to_string()
}

/// Strip markdown code fencing from a string (e.g., ```json ... ```)
fn strip_code_fencing(s: &str) -> String {
    let trimmed = s.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // skip the language tag
        let after_tag = after_fence
            .strip_prefix("json")
            .unwrap_or(after_fence);
        return match after_tag.find("```") {
            Some(end) => after_tag[..end].trim().to_string(),
            None => after_tag.trim().to_string(),
        };
    }

    trimmed.to_string()
}
