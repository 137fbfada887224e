use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emotion::{Emotion, Intensity};
use crate::remote::Reflection;
use crate::session::{Answers, JournalSession};

/// Summary of a completed session, handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub answers: Answers,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<Reflection>,
}

impl JournalEntry {
    pub fn from_session(session: &JournalSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: session.started_at(),
            emotion: session.emotion(),
            intensity: session.intensity(),
            answers: session.answers().clone(),
            text: session.body().to_string(),
            reflection: session.reflection().cloned(),
        }
    }
}
