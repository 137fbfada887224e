//! Journaling wizard state machine.
//!
//! The flow is intensity → questions (static bank or AI conversation) → free
//! writing → reflection → optional exercise. Remote calls are not made here:
//! a transition that needs one returns [`Effect::Call`] and parks the wizard in
//! [`WizardStep::Loading`] until a matching [`WizardEvent::Settled`] arrives.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::crisis::CrisisScreener;
use crate::emotion::{Emotion, Intensity};
use crate::exercise::{exercise_for, ExerciseKind, ExerciseTable};
use crate::questions::{questions_for, Question};
use crate::remote::{RemoteOutcome, RemoteRequest};
use crate::session::{Answer, JournalSession};

/// Where pre-writing questions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    /// Multiple choice from the built-in bank
    #[default]
    Static,
    /// Generated questions with typed answers
    Conversational,
}

/// Product policy knobs the wizard enforces
#[derive(Debug, Clone, PartialEq)]
pub struct WizardPolicy {
    pub mode: QuestionMode,
    pub min_journal_chars: usize,
    /// Maximum question/answer exchanges in conversational mode
    pub max_exchanges: usize,
    pub screener: CrisisScreener,
    pub exercises: ExerciseTable,
}

impl Default for WizardPolicy {
    fn default() -> Self {
        Self {
            mode: QuestionMode::Static,
            min_journal_chars: 5,
            max_exchanges: 5,
            screener: CrisisScreener::default(),
            exercises: ExerciseTable::default(),
        }
    }
}

/// Identifies one outstanding remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the wizard is waiting on while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    OpeningPrompt,
    FirstQuestion,
    FollowUp,
    Reflection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    IntensitySelect,
    /// Static mode: one bank question at a time. The bucket is fixed on entry.
    Questions {
        bucket: &'static [Question],
        index: usize,
    },
    /// Conversational mode: waiting for the user to answer `question`
    Conversation { question: String },
    Loading { request: RequestId, call: PendingCall },
    FreeText,
    CrisisResources,
    Reflect,
    Exercise(ExerciseKind),
    Done,
}

impl WizardStep {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::IntensitySelect => "intensity_select",
            WizardStep::Questions { .. } | WizardStep::Conversation { .. } => "question_collection",
            WizardStep::Loading { .. } => "loading",
            WizardStep::FreeText => "free_text",
            WizardStep::CrisisResources => "crisis_resources",
            WizardStep::Reflect => "reflect",
            WizardStep::Exercise(_) => "exercise",
            WizardStep::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    SetIntensity(u8),
    Next,
    /// Chosen option label (static) or typed answer (conversational)
    Answer(String),
    Skip,
    Back,
    EditText(String),
    ImSafe,
    TryExercise,
    ExerciseFinished,
    Done,
    /// Abandon the session from any step
    Exit,
    Settled {
        request: RequestId,
        outcome: RemoteOutcome,
    },
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SetIntensity(_) => "set_intensity",
            WizardEvent::Next => "next",
            WizardEvent::Answer(_) => "answer",
            WizardEvent::Skip => "skip",
            WizardEvent::Back => "back",
            WizardEvent::EditText(_) => "edit_text",
            WizardEvent::ImSafe => "im_safe",
            WizardEvent::TryExercise => "try_exercise",
            WizardEvent::ExerciseFinished => "exercise_finished",
            WizardEvent::Done => "done",
            WizardEvent::Exit => "exit",
            WizardEvent::Settled { .. } => "settled",
        }
    }
}

/// Side effects the caller must carry out after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Call { request: RequestId, call: RemoteRequest },
    StartExercise(ExerciseKind),
    /// The session is over. `completed` is false when it was abandoned.
    Finished { completed: bool },
}

/// Why an event was not applied. The wizard is unchanged when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("'{event}' is not available at step '{step}'")]
    NotAvailable { step: &'static str, event: &'static str },

    #[error("Journal entry needs at least {min} characters")]
    TooShort { min: usize },

    #[error("'{0}' is not one of the offered options")]
    UnknownOption(String),

    #[error("Answer is empty")]
    EmptyAnswer,

    #[error("Response for {0} arrived after it was superseded")]
    StaleResponse(RequestId),

    #[error("Response does not match the pending call")]
    UnexpectedOutcome,

    #[error("Session has ended")]
    Ended,
}

/// The journaling wizard: one session's state plus where it is in the flow
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    session: JournalSession,
    step: WizardStep,
    policy: WizardPolicy,
    next_request: u64,
}

/// Pure transition: consume the wizard and an event, return the next wizard
/// and the effects to perform (or why the event was rejected).
pub fn transition(mut wizard: Wizard, event: WizardEvent) -> (Wizard, Result<Vec<Effect>, Rejection>) {
    let result = wizard.apply(event);
    (wizard, result)
}

impl Wizard {
    pub fn new(emotion: Emotion, policy: WizardPolicy) -> Self {
        Self {
            session: JournalSession::new(emotion),
            step: WizardStep::IntensitySelect,
            policy,
            next_request: 0,
        }
    }

    pub fn session(&self) -> &JournalSession {
        &self.session
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn policy(&self) -> &WizardPolicy {
        &self.policy
    }

    pub fn is_done(&self) -> bool {
        self.step == WizardStep::Done
    }

    /// The call the wizard is waiting on, if any
    pub fn pending(&self) -> Option<(RequestId, PendingCall)> {
        match self.step {
            WizardStep::Loading { request, call } => Some((request, call)),
            _ => None,
        }
    }

    /// Current bank question with its 1-based position and the bucket size
    pub fn current_question(&self) -> Option<(usize, usize, &'static Question)> {
        match &self.step {
            WizardStep::Questions { bucket, index } => bucket.get(*index).map(|q| (index + 1, bucket.len(), q)),
            _ => None,
        }
    }

    /// Whether "Complete Check-in" is enabled
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::FreeText
            && !self.session.crisis()
            && self.session.body().chars().count() >= self.policy.min_journal_chars
    }

    /// Apply an event in place. On rejection nothing changes.
    pub fn apply(&mut self, event: WizardEvent) -> Result<Vec<Effect>, Rejection> {
        let from = self.step.name();
        let name = event.name();
        let result = self.dispatch(event);
        match &result {
            Ok(_) => tracing::debug!(from, to = self.step.name(), event = name, "wizard transition"),
            Err(e) => tracing::debug!(step = from, event = name, reason = %e, "wizard event rejected"),
        }
        result
    }

    fn dispatch(&mut self, event: WizardEvent) -> Result<Vec<Effect>, Rejection> {
        if self.step == WizardStep::Done {
            return Err(Rejection::Ended);
        }
        if event == WizardEvent::Exit {
            self.step = WizardStep::Done;
            return Ok(vec![Effect::Finished { completed: false }]);
        }

        let step = self.step.clone();
        match (step, event) {
            (WizardStep::IntensitySelect, WizardEvent::SetIntensity(value)) => {
                self.session.set_intensity(Intensity::new(value));
                Ok(vec![])
            }
            (WizardStep::IntensitySelect, WizardEvent::Next) => Ok(self.enter_questions()),

            (WizardStep::Questions { bucket, index }, WizardEvent::Answer(label)) => {
                let question = &bucket[index];
                if !question.has_option(&label) {
                    return Err(Rejection::UnknownOption(label));
                }
                self.session.push_answer(Answer {
                    question_id: Some(question.id.to_string()),
                    question: question.prompt.to_string(),
                    answer: label,
                });
                Ok(self.next_bank_question(bucket, index + 1))
            }
            (WizardStep::Questions { .. }, WizardEvent::Skip) => Ok(self.request_opening_prompt()),

            (WizardStep::Conversation { question }, WizardEvent::Answer(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(Rejection::EmptyAnswer);
                }
                self.session.push_answer(Answer {
                    question_id: None,
                    question,
                    answer: text.to_string(),
                });
                if self.session.answers().len() >= self.policy.max_exchanges {
                    self.step = WizardStep::FreeText;
                    return Ok(vec![]);
                }
                Ok(self.request(PendingCall::FollowUp))
            }
            (WizardStep::Conversation { .. }, WizardEvent::Skip) => {
                self.step = WizardStep::FreeText;
                Ok(vec![])
            }

            // a question still loading is abandoned; its response arrives stale
            (
                WizardStep::Loading {
                    call: PendingCall::FirstQuestion | PendingCall::FollowUp,
                    ..
                },
                WizardEvent::Skip,
            ) => {
                self.step = WizardStep::FreeText;
                Ok(vec![])
            }

            (
                WizardStep::Questions { .. }
                | WizardStep::Conversation { .. }
                | WizardStep::Loading {
                    call: PendingCall::FirstQuestion | PendingCall::FollowUp,
                    ..
                },
                WizardEvent::Back,
            ) => {
                self.step = WizardStep::IntensitySelect;
                Ok(vec![])
            }

            (WizardStep::Loading { request, call }, WizardEvent::Settled { request: got, outcome }) => {
                if got != request {
                    return Err(Rejection::StaleResponse(got));
                }
                self.settle(call, outcome)
            }

            (WizardStep::FreeText, WizardEvent::EditText(text)) => {
                let crisis = self.policy.screener.screen(&text);
                self.session.set_body(text, crisis);
                Ok(vec![])
            }
            (WizardStep::FreeText, WizardEvent::Next) => {
                if self.session.crisis() {
                    self.step = WizardStep::CrisisResources;
                    return Ok(vec![]);
                }
                if !self.can_submit() {
                    return Err(Rejection::TooShort {
                        min: self.policy.min_journal_chars,
                    });
                }
                Ok(self.request(PendingCall::Reflection))
            }

            (WizardStep::CrisisResources, WizardEvent::ImSafe) => {
                self.session.clear_crisis();
                self.step = WizardStep::FreeText;
                Ok(vec![])
            }

            (WizardStep::Reflect, WizardEvent::TryExercise) => {
                let kind = exercise_for(self.session.emotion(), &self.policy.exercises);
                self.step = WizardStep::Exercise(kind);
                Ok(vec![Effect::StartExercise(kind)])
            }
            (WizardStep::Reflect, WizardEvent::Done)
            | (WizardStep::Exercise(_), WizardEvent::ExerciseFinished | WizardEvent::Done) => {
                self.step = WizardStep::Done;
                Ok(vec![Effect::Finished { completed: true }])
            }

            (step, event) => Err(Rejection::NotAvailable {
                step: step.name(),
                event: event.name(),
            }),
        }
    }

    fn enter_questions(&mut self) -> Vec<Effect> {
        match self.policy.mode {
            QuestionMode::Static => {
                let bucket = questions_for(self.session.emotion(), self.session.band());
                self.next_bank_question(bucket, 0)
            }
            QuestionMode::Conversational => {
                let asked = self.session.answers().len();
                if asked >= self.policy.max_exchanges {
                    self.step = WizardStep::FreeText;
                    vec![]
                } else if asked == 0 {
                    self.request(PendingCall::FirstQuestion)
                } else {
                    self.request(PendingCall::FollowUp)
                }
            }
        }
    }

    /// Move to the first unanswered bank question at or after `from`
    fn next_bank_question(&mut self, bucket: &'static [Question], from: usize) -> Vec<Effect> {
        let next = (from..bucket.len()).find(|&i| !self.session.answers().answered(bucket[i].id));
        match next {
            Some(index) => {
                self.step = WizardStep::Questions { bucket, index };
                vec![]
            }
            None => self.request_opening_prompt(),
        }
    }

    fn request_opening_prompt(&mut self) -> Vec<Effect> {
        self.request(PendingCall::OpeningPrompt)
    }

    fn request(&mut self, call: PendingCall) -> Vec<Effect> {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        let session = &self.session;
        let remote = match call {
            PendingCall::OpeningPrompt => RemoteRequest::OpeningPrompt {
                emotion: session.emotion(),
                intensity: session.intensity(),
                answers: session.answers().clone(),
            },
            PendingCall::FirstQuestion => RemoteRequest::OpenQuestion {
                emotion: session.emotion(),
                intensity: session.intensity(),
            },
            PendingCall::FollowUp => RemoteRequest::FollowUp {
                emotion: session.emotion(),
                intensity: session.intensity(),
                answers: session.answers().clone(),
            },
            PendingCall::Reflection => RemoteRequest::Reflect {
                emotion: session.emotion(),
                intensity: session.intensity(),
                answers: session.answers().clone(),
                text: session.body().to_string(),
            },
        };
        self.step = WizardStep::Loading { request, call };
        vec![Effect::Call { request, call: remote }]
    }

    fn settle(&mut self, call: PendingCall, outcome: RemoteOutcome) -> Result<Vec<Effect>, Rejection> {
        match (call, outcome) {
            (PendingCall::OpeningPrompt, RemoteOutcome::Prompt(prompt)) => {
                self.session.set_opening_prompt(prompt);
                self.step = WizardStep::FreeText;
            }
            (PendingCall::FirstQuestion | PendingCall::FollowUp, RemoteOutcome::Question(Some(question))) => {
                self.step = WizardStep::Conversation { question };
            }
            (PendingCall::FirstQuestion | PendingCall::FollowUp, RemoteOutcome::Question(None)) => {
                self.step = WizardStep::FreeText;
            }
            (PendingCall::Reflection, RemoteOutcome::Reflection(reflection)) => {
                self.session.set_reflection(reflection);
                self.step = WizardStep::Reflect;
            }
            _ => return Err(Rejection::UnexpectedOutcome),
        }
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::IntensityBand;
    use crate::remote::Reflection;

    fn wizard(emotion: Emotion, mode: QuestionMode) -> Wizard {
        Wizard::new(
            emotion,
            WizardPolicy {
                mode,
                ..WizardPolicy::default()
            },
        )
    }

    fn call_id(effects: &[Effect]) -> RequestId {
        match effects {
            [Effect::Call { request, .. }] => *request,
            other => panic!("expected a single call, got {:?}", other),
        }
    }

    fn settle(w: &mut Wizard, outcome: RemoteOutcome) -> Result<Vec<Effect>, Rejection> {
        let (request, _) = w.pending().expect("wizard should be loading");
        w.apply(WizardEvent::Settled { request, outcome })
    }

    #[test]
    fn test_starts_at_intensity_midpoint() {
        let w = wizard(Emotion::Sad, QuestionMode::Static);
        assert_eq!(w.step(), &WizardStep::IntensitySelect);
        assert_eq!(w.session().intensity().value(), 5);
    }

    #[test]
    fn test_static_bucket_fixed_at_entry() {
        let mut w = wizard(Emotion::Angry, QuestionMode::Static);
        w.apply(WizardEvent::SetIntensity(9)).unwrap();
        w.apply(WizardEvent::Next).unwrap();
        let (pos, total, q) = w.current_question().unwrap();
        assert_eq!((pos, total), (1, 5));
        assert_eq!(q.id, "h1");
        // intensity cannot change mid-bucket
        assert!(matches!(
            w.apply(WizardEvent::SetIntensity(1)),
            Err(Rejection::NotAvailable { .. })
        ));
    }

    #[test]
    fn test_static_answers_then_prompt() {
        let mut w = wizard(Emotion::Stressed, QuestionMode::Static);
        w.apply(WizardEvent::SetIntensity(2)).unwrap();
        w.apply(WizardEvent::Next).unwrap();

        let mut effects = vec![];
        let mut steps = 0;
        while let Some((_, _, q)) = w.current_question() {
            effects = w.apply(WizardEvent::Answer(q.options[0].to_string())).unwrap();
            steps += 1;
        }
        assert_eq!(steps, 5);
        assert_eq!(w.session().answers().len(), 5);
        match effects.as_slice() {
            [Effect::Call { call: RemoteRequest::OpeningPrompt { answers, .. }, .. }] => {
                assert_eq!(answers.len(), 5)
            }
            other => panic!("unexpected effects {:?}", other),
        }

        settle(&mut w, RemoteOutcome::Prompt("What is weighing on you?".into())).unwrap();
        assert_eq!(w.step(), &WizardStep::FreeText);
        assert_eq!(w.session().opening_prompt(), Some("What is weighing on you?"));
    }

    #[test]
    fn test_every_bucket_answered_before_prompt() {
        for emotion in Emotion::ALL {
            for (value, band) in [(2, IntensityBand::Low), (5, IntensityBand::Medium), (9, IntensityBand::High)] {
                let mut w = wizard(emotion, QuestionMode::Static);
                w.apply(WizardEvent::SetIntensity(value)).unwrap();
                w.apply(WizardEvent::Next).unwrap();

                let expected = questions_for(emotion, band).len();
                let mut answers = 0;
                let mut effects = vec![];
                while let Some((_, total, q)) = w.current_question() {
                    assert_eq!(total, expected, "{} {:?}", emotion, band);
                    effects = w.apply(WizardEvent::Answer(q.options[0].to_string())).unwrap();
                    answers += 1;
                    if answers < expected {
                        assert!(effects.is_empty(), "{} {:?}: call before last answer", emotion, band);
                    }
                }
                assert_eq!(answers, expected, "{} {:?}", emotion, band);
                assert!(
                    matches!(
                        effects.as_slice(),
                        [Effect::Call { call: RemoteRequest::OpeningPrompt { .. }, .. }]
                    ),
                    "{} {:?}: {:?}",
                    emotion,
                    band,
                    effects
                );
                assert!(matches!(w.pending(), Some((_, PendingCall::OpeningPrompt))));
            }
        }
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut w = wizard(Emotion::Joyful, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        let before = w.clone();
        assert_eq!(
            w.apply(WizardEvent::Answer("Nope".into())),
            Err(Rejection::UnknownOption("Nope".into()))
        );
        assert_eq!(w, before);
    }

    #[test]
    fn test_skip_requests_prompt() {
        let mut w = wizard(Emotion::Bored, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        let effects = w.apply(WizardEvent::Skip).unwrap();
        call_id(&effects);
        assert!(matches!(
            w.pending(),
            Some((_, PendingCall::OpeningPrompt))
        ));
    }

    #[test]
    fn test_back_resumes_at_unanswered_question() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        let (_, _, q) = w.current_question().unwrap();
        w.apply(WizardEvent::Answer(q.options[1].to_string())).unwrap();
        w.apply(WizardEvent::Back).unwrap();
        assert_eq!(w.step(), &WizardStep::IntensitySelect);
        assert_eq!(w.session().answers().len(), 1);

        w.apply(WizardEvent::Next).unwrap();
        let (pos, _, q) = w.current_question().unwrap();
        assert_eq!(pos, 2);
        assert_eq!(q.id, "m2");
    }

    #[test]
    fn test_free_text_minimum_length() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        settle(&mut w, RemoteOutcome::Prompt("p".into())).unwrap();

        w.apply(WizardEvent::EditText("abcd".into())).unwrap();
        assert!(!w.can_submit());
        assert_eq!(w.apply(WizardEvent::Next), Err(Rejection::TooShort { min: 5 }));
        assert_eq!(w.step(), &WizardStep::FreeText);

        w.apply(WizardEvent::EditText("abcde".into())).unwrap();
        assert!(w.can_submit());
        let effects = w.apply(WizardEvent::Next).unwrap();
        match effects.as_slice() {
            [Effect::Call { call: RemoteRequest::Reflect { text, .. }, .. }] => assert_eq!(text, "abcde"),
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_crisis_redirects_and_im_safe_returns() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        settle(&mut w, RemoteOutcome::Prompt("p".into())).unwrap();

        w.apply(WizardEvent::EditText("I just want to end it all".into())).unwrap();
        assert!(w.session().crisis());
        assert!(!w.can_submit());

        let effects = w.apply(WizardEvent::Next).unwrap();
        assert!(effects.is_empty(), "no reflection call while in crisis");
        assert_eq!(w.step(), &WizardStep::CrisisResources);

        assert!(w.apply(WizardEvent::Next).is_err());
        w.apply(WizardEvent::ImSafe).unwrap();
        assert_eq!(w.step(), &WizardStep::FreeText);
        assert_eq!(w.session().body(), "I just want to end it all");
        assert!(!w.session().crisis());

        // the next keystroke re-screens the full text
        w.apply(WizardEvent::EditText("I just want to end it all.".into())).unwrap();
        assert!(w.session().crisis());
    }

    #[test]
    fn test_short_crisis_text_still_redirects() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        settle(&mut w, RemoteOutcome::Prompt("p".into())).unwrap();
        w.apply(WizardEvent::EditText("die".into())).unwrap();
        w.apply(WizardEvent::Next).unwrap();
        assert_eq!(w.step(), &WizardStep::CrisisResources);
    }

    #[test]
    fn test_reflection_fallback_reaches_reflect() {
        let mut w = wizard(Emotion::Stressed, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        settle(&mut w, RemoteOutcome::Prompt("p".into())).unwrap();
        w.apply(WizardEvent::EditText("so much to do".into())).unwrap();
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Reflection(Reflection::fallback())).unwrap();
        assert_eq!(w.step(), &WizardStep::Reflect);
        assert_eq!(w.session().reflection(), Some(&Reflection::fallback()));

        let effects = w.apply(WizardEvent::TryExercise).unwrap();
        assert_eq!(effects, vec![Effect::StartExercise(ExerciseKind::Breathing)]);
        let effects = w.apply(WizardEvent::ExerciseFinished).unwrap();
        assert_eq!(effects, vec![Effect::Finished { completed: true }]);
        assert!(w.is_done());
        assert_eq!(w.apply(WizardEvent::Next), Err(Rejection::Ended));
    }

    #[test]
    fn test_done_from_reflect() {
        let mut w = wizard(Emotion::Joyful, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        settle(&mut w, RemoteOutcome::Prompt("p".into())).unwrap();
        w.apply(WizardEvent::EditText("good day".into())).unwrap();
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Reflection(Reflection::fallback())).unwrap();
        assert_eq!(
            w.apply(WizardEvent::Done).unwrap(),
            vec![Effect::Finished { completed: true }]
        );
    }

    #[test]
    fn test_stale_and_mismatched_responses() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        let id = call_id(&w.apply(WizardEvent::Skip).unwrap());

        let stale = RequestId(id.value() + 7);
        assert_eq!(
            w.apply(WizardEvent::Settled {
                request: stale,
                outcome: RemoteOutcome::Prompt("late".into()),
            }),
            Err(Rejection::StaleResponse(stale))
        );
        assert_eq!(
            w.apply(WizardEvent::Settled {
                request: id,
                outcome: RemoteOutcome::Question(None),
            }),
            Err(Rejection::UnexpectedOutcome)
        );
        assert!(w.pending().is_some());
    }

    #[test]
    fn test_conversation_bounded_to_max_exchanges() {
        let mut w = wizard(Emotion::Confused, QuestionMode::Conversational);
        let effects = w.apply(WizardEvent::Next).unwrap();
        assert!(matches!(
            effects.as_slice(),
            [Effect::Call { call: RemoteRequest::OpenQuestion { .. }, .. }]
        ));

        let mut calls = 1;
        for n in 0..5 {
            settle(&mut w, RemoteOutcome::Question(Some(format!("Question {}?", n)))).unwrap();
            let effects = w.apply(WizardEvent::Answer(format!("answer {}", n))).unwrap();
            if let [Effect::Call { call: RemoteRequest::FollowUp { answers, .. }, .. }] = effects.as_slice() {
                assert_eq!(answers.len(), n + 1);
                calls += 1;
            }
        }
        assert_eq!(calls, 5, "one opening question plus four follow-ups");
        assert_eq!(w.step(), &WizardStep::FreeText);
        assert_eq!(w.session().answers().len(), 5);
        assert_eq!(w.session().answers().last().unwrap().question, "Question 4?");
    }

    #[test]
    fn test_follow_up_failure_goes_to_free_text() {
        let mut w = wizard(Emotion::Confused, QuestionMode::Conversational);
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Question(Some("What's unclear?".into()))).unwrap();
        w.apply(WizardEvent::Answer("my job".into())).unwrap();
        settle(&mut w, RemoteOutcome::Question(None)).unwrap();
        assert_eq!(w.step(), &WizardStep::FreeText);
        assert_eq!(w.session().opening_prompt(), None);
    }

    #[test]
    fn test_conversation_skip_and_empty_answer() {
        let mut w = wizard(Emotion::Bored, QuestionMode::Conversational);
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Question(Some("What would be fun?".into()))).unwrap();
        assert_eq!(w.apply(WizardEvent::Answer("   ".into())), Err(Rejection::EmptyAnswer));
        let effects = w.apply(WizardEvent::Skip).unwrap();
        assert!(effects.is_empty());
        assert_eq!(w.step(), &WizardStep::FreeText);
    }

    #[test]
    fn test_skip_and_back_while_question_loads() {
        let mut w = wizard(Emotion::Stressed, QuestionMode::Conversational);
        let first = call_id(&w.apply(WizardEvent::Next).unwrap());
        assert_eq!(w.apply(WizardEvent::Back).unwrap(), vec![]);
        assert_eq!(w.step(), &WizardStep::IntensitySelect);
        assert_eq!(
            w.apply(WizardEvent::Settled {
                request: first,
                outcome: RemoteOutcome::Question(Some("late".into())),
            }),
            Err(Rejection::NotAvailable {
                step: "intensity_select",
                event: "settled",
            })
        );

        let second = call_id(&w.apply(WizardEvent::Next).unwrap());
        settle(&mut w, RemoteOutcome::Question(Some("What's pressing?".into()))).unwrap();
        let follow_up = call_id(&w.apply(WizardEvent::Answer("a".into())).unwrap());
        assert!(follow_up > second);
        assert_eq!(w.apply(WizardEvent::Skip).unwrap(), vec![]);
        assert_eq!(w.step(), &WizardStep::FreeText);
        assert_eq!(w.session().answers().len(), 1);
        assert!(w.apply(WizardEvent::Settled {
            request: follow_up,
            outcome: RemoteOutcome::Question(Some("late".into())),
        })
        .is_err());
        assert_eq!(w.step(), &WizardStep::FreeText);
    }

    #[test]
    fn test_back_then_next_while_loading_gets_fresh_request() {
        let mut w = wizard(Emotion::Angry, QuestionMode::Conversational);
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Question(Some("What happened?".into()))).unwrap();
        let stale = call_id(&w.apply(WizardEvent::Answer("traffic".into())).unwrap());
        w.apply(WizardEvent::Back).unwrap();
        let fresh = call_id(&w.apply(WizardEvent::Next).unwrap());
        assert_ne!(stale, fresh);
        assert_eq!(
            w.apply(WizardEvent::Settled {
                request: stale,
                outcome: RemoteOutcome::Question(Some("late".into())),
            }),
            Err(Rejection::StaleResponse(stale))
        );
        settle(&mut w, RemoteOutcome::Question(Some("How did you react?".into()))).unwrap();
        assert_eq!(
            w.step(),
            &WizardStep::Conversation {
                question: "How did you react?".into()
            }
        );
    }

    #[test]
    fn test_prompt_loading_ignores_skip_and_back() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Static);
        w.apply(WizardEvent::Next).unwrap();
        w.apply(WizardEvent::Skip).unwrap();
        assert!(w.apply(WizardEvent::Skip).is_err());
        assert!(w.apply(WizardEvent::Back).is_err());
        assert!(matches!(w.pending(), Some((_, PendingCall::OpeningPrompt))));
    }

    #[test]
    fn test_conversation_back_then_next_follows_up() {
        let mut w = wizard(Emotion::Angry, QuestionMode::Conversational);
        w.apply(WizardEvent::Next).unwrap();
        settle(&mut w, RemoteOutcome::Question(Some("What happened?".into()))).unwrap();
        w.apply(WizardEvent::Answer("traffic".into())).unwrap();
        settle(&mut w, RemoteOutcome::Question(Some("How did you react?".into()))).unwrap();
        w.apply(WizardEvent::Back).unwrap();
        let effects = w.apply(WizardEvent::Next).unwrap();
        assert!(matches!(
            effects.as_slice(),
            [Effect::Call { call: RemoteRequest::FollowUp { .. }, .. }]
        ));
    }

    #[test]
    fn test_exit_abandons_from_loading() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Conversational);
        let id = call_id(&w.apply(WizardEvent::Next).unwrap());
        assert_eq!(
            w.apply(WizardEvent::Exit).unwrap(),
            vec![Effect::Finished { completed: false }]
        );
        // a response arriving afterwards is ignored
        assert_eq!(
            w.apply(WizardEvent::Settled {
                request: id,
                outcome: RemoteOutcome::Question(Some("late".into())),
            }),
            Err(Rejection::Ended)
        );
    }

    #[test]
    fn test_pure_transition() {
        let w = wizard(Emotion::Sad, QuestionMode::Static);
        let (w, result) = transition(w, WizardEvent::SetIntensity(8));
        assert!(result.unwrap().is_empty());
        let (w, result) = transition(w, WizardEvent::ImSafe);
        assert!(result.is_err());
        assert_eq!(w.session().intensity().value(), 8);
        assert_eq!(w.step(), &WizardStep::IntensitySelect);
    }

    #[test]
    fn test_request_ids_increase() {
        let mut w = wizard(Emotion::Sad, QuestionMode::Conversational);
        let first = call_id(&w.apply(WizardEvent::Next).unwrap());
        settle(&mut w, RemoteOutcome::Question(Some("q".into()))).unwrap();
        let second = call_id(&w.apply(WizardEvent::Answer("a".into())).unwrap());
        assert!(second > first);
    }
}
