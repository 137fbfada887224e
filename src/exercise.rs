//! Guided coping exercises shown after a reflection.
//!
//! Each exercise is a small state machine of its own. Which one runs is a pure
//! lookup from the session's emotion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::emotion::Emotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Breathing,
    Grounding,
    Gratitude,
    Comfort,
    Physical,
    Novelty,
}

impl ExerciseKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Breathing => "breathing",
            ExerciseKind::Grounding => "grounding",
            ExerciseKind::Gratitude => "gratitude",
            ExerciseKind::Comfort => "comfort",
            ExerciseKind::Physical => "physical",
            ExerciseKind::Novelty => "novelty",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Emotion → exercise lookup with a fallback for anything unmapped
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseTable {
    entries: HashMap<Emotion, ExerciseKind>,
    fallback: ExerciseKind,
}

impl ExerciseTable {
    /// A table with no entries; every lookup yields `fallback`
    pub fn empty(fallback: ExerciseKind) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn set(&mut self, emotion: Emotion, kind: ExerciseKind) {
        self.entries.insert(emotion, kind);
    }

    pub fn get(&self, emotion: Emotion) -> ExerciseKind {
        self.entries.get(&emotion).copied().unwrap_or(self.fallback)
    }
}

impl Default for ExerciseTable {
    fn default() -> Self {
        let mut table = Self::empty(ExerciseKind::Gratitude);
        table.set(Emotion::Stressed, ExerciseKind::Breathing);
        table.set(Emotion::Angry, ExerciseKind::Breathing);
        table.set(Emotion::Sad, ExerciseKind::Comfort);
        table.set(Emotion::Confused, ExerciseKind::Grounding);
        table.set(Emotion::Joyful, ExerciseKind::Gratitude);
        table.set(Emotion::Bored, ExerciseKind::Novelty);
        table
    }
}

/// Which exercise to offer after reflecting on `emotion`
pub fn exercise_for(emotion: Emotion, table: &ExerciseTable) -> ExerciseKind {
    table.get(emotion)
}

// === Breathing ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Ready,
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn cue(&self) -> &'static str {
        match self {
            BreathPhase::Ready => "Breathing Space",
            BreathPhase::Inhale => "Breathe In...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Breathe Out...",
        }
    }
}

/// Phase lengths for one breath cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingPattern {
    pub inhale: Duration,
    pub hold: Duration,
    pub exhale: Duration,
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self {
            inhale: Duration::from_secs(5),
            hold: Duration::from_secs(4),
            exhale: Duration::from_secs(5),
        }
    }
}

impl BreathingPattern {
    pub fn cycle(&self) -> Duration {
        self.inhale + self.hold + self.exhale
    }

    fn phase_len(&self, phase: BreathPhase) -> Duration {
        match phase {
            BreathPhase::Ready => Duration::ZERO,
            BreathPhase::Inhale => self.inhale,
            BreathPhase::Hold => self.hold,
            BreathPhase::Exhale => self.exhale,
        }
    }

    // inhale and exhale must be non-zero or tick() could spin forever
    fn normalized(self) -> Self {
        let min = Duration::from_millis(100);
        Self {
            inhale: self.inhale.max(min),
            hold: self.hold,
            exhale: self.exhale.max(min),
        }
    }
}

/// Selectable length for an open-ended breathing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLength {
    FiveMinutes,
    TenMinutes,
}

impl SessionLength {
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        match minutes {
            5 => Some(SessionLength::FiveMinutes),
            10 => Some(SessionLength::TenMinutes),
            _ => None,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            SessionLength::FiveMinutes => Duration::from_secs(5 * 60),
            SessionLength::TenMinutes => Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreathingGoal {
    Cycles(u32),
    Timed(Duration),
}

/// Inhale → Hold → Exhale, repeated until the goal is met or the user stops.
///
/// Time only moves through [`Breathing::tick`]; the caller owns the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Breathing {
    pattern: BreathingPattern,
    goal: BreathingGoal,
    phase: BreathPhase,
    phase_elapsed: Duration,
    elapsed: Duration,
    cycles: u32,
    running: bool,
    finished: bool,
}

impl Breathing {
    /// Ends by itself after `count` full cycles
    pub fn cycles(pattern: BreathingPattern, count: u32) -> Self {
        Self::with_goal(pattern, BreathingGoal::Cycles(count.max(1)))
    }

    /// Ends by itself once the session length has elapsed
    pub fn timed(pattern: BreathingPattern, length: SessionLength) -> Self {
        Self::with_goal(pattern, BreathingGoal::Timed(length.duration()))
    }

    fn with_goal(pattern: BreathingPattern, goal: BreathingGoal) -> Self {
        Self {
            pattern: pattern.normalized(),
            goal,
            phase: BreathPhase::Ready,
            phase_elapsed: Duration::ZERO,
            elapsed: Duration::ZERO,
            cycles: 0,
            running: false,
            finished: false,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Completed cycles
    pub fn completed_cycles(&self) -> u32 {
        self.cycles
    }

    /// Cycles the session is expected to take
    pub fn target_cycles(&self) -> u32 {
        match self.goal {
            BreathingGoal::Cycles(n) => n,
            BreathingGoal::Timed(total) => {
                let cycle = self.pattern.cycle().as_millis().max(1);
                (total.as_millis() / cycle) as u32
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time left in a timed session
    pub fn remaining(&self) -> Option<Duration> {
        match self.goal {
            BreathingGoal::Timed(total) => Some(total.saturating_sub(self.elapsed)),
            BreathingGoal::Cycles(_) => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// How long the current phase lasts
    pub fn phase_duration(&self) -> Duration {
        self.pattern.phase_len(self.phase)
    }

    pub fn start(&mut self) {
        if self.finished {
            return;
        }
        if self.phase == BreathPhase::Ready {
            self.phase = BreathPhase::Inhale;
            self.phase_elapsed = Duration::ZERO;
        }
        self.running = true;
    }

    /// Stop the clock without losing the phase
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if self.phase != BreathPhase::Ready && !self.finished {
            self.running = true;
        }
    }

    /// Back to the initial phase with no time elapsed
    pub fn reset(&mut self) {
        self.phase = BreathPhase::Ready;
        self.phase_elapsed = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.cycles = 0;
        self.running = false;
        self.finished = false;
    }

    /// User ended the session early
    pub fn end(&mut self) {
        self.running = false;
        self.finished = true;
    }

    /// Advance the clock. Returns true if the phase changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running || self.finished {
            return false;
        }

        let before = (self.phase, self.cycles);
        self.elapsed += dt;
        self.phase_elapsed += dt;

        while self.phase_elapsed >= self.phase_duration() {
            self.phase_elapsed -= self.phase_duration();
            self.phase = match self.phase {
                BreathPhase::Ready | BreathPhase::Exhale => BreathPhase::Inhale,
                BreathPhase::Inhale => BreathPhase::Hold,
                BreathPhase::Hold => BreathPhase::Exhale,
            };
            if self.phase == BreathPhase::Inhale {
                self.cycles += 1;
                if let BreathingGoal::Cycles(n) = self.goal {
                    if self.cycles >= n {
                        self.phase = BreathPhase::Exhale;
                        self.finish();
                        return true;
                    }
                }
            }
        }

        if let BreathingGoal::Timed(total) = self.goal {
            if self.elapsed >= total {
                self.finish();
                return true;
            }
        }

        before != (self.phase, self.cycles)
    }

    fn finish(&mut self) {
        self.phase_elapsed = Duration::ZERO;
        self.running = false;
        self.finished = true;
    }
}

// === Grounding (5-4-3-2-1) ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundingStep {
    pub count: usize,
    pub label: &'static str,
}

pub const GROUNDING_STEPS: [GroundingStep; 5] = [
    GroundingStep { count: 5, label: "Things you can see" },
    GroundingStep { count: 4, label: "Things you can touch" },
    GroundingStep { count: 3, label: "Things you can hear" },
    GroundingStep { count: 2, label: "Things you can smell" },
    GroundingStep { count: 1, label: "Thing you can taste" },
];

/// Outcome of trying to move past a form step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Some entries are still blank
    Blocked,
    Next,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grounding {
    step: usize,
    entries: Vec<String>,
    finished: bool,
}

impl Default for Grounding {
    fn default() -> Self {
        Self::new()
    }
}

impl Grounding {
    pub fn new() -> Self {
        Self {
            step: 0,
            entries: vec![String::new(); GROUNDING_STEPS[0].count],
            finished: false,
        }
    }

    pub fn step(&self) -> &GroundingStep {
        &GROUNDING_STEPS[self.step]
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns false if `index` is outside the current step
    pub fn set_entry(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(slot) if !self.finished => {
                *slot = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn can_advance(&self) -> bool {
        !self.finished && self.entries.iter().all(|e| !e.trim().is_empty())
    }

    pub fn advance(&mut self) -> Advance {
        if !self.can_advance() {
            return Advance::Blocked;
        }
        if self.step + 1 < GROUNDING_STEPS.len() {
            self.step += 1;
            self.entries = vec![String::new(); GROUNDING_STEPS[self.step].count];
            Advance::Next
        } else {
            self.finished = true;
            Advance::Finished
        }
    }
}

// === Gratitude ===

pub const GRATITUDE_SLOTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gratitude {
    items: [String; GRATITUDE_SLOTS],
    finished: bool,
}

impl Gratitude {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn set_item(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(slot) if !self.finished => {
                *slot = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn can_complete(&self) -> bool {
        !self.finished && self.items.iter().all(|i| !i.trim().is_empty())
    }

    pub fn complete(&mut self) -> Advance {
        if !self.can_complete() {
            return Advance::Blocked;
        }
        self.finished = true;
        Advance::Finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

// === Single-screen exercises ===

/// Comfort, physical, and novelty exercises: one screen, one "done" action
#[derive(Debug, Clone, PartialEq)]
pub struct StaticExercise {
    kind: ExerciseKind,
    finished: bool,
}

impl StaticExercise {
    pub fn new(kind: ExerciseKind) -> Self {
        Self { kind, finished: false }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn complete(&mut self) -> Advance {
        self.finished = true;
        Advance::Finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// A running exercise of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Exercise {
    Breathing(Breathing),
    Grounding(Grounding),
    Gratitude(Gratitude),
    Static(StaticExercise),
}

impl Exercise {
    /// Fresh exercise for `kind`; breathing runs `cycles` cycles of `pattern`
    pub fn new(kind: ExerciseKind, pattern: BreathingPattern, cycles: u32) -> Self {
        match kind {
            ExerciseKind::Breathing => Exercise::Breathing(Breathing::cycles(pattern, cycles)),
            ExerciseKind::Grounding => Exercise::Grounding(Grounding::new()),
            ExerciseKind::Gratitude => Exercise::Gratitude(Gratitude::new()),
            ExerciseKind::Comfort | ExerciseKind::Physical | ExerciseKind::Novelty => {
                Exercise::Static(StaticExercise::new(kind))
            }
        }
    }

    pub fn for_emotion(emotion: Emotion, table: &ExerciseTable, pattern: BreathingPattern, cycles: u32) -> Self {
        Self::new(exercise_for(emotion, table), pattern, cycles)
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            Exercise::Breathing(_) => ExerciseKind::Breathing,
            Exercise::Grounding(_) => ExerciseKind::Grounding,
            Exercise::Gratitude(_) => ExerciseKind::Gratitude,
            Exercise::Static(s) => s.kind(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Exercise::Breathing(b) => b.is_finished(),
            Exercise::Grounding(g) => g.is_finished(),
            Exercise::Gratitude(g) => g.is_finished(),
            Exercise::Static(s) => s.is_finished(),
        }
    }
}
