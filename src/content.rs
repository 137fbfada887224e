//! Fixed copy: quotes, check-in question, safety resources, exercise text

use rand::seq::SliceRandom;
use rand::Rng;

use crate::exercise::ExerciseKind;

pub const QUOTES: [&str; 5] = [
    "Your feelings are valid, even the messy ones.",
    "Progress, not perfection.",
    "You're doing better than you think.",
    "It's okay to rest.",
    "You are enough, exactly as you are.",
];

pub const WELLNESS_QUESTIONS: [&str; 5] = [
    "Did you sleep well last night?",
    "Have you eaten today?",
    "Did you drink water recently?",
    "Have you moved your body?",
    "Did you talk to someone today?",
];

/// One of [`QUOTES`], chosen at random
pub fn daily_quote() -> &'static str {
    pick_quote(&mut rand::thread_rng())
}

pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

/// The home screen's quick wellness check
pub fn wellness_question() -> &'static str {
    WELLNESS_QUESTIONS[0]
}

pub struct CrisisResources {
    pub heading: &'static str,
    pub prompt: &'static str,
    pub contacts: &'static [&'static str],
    pub return_label: &'static str,
}

pub const CRISIS_RESOURCES: CrisisResources = CrisisResources {
    heading: "I'm worried about you.",
    prompt: "Please reach out:",
    contacts: &["Call 988 (US)"],
    return_label: "I am safe, go back",
};

pub const REFLECTION_INVITE: &str = "Let's try a quick exercise to help.";

/// Title, intro and body lines for an exercise screen
pub struct ExerciseCopy {
    pub title: &'static str,
    pub intro: &'static str,
    pub lines: &'static [&'static str],
}

pub fn exercise_copy(kind: ExerciseKind) -> ExerciseCopy {
    match kind {
        ExerciseKind::Breathing => ExerciseCopy {
            title: "Breathing Space",
            intro: "Follow the cues. Breathe in, hold, and breathe out slowly.",
            lines: &[],
        },
        ExerciseKind::Grounding => ExerciseCopy {
            title: "Grounding Technique",
            intro: "Bring yourself back to the present moment.",
            lines: &["Look around and name them mentally."],
        },
        ExerciseKind::Gratitude => ExerciseCopy {
            title: "Three Good Things",
            intro: "Shift your focus by listing three small things you are grateful for right now.",
            lines: &[],
        },
        ExerciseKind::Comfort => ExerciseCopy {
            title: "A Moment of Comfort",
            intro: "Sadness asks for gentleness, not fixing.",
            lines: &[
                "Wrap yourself in something warm.",
                "Make a hot drink and hold it with both hands.",
                "Place a hand on your chest and breathe slowly.",
                "Tell yourself what you would tell a friend who feels this way.",
            ],
        },
        ExerciseKind::Physical => ExerciseCopy {
            title: "Move It Out",
            intro: "Give the energy in your body somewhere to go.",
            lines: &[
                "Shake out your hands and arms for thirty seconds.",
                "Walk briskly, even if it is just around the room.",
                "Squeeze your fists tight for five seconds, then let go.",
                "Roll your shoulders back and unclench your jaw.",
            ],
        },
        ExerciseKind::Novelty => ExerciseCopy {
            title: "Try Something New",
            intro: "Boredom is curiosity waiting for a spark.",
            lines: &[
                "Take a different route on your next walk.",
                "Listen to a song from a genre you never play.",
                "Write down three questions you'd like answered today.",
                "Rearrange one small corner of your space.",
            ],
        },
    }
}
