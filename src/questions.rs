//! Static question bank: for each emotion and intensity band, an ordered list of
//! multiple-choice questions shown before free writing.

use crate::emotion::{Emotion, IntensityBand};

/// A multiple-choice prompt. Ids are unique within one emotion/band bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

impl Question {
    pub fn has_option(&self, label: &str) -> bool {
        self.options.iter().any(|o| *o == label)
    }
}

const fn q(id: &'static str, prompt: &'static str, options: &'static [&'static str]) -> Question {
    Question { id, prompt, options }
}

/// Questions for an emotion at a given band, in presentation order.
pub fn questions_for(emotion: Emotion, band: IntensityBand) -> &'static [Question] {
    use Emotion::*;
    use IntensityBand::*;

    match (emotion, band) {
        (Sad, Low) => SAD_LOW,
        (Sad, Medium) => SAD_MEDIUM,
        (Sad, High) => SAD_HIGH,
        (Joyful, Low) => JOYFUL_LOW,
        (Joyful, Medium) => JOYFUL_MEDIUM,
        (Joyful, High) => JOYFUL_HIGH,
        (Confused, Low) => CONFUSED_LOW,
        (Confused, Medium) => CONFUSED_MEDIUM,
        (Confused, High) => CONFUSED_HIGH,
        (Bored, Low) => BORED_LOW,
        (Bored, Medium) => BORED_MEDIUM,
        (Bored, High) => BORED_HIGH,
        (Stressed, Low) => STRESSED_LOW,
        (Stressed, Medium) => STRESSED_MEDIUM,
        (Stressed, High) => STRESSED_HIGH,
        (Angry, Low) => ANGRY_LOW,
        (Angry, Medium) => ANGRY_MEDIUM,
        (Angry, High) => ANGRY_HIGH,
    }
}

const SAD_LOW: &[Question] = &[
    q("l1", "You're feeling a bit down. Is it linked to a specific event?", &["Yes, something happened", "No, just a mood", "Not sure yet"]),
    q("l2", "How long has this feeling been lingering?", &["Just started", "Since this morning", "A few days", "A while"]),
    q("l3", "Do you feel low energy physically?", &["Yes, tired", "A little bit", "No, physically fine"]),
    q("l4", "Is there something you're missing right now?", &["A person", "Comfort", "Clarity", "Nothing specific"]),
    q("l5", "What usually helps when you feel like this?", &["Rest", "Talking", "Distraction", "Time"]),
];

const SAD_MEDIUM: &[Question] = &[
    q("m1", "This sadness feels present. Is it regarding...", &["Work/School", "Relationship", "Self-image", "Life in general"]),
    q("m2", "Do you feel like crying?", &["Yes, need to let it out", "Maybe later", "No, just heavy", "Already have"]),
    q("m3", "Are you tending to isolate yourself?", &["Yes, want to be alone", "No, seeking company", "Forced isolation", "Unsure"]),
    q("m4", "How is your appetite affected?", &["Not hungry", "Eating for comfort", "Normal", "Forgot to eat"]),
    q("m5", "Can you pinpoint the main emotion under the sadness?", &["Disappointment", "Loneliness", "Regret", "Exhaustion"]),
];

const SAD_HIGH: &[Question] = &[
    q("h1", "It seems you are carrying a heavy weight. Are you safe right now?", &["Yes, I am safe", "I need help", "Not sure"]),
    q("h2", "How does this sadness feel in your body?", &["Crushing weight", "Empty/Hollow", "Numbness", "Sharp pain"]),
    q("h3", "Have you been able to sleep?", &["Too much sleep", "Insomnia", "Restless", "Normal"]),
    q("h4", "Do you feel hopeless about the future?", &["A little", "Very much", "No, just the present", "It comes and goes"]),
    q("h5", "Is there anyone you can trust to talk to right now?", &["Yes, family/friend", "Therapist", "No one", "I prefer writing"]),
];

const JOYFUL_LOW: &[Question] = &[
    q("l1", "A nice spark of joy! What caused it?", &["A small win", "Good weather", "A text/call", "Just woke up happy"]),
    q("l2", "How does it show on your face?", &["Small smile", "Relaxed eyes", "Inner glow", "Grinning"]),
    q("l3", "Do you want to share this feeling?", &["Yes, with friends", "Keeping it to myself", "Maybe later"]),
    q("l4", "Is this feeling related to relief?", &["Yes, stress ended", "No, pure addition", "A mix of both"]),
    q("l5", "What's one color that matches this mood?", &["Yellow", "Pink", "Sky Blue", "Green"]),
];

const JOYFUL_MEDIUM: &[Question] = &[
    q("m1", "You're feeling good! Who helped create this?", &["Just me", "Partner/Friend", "Family", "Colleagues"]),
    q("m2", "Is this joy connected to an achievement?", &["Yes, big accomplishment", "Progress made", "No, situational", "Surprise luck"]),
    q("m3", "How is your energy level?", &["Buzzing", "Steady & Warm", "Playful", "Content"]),
    q("m4", "Does this make you feel motivated?", &["Yes, very", "A little", "Just want to relax", "Want to celebrate"]),
    q("m5", "Are you grateful for something specific?", &["A person", "An opportunity", "My health", "Everything"]),
];

const JOYFUL_HIGH: &[Question] = &[
    q("h1", "Incredible joy! Do you feel like...", &["Dancing", "Shouting", "Crying happy tears", "Hugging everyone"]),
    q("h2", "Is this a milestone moment?", &["Life changing", "Yearly highlight", "Long awaited", "Spontaneous bliss"]),
    q("h3", "Where do you feel it most?", &["Chest/Heart", "Head/Mind", "Hands/Feet", "Whole body"]),
    q("h4", "How long have you waited for this?", &["A long time", "Unexpected surprise", "Worked hard for it", "It just happened"]),
    q("h5", "How will you remember this day?", &["Photos", "Journaling", "Celebration", "Quiet reflection"]),
];

const CONFUSED_LOW: &[Question] = &[
    q("l1", "A bit foggy? What's the general topic?", &["Schedule", "Small decision", "Social interaction", "Random thought"]),
    q("l2", "Does it feel like you forgot something?", &["Yes", "No", "Maybe"]),
    q("l3", "Are you tired?", &["Yes, sleepy", "Mentally drained", "No, awake"]),
    q("l4", "Can you seek clarification?", &["Yes, can ask someone", "Need to Google it", "Just need time", "No clear answer"]),
    q("l5", "Is this bothering you or just odd?", &["Mildly annoying", "Just weird", "Curious", "Indifferent"]),
];

const CONFUSED_MEDIUM: &[Question] = &[
    q("m1", "You seem torn. Is this a dilemma?", &["Two choices", "Too many choices", "No good choice", "Moral conflict"]),
    q("m2", "Who is involved in this confusion?", &["Just me", "Partner", "Family", "Boss/Teacher"]),
    q("m3", "Is your gut telling you something?", &["Yes, but ignoring it", "Silence", "Conflicting signals", "Fear is louder"]),
    q("m4", "Do you feel misunderstood?", &["Yes", "No", "I don't understand myself"]),
    q("m5", "What information are you missing?", &["Facts", "Others' feelings", "Future outcome", "My own preference"]),
];

const CONFUSED_HIGH: &[Question] = &[
    q("h1", "Deep confusion. Do you feel lost?", &["Completely lost", "Stuck in a loop", "Spinning out", "Paralyzed"]),
    q("h2", "Is this about your identity or path?", &["Career", "Identity/Self", "Relationship status", "Life purpose"]),
    q("h3", "Does the confusion feel physical?", &["Dizziness", "Headache", "Nausea", "Disassociation"]),
    q("h4", "Are you overwhelmed by advice?", &["Too many opinions", "No one helps", "Conflicting advice", "Scared to ask"]),
    q("h5", "What's the worst case if you pick wrong?", &["Failure", "Regret", "Hurting someone", "Unknown"]),
];

const BORED_LOW: &[Question] = &[
    q("l1", "Just a lull in the day?", &["Yes, routine", "Waiting for something", "Procrastinating", "Just woke up"]),
    q("l2", "Do you have energy to do something?", &["Yes, but what?", "No, lazy", "Mental energy only"]),
    q("l3", "Is your phone making it worse?", &["Yes, doomscrolling", "No, it helps", "Not using it"]),
    q("l4", "What would happen if you did nothing?", &["It's fine", "I'd feel guilty", "I'd fall asleep"]),
    q("l5", "Are you avoiding a task?", &["Yes, chores", "Yes, work", "No, truly free"]),
];

const BORED_MEDIUM: &[Question] = &[
    q("m1", "This feels deeper than waiting. Is it...", &["Lack of purpose", "Repetitive routine", "Loneliness", "Burnout"]),
    q("m2", "Does anything seem appealing?", &["Food", "TV/Games", "Going out", "Nothing really"]),
    q("m3", "Are you stuck in a place you don't like?", &["Yes, physically", "Yes, mentally", "No, just bored"]),
    q("m4", "Do you feel under-stimulated?", &["Brain needs challenge", "Body needs movement", "Heart needs connection"]),
    q("m5", "When was the last time you had fun?", &["Yesterday", "Last week", "Can't remember", "A while ago"]),
];

const BORED_HIGH: &[Question] = &[
    q("h1", "This boredom feels painful. Is it apathy?", &["Yes, nothing matters", "I want to care but can't", "It feels empty", "Just restless"]),
    q("h2", "Are you feeling trapped?", &["Yes, in life", "Yes, in this room", "By expectations", "By my mind"]),
    q("h3", "Do you feel disconnected from others?", &["Yes, invisible", "No, just uninterested", "They seem boring too"]),
    q("h4", "Is this a sign you need a big change?", &["Yes, new job", "Yes, new city", "Yes, new hobby", "Maybe"]),
    q("h5", "What's the smallest step you could take?", &["Stand up", "Drink water", "Open a window", "Text someone"]),
];

const STRESSED_LOW: &[Question] = &[
    q("l1", "A bit of pressure. What's the source?", &["To-do list", "Running late", "Small conflict", "Upcoming plan"]),
    q("l2", "Is it manageable?", &["Yes, just annoying", "Will pass soon", "Need to focus", "Could get worse"]),
    q("l3", "Where is the tension?", &["Shoulders", "Jaw", "Stomach", "Mind"]),
    q("l4", "Did you take a break recently?", &["Yes", "No", "Can't right now"]),
    q("l5", "Is this good stress (excitement)?", &["A little bit", "No, just stress", "Anticipation"]),
];

const STRESSED_MEDIUM: &[Question] = &[
    q("m1", "The pressure is rising. Is it deadlines?", &["Yes, work/school", "Financial", "Social expectation", "Internal pressure"]),
    q("m2", "Are you multitasking?", &["Yes, too much", "Trying to", "No, hyper-focused", "Frozen"]),
    q("m3", "How is your breathing?", &["Shallow", "Fast", "Holding it", "Normal"]),
    q("m4", "Are you being hard on yourself?", &["Yes, perfectionist", "Feeling inadequate", "Just realistic", "No"]),
    q("m5", "What can be dropped from the list?", &["One task", "Social event", "Chore", "Nothing"]),
];

const STRESSED_HIGH: &[Question] = &[
    q("h1", "You seem overwhelmed. Are you nearing burnout?", &["Yes, fried", "Close to breaking", "Adrenaline only", "Unsure"]),
    q("h2", "Is your body sounding an alarm?", &["Migraine", "Panic attacks", "Insomnia", "Digestive issues"]),
    q("h3", "Do you feel like you have control?", &["None at all", "Slipping away", "Only over small things", "Chaos"]),
    q("h4", "Are you neglecting basic needs?", &["Sleep", "Food", "Hygiene", "All of them"]),
    q("h5", "What is the very next thing you must do?", &["Just breathe", "Ask for help", "Finish one thing", "Rest"]),
];

const ANGRY_LOW: &[Question] = &[
    q("l1", "Something annoyed you. Was it...", &["A rude comment", "A minor inconvenience", "Tech issue", "Traffic/Delay"]),
    q("l2", "Will this matter tomorrow?", &["Probably not", "Maybe", "No", "Yes"]),
    q("l3", "Are you hungry or tired?", &["Hungry (Hangry)", "Tired", "Both", "Neither"]),
    q("l4", "Did you express it?", &["Sighed", "Rolled eyes", "Kept it in", "Complained"]),
    q("l5", "Can you shake it off?", &["Yes, easily", "Need a minute", "It's sticking", "Trying to"]),
];

const ANGRY_MEDIUM: &[Question] = &[
    q("m1", "You're frustrated. Was a boundary crossed?", &["Yes, disrespect", "My time wasted", "Ignored", "Unfairness"]),
    q("m2", "Who is the target?", &["Partner/Family", "Colleague", "Stranger", "Myself"]),
    q("m3", "Do you feel hot or tense?", &["Face hot", "Fists clenched", "Chest tight", "Restless"]),
    q("m4", "Are you replaying the scene?", &["Yes, over and over", "Thinking of comebacks", "Trying to stop", "No"]),
    q("m5", "What do you want to do?", &["Vent/Rant", "Fix it", "Leave", "Confront"]),
];

const ANGRY_HIGH: &[Question] = &[
    q("h1", "This is rage. Do you feel explosive?", &["Yes, want to scream", "Want to break something", "Scary calm", "Shaking"]),
    q("h2", "Is this a buildup of many things?", &["Yes, straw that broke camel's back", "Years of this", "No, sudden event", "Betrayal"]),
    q("h3", "Do you feel unheard or powerless?", &["Unheard", "Powerless", "Disrespected", "Threatened"]),
    q("h4", "How can you safely release this energy?", &["Exercise/Run", "Scream into pillow", "Write angry letter", "Deep breathing"]),
    q("h5", "Is there a risk of hurting a relationship?", &["Yes, regret likely", "Don't care right now", "Trying to control it", "Maybe"]),
];
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BANDS: [IntensityBand; 3] = [IntensityBand::Low, IntensityBand::Medium, IntensityBand::High];

    #[test]
    fn test_every_bucket_is_populated() {
        for emotion in Emotion::ALL {
            for band in BANDS {
                let qs = questions_for(emotion, band);
                assert!(!qs.is_empty(), "{:?}/{:?} has no questions", emotion, band);
            }
        }
    }

    #[test]
    fn test_ids_unique_within_bucket() {
        for emotion in Emotion::ALL {
            for band in BANDS {
                let ids: HashSet<_> = questions_for(emotion, band).iter().map(|q| q.id).collect();
                assert_eq!(ids.len(), questions_for(emotion, band).len());
            }
        }
    }

    #[test]
    fn test_option_counts() {
        for emotion in Emotion::ALL {
            for band in BANDS {
                for q in questions_for(emotion, band) {
                    assert!(
                        (2..=4).contains(&q.options.len()),
                        "{} has {} options",
                        q.prompt,
                        q.options.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let a = questions_for(Emotion::Stressed, IntensityBand::High);
        let b = questions_for(Emotion::Stressed, IntensityBand::High);
        assert_eq!(a, b);
        assert_eq!(a[0].id, "h1");
        assert!(a[0].has_option("Yes, fried"));
        assert!(!a[0].has_option("Totally fine"));
    }
}
