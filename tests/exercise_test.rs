//! Exercise selection and the breathing clock

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use moodjot::config::Config;
use moodjot::emotion::Emotion;
use moodjot::exercise::{
    exercise_for, Breathing, Exercise, ExerciseKind, ExerciseTable, SessionLength,
};
use moodjot::timer::{run_breathing, BreathingControl};

#[test]
fn test_default_exercise_table() {
    let table = ExerciseTable::default();
    let expected = [
        (Emotion::Stressed, ExerciseKind::Breathing),
        (Emotion::Angry, ExerciseKind::Breathing),
        (Emotion::Sad, ExerciseKind::Comfort),
        (Emotion::Confused, ExerciseKind::Grounding),
        (Emotion::Joyful, ExerciseKind::Gratitude),
        (Emotion::Bored, ExerciseKind::Novelty),
    ];
    for (emotion, kind) in expected {
        assert_eq!(exercise_for(emotion, &table), kind, "{}", emotion);
    }
    assert_eq!(
        exercise_for(Emotion::Sad, &ExerciseTable::empty(ExerciseKind::Gratitude)),
        ExerciseKind::Gratitude
    );
}

#[test]
fn test_config_override_reaches_exercise() {
    let config = Config::from_toml("[exercises]\nsad = \"grounding\"\n").unwrap();
    let table = config.exercise_table().unwrap();
    let exercise = Exercise::for_emotion(Emotion::Sad, &table, config.breathing_pattern(), 3);
    assert_eq!(exercise.kind(), ExerciseKind::Grounding);
    assert!(!exercise.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_timed_session_runs_five_minutes() {
    let config = Config::default();
    let (_tx, rx) = mpsc::unbounded_channel::<BreathingControl>();
    let started = tokio::time::Instant::now();
    let done = run_breathing(
        Breathing::timed(config.breathing_pattern(), SessionLength::FiveMinutes),
        Duration::from_secs(1),
        rx,
        CancellationToken::new(),
        |_| {},
    )
    .await;
    assert!(done.is_finished());
    assert_eq!(done.remaining(), Some(Duration::ZERO));
    assert_eq!(started.elapsed(), Duration::from_secs(300));
    assert_eq!(done.completed_cycles(), 21);
}

#[tokio::test(start_paused = true)]
async fn test_reset_then_start_again() {
    let (tx, rx) = mpsc::unbounded_channel();
    let runner = tokio::spawn(run_breathing(
        Breathing::cycles(Default::default(), 1),
        Duration::from_secs(1),
        rx,
        CancellationToken::new(),
        |_| {},
    ));

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    tx.send(BreathingControl::Reset).unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!runner.is_finished());

    tx.send(BreathingControl::Start).unwrap();
    let started = tokio::time::Instant::now();
    let done = runner.await.unwrap();
    assert_eq!(done.completed_cycles(), 1);
    assert_eq!(done.elapsed(), Duration::from_secs(14));
    assert!(started.elapsed() >= Duration::from_secs(14));
}
