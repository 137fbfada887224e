//! Config file discovery and the policy it produces

use moodjot::config::Config;
use moodjot::emotion::Emotion;
use moodjot::exercise::ExerciseKind;
use moodjot::wizard::QuestionMode;

#[test]
fn test_load_from_env_path() {
    let dir = std::env::temp_dir().join(format!("moodjot-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        r#"
question_mode = "conversational"
min_journal_chars = 12
max_exchanges = 3
crisis_keywords = ["Hopeless"]

[breathing]
hold_secs = 7

[exercises]
bored = "physical"
"#,
    )
    .unwrap();

    // the only test in this binary that touches the environment
    std::env::set_var("MOODJOT_CONFIG", &path);
    assert_eq!(Config::config_path().unwrap(), path);

    let config = Config::load().unwrap();
    let policy = config.wizard_policy().unwrap();
    assert_eq!(policy.mode, QuestionMode::Conversational);
    assert_eq!(policy.min_journal_chars, 12);
    assert_eq!(policy.max_exchanges, 3);
    assert!(policy.screener.screen("feeling hopeless today"));
    assert!(!policy.screener.screen("I want to end it"));
    assert_eq!(policy.exercises.get(Emotion::Bored), ExerciseKind::Physical);

    let pattern = config.breathing_pattern();
    assert_eq!(pattern.hold.as_secs(), 7);
    assert_eq!(pattern.inhale.as_secs(), 5);

    config.save().unwrap();
    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.max_exchanges, 3);

    std::env::remove_var("MOODJOT_CONFIG");
    let _ = std::fs::remove_dir_all(&dir);
}
