//! The interactive check-in

use colored::Colorize;
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};

use moodjot::config::Config;
use moodjot::content::{daily_quote, wellness_question, CRISIS_RESOURCES, REFLECTION_INVITE};
use moodjot::driver::SessionDriver;
use moodjot::emotion::{Emotion, Intensity};
use moodjot::entry::JournalEntry;
use moodjot::error::Result;
use moodjot::remote::ReflectionClient;
use moodjot::wizard::{Effect, PendingCall, QuestionMode, Rejection, Wizard, WizardEvent, WizardStep};

use super::exercise::run_exercise;
use crate::utils::{answered, require_tty, wrap, Leave};

const SKIP: &str = "Skip to writing";
const BACK: &str = "Back to intensity";

/// Run one journaling session from emotion choice to reflection
pub async fn cmd_journal(emotion: Option<Emotion>, mode: Option<QuestionMode>, json: bool) -> Result<()> {
    require_tty("journal")?;
    let config = Config::load()?;
    let mut policy = config.wizard_policy()?;
    if let Some(mode) = mode {
        policy.mode = mode;
    }

    let emotion = match emotion {
        Some(e) => e,
        None => match home_screen()? {
            Some(e) => e,
            None => return Ok(()),
        },
    };

    let client = ReflectionClient::gemini(config.remote.clone());
    let mut driver = SessionDriver::new(Wizard::new(emotion, policy), client, config.remote.timeout());
    tracing::debug!(%emotion, "starting check-in");

    let completed = loop {
        let step = driver.wizard().step().clone();
        let events = match step {
            WizardStep::Done => break false,
            WizardStep::Loading { call, .. } => {
                println!("{}", loading_text(call).dimmed());
                match driver.next_settled().await {
                    Some(Ok(_)) | None => {}
                    Some(Err(e)) => tracing::debug!(error = %e, "settled response rejected"),
                }
                continue;
            }
            WizardStep::Exercise(kind) => {
                run_exercise(kind, &config, None).await?;
                vec![WizardEvent::ExerciseFinished]
            }
            _ => prompt_for(&driver)?,
        };

        let mut finished = None;
        for event in events {
            match driver.send(event) {
                Ok(effects) => {
                    for effect in effects {
                        if let Effect::Finished { completed } = effect {
                            finished = Some(completed);
                        }
                    }
                }
                Err(Rejection::TooShort { min }) => {
                    println!("{}", format!("Write at least {} characters to continue.", min).yellow());
                }
                Err(e) => tracing::debug!(error = %e, "event rejected"),
            }
        }
        if let Some(completed) = finished {
            break completed;
        }
    };

    if !completed {
        driver.abandon();
        println!("{}", "Check-in discarded.".dimmed());
        return Ok(());
    }

    let entry = JournalEntry::from_session(driver.wizard().session());
    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "\n{} {} at {}\n",
            "Check-in complete:".green(),
            entry.emotion.label().bold(),
            entry.intensity
        );
    }
    Ok(())
}

/// Daily quote, quick wellness check, and the emotion picker
fn home_screen() -> Result<Option<Emotion>> {
    println!("\n  {}\n", format!("\u{201c}{}\u{201d}", daily_quote()).italic());
    println!("  {}\n", wellness_question().dimmed());

    let choice = answered(Select::new("How are you feeling right now?", Emotion::ALL.to_vec()).prompt())?;
    Ok(choice.ok())
}

fn loading_text(call: PendingCall) -> &'static str {
    match call {
        PendingCall::OpeningPrompt => "Finding a prompt for you...",
        PendingCall::FirstQuestion | PendingCall::FollowUp => "Thinking of a question...",
        PendingCall::Reflection => "Reflecting on what you wrote...",
    }
}

/// Ask the user for whatever the current step needs
fn prompt_for(driver: &SessionDriver) -> Result<Vec<WizardEvent>> {
    let wizard = driver.wizard();
    let session = wizard.session();

    match wizard.step() {
        WizardStep::IntensitySelect => {
            let prompt = format!("How {} are you? (1-10)", session.emotion().label().to_lowercase());
            let value = answered(
                CustomType::<u8>::new(&prompt)
                    .with_default(session.intensity().value())
                    .with_error_message("Enter a whole number from 1 to 10")
                    .with_validator(|v: &u8| -> std::result::Result<Validation, CustomUserError> {
                        if (Intensity::MIN..=Intensity::MAX).contains(v) {
                            Ok(Validation::Valid)
                        } else {
                            Ok(Validation::Invalid("Pick 1 to 10".into()))
                        }
                    })
                    .prompt(),
            )?;
            Ok(match value {
                Ok(v) => vec![WizardEvent::SetIntensity(v), WizardEvent::Next],
                Err(_) => vec![WizardEvent::Exit],
            })
        }

        WizardStep::Questions { .. } => {
            let Some((position, total, question)) = wizard.current_question() else {
                return Ok(vec![]);
            };
            let mut options: Vec<&str> = question.options.to_vec();
            options.push(SKIP);
            options.push(BACK);
            let message = format!("({}/{}) {}", position, total, question.prompt);
            Ok(match answered(Select::new(&message, options).prompt())? {
                Ok(SKIP) => vec![WizardEvent::Skip],
                Ok(BACK) | Err(Leave::Back) => vec![WizardEvent::Back],
                Ok(choice) => vec![WizardEvent::Answer(choice.to_string())],
                Err(Leave::Quit) => vec![WizardEvent::Exit],
            })
        }

        WizardStep::Conversation { question } => {
            let message = format!("({}/{}) {}", session.answers().len() + 1, wizard.policy().max_exchanges, question);
            let reply = answered(
                Text::new(&message)
                    .with_help_message("Enter an empty answer to start writing, Esc to go back")
                    .prompt(),
            )?;
            Ok(match reply {
                Ok(text) if text.trim().is_empty() => vec![WizardEvent::Skip],
                Ok(text) => vec![WizardEvent::Answer(text)],
                Err(Leave::Back) => vec![WizardEvent::Back],
                Err(Leave::Quit) => vec![WizardEvent::Exit],
            })
        }

        WizardStep::FreeText => {
            if let Some(prompt) = session.opening_prompt() {
                println!();
                for line in wrap(prompt, 70) {
                    println!("  {}", line.italic());
                }
            }
            let text = answered(
                Text::new("Journal:")
                    .with_initial_value(session.body())
                    .with_help_message("Enter to complete the check-in, Esc to leave")
                    .prompt(),
            )?;
            Ok(match text {
                Ok(text) => vec![WizardEvent::EditText(text), WizardEvent::Next],
                Err(_) => vec![WizardEvent::Exit],
            })
        }

        WizardStep::CrisisResources => {
            println!("\n  {}\n", CRISIS_RESOURCES.heading.red().bold());
            println!("  {}", CRISIS_RESOURCES.prompt.bold());
            for contact in CRISIS_RESOURCES.contacts {
                println!("    {}", contact.red());
            }
            println!();
            let choice = answered(Select::new("", vec![CRISIS_RESOURCES.return_label]).prompt())?;
            Ok(match choice {
                Ok(_) => vec![WizardEvent::ImSafe],
                Err(_) => vec![WizardEvent::Exit],
            })
        }

        WizardStep::Reflect => {
            if let Some(reflection) = session.reflection() {
                println!();
                for (heading, text) in reflection.sections() {
                    println!("  {}", heading.to_uppercase().cyan().bold());
                    for line in wrap(text, 70) {
                        println!("  {}", line);
                    }
                    println!();
                }
            }
            println!("  {}", REFLECTION_INVITE.dimmed());
            let choice = answered(Select::new("", vec!["Let's try this", "Maybe later"]).prompt())?;
            Ok(match choice {
                Ok("Let's try this") => vec![WizardEvent::TryExercise],
                _ => vec![WizardEvent::Done],
            })
        }

        WizardStep::Loading { .. } | WizardStep::Exercise(_) | WizardStep::Done => Ok(vec![]),
    }
}
