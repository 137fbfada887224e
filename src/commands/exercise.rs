//! Calming exercises: standalone and at the end of a check-in

use colored::Colorize;
use inquire::{Select, Text};
use std::io::BufRead;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use moodjot::config::Config;
use moodjot::content::exercise_copy;
use moodjot::error::{MoodjotError, Result};
use moodjot::exercise::{
    Advance, BreathPhase, Breathing, Exercise, ExerciseKind, Gratitude, Grounding, SessionLength, StaticExercise,
};
use moodjot::timer::{run_breathing, BreathingControl};

use crate::utils::{answered, require_tty};

/// Run one exercise outside a check-in
pub async fn cmd_exercise(kind: ExerciseKind, minutes: Option<String>) -> Result<()> {
    require_tty("exercise")?;
    let config = Config::load()?;

    let length = match minutes {
        Some(m) => {
            let parsed = m.parse::<u64>().ok().and_then(SessionLength::from_minutes);
            Some(parsed.ok_or_else(|| MoodjotError::ConfigError(format!("Unsupported session length: {} minutes", m)))?)
        }
        None => None,
    };
    if length.is_some() && kind != ExerciseKind::Breathing {
        println!("{}", "--minutes only applies to breathing; ignoring it.".dimmed());
    }

    run_exercise(kind, &config, length).await
}

/// Walk the user through `kind` until it completes or they leave
pub async fn run_exercise(kind: ExerciseKind, config: &Config, length: Option<SessionLength>) -> Result<()> {
    let copy = exercise_copy(kind);
    println!("\n{}", copy.title.bold());
    println!("{}\n", copy.intro.dimmed());

    let exercise = match (kind, length) {
        (ExerciseKind::Breathing, Some(length)) => {
            Exercise::Breathing(Breathing::timed(config.breathing_pattern(), length))
        }
        _ => Exercise::new(kind, config.breathing_pattern(), config.breathing.cycles),
    };

    let exercise = match exercise {
        Exercise::Breathing(breathing) => breathe(breathing).await?,
        Exercise::Grounding(grounding) => ground(grounding)?,
        Exercise::Gratitude(gratitude) => give_thanks(gratitude)?,
        Exercise::Static(single) => {
            for line in copy.lines {
                println!("  • {}", line);
            }
            println!();
            single_screen(single)?
        }
    };
    tracing::debug!(kind = %exercise.kind(), finished = exercise.is_finished(), "exercise ended");
    Ok(())
}

fn single_screen(mut exercise: StaticExercise) -> Result<Exercise> {
    if answered(Select::new("", vec!["Complete"]).prompt())?.is_ok() {
        exercise.complete();
    }
    Ok(Exercise::Static(exercise))
}

async fn breathe(breathing: Breathing) -> Result<Exercise> {
    println!(
        "{}",
        "Commands: p pause · r resume · 0 reset · s start · q end (then Enter). Ctrl-C also ends.".dimmed()
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let (tx, rx) = mpsc::unbounded_channel();
    // stdin blocks, so it gets a plain thread that dies with the process
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let control = match line.trim() {
                "p" => BreathingControl::Pause,
                "r" => BreathingControl::Resume,
                "0" => BreathingControl::Reset,
                "s" => BreathingControl::Start,
                "q" => BreathingControl::End,
                _ => continue,
            };
            if tx.send(control).is_err() {
                break;
            }
        }
    });

    let done = run_breathing(breathing, Duration::from_secs(1), rx, cancel, print_breath).await;
    signal_task.abort();

    println!(
        "\n{} {} cycle(s) in {}s\n",
        "Session complete.".green(),
        done.completed_cycles(),
        done.elapsed().as_secs()
    );
    Ok(Exercise::Breathing(done))
}

fn print_breath(b: &Breathing) {
    if b.is_finished() {
        return;
    }
    if !b.is_running() {
        let state = if b.phase() == BreathPhase::Ready { "reset" } else { "paused" };
        println!("  {}", format!("[{}]", state).dimmed());
        return;
    }
    let count = format!("{}/{}", b.completed_cycles() + 1, b.target_cycles());
    let cue = match b.phase() {
        BreathPhase::Inhale => b.phase().cue().cyan().bold(),
        BreathPhase::Hold => b.phase().cue().yellow().bold(),
        _ => b.phase().cue().blue().bold(),
    };
    match b.remaining() {
        Some(left) => println!(
            "  {:<16} {}  {}",
            cue,
            count.dimmed(),
            format!("{}:{:02} left", left.as_secs() / 60, left.as_secs() % 60).dimmed()
        ),
        None => println!("  {:<16} {}", cue, count.dimmed()),
    }
}

fn ground(mut grounding: Grounding) -> Result<Exercise> {
    loop {
        let step = *grounding.step();
        println!("{} {}", step.count.to_string().bold(), step.label);
        for i in 0..step.count {
            loop {
                let label = format!("  {}/{}:", i + 1, step.count);
                let Ok(text) = answered(Text::new(&label).prompt())? else {
                    return Ok(Exercise::Grounding(grounding));
                };
                if grounding.set_entry(i, text) && !grounding.entries()[i].trim().is_empty() {
                    break;
                }
            }
        }
        match grounding.advance() {
            Advance::Finished => break,
            Advance::Next => println!(),
            Advance::Blocked => continue,
        }
    }
    println!("\n{}\n", "You're here, right now.".green());
    Ok(Exercise::Grounding(grounding))
}

fn give_thanks(mut gratitude: Gratitude) -> Result<Exercise> {
    while !gratitude.can_complete() {
        for i in 0..gratitude.items().len() {
            if !gratitude.items()[i].trim().is_empty() {
                continue;
            }
            let Ok(text) = answered(Text::new(&format!("{}.", i + 1)).with_placeholder("I am grateful for...").prompt())?
            else {
                return Ok(Exercise::Gratitude(gratitude));
            };
            gratitude.set_item(i, text);
        }
    }
    gratitude.complete();
    println!("\n{}\n", "Three good things. Hold on to them.".green());
    Ok(Exercise::Gratitude(gratitude))
}
