//! Real-time clock for a breathing session

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::exercise::Breathing;

/// Commands from the UI to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingControl {
    Start,
    Pause,
    Resume,
    Reset,
    End,
}

/// Drive `breathing` with a `tick` interval until it finishes, is ended, or
/// `cancel` fires. `on_change` runs after the session starts, on every phase
/// change, and after each control command.
pub async fn run_breathing<F>(
    mut breathing: Breathing,
    tick: Duration,
    mut controls: mpsc::UnboundedReceiver<BreathingControl>,
    cancel: CancellationToken,
    mut on_change: F,
) -> Breathing
where
    F: FnMut(&Breathing),
{
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick completes immediately
    interval.tick().await;

    breathing.start();
    on_change(&breathing);

    while !breathing.is_finished() {
        tokio::select! {
            _ = cancel.cancelled() => {
                breathing.end();
                tracing::debug!(cycles = breathing.completed_cycles(), "breathing cancelled");
                break;
            }
            Some(control) = controls.recv() => {
                match control {
                    BreathingControl::Start => breathing.start(),
                    BreathingControl::Pause => breathing.pause(),
                    BreathingControl::Resume => breathing.resume(),
                    BreathingControl::Reset => breathing.reset(),
                    BreathingControl::End => breathing.end(),
                }
                interval.reset();
                on_change(&breathing);
            }
            _ = interval.tick() => {
                if breathing.tick(tick) {
                    on_change(&breathing);
                }
            }
        }
    }

    breathing
}
