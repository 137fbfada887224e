//! Async driver that carries out the wizard's remote calls.
//!
//! Each [`Effect::Call`] runs on the blocking pool, raced against a timeout and
//! the session's cancellation token. Failures and timeouts settle with the
//! request's fallback so the flow always moves on. Responses that arrive for a
//! request the wizard is no longer waiting on are dropped.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::MoodjotError;
use crate::remote::{ReflectionClient, RemoteOutcome, RemoteRequest};
use crate::wizard::{Effect, Rejection, RequestId, Wizard, WizardEvent};

type Settled = (RequestId, RemoteOutcome);

pub struct SessionDriver {
    wizard: Wizard,
    client: ReflectionClient,
    timeout: Duration,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<Settled>,
    rx: mpsc::UnboundedReceiver<Settled>,
}

impl SessionDriver {
    pub fn new(wizard: Wizard, client: ReflectionClient, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            wizard,
            client,
            timeout,
            cancel: CancellationToken::new(),
            tx,
            rx,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn into_wizard(self) -> Wizard {
        self.wizard
    }

    /// Apply a user event and start any remote call it asks for.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send(&mut self, event: WizardEvent) -> Result<Vec<Effect>, Rejection> {
        let effects = self.wizard.apply(event)?;
        for effect in &effects {
            match effect {
                Effect::Call { request, call } => self.spawn_call(*request, call.clone()),
                Effect::Finished { completed: false } => self.cancel.cancel(),
                _ => {}
            }
        }
        Ok(effects)
    }

    /// Wait for the pending call to settle and feed it to the wizard.
    ///
    /// Returns `None` when nothing is pending.
    pub async fn next_settled(&mut self) -> Option<Result<Vec<Effect>, Rejection>> {
        loop {
            let (pending, _) = self.wizard.pending()?;
            let (request, outcome) = self.rx.recv().await?;
            if request != pending {
                tracing::debug!(%request, %pending, "dropping stale response");
                continue;
            }
            return Some(self.send(WizardEvent::Settled { request, outcome }));
        }
    }

    /// End the session without an entry. In-flight calls are cancelled.
    pub fn abandon(&mut self) {
        if !self.wizard.is_done() {
            // Exit is accepted from every live step
            let _ = self.wizard.apply(WizardEvent::Exit);
        }
        self.cancel.cancel();
    }

    fn spawn_call(&self, request: RequestId, call: RemoteRequest) {
        let client = self.client.clone();
        let cancel = self.cancel.clone();
        let tx = self.tx.clone();
        let timeout = self.timeout;
        let kind = call.kind();
        let fallback = call.fallback();

        tracing::debug!(%request, kind, "starting remote call");
        tokio::spawn(async move {
            let work = tokio::task::spawn_blocking(move || client.settle(&call));
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%request, kind, "remote call cancelled");
                    return;
                }
                result = tokio::time::timeout(timeout, work) => match result {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        tracing::warn!(kind, error = %e, "remote call panicked, using fallback");
                        fallback
                    }
                    Err(_) => {
                        let e = MoodjotError::Timeout(timeout);
                        tracing::warn!(kind, error = %e, "using fallback");
                        fallback
                    }
                },
            };
            // receiver is gone once the driver is dropped
            let _ = tx.send((request, outcome));
        });
    }
}
