use classgate_core::{
    link::AdmissionLink,
    models::{attendance::ParticipantRole, enrollment::Caller},
};
use std::sync::Arc;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::gate::{AdmissionGate, GateState};

/// Handle to a running admission flow.
///
/// The flow publishes every state change on a `watch` channel. Calling
/// [`cancel`](Self::cancel) or dropping the handle stops the presence poll;
/// no attendance is written after cancellation.
pub struct AdmissionSession {
    state: watch::Receiver<GateState>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl AdmissionSession {
    pub(crate) fn spawn(gate: Arc<AdmissionGate>, caller: Caller, link: AdmissionLink) -> Self {
        let (state_tx, state_rx) = watch::channel(GateState::Verifying);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(run(gate, caller, link, state_tx, cancel_rx));

        Self {
            state: state_rx,
            cancel: cancel_tx,
            task,
        }
    }

    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.clone()
    }

    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for a terminal state. If the flow was cancelled first, returns
    /// the last state it reached.
    pub async fn wait(&self) -> GateState {
        let mut state = self.state.clone();
        // Err means the flow ended without a terminal state
        let _ = state.wait_for(GateState::is_terminal).await;
        let last = state.borrow().clone();
        last
    }
}

impl Drop for AdmissionSession {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

fn cancelled(cancel: &watch::Receiver<bool>) -> bool {
    *cancel.borrow() || cancel.has_changed().is_err()
}

async fn run(
    gate: Arc<AdmissionGate>,
    caller: Caller,
    link: AdmissionLink,
    state: watch::Sender<GateState>,
    mut cancel: watch::Receiver<bool>,
) {
    let ticket = match gate.verify(&caller, &link).await {
        Ok(ticket) => ticket,
        Err(err) => {
            info!("Admission denied for {}: {}", caller.user_id, err);
            state.send_replace(GateState::from_error(&err));
            return;
        }
    };

    if ticket.role == ParticipantRole::Student {
        let mut ticker = time::interval(gate.config().poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let present = tokio::select! {
                biased;
                _ = cancel.wait_for(|c| *c) => {
                    debug!("Presence poll for {} cancelled", caller.user_id);
                    return;
                }
                present = async {
                    ticker.tick().await;
                    gate.teacher_present(&ticket, gate.today()).await
                } => present,
            };

            match present {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => warn!("Presence check failed, will retry: {}", err),
            }
            state.send_if_modified(|current| {
                if *current == GateState::WaitingForTeacher {
                    return false;
                }
                *current = GateState::WaitingForTeacher;
                true
            });
        }
    }

    if cancelled(&cancel) {
        return;
    }

    let next = match gate.admit(&caller, &ticket, gate.today()).await {
        Ok(handoff) => GateState::Redirecting { handoff },
        Err(err) => GateState::from_error(&err),
    };
    state.send_replace(next);
}
