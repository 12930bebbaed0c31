//! One-shot readiness signalling between the serve task and the caller.
//!
//! # Design Decisions
//! - Single-use channel scoped to one start attempt; a fresh pair is
//!   created per `start()`, so a stale signal can never leak into a
//!   later attempt
//! - Latch with memory, not a rendezvous: a signal sent before `wait`
//!   is still observed
//! - Timeout is a distinct raised error, configurable by the caller

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use crate::error::{HarnessError, StartupError};

type Outcome = Result<(), StartupError>;

/// Create a fresh signal/gate pair for one start attempt.
pub fn readiness_gate() -> (ReadinessSignal, ReadinessGate) {
    let (tx, rx) = oneshot::channel();
    let signal = ReadinessSignal {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    (signal, ReadinessGate { rx })
}

/// Producer half: held by the listener's lifecycle observer.
///
/// At most one of `started()` / `failed()` wins; later calls are no-ops,
/// so the gate never observes a second terminal transition.
#[derive(Clone)]
pub struct ReadinessSignal {
    tx: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

impl ReadinessSignal {
    /// Signal that the listener is ready to accept requests.
    pub fn started(&self) {
        self.deliver(Ok(()));
    }

    /// Signal that startup failed, carrying the cause to the waiter.
    pub fn failed(&self, cause: StartupError) {
        self.deliver(Err(cause));
    }

    fn deliver(&self, outcome: Outcome) {
        let sender = match self.tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(tx) = sender {
            // Waiter may have timed out and dropped the receiver.
            let _ = tx.send(outcome);
        }
    }
}

/// Consumer half: awaited by the caller of `start()`.
pub struct ReadinessGate {
    rx: oneshot::Receiver<Outcome>,
}

impl ReadinessGate {
    /// Block until a signal arrives or the bound elapses.
    ///
    /// Returns `Ok(())` on a success signal (even one sent before this
    /// call), `StartupFailed` on a failure signal or if the producer was
    /// dropped without signalling, and `StartupTimedOut` on timeout.
    pub async fn wait(self, timeout: Duration) -> Result<(), HarnessError> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(cause))) => Err(HarnessError::StartupFailed(cause)),
            Ok(Err(_recv)) => Err(HarnessError::StartupFailed(StartupError::Aborted)),
            Err(_elapsed) => Err(HarnessError::StartupTimedOut { waited: timeout }),
        }
    }
}
