//! Process lifecycle and interrupt handling.
//!
//! A [`Lifecycle`] starts out [`LifecycleState::Running`] and moves to
//! [`LifecycleState::Terminated`] exactly once, either because the run
//! finished or because an interrupt arrived. Only the first transition
//! cancels the session. A repeated SIGINT after an interrupt exits the
//! process; one after completion is ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Bursts may still be sent.
    Running,
    /// The run is over, by completion or interruption.
    Terminated,
}

/// Reaction to one SIGINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignalAction {
    Stop,
    Exit,
    Ignore,
}

const RUNNING: u8 = 0;
const COMPLETED: u8 = 1;
const INTERRUPTED: u8 = 2;

#[derive(Debug)]
struct Inner {
    state: AtomicU8,
    cancel_tx: watch::Sender<bool>,
}

/// Shared handle on the process lifecycle.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    inner: Arc<Inner>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Create a running lifecycle without installing any signal observer.
    pub fn new() -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: AtomicU8::new(RUNNING),
                cancel_tx,
            }),
        }
    }

    /// Spawn a task that turns SIGINT (Ctrl-C) into an interrupt.
    ///
    /// The first signal cancels the session. A second one while the run is
    /// still winding down exits the process immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn install(&self) -> JoinHandle<()> {
        let lifecycle = self.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("cannot listen for SIGINT: {e}");
                    return;
                }
                match lifecycle.on_signal() {
                    SignalAction::Stop => info!(signal = "SIGINT", "signal received, stopping"),
                    SignalAction::Exit => {
                        warn!(signal = "SIGINT", "repeated signal, exiting");
                        std::process::exit(0);
                    }
                    SignalAction::Ignore => {
                        debug!(signal = "SIGINT", "signal after termination ignored")
                    }
                }
            }
        })
    }

    fn on_signal(&self) -> SignalAction {
        match self.state() {
            LifecycleState::Running if self.interrupt() => SignalAction::Stop,
            _ if self.was_interrupted() => SignalAction::Exit,
            _ => SignalAction::Ignore,
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        match self.inner.state.load(Ordering::Acquire) {
            RUNNING => LifecycleState::Running,
            _ => LifecycleState::Terminated,
        }
    }

    /// Check whether the run ended because of an interrupt.
    pub fn was_interrupted(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == INTERRUPTED
    }

    /// Deliver an interrupt.
    ///
    /// Returns `true` if this call moved the lifecycle out of `Running`.
    pub fn interrupt(&self) -> bool {
        let moved = self.transition(INTERRUPTED);
        if moved {
            self.inner.cancel_tx.send_replace(true);
        }
        moved
    }

    /// Mark the run as finished so that a late interrupt is a no-op.
    ///
    /// Returns `true` if this call moved the lifecycle out of `Running`.
    pub fn finish(&self) -> bool {
        self.transition(COMPLETED)
    }

    /// A token the session polls between bursts.
    pub fn cancellation(&self) -> Cancellation {
        Cancellation {
            rx: self.inner.cancel_tx.subscribe(),
        }
    }

    fn transition(&self, to: u8) -> bool {
        self.inner
            .state
            .compare_exchange(RUNNING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Observer side of an interrupt.
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

impl Cancellation {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // keep the value readable after the sender is gone
        drop(tx);
        Self { rx }
    }

    /// Check whether an interrupt has been delivered.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until an interrupt is delivered.
    ///
    /// Never resolves if the lifecycle is dropped without being interrupted.
    pub async fn cancelled(&mut self) {
        let closed = self.rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
