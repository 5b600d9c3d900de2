//! Scoped ownership of simulator timer tasks.
//!
//! Every delayed or periodic action a view-model schedules runs as a tokio
//! task owned by a [`ScopedTimer`]. Cancelling or dropping the timer aborts
//! the task, so a view-model that goes away takes its pending timers with it.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::error::{Error, Result};

/// The kind of work a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// The two-step recording/analysis delay of the cough flow.
    CoughCycle,
    /// The periodic vitals sample generator.
    VitalsTicker,
}

impl std::fmt::Display for TimerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoughCycle => write!(f, "cough_cycle"),
            Self::VitalsTicker => write!(f, "vitals_ticker"),
        }
    }
}

/// A spawned timer task that is aborted when cancelled or dropped.
#[derive(Debug)]
pub struct ScopedTimer {
    kind: TimerKind,
    handle: Option<JoinHandle<()>>,
}

impl ScopedTimer {
    /// Spawn `task` on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime.
    pub fn spawn<F>(kind: TimerKind, task: F) -> Result<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|e| Error::internal(format!("cannot start {kind} timer: {e}")))?;
        trace!(timer = %kind, "timer spawned");
        Ok(Self {
            kind,
            handle: Some(runtime.spawn(task)),
        })
    }

    /// Get the timer kind.
    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Check whether the task is still scheduled to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task. Calling this more than once is harmless.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                trace!(timer = %self.kind, "timer cancelled");
            }
            handle.abort();
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
