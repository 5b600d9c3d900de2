//! Cough recording and analysis simulator.
//!
//! Drives the cough page through
//! `Idle -> Recording -> Analyzing -> Complete -> (reset) -> Idle`.
//! Recording and analysis are fixed delays; the risk level on completion is
//! a uniform draw from the injected [`RandomSource`]. No audio is involved.
//!
//! Each start or reset begins a new cycle. The timer task remembers the cycle
//! it was spawned for and only touches state while that cycle is current, so
//! a timer that outlives a reset can never bring back stale state.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::catalog::{AnalysisDetail, Tone, ANALYSIS_DETAILS};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::random::{BoxedRandom, RandomSource};
use crate::timer::{ScopedTimer, TimerKind};

/// Notice raised when recording starts.
pub const RECORDING_STARTED: &str = "Recording started. Cough into your microphone.";

/// Notice raised when analysis starts.
pub const ANALYZING: &str = "Analyzing cough pattern...";

/// Notice raised when the result is ready.
pub const ANALYSIS_COMPLETE: &str = "Analysis complete!";

/// A phase of the recording/analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Ready to record.
    #[default]
    Idle,
    /// Simulated recording in progress.
    Recording,
    /// Simulated analysis in progress.
    Analyzing,
    /// A result is available.
    Complete,
}

impl Phase {
    /// Whether a timer is driving this phase.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Recording | Self::Analyzing)
    }

    /// Progress bar value shown while in this phase.
    #[must_use]
    pub fn progress_percent(&self) -> Option<u8> {
        match self {
            Self::Recording => Some(60),
            Self::Analyzing => Some(80),
            Self::Idle | Self::Complete => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Recording => write!(f, "recording"),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Coarse screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Normal characteristics.
    Low,
    /// Some indicators present.
    Medium,
    /// Multiple indicators present.
    High,
}

impl RiskLevel {
    /// Every risk level, in draw order.
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Draw a risk level uniformly.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        // ALL has three entries, so the index always fits
        let index = rng.below(3) as usize;
        Self::ALL[index % Self::ALL.len()]
    }

    /// Display score out of 100.
    #[must_use]
    pub fn score(&self) -> u8 {
        match self {
            Self::Low => 15,
            Self::Medium => 52,
            Self::High => 78,
        }
    }

    /// Color band used when displaying this level.
    #[must_use]
    pub fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Success,
            Self::Medium => Tone::Warning,
            Self::High => Tone::Danger,
        }
    }

    /// Advice shown under the result headline.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Your cough pattern shows normal characteristics. Continue monitoring.",
            Self::Medium => {
                "Some indicators present. Consider checking vitals and consulting a doctor."
            }
            Self::High => {
                "Multiple pneumonia indicators detected. Please consult a healthcare professional."
            }
        }
    }

    /// Result headline, e.g. "Medium Risk Detected".
    #[must_use]
    pub fn headline(&self) -> String {
        format!("{self} Risk Detected")
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// The outcome of a completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The drawn risk level.
    pub risk: RiskLevel,
    /// Reported confidence, 0-100.
    pub confidence_percent: u8,
}

impl AnalysisResult {
    /// Display score out of 100.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.risk.score()
    }

    /// The fixed detail rows shown under every result.
    #[must_use]
    pub fn details(&self) -> &'static [AnalysisDetail] {
        ANALYSIS_DETAILS
    }
}

/// Observable state of the cough page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// The result, present only while `phase` is `Complete`.
    pub result: Option<AnalysisResult>,
    /// Cycle number, bumped on every start and reset.
    pub cycle: u64,
    /// Number of cycles that reached `Complete`.
    pub completed: u64,
}

impl SessionSnapshot {
    /// Move `from -> to` if `cycle` is still current and the phase matches.
    fn advance(&mut self, cycle: u64, from: Phase, to: Phase) -> bool {
        if self.cycle != cycle || self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }
}

/// Delays and fixed values of the cough flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoughTimings {
    /// Length of the simulated recording.
    pub recording: Duration,
    /// Length of the simulated analysis.
    pub analysis: Duration,
    /// Confidence reported with every result.
    pub confidence_percent: u8,
}

impl Default for CoughTimings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CoughTimings {
    /// Take timings from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            recording: config.recording_duration(),
            analysis: config.analysis_duration(),
            confidence_percent: config.cough.confidence_percent,
        }
    }
}

/// View-model for the cough page.
///
/// Dropping the simulator cancels any cycle in progress.
#[derive(Debug)]
pub struct CoughSimulator {
    state: Arc<watch::Sender<SessionSnapshot>>,
    rng: Arc<Mutex<BoxedRandom>>,
    notifier: Notifier,
    timings: CoughTimings,
    timer: Option<ScopedTimer>,
}

impl CoughSimulator {
    /// Create an idle simulator.
    #[must_use]
    pub fn new(timings: CoughTimings, rng: BoxedRandom, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            state: Arc::new(state),
            rng: Arc::new(Mutex::new(rng)),
            notifier,
            timings,
            timer: None,
        }
    }

    /// Get a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Get the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// Get the timings in use.
    #[must_use]
    pub fn timings(&self) -> CoughTimings {
        self.timings
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Start a recording cycle.
    ///
    /// Only valid from `Idle`. A cycle in progress or a displayed result is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionBusy`] if the session is not idle, or an
    /// internal error if called outside a tokio runtime.
    pub fn start_recording(&mut self) -> Result<()> {
        let phase = self.phase();
        if phase != Phase::Idle {
            warn!(%phase, "start ignored, session busy");
            return Err(Error::SessionBusy { phase });
        }

        let started = Instant::now();
        let mut cycle = 0;
        self.state.send_modify(|s| {
            s.cycle += 1;
            s.phase = Phase::Recording;
            s.result = None;
            cycle = s.cycle;
        });

        let task = cycle_task(
            cycle,
            started,
            self.timings,
            Arc::clone(&self.state),
            Arc::clone(&self.rng),
            self.notifier.clone(),
        );
        match ScopedTimer::spawn(TimerKind::CoughCycle, task) {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => {
                self.reset();
                return Err(e);
            }
        }

        debug!(cycle, "recording started");
        self.notifier.info(RECORDING_STARTED);
        Ok(())
    }

    /// Return to `Idle`, clearing any result and cancelling the pending timer.
    pub fn reset(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.state.send_modify(|s| {
            s.cycle += 1;
            s.phase = Phase::Idle;
            s.result = None;
        });
        debug!("session reset");
    }

    /// Wait until the current cycle produces a result.
    ///
    /// Returns immediately if a result is already displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is idle (nothing to wait for) or is
    /// reset before completing.
    pub async fn wait_for_result(&self) -> Result<AnalysisResult> {
        let mut rx = self.subscribe();
        let cycle = {
            let current = rx.borrow_and_update();
            if let Some(result) = current.result {
                return Ok(result);
            }
            if !current.phase.is_in_progress() {
                return Err(Error::internal("no recording in progress"));
            }
            current.cycle
        };

        loop {
            rx.changed()
                .await
                .map_err(|_| Error::internal("cough session closed"))?;
            let (current_cycle, result) = {
                let current = rx.borrow_and_update();
                (current.cycle, current.result)
            };
            if current_cycle != cycle {
                return Err(Error::internal("recording was reset"));
            }
            if let Some(result) = result {
                return Ok(result);
            }
        }
    }
}

/// The timer body for one cycle: recording delay, then analysis delay.
///
/// Both deadlines count from `started`, not from when the task is first polled.
async fn cycle_task(
    cycle: u64,
    started: Instant,
    timings: CoughTimings,
    state: Arc<watch::Sender<SessionSnapshot>>,
    rng: Arc<Mutex<BoxedRandom>>,
    notifier: Notifier,
) {
    let analysis_at = started + timings.recording;
    sleep_until(analysis_at).await;
    // Notices are queued inside the update so they precede the watcher wakeup
    let analyzing = state.send_if_modified(|s| {
        if !s.advance(cycle, Phase::Recording, Phase::Analyzing) {
            return false;
        }
        notifier.info(ANALYZING);
        true
    });
    if !analyzing {
        return;
    }
    debug!(cycle, "analysis started");

    sleep_until(analysis_at + timings.analysis).await;
    let mut drawn = None;
    {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        state.send_if_modified(|s| {
            if !s.advance(cycle, Phase::Analyzing, Phase::Complete) {
                return false;
            }
            let result = AnalysisResult {
                risk: RiskLevel::draw(&mut **rng),
                confidence_percent: timings.confidence_percent,
            };
            s.result = Some(result);
            s.completed += 1;
            drawn = Some(result);
            notifier.success(ANALYSIS_COMPLETE);
            true
        });
    }

    if let Some(result) = drawn {
        debug!(cycle, risk = %result.risk, "analysis complete");
    }
}
