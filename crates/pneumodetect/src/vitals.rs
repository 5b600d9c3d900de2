//! Vitals stream simulator.
//!
//! While connected, a periodic timer draws an independent [`VitalsSample`]
//! every interval and publishes it, classified, as a [`VitalsReading`].
//! Disconnecting cancels the timer and puts the default sample back.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::catalog::Tone;
use crate::error::{Error, Result};
use crate::random::{BoxedRandom, RandomSource};
use crate::timer::{ScopedTimer, TimerKind};

/// Base of the simulated heart rate, in BPM.
const HEART_RATE_BASE: u32 = 68;
/// Width of the simulated heart rate draw.
const HEART_RATE_SPAN: u32 = 12;
/// Base of the simulated SpO2, in percent.
const SPO2_BASE: u32 = 96;
/// Width of the simulated SpO2 draw.
const SPO2_SPAN: u32 = 4;
/// Base of the simulated temperature, in °C.
const TEMPERATURE_BASE: f64 = 36.5;
/// Width of the simulated temperature draw.
const TEMPERATURE_SPAN: f64 = 0.8;

/// Status of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    /// Within the normal range.
    Normal,
    /// Outside the normal range.
    Warning,
    /// Dangerously outside the normal range.
    Danger,
}

impl MetricStatus {
    /// Color band used when displaying this status.
    #[must_use]
    pub fn tone(&self) -> Tone {
        match self {
            Self::Normal => Tone::Success,
            Self::Warning => Tone::Warning,
            Self::Danger => Tone::Danger,
        }
    }
}

impl std::fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Classify a heart rate: outside 60-100 BPM is a warning.
#[must_use]
pub fn classify_heart_rate(bpm: u32) -> MetricStatus {
    if (60..=100).contains(&bpm) {
        MetricStatus::Normal
    } else {
        MetricStatus::Warning
    }
}

/// Classify SpO2: below 95% is dangerous.
#[must_use]
pub fn classify_spo2(percent: u32) -> MetricStatus {
    if percent < 95 {
        MetricStatus::Danger
    } else {
        MetricStatus::Normal
    }
}

/// Classify body temperature: above 37.5°C is a warning.
#[must_use]
pub fn classify_temperature(celsius: f64) -> MetricStatus {
    if celsius > 37.5 {
        MetricStatus::Warning
    } else {
        MetricStatus::Normal
    }
}

/// One of the three displayed vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Heart rate in BPM.
    HeartRate,
    /// Blood oxygen saturation in percent.
    Spo2,
    /// Body temperature in °C.
    Temperature,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 3] = [Self::HeartRate, Self::Spo2, Self::Temperature];

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::HeartRate => "Heart Rate",
            Self::Spo2 => "Blood Oxygen",
            Self::Temperature => "Body Temperature",
        }
    }

    /// Display unit.
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::HeartRate => "BPM",
            Self::Spo2 => "%",
            Self::Temperature => "°C",
        }
    }

    /// The sensor the metric is nominally read from.
    #[must_use]
    pub fn sensor(&self) -> &'static str {
        match self {
            Self::HeartRate | Self::Spo2 => "MAX30102",
            Self::Temperature => "DS18B20",
        }
    }

    /// Normal range caption.
    #[must_use]
    pub fn normal_range(&self) -> &'static str {
        match self {
            Self::HeartRate => "60-100 BPM",
            Self::Spo2 => "95-100%",
            Self::Temperature => "36.1-37.2°C",
        }
    }
}

/// A single set of vitals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// Heart rate in BPM.
    pub heart_rate: u32,
    /// Blood oxygen saturation in percent.
    pub spo2: u32,
    /// Body temperature in °C.
    pub temperature: f64,
}

impl Default for VitalsSample {
    fn default() -> Self {
        Self {
            heart_rate: 72,
            spo2: 98,
            temperature: 36.8,
        }
    }
}

impl VitalsSample {
    /// Draw an independent sample.
    ///
    /// heart rate in `[68, 80)`, SpO2 in `[96, 100)`, temperature in
    /// `[36.5, 37.3)`.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        Self {
            heart_rate: HEART_RATE_BASE + rng.below(HEART_RATE_SPAN),
            spo2: SPO2_BASE + rng.below(SPO2_SPAN),
            temperature: TEMPERATURE_BASE + rng.unit() * TEMPERATURE_SPAN,
        }
    }

    /// Classify every metric of this sample.
    #[must_use]
    pub fn assess(&self) -> VitalsAssessment {
        VitalsAssessment {
            heart_rate: classify_heart_rate(self.heart_rate),
            spo2: classify_spo2(self.spo2),
            temperature: classify_temperature(self.temperature),
        }
    }

    /// Gauge fill for `metric`, clamped to 0-100.
    #[must_use]
    pub fn gauge_percent(&self, metric: Metric) -> f64 {
        let raw = match metric {
            Metric::HeartRate => f64::from(self.heart_rate) / 120.0 * 100.0,
            Metric::Spo2 => f64::from(self.spo2),
            Metric::Temperature => self.temperature / 40.0 * 100.0,
        };
        raw.clamp(0.0, 100.0)
    }

    /// The value of `metric` formatted for display.
    #[must_use]
    pub fn display_value(&self, metric: Metric) -> String {
        match metric {
            Metric::HeartRate => self.heart_rate.to_string(),
            Metric::Spo2 => self.spo2.to_string(),
            Metric::Temperature => format!("{:.1}", self.temperature),
        }
    }
}

/// Per-metric status of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsAssessment {
    /// Heart rate status.
    pub heart_rate: MetricStatus,
    /// SpO2 status.
    pub spo2: MetricStatus,
    /// Temperature status.
    pub temperature: MetricStatus,
}

impl VitalsAssessment {
    /// Status of one metric.
    #[must_use]
    pub fn status(&self, metric: Metric) -> MetricStatus {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::Spo2 => self.spo2,
            Metric::Temperature => self.temperature,
        }
    }

    /// The most severe status across all metrics.
    #[must_use]
    pub fn overall(&self) -> MetricStatus {
        self.heart_rate.max(self.spo2).max(self.temperature)
    }
}

/// A published sample with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    /// Sequence number; zero for the default, disconnected reading.
    pub sequence: u64,
    /// The sample.
    pub sample: VitalsSample,
    /// Classification derived from `sample`.
    pub assessment: VitalsAssessment,
    /// When the sample was generated; absent for the default reading.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Default for VitalsReading {
    fn default() -> Self {
        let sample = VitalsSample::default();
        Self {
            sequence: 0,
            sample,
            assessment: sample.assess(),
            recorded_at: None,
        }
    }
}

impl VitalsReading {
    /// Wrap a freshly generated sample.
    #[must_use]
    pub fn new(sequence: u64, sample: VitalsSample) -> Self {
        Self {
            sequence,
            sample,
            assessment: sample.assess(),
            recorded_at: Some(Utc::now()),
        }
    }
}

/// Observable state of the vitals page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VitalsSnapshot {
    /// Whether the simulated sensors are connected.
    pub connected: bool,
    /// The latest reading.
    pub reading: VitalsReading,
    /// Samples generated over the simulator's lifetime.
    pub samples_produced: u64,
    #[serde(skip)]
    session: u64,
}

/// View-model for the vitals page.
///
/// Dropping the simulator stops sample generation.
#[derive(Debug)]
pub struct VitalsSimulator {
    state: Arc<watch::Sender<VitalsSnapshot>>,
    rng: Arc<Mutex<BoxedRandom>>,
    interval: Duration,
    timer: Option<ScopedTimer>,
}

impl VitalsSimulator {
    /// Create a disconnected simulator producing a sample every `interval`.
    ///
    /// A zero `interval` is rejected when connecting.
    #[must_use]
    pub fn new(interval: Duration, rng: BoxedRandom) -> Self {
        let (state, _) = watch::channel(VitalsSnapshot::default());
        Self {
            state: Arc::new(state),
            rng: Arc::new(Mutex::new(rng)),
            interval,
            timer: None,
        }
    }

    /// Get a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> VitalsSnapshot {
        self.state.borrow().clone()
    }

    /// Check whether the sensors are connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    /// The latest reading.
    #[must_use]
    pub fn reading(&self) -> VitalsReading {
        self.state.borrow().reading
    }

    /// Samples generated so far.
    #[must_use]
    pub fn samples_produced(&self) -> u64 {
        self.state.borrow().samples_produced
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<VitalsSnapshot> {
        self.state.subscribe()
    }

    /// Connect the simulated sensors and start generating samples.
    ///
    /// The first sample arrives one interval after connecting. Connecting
    /// while already connected does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the sample interval is zero, or
    /// an internal error if called outside a tokio runtime.
    pub fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            debug!("vitals already connected");
            return Ok(());
        }
        if self.interval.is_zero() {
            return Err(Error::config_validation(
                "vitals sample interval must be non-zero",
            ));
        }

        let first_tick = Instant::now() + self.interval;
        let mut session = 0;
        self.state.send_modify(|s| {
            s.session += 1;
            s.connected = true;
            session = s.session;
        });

        let task = ticker_task(
            session,
            first_tick,
            self.interval,
            Arc::clone(&self.state),
            Arc::clone(&self.rng),
        );
        match ScopedTimer::spawn(TimerKind::VitalsTicker, task) {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => {
                self.disconnect();
                return Err(e);
            }
        }

        debug!(
            session,
            interval_ms = self.interval.as_millis(),
            "vitals connected"
        );
        Ok(())
    }

    /// Disconnect, stop generating samples and restore the default reading.
    pub fn disconnect(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.state.send_modify(|s| {
            s.session += 1;
            s.connected = false;
            s.reading = VitalsReading::default();
        });
        debug!("vitals disconnected");
    }

    /// Flip between connected and disconnected, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if connecting fails.
    pub fn toggle(&mut self) -> Result<bool> {
        if self.is_connected() {
            self.disconnect();
        } else {
            self.connect()?;
        }
        Ok(self.is_connected())
    }
}

/// The periodic generator for one connection.
///
/// Ticks are anchored at `first_tick`, fixed when connecting.
async fn ticker_task(
    session: u64,
    first_tick: Instant,
    period: Duration,
    state: Arc<watch::Sender<VitalsSnapshot>>,
    rng: Arc<Mutex<BoxedRandom>>,
) {
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let sample = {
            let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
            VitalsSample::draw(&mut **rng)
        };

        let published = state.send_if_modified(|s| {
            if !s.connected || s.session != session {
                return false;
            }
            s.samples_produced += 1;
            s.reading = VitalsReading::new(s.samples_produced, sample);
            true
        });

        if !published {
            debug!(session, "stale vitals ticker stopping");
            break;
        }
        trace!(
            heart_rate = sample.heart_rate,
            spo2 = sample.spo2,
            temperature = sample.temperature,
            "vitals sample"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, StdRandom};

    const PERIOD: Duration = Duration::from_secs(2);
    const TICK: Duration = Duration::from_millis(1);

    fn seeded(seed: u64) -> VitalsSimulator {
        VitalsSimulator::new(PERIOD, Box::new(StdRandom::seeded(seed)))
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    fn assert_in_generator_range(sample: &VitalsSample) {
        assert!((68..80).contains(&sample.heart_rate), "{sample:?}");
        assert!((96..100).contains(&sample.spo2), "{sample:?}");
        assert!(
            (36.5..37.3).contains(&sample.temperature),
            "{sample:?}"
        );
    }

    #[test]
    fn test_heart_rate_boundaries() {
        assert_eq!(classify_heart_rate(59), MetricStatus::Warning);
        assert_eq!(classify_heart_rate(60), MetricStatus::Normal);
        assert_eq!(classify_heart_rate(100), MetricStatus::Normal);
        assert_eq!(classify_heart_rate(101), MetricStatus::Warning);
    }

    #[test]
    fn test_spo2_boundaries() {
        assert_eq!(classify_spo2(94), MetricStatus::Danger);
        assert_eq!(classify_spo2(95), MetricStatus::Normal);
        assert_eq!(classify_spo2(100), MetricStatus::Normal);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(classify_temperature(37.5), MetricStatus::Normal);
        assert_eq!(classify_temperature(37.6), MetricStatus::Warning);
        assert_eq!(classify_temperature(35.0), MetricStatus::Normal);
    }

    #[test]
    fn test_status_tone() {
        assert_eq!(MetricStatus::Normal.tone(), Tone::Success);
        assert_eq!(MetricStatus::Warning.tone(), Tone::Warning);
        assert_eq!(MetricStatus::Danger.tone(), Tone::Danger);
    }

    #[test]
    fn test_assess_and_overall() {
        let sample = VitalsSample {
            heart_rate: 110,
            spo2: 93,
            temperature: 36.9,
        };
        let assessment = sample.assess();
        assert_eq!(assessment.heart_rate, MetricStatus::Warning);
        assert_eq!(assessment.spo2, MetricStatus::Danger);
        assert_eq!(assessment.temperature, MetricStatus::Normal);
        assert_eq!(assessment.status(Metric::Spo2), MetricStatus::Danger);
        assert_eq!(assessment.overall(), MetricStatus::Danger);

        assert_eq!(VitalsSample::default().assess().overall(), MetricStatus::Normal);
    }

    #[test]
    fn test_draw_uses_bounds() {
        let mut low = ScriptedRandom::new();
        let sample = VitalsSample::draw(&mut low);
        assert_eq!(sample.heart_rate, 68);
        assert_eq!(sample.spo2, 96);
        assert!((sample.temperature - 36.5).abs() < 1e-9);

        let mut high = ScriptedRandom::new().with_ints([11, 3]).with_units([0.999]);
        let sample = VitalsSample::draw(&mut high);
        assert_eq!(sample.heart_rate, 79);
        assert_eq!(sample.spo2, 99);
        assert!(sample.temperature < 37.3);
    }

    #[test]
    fn test_draw_range_over_many_samples() {
        let mut rng = StdRandom::seeded(99);
        for _ in 0..1000 {
            assert_in_generator_range(&VitalsSample::draw(&mut rng));
        }
    }

    #[test]
    fn test_gauge_and_display() {
        let sample = VitalsSample::default();
        assert!((sample.gauge_percent(Metric::HeartRate) - 60.0).abs() < 1e-9);
        assert!((sample.gauge_percent(Metric::Spo2) - 98.0).abs() < 1e-9);
        assert!((sample.gauge_percent(Metric::Temperature) - 92.0).abs() < 1e-9);
        assert_eq!(sample.display_value(Metric::Temperature), "36.8");

        let fast = VitalsSample {
            heart_rate: 200,
            ..sample
        };
        assert!((fast.gauge_percent(Metric::HeartRate) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_metric_captions() {
        assert_eq!(Metric::HeartRate.normal_range(), "60-100 BPM");
        assert_eq!(Metric::Spo2.sensor(), "MAX30102");
        assert_eq!(Metric::Temperature.sensor(), "DS18B20");
        assert_eq!(Metric::Temperature.unit(), "°C");
        assert_eq!(Metric::ALL.len(), 3);
    }

    #[test]
    fn test_default_reading() {
        let reading = VitalsReading::default();
        assert_eq!(reading.sequence, 0);
        assert_eq!(reading.sample, VitalsSample::default());
        assert!(reading.recorded_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_periods_produce_three_samples() {
        let mut sim = seeded(7);
        let mut watcher = sim.subscribe();
        sim.connect().unwrap();
        assert!(sim.is_connected());
        let _ = watcher.borrow_and_update();

        let mut readings = Vec::new();
        for _ in 0..3 {
            tokio::time::sleep(PERIOD + TICK).await;
            assert!(watcher.has_changed().unwrap());
            readings.push(watcher.borrow_and_update().reading);
        }

        assert_eq!(sim.samples_produced(), 3);
        for (i, reading) in readings.iter().enumerate() {
            assert_eq!(reading.sequence, i as u64 + 1);
            assert!(reading.recorded_at.is_some());
            assert_in_generator_range(&reading.sample);
            assert_eq!(reading.assessment, reading.sample.assess());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sample_before_first_period() {
        let mut sim = seeded(1);
        sim.connect().unwrap();

        tokio::time::sleep(PERIOD - TICK).await;
        assert_eq!(sim.samples_produced(), 0);
        assert_eq!(sim.reading(), VitalsReading::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_stops_generation() {
        let mut sim = seeded(3);
        sim.connect().unwrap();
        tokio::time::sleep(PERIOD * 2 + TICK).await;
        assert_eq!(sim.samples_produced(), 2);

        sim.disconnect();
        assert!(!sim.is_connected());
        assert_eq!(sim.reading(), VitalsReading::default());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(sim.samples_produced(), 2);
        assert_eq!(sim.reading(), VitalsReading::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_twice_keeps_single_ticker() {
        let mut sim = seeded(5);
        sim.connect().unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        sim.connect().unwrap();

        tokio::time::sleep(Duration::from_secs(1) + TICK).await;
        assert_eq!(sim.samples_produced(), 1);
        tokio::time::sleep(PERIOD).await;
        assert_eq!(sim.samples_produced(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_restarts_period() {
        let mut sim = seeded(11);
        sim.connect().unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        sim.disconnect();

        sim.connect().unwrap();
        tokio::time::sleep(Duration::from_secs(1) + TICK).await;
        assert_eq!(sim.samples_produced(), 0);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sim.samples_produced(), 1);
        assert_eq!(sim.reading().sequence, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle() {
        let mut sim = seeded(13);
        assert!(sim.toggle().unwrap());
        assert!(sim.is_connected());
        assert!(!sim.toggle().unwrap());
        assert!(!sim.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_generation() {
        let mut sim = seeded(17);
        let watcher = sim.subscribe();
        sim.connect().unwrap();
        tokio::time::sleep(PERIOD + TICK).await;
        drop(sim);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(watcher.borrow().samples_produced, 1);
    }

    #[test]
    fn test_connect_outside_runtime_stays_disconnected() {
        let mut sim = seeded(19);
        assert!(sim.connect().is_err());
        assert!(!sim.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_period_yields_exactly_one_sample() {
        let mut sim = seeded(5);
        sim.connect().unwrap();

        for expected in 1..=3 {
            tokio::time::advance(PERIOD).await;
            settle().await;
            assert_eq!(sim.samples_produced(), expected);
        }
        assert_eq!(sim.reading().sequence, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_rejected() {
        let mut sim = VitalsSimulator::new(Duration::ZERO, Box::new(ScriptedRandom::new()));
        let err = sim.connect().unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
        assert!(!sim.is_connected());
        assert!(sim.toggle().is_err());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!sim.is_connected());
        assert_eq!(sim.samples_produced(), 0);
    }
}
