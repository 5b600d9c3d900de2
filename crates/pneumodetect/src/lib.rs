//! `pneumodetect` - View-models for a simulated respiratory screening app
//!
//! This library provides the timed cough recording and analysis flow, the
//! streaming vitals monitor and the static page content of PneumoDetect.
//! Every result is simulated; no audio or sensor data is ever read.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cough;
pub mod error;
pub mod logging;
pub mod notify;
pub mod random;
pub mod route;
pub mod timer;
pub mod vitals;

pub use app::{App, MountedView};
pub use auth::{AuthForms, LoginForm, SignupForm};
pub use catalog::PageContent;
pub use config::Config;
pub use cough::{AnalysisResult, CoughSimulator, Phase, RiskLevel, SessionSnapshot};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use random::{RandomSource, StdRandom};
pub use route::{Navigator, Route};
pub use vitals::{MetricStatus, VitalsReading, VitalsSimulator, VitalsSnapshot};
