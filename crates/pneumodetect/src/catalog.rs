//! Static content of every page.
//!
//! All mock records live here rather than in the pages that show them. The
//! values are fixed literals; nothing here is ever mutated.

use serde::Serialize;

use crate::cough::RiskLevel;
use crate::route::Route;
use crate::vitals::{Metric, VitalsSample};

/// Color band a value is displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Good / normal.
    Success,
    /// Needs attention.
    Warning,
    /// Serious.
    Danger,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A titled blurb (feature card, admin action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Heading.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
}

/// A numbered how-it-works step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step number.
    pub step: u8,
    /// Heading.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
}

/// A headline number with an optional trend caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MockStat {
    /// What is measured.
    pub label: &'static str,
    /// Display value.
    pub value: &'static str,
    /// Caption under the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<&'static str>,
}

/// A dashboard shortcut to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    /// Heading.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
    /// Where the shortcut leads.
    pub route: Route,
}

/// A row of the dashboard's recent tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecentTest {
    /// Test date.
    pub date: &'static str,
    /// Outcome.
    pub risk: RiskLevel,
    /// Score out of 100.
    pub score: u8,
}

/// A stored report in the reports list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MockReport {
    /// Report number.
    pub id: u32,
    /// Test date.
    pub date: &'static str,
    /// Test type.
    pub kind: &'static str,
    /// Outcome.
    pub risk: RiskLevel,
    /// Score out of 100.
    pub score: u8,
    /// Vitals recorded with the test.
    pub vitals: VitalsSample,
}

/// A row of the admin panel's recent users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MockUser {
    /// User number.
    pub id: u32,
    /// Full name.
    pub name: &'static str,
    /// Email address.
    pub email: &'static str,
    /// Tests taken.
    pub tests: u32,
    /// Time since the last test.
    pub last_test: &'static str,
}

/// A row of the cough result's detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisDetail {
    /// What was assessed.
    pub metric: &'static str,
    /// Finding.
    pub value: &'static str,
    /// Color band of the finding.
    pub tone: Tone,
}

/// Display metadata for one vitals card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    /// The metric.
    pub metric: Metric,
    /// Display label.
    pub label: &'static str,
    /// Display unit.
    pub unit: &'static str,
    /// Nominal sensor.
    pub sensor: &'static str,
    /// Normal range caption.
    pub normal_range: &'static str,
}

impl MetricCard {
    /// Build the card for `metric`.
    #[must_use]
    pub fn for_metric(metric: Metric) -> Self {
        Self {
            metric,
            label: metric.label(),
            unit: metric.unit(),
            sensor: metric.sensor(),
            normal_range: metric.normal_range(),
        }
    }
}

/// Landing page feature cards.
pub const LANDING_FEATURES: &[Tile] = &[
    Tile {
        title: "AI Cough Analysis",
        description: "Advanced machine learning analyzes cough patterns to detect early pneumonia signs",
    },
    Tile {
        title: "Real-Time Vitals",
        description: "Monitor SpO₂, heart rate, and temperature with medical-grade sensors",
    },
    Tile {
        title: "Confirmatory Tests",
        description: "Optional CRP test integration for comprehensive pneumonia screening",
    },
    Tile {
        title: "Instant Results",
        description: "Get pneumonia risk assessment in seconds with detailed analysis",
    },
];

/// Landing page how-it-works steps.
pub const HOW_IT_WORKS: &[Step] = &[
    Step {
        step: 1,
        title: "Record Cough Audio",
        description: "Use our app to record or upload your cough sound sample",
    },
    Step {
        step: 2,
        title: "Monitor Vitals",
        description: "Connect sensors to track SpO₂, heart rate, and body temperature",
    },
    Step {
        step: 3,
        title: "Get Results",
        description: "Receive instant AI-powered pneumonia risk assessment",
    },
];

/// Landing page hero numbers.
pub const LANDING_HIGHLIGHTS: &[MockStat] = &[
    MockStat {
        label: "Accuracy",
        value: "95%",
        trend: None,
    },
    MockStat {
        label: "Tests Completed",
        value: "10k+",
        trend: None,
    },
    MockStat {
        label: "Results Time",
        value: "<1min",
        trend: None,
    },
];

/// Landing page credibility bullet points.
pub const CREDIBILITY_POINTS: &[&str] = &[
    "Trained on 50,000+ validated cough samples",
    "Medical-grade MAX30102 and DS18B20 sensors",
    "Peer-reviewed algorithms",
    "HIPAA-compliant data security",
];

/// Landing page validation figures.
pub const VALIDATION_STATS: &[MockStat] = &[
    MockStat {
        label: "Sensitivity",
        value: "94.5%",
        trend: None,
    },
    MockStat {
        label: "Specificity",
        value: "96.2%",
        trend: None,
    },
    MockStat {
        label: "PPV",
        value: "93.8%",
        trend: None,
    },
    MockStat {
        label: "NPV",
        value: "95.1%",
        trend: None,
    },
];

/// Dashboard shortcuts.
pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        title: "New Cough Test",
        description: "Record or upload cough audio",
        route: Route::CoughAnalysis,
    },
    QuickAction {
        title: "Monitor Vitals",
        description: "Check real-time sensor data",
        route: Route::Vitals,
    },
    QuickAction {
        title: "View Reports",
        description: "See test history & trends",
        route: Route::Reports,
    },
];

/// Dashboard overview numbers.
pub const DASHBOARD_STATS: &[MockStat] = &[
    MockStat {
        label: "Tests Completed",
        value: "12",
        trend: Some("+3 this month"),
    },
    MockStat {
        label: "Avg Risk Score",
        value: "24",
        trend: Some("Low risk"),
    },
    MockStat {
        label: "Last SpO₂",
        value: "98%",
        trend: Some("Normal"),
    },
    MockStat {
        label: "Last Temp",
        value: "36.8°C",
        trend: Some("Normal"),
    },
];

/// Dashboard recent tests.
pub const RECENT_TESTS: &[RecentTest] = &[
    RecentTest {
        date: "2024-01-15",
        risk: RiskLevel::Low,
        score: 15,
    },
    RecentTest {
        date: "2024-01-10",
        risk: RiskLevel::Low,
        score: 12,
    },
    RecentTest {
        date: "2024-01-05",
        risk: RiskLevel::Medium,
        score: 45,
    },
];

/// Reports page summary numbers.
pub const REPORT_SUMMARY: &[MockStat] = &[
    MockStat {
        label: "Total Tests",
        value: "12",
        trend: Some("Risk trending down"),
    },
    MockStat {
        label: "Average Risk",
        value: "24%",
        trend: Some("Low risk category"),
    },
    MockStat {
        label: "Last Test",
        value: "2d",
        trend: Some("2 days ago"),
    },
];

/// Stored reports.
pub const REPORTS: &[MockReport] = &[
    MockReport {
        id: 1,
        date: "2024-01-15",
        kind: "Cough Analysis",
        risk: RiskLevel::Low,
        score: 15,
        vitals: VitalsSample {
            heart_rate: 72,
            spo2: 98,
            temperature: 36.8,
        },
    },
    MockReport {
        id: 2,
        date: "2024-01-10",
        kind: "Cough Analysis",
        risk: RiskLevel::Low,
        score: 12,
        vitals: VitalsSample {
            heart_rate: 68,
            spo2: 97,
            temperature: 36.6,
        },
    },
    MockReport {
        id: 3,
        date: "2024-01-05",
        kind: "Full Assessment",
        risk: RiskLevel::Medium,
        score: 45,
        vitals: VitalsSample {
            heart_rate: 85,
            spo2: 94,
            temperature: 37.2,
        },
    },
];

/// Admin panel headline numbers.
pub const ADMIN_STATS: &[MockStat] = &[
    MockStat {
        label: "Total Users",
        value: "1,234",
        trend: Some("+12%"),
    },
    MockStat {
        label: "Tests Today",
        value: "45",
        trend: Some("+8%"),
    },
    MockStat {
        label: "Avg Risk Score",
        value: "28%",
        trend: Some("-5%"),
    },
    MockStat {
        label: "Database Size",
        value: "2.4GB",
        trend: Some("+15%"),
    },
];

/// Admin panel action cards. None of them lead anywhere.
pub const ADMIN_ACTIONS: &[Tile] = &[
    Tile {
        title: "Manage Users",
        description: "View and manage user accounts",
    },
    Tile {
        title: "View Reports",
        description: "Access all test reports",
    },
    Tile {
        title: "Database",
        description: "Manage datasets and backups",
    },
];

/// Admin panel recent users.
pub const RECENT_USERS: &[MockUser] = &[
    MockUser {
        id: 1,
        name: "John Doe",
        email: "john@example.com",
        tests: 5,
        last_test: "2h ago",
    },
    MockUser {
        id: 2,
        name: "Jane Smith",
        email: "jane@example.com",
        tests: 3,
        last_test: "5h ago",
    },
    MockUser {
        id: 3,
        name: "Bob Johnson",
        email: "bob@example.com",
        tests: 8,
        last_test: "1d ago",
    },
];

/// Tips shown on the cough page.
pub const RECORDING_TIPS: &[&str] = &[
    "Find a quiet environment",
    "Hold device 6-8 inches from mouth",
    "Cough naturally 3-5 times",
    "Recording lasts 5 seconds",
];

/// Detail rows shown with every cough result.
pub const ANALYSIS_DETAILS: &[AnalysisDetail] = &[
    AnalysisDetail {
        metric: "Cough Frequency",
        value: "Normal",
        tone: Tone::Success,
    },
    AnalysisDetail {
        metric: "Sound Pattern",
        value: "Wet cough detected",
        tone: Tone::Warning,
    },
    AnalysisDetail {
        metric: "Duration",
        value: "Within range",
        tone: Tone::Success,
    },
    AnalysisDetail {
        metric: "Intensity",
        value: "Moderate",
        tone: Tone::Success,
    },
];

/// The static content of one page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageContent {
    /// Landing page.
    Home {
        /// Feature cards.
        features: &'static [Tile],
        /// How-it-works steps.
        steps: &'static [Step],
        /// Hero numbers.
        highlights: &'static [MockStat],
        /// Credibility bullet points.
        credibility: &'static [&'static str],
        /// Validation figures.
        validation: &'static [MockStat],
    },
    /// Login and signup forms.
    Auth {
        /// Form tabs.
        tabs: &'static [&'static str],
    },
    /// Patient dashboard.
    Dashboard {
        /// Greeting line.
        greeting: &'static str,
        /// Shortcuts.
        quick_actions: &'static [QuickAction],
        /// Overview numbers.
        stats: &'static [MockStat],
        /// Recent tests.
        recent_tests: &'static [RecentTest],
    },
    /// Cough recording page.
    CoughAnalysis {
        /// Recording tips.
        tips: &'static [&'static str],
    },
    /// Vitals page.
    Vitals {
        /// One card per metric.
        metrics: Vec<MetricCard>,
    },
    /// Report history.
    Reports {
        /// Summary numbers.
        summary: &'static [MockStat],
        /// Stored reports.
        reports: &'static [MockReport],
    },
    /// Admin panel.
    Admin {
        /// Headline numbers.
        stats: &'static [MockStat],
        /// Action cards.
        actions: &'static [Tile],
        /// Recent users.
        recent_users: &'static [MockUser],
    },
}

impl PageContent {
    /// The static content of `route`.
    #[must_use]
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Home => Self::Home {
                features: LANDING_FEATURES,
                steps: HOW_IT_WORKS,
                highlights: LANDING_HIGHLIGHTS,
                credibility: CREDIBILITY_POINTS,
                validation: VALIDATION_STATS,
            },
            Route::Auth => Self::Auth {
                tabs: &["Login", "Sign Up"],
            },
            Route::Dashboard => Self::Dashboard {
                greeting: "Welcome back, Patient!",
                quick_actions: QUICK_ACTIONS,
                stats: DASHBOARD_STATS,
                recent_tests: RECENT_TESTS,
            },
            Route::CoughAnalysis => Self::CoughAnalysis {
                tips: RECORDING_TIPS,
            },
            Route::Vitals => Self::Vitals {
                metrics: Metric::ALL.into_iter().map(MetricCard::for_metric).collect(),
            },
            Route::Reports => Self::Reports {
                summary: REPORT_SUMMARY,
                reports: REPORTS,
            },
            Route::Admin => Self::Admin {
                stats: ADMIN_STATS,
                actions: ADMIN_ACTIONS,
                recent_users: RECENT_USERS,
            },
        }
    }
}
