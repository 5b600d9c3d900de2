//! Text and JSON output for the `pneumo` binary.

use std::io::Write;

use serde::Serialize;

use crate::catalog::{MockStat, PageContent};
use crate::config::Config;
use crate::cough::AnalysisResult;
use crate::error::Result;
use crate::notify::Notice;
use crate::route::Route;
use crate::vitals::{Metric, VitalsReading};

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write a notice as `[level] message`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn notice<W: Write>(out: &mut W, notice: &Notice) -> Result<()> {
    writeln!(out, "[{}] {}", notice.level, notice.message)?;
    Ok(())
}

/// Write a completed analysis.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn analysis<W: Write>(out: &mut W, result: &AnalysisResult) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{} ({})", result.risk.headline(), result.risk.tone())?;
    writeln!(out, "  Score:      {}/100", result.score())?;
    writeln!(out, "  Confidence: {}%", result.confidence_percent)?;
    writeln!(out, "  {}", result.risk.advice())?;
    writeln!(out)?;
    for detail in result.details() {
        writeln!(out, "  {:<16}{} ({})", detail.metric, detail.value, detail.tone)?;
    }
    Ok(())
}

/// Write one vitals reading on a single line.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn reading<W: Write>(out: &mut W, reading: &VitalsReading) -> Result<()> {
    write!(out, "#{:<3}", reading.sequence)?;
    for metric in Metric::ALL {
        write!(
            out,
            "  {} {} {} [{}]",
            metric.label(),
            reading.sample.display_value(metric),
            metric.unit(),
            reading.assessment.status(metric)
        )?;
    }
    writeln!(out, "  overall: {}", reading.assessment.overall())?;
    Ok(())
}

/// Write every route with its path and outgoing links.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn routes<W: Write>(out: &mut W) -> Result<()> {
    for route in Route::ALL {
        let links: Vec<&str> = route.links().iter().map(Route::name).collect();
        writeln!(
            out,
            "{:<16}{:<18}-> {}",
            route.name(),
            route.path(),
            links.join(", ")
        )?;
    }
    Ok(())
}

fn stats<W: Write>(out: &mut W, heading: &str, stats: &[MockStat]) -> Result<()> {
    writeln!(out, "[{heading}]")?;
    for stat in stats {
        match stat.trend {
            Some(trend) => writeln!(out, "  {:<24}{} ({trend})", stat.label, stat.value)?,
            None => writeln!(out, "  {:<24}{}", stat.label, stat.value)?,
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Write the static content of a page.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn page<W: Write>(out: &mut W, route: Route, content: &PageContent) -> Result<()> {
    writeln!(out, "{}", route.title())?;
    writeln!(out, "{}", "=".repeat(route.title().len()))?;
    let links: Vec<&str> = route.links().iter().map(Route::path).collect();
    writeln!(out, "Links: {}", links.join(" "))?;
    writeln!(out)?;

    match content {
        PageContent::Home {
            features,
            steps,
            highlights,
            credibility,
            validation,
        } => {
            stats(out, "Highlights", highlights)?;
            writeln!(out, "[Features]")?;
            for tile in *features {
                writeln!(out, "  {}: {}", tile.title, tile.description)?;
            }
            writeln!(out)?;
            writeln!(out, "[How it works]")?;
            for step in *steps {
                writeln!(out, "  {}. {}: {}", step.step, step.title, step.description)?;
            }
            writeln!(out)?;
            writeln!(out, "[Why trust us]")?;
            for point in *credibility {
                writeln!(out, "  - {point}")?;
            }
            writeln!(out)?;
            stats(out, "Validation", validation)?;
        }
        PageContent::Auth { tabs } => {
            writeln!(out, "Tabs: {}", tabs.join(" | "))?;
        }
        PageContent::Dashboard {
            greeting,
            quick_actions,
            stats: overview,
            recent_tests,
        } => {
            writeln!(out, "{greeting}")?;
            writeln!(out)?;
            writeln!(out, "[Quick actions]")?;
            for action in *quick_actions {
                writeln!(
                    out,
                    "  {} ({}): {}",
                    action.title,
                    action.route.path(),
                    action.description
                )?;
            }
            writeln!(out)?;
            stats(out, "Overview", overview)?;
            writeln!(out, "[Recent tests]")?;
            for test in *recent_tests {
                writeln!(out, "  {}  {:<8}{}/100", test.date, test.risk.to_string(), test.score)?;
            }
        }
        PageContent::CoughAnalysis { tips } => {
            writeln!(out, "[Recording tips]")?;
            for tip in *tips {
                writeln!(out, "  - {tip}")?;
            }
        }
        PageContent::Vitals { metrics } => {
            for card in metrics {
                writeln!(
                    out,
                    "  {:<20}{:<6} normal {}  ({})",
                    card.label, card.unit, card.normal_range, card.sensor
                )?;
            }
        }
        PageContent::Reports { summary, reports } => {
            stats(out, "Summary", summary)?;
            writeln!(out, "[Reports]")?;
            for report in *reports {
                writeln!(
                    out,
                    "  #{} {}  {:<22}{:<8}{}/100",
                    report.id, report.date, report.kind, report.risk.to_string(), report.score
                )?;
            }
        }
        PageContent::Admin {
            stats: headline,
            actions,
            recent_users,
        } => {
            stats(out, "System", headline)?;
            writeln!(out, "[Actions]")?;
            for action in *actions {
                writeln!(out, "  {}: {}", action.title, action.description)?;
            }
            writeln!(out)?;
            writeln!(out, "[Recent users]")?;
            for user in *recent_users {
                writeln!(
                    out,
                    "  {:<20}{:<28}{:>3} tests  last {}",
                    user.name, user.email, user.tests, user.last_test
                )?;
            }
        }
    }
    Ok(())
}

/// Write the configuration in the same layout as the TOML file.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn config<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    writeln!(out, "Current Configuration")?;
    writeln!(out, "=====================")?;
    writeln!(out)?;
    writeln!(out, "[Cough]")?;
    writeln!(out, "  Recording (ms):     {}", config.cough.recording_ms)?;
    writeln!(out, "  Analysis (ms):      {}", config.cough.analysis_ms)?;
    writeln!(out, "  Confidence (%):     {}", config.cough.confidence_percent)?;
    writeln!(out)?;
    writeln!(out, "[Vitals]")?;
    writeln!(out, "  Sample interval:    {} ms", config.vitals.sample_interval_ms)?;
    writeln!(out)?;
    writeln!(out, "[Auth]")?;
    writeln!(out, "  Submit delay:       {} ms", config.auth.submit_delay_ms)?;
    writeln!(out)?;
    writeln!(out, "[Random]")?;
    match config.random.seed {
        Some(seed) => writeln!(out, "  Seed:               {seed}")?,
        None => writeln!(out, "  Seed:               (entropy)")?,
    }
    Ok(())
}
