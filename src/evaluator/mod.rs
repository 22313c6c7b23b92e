//! # Status Evaluator
//!
//! Turns one [`CuspReport`] into an ordered list of [`StatusFinding`]s,
//! one per monitored aspect.
//!
//! ## Aspects
//!
//! | Aspect | Source | Colour |
//! |--------|--------|--------|
//! | `checkin` | sampling rate, pre/post event lengths | red on any exact mismatch |
//! | `clock` | `Time_success_A` | two-tier, lower is worse |
//! | `bat` | `sys_batt_volt` | two-tier, lower is worse |
//! | `temp` | `sys_temp` | always green |
//! | `storage` | `free_space` (kbytes) | two-tier, thresholds in Mbytes |
//!
//! The checkin timestamp is required: without it no findings are produced.
//! Any other aspect whose value does not parse is left out of the result.

pub mod threshold;

use std::fmt::{self, Display};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::debug;

use crate::config::BoundsConfig;
use crate::cusp::CuspReport;
use crate::error::Result;
use crate::xymon::protocol::{format_unix_date, Colour};

/// Monitored aspect, used as the Xymon test name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Checkin,
    Clock,
    Bat,
    Temp,
    Storage,
}

impl Aspect {
    /// All aspects in reporting order
    pub const ALL: [Aspect; 5] = [
        Aspect::Checkin,
        Aspect::Clock,
        Aspect::Bat,
        Aspect::Temp,
        Aspect::Storage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::Checkin => "checkin",
            Aspect::Clock => "clock",
            Aspect::Bat => "bat",
            Aspect::Temp => "temp",
            Aspect::Storage => "storage",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one aspect of a report
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFinding {
    pub aspect: Aspect,
    pub colour: Colour,
    /// Short single-line summary shown after the header date
    pub label: String,
    /// Free-form message body
    pub message: String,
    /// Report checkin time
    pub epoch: DateTime<Utc>,
    /// Validity interval; zero means the status never goes stale
    pub interval: Duration,
}

/// Evaluate a report against the configured bounds
///
/// # Arguments
///
/// * `report` - Decoded report
/// * `bounds` - Acceptability bounds
/// * `interval` - Validity interval attached to every finding
/// * `now` - Current time, used for the checkin age
///
/// # Returns
///
/// * `Result<Vec<StatusFinding>>` - Findings in `checkin, clock, bat, temp, storage` order
///
/// # Errors
///
/// Returns error only if the checkin timestamp cannot be parsed.
pub fn evaluate(
    report: &CuspReport,
    bounds: &BoundsConfig,
    interval: Duration,
    now: DateTime<Utc>,
) -> Result<Vec<StatusFinding>> {
    evaluate_in(report, bounds, interval, now, &Local)
}

/// Evaluate a report, writing the "Last Checkin" line in the given time zone
pub fn evaluate_in<Tz>(
    report: &CuspReport,
    bounds: &BoundsConfig,
    interval: Duration,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<Vec<StatusFinding>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let epoch = report.checkin()?;

    let finding = |aspect, colour, label: String, message: String| StatusFinding {
        aspect,
        colour,
        label,
        message,
        epoch,
        interval,
    };

    let mut findings = Vec::with_capacity(Aspect::ALL.len());

    match system_check(report, bounds) {
        Ok((okay, mut message)) => {
            let colour = if okay { Colour::Green } else { Colour::Red };
            message.push_str(&format!(
                "System info: {}\n\nLast Checkin: {}\n",
                if okay { "okay" } else { "fault" },
                format_unix_date(&epoch.with_timezone(tz)),
            ));
            let hours = (now - epoch).num_milliseconds() as f64 / 3_600_000.0;
            findings.push(finding(
                Aspect::Checkin,
                colour,
                format!("valid checkin registered {:.1} hours ago", hours),
                message,
            ));
        }
        Err(e) => debug!("Skipping checkin: {}", e),
    }

    match report.clock_quality() {
        Ok(quality) => findings.push(finding(
            Aspect::Clock,
            bounds.clock().classify(quality),
            format!("quality={:.1}", quality),
            clock_message(report, quality),
        )),
        Err(e) => debug!("Skipping clock: {}", e),
    }

    match report.power() {
        Ok(voltage) => findings.push(finding(
            Aspect::Bat,
            bounds.voltage().classify(voltage),
            format!("voltage={:.1}", voltage),
            format!("Current voltage: {:.2} volts\n", voltage),
        )),
        Err(e) => debug!("Skipping bat: {}", e),
    }

    match report.temperature() {
        Ok(temp) => findings.push(finding(
            Aspect::Temp,
            Colour::Green,
            format!("temp={:.1}", temp),
            format!("Current temperature: {:.1}\n", temp),
        )),
        Err(e) => debug!("Skipping temp: {}", e),
    }

    match report.storage() {
        Ok(storage) => findings.push(finding(
            Aspect::Storage,
            bounds.storage().classify(storage as f64),
            format!("storage={}", storage),
            format!("Current storage: {} kbytes\n", storage),
        )),
        Err(e) => debug!("Skipping storage: {}", e),
    }

    Ok(findings)
}

/// Compare recording settings against their exact expected values
///
/// Returns whether all settings match, plus one line per mismatch.
fn system_check(report: &CuspReport, bounds: &BoundsConfig) -> Result<(bool, String)> {
    let rate = report.sampling_rate()?;
    let pre = report.pre_event()?;
    let post = report.post_event()?;

    let mut message = String::new();
    for (name, actual, expected) in [
        ("Sampling Rate", rate, bounds.sampling_rate),
        ("Pre-Event Time", pre, bounds.pre_event),
        ("Post-Event Time", post, bounds.post_event),
    ] {
        if actual != expected {
            message.push_str(&format!(
                "Invalid {}: [{} != {}]\n",
                name,
                format_g(actual),
                format_g(expected)
            ));
        }
    }

    Ok((message.is_empty(), message))
}

/// Shortest decimal form, switching to `d.ddde±XX` outside `1e-4..1e6`
fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if (-4..6).contains(&exp) {
        format!("{}", value)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

fn clock_message(report: &CuspReport, quality: f64) -> String {
    let mut message = String::new();
    for (name, value) in [
        ("Lock", &report.das_time_lock),
        ("State", &report.gps_state),
        ("Loss", &report.gps_loss_period),
    ] {
        if !value.is_empty() {
            message.push_str(&format!("{}: {}\n", name, value));
        }
    }
    message.push_str(&format!("Clock: {:.0}\n", quality));
    message
}
