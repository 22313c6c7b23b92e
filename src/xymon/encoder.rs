//! # Xymon Status Encoder
//!
//! Renders a [`StatusFinding`] into Xymon `status` message text.
//!
//! ## Message Layout
//!
//! ```text
//! status[+<seconds>] <host>.<test> <colour> <date>[ <label>]\n
//! [\n<message>\n]
//! ```
//!
//! The `+<seconds>` suffix is only present when the finding carries a
//! non-zero validity interval.

use std::fmt::Display;

use chrono::{Local, TimeZone};

use super::protocol::{XYMON_DATE_LAYOUT, XYMON_STATUS_TOKEN};
use crate::evaluator::StatusFinding;

/// Encode a finding for `host`, dating it in local time
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chrono::{TimeZone, Utc};
/// use cusp_xymon::evaluator::{Aspect, StatusFinding};
/// use cusp_xymon::xymon::encoder::encode_report;
/// use cusp_xymon::xymon::protocol::Colour;
///
/// let finding = StatusFinding {
///     aspect: Aspect::Temp,
///     colour: Colour::Green,
///     label: "temp=21.0".to_string(),
///     message: "Current temperature: 21.0\n".to_string(),
///     epoch: Utc.with_ymd_and_hms(2014, 3, 4, 5, 6, 7).unwrap(),
///     interval: Duration::from_secs(7200),
/// };
///
/// let report = encode_report("cusp-wel", &finding);
/// assert!(report.starts_with("status+7200 cusp-wel.temp green "));
/// ```
pub fn encode_report(host: &str, finding: &StatusFinding) -> String {
    encode_report_in(host, finding, &Local)
}

/// Encode a finding for `host`, dating it in the given time zone
pub fn encode_report_in<Tz>(host: &str, finding: &StatusFinding, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let interval = finding.interval.as_secs();
    let token = if interval > 0 {
        format!("{}+{}", XYMON_STATUS_TOKEN, interval)
    } else {
        XYMON_STATUS_TOKEN.to_string()
    };

    let date = finding.epoch.with_timezone(tz).format(XYMON_DATE_LAYOUT);

    let label = if finding.label.is_empty() {
        String::new()
    } else {
        format!(" {}", finding.label)
    };

    let message = if finding.message.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", finding.message)
    };

    format!(
        "{} {}.{} {} {}{}\n{}",
        token, host, finding.aspect, finding.colour, date, label, message
    )
}
