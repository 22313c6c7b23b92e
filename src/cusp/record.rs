//! # CUSP Report Record
//!
//! Raw text fields of one CUSP state-of-health report, with typed
//! accessors that parse on demand.
//!
//! Every field is kept exactly as received. Numeric and time fields are
//! only parsed when asked for, and each accessor fails independently, so
//! a single garbled element never hides the rest of the report.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{CuspXymonError, Result};

/// Layout of `system_date_and_time` (always UTC on the recorder)
pub const CHECKIN_LAYOUT: &str = "%a %b %d %H:%M:%S %Y";

/// One decoded `<report>` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CuspReport {
    pub title: String,
    pub instrument: String,
    pub system_date_and_time: String,

    #[serde(rename = "DAS_time_lock")]
    pub das_time_lock: String,
    #[serde(rename = "GPS_state")]
    pub gps_state: String,
    #[serde(rename = "GPS_loss_period")]
    pub gps_loss_period: String,
    #[serde(rename = "Time_success_A")]
    pub time_success_a: String,

    pub inst_sw_ver: String,

    pub sys_batt_volt: String,
    pub sys_temp: String,

    pub samp_rate: String,
    pub pre_evt_len: String,
    pub post_evt_len: String,

    pub free_space: String,
}

impl CuspReport {
    /// Time the recorder wrote this report
    ///
    /// # Errors
    ///
    /// Returns [`CuspXymonError::FieldParse`] if the timestamp does not
    /// follow [`CHECKIN_LAYOUT`].
    pub fn checkin(&self) -> Result<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(self.system_date_and_time.trim(), CHECKIN_LAYOUT)
            .map_err(|_| field_error("system_date_and_time", &self.system_date_and_time))?;
        Ok(Utc.from_utc_datetime(&naive))
    }

    /// Clock quality score (percentage of successful time fixes)
    pub fn clock_quality(&self) -> Result<f64> {
        parse_float("Time_success_A", &self.time_success_a)
    }

    /// Battery voltage in volts
    pub fn power(&self) -> Result<f64> {
        parse_float("sys_batt_volt", &self.sys_batt_volt)
    }

    /// Internal temperature
    pub fn temperature(&self) -> Result<f64> {
        parse_float("sys_temp", &self.sys_temp)
    }

    /// Free storage in kbytes
    pub fn storage(&self) -> Result<i64> {
        self.free_space
            .trim()
            .parse::<i64>()
            .map_err(|_| field_error("free_space", &self.free_space))
    }

    /// Configured sampling rate in samples per second
    pub fn sampling_rate(&self) -> Result<f64> {
        parse_float("samp_rate", &self.samp_rate)
    }

    /// Pre-event capture length in seconds
    pub fn pre_event(&self) -> Result<f64> {
        parse_float("pre_evt_len", &self.pre_evt_len)
    }

    /// Post-event capture length in seconds
    pub fn post_event(&self) -> Result<f64> {
        parse_float("post_evt_len", &self.post_evt_len)
    }
}

fn parse_float(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| field_error(field, raw))
}

fn field_error(field: &'static str, raw: &str) -> CuspXymonError {
    CuspXymonError::FieldParse {
        field,
        value: raw.to_string(),
    }
}
