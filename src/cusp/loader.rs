//! # CUSP Report Loader
//!
//! Decodes CUSP `<report>` XML documents into [`CuspReport`] records.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::record::CuspReport;
use crate::error::{CuspXymonError, Result};

/// Decode a report document from disk
///
/// # Arguments
///
/// * `path` - Path to the XML report
///
/// # Errors
///
/// Returns error if:
/// - The file cannot be read
/// - The document is not well-formed XML
///
/// # Examples
///
/// ```no_run
/// use cusp_xymon::cusp::loader::decode_report;
///
/// let report = decode_report("Report_0001.xml")?;
/// println!("{}", report.system_date_and_time);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_report<P: AsRef<Path>>(path: P) -> Result<CuspReport> {
    let bytes = fs::read(path.as_ref())?;
    debug!("Read {} bytes from {}", bytes.len(), path.as_ref().display());
    decode_report_bytes(&bytes)
}

/// Decode a report document from raw bytes
///
/// Recorders declare their documents as ISO-8859-1, so input that is not
/// valid UTF-8 is decoded as Latin-1.
pub fn decode_report_bytes(bytes: &[u8]) -> Result<CuspReport> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(latin1_to_string(bytes)),
    };

    quick_xml::de::from_str(&text).map_err(|e| CuspXymonError::Decode(e.to_string()))
}

fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<report>
  <title>CUSP State of Health</title>
  <instrument>CUSP-3C 1234</instrument>
  <system_date_and_time>Tue Mar 04 05:06:07 2014 </system_date_and_time>
  <clock_error>0</clock_error>
  <DAS_time_lock>Locked</DAS_time_lock>
  <GPS_state>On</GPS_state>
  <GPS_loss_period></GPS_loss_period>
  <Time_success_A>97</Time_success_A>
  <inst_sw_ver>4.1.2</inst_sw_ver>
  <sys_batt_volt>12.8</sys_batt_volt>
  <sys_temp>18.25</sys_temp>
  <samp_rate>200</samp_rate>
  <pre_evt_len>40</pre_evt_len>
  <post_evt_len>60</post_evt_len>
  <curr_X_noise>12</curr_X_noise>
  <free_space>1536000</free_space>
</report>
"#;

    #[test]
    fn test_decode_sample_report() {
        let report = decode_report_bytes(SAMPLE.as_bytes()).unwrap();

        assert_eq!(report.instrument, "CUSP-3C 1234");
        assert_eq!(report.das_time_lock, "Locked");
        assert_eq!(report.gps_state, "On");
        assert_eq!(report.gps_loss_period, "");
        assert_eq!(report.time_success_a, "97");
        assert_eq!(report.free_space, "1536000");
        assert!(report.checkin().is_ok());
    }

    #[test]
    fn test_missing_elements_are_empty() {
        let report = decode_report_bytes(b"<report><sys_temp>5</sys_temp></report>").unwrap();

        assert_eq!(report.sys_temp, "5");
        assert_eq!(report.sys_batt_volt, "");
        assert!(report.power().is_err());
    }

    #[test]
    fn test_latin1_document() {
        let mut bytes = b"<report><title>Caf".to_vec();
        bytes.push(0xE9); // e-acute in ISO-8859-1
        bytes.extend_from_slice(b"</title></report>");

        let report = decode_report_bytes(&bytes).unwrap();
        assert_eq!(report.title, "Caf\u{e9}");
    }

    #[test]
    fn test_malformed_document() {
        let result = decode_report_bytes(b"<report><title>truncated");
        assert!(matches!(result, Err(CuspXymonError::Decode(_))));
    }

    #[test]
    fn test_decode_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let report = decode_report(temp_file.path()).unwrap();
        assert_eq!(report.sys_batt_volt, "12.8");
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_report("/nonexistent/Report_0000.xml");
        assert!(matches!(result, Err(CuspXymonError::Io(_))));
    }
}
