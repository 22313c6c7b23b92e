//! # Xymon Protocol Constants and Types
//!
//! Core definitions for the Xymon `status` message.

use std::fmt::{self, Display};

use chrono::{DateTime, Offset, TimeZone};

/// Default Xymon server port
pub const XYMON_DEFAULT_PORT: u16 = 1984;

/// Leading token of every status message
pub const XYMON_STATUS_TOKEN: &str = "status";

/// Layout of the header timestamp (12-hour clock, no AM/PM marker)
pub const XYMON_DATE_LAYOUT: &str = "%a %b %d %I:%M:%S %Y";


/// Status colour understood by the Xymon server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    #[default]
    Green,
    Yellow,
    Red,
}

impl Colour {
    /// Wire token for this colour
    pub fn as_str(self) -> &'static str {
        match self {
            Colour::Green => "green",
            Colour::Yellow => "yellow",
            Colour::Red => "red",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a timestamp the way Unix `date` does, e.g. `Tue Mar  4 05:06:07 UTC 2014`
///
/// A zero offset is named `UTC`; any other offset is written as `+hhmm`
/// since zone abbreviations are not available from the offset alone.
pub fn format_unix_date<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let zone = if time.offset().fix().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        time.format("%z").to_string()
    };

    format!("{} {} {}", time.format("%a %b %e %H:%M:%S"), zone, time.format("%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_protocol_constants() {
        assert_eq!(XYMON_DEFAULT_PORT, 1984);
        assert_eq!(XYMON_STATUS_TOKEN, "status");
    }

    #[test]
    fn test_colour_tokens() {
        assert_eq!(Colour::Green.to_string(), "green");
        assert_eq!(Colour::Yellow.to_string(), "yellow");
        assert_eq!(Colour::Red.to_string(), "red");
    }

    #[test]
    fn test_colour_default_is_green() {
        assert_eq!(Colour::default(), Colour::Green);
    }

    #[test]
    fn test_colour_ordering_by_severity() {
        assert!(Colour::Green < Colour::Yellow);
        assert!(Colour::Yellow < Colour::Red);
        assert_eq!(Colour::Yellow.max(Colour::Red), Colour::Red);
    }

    #[test]
    fn test_unix_date_names_utc() {
        let time = Utc.with_ymd_and_hms(2014, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_unix_date(&time), "Tue Mar  4 05:06:07 UTC 2014");
    }

    #[test]
    fn test_unix_date_zero_fixed_offset_is_utc() {
        let zone = FixedOffset::east_opt(0).unwrap();
        let time = Utc.with_ymd_and_hms(2014, 3, 14, 5, 6, 7).unwrap().with_timezone(&zone);
        assert_eq!(format_unix_date(&time), "Fri Mar 14 05:06:07 UTC 2014");
    }

    #[test]
    fn test_unix_date_other_offset_numeric() {
        let zone = FixedOffset::east_opt(13 * 3600).unwrap();
        let time = Utc.with_ymd_and_hms(2014, 3, 4, 5, 6, 7).unwrap().with_timezone(&zone);
        assert_eq!(format_unix_date(&time), "Tue Mar  4 18:06:07 +1300 2014");
    }
}
