/*-------------------------- In the name of God ----------------------------*\

    vakit (rust)
    Prayer-time boards for the provinces of Turkey
    Astronomical fallback based on PrayTimes 1.1 JavaScript library

----------------------------- Copyright Block --------------------------------

Copyright (C) 2007-2010 PrayTimes.org

Developed By: Nbiba Bedis <bedis at nbiba at gmail dot com>
Based on Cpp Code By: Mohammad Ebrahim Mohammadi Panah <ebrahim at mohammadi dot ir>
Based on a JavaScript Code By: Hamid Zarrabi-Zadeh

License: GNU GPL v3.0

TERMS OF USE:
    Permission is granted to use this code, with or
    without modification, in any website or application
    provided that credit is given to the original work
    with a link back to PrayTimes.org.

This program is distributed in the hope that it will
be useful, but WITHOUT ANY WARRANTY.

PLEASE DO NOT REMOVE THIS COPYRIGHT BLOCK.

------------------------------------------------------------------------------

User's Manual:
http://praytimes.org/manual

Calculating Formulas:
http://praytimes.org/calculation

\*--------------------------------------------------------------------------*/

//! Small conversions between clock strings, fractional hours and minute spans.

use chrono::NaiveTime;

use crate::error::{Error, Result};

/* parse "HH:MM" or "HH:MM:SS", ignoring annotations such as " (+03)" */
pub fn parse_clock(raw: &str) -> Result<NaiveTime> {
    let value = raw.split_whitespace().next().unwrap_or("");
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| Error::malformed(format!("'{raw}' is not a valid time of day")))
}

/* convert float hours to a clock time, rounding to the nearest minute */
pub fn float_hours_to_clock(time: f64) -> Option<NaiveTime> {
    if !time.is_finite() {
        return None;
    }
    let (hours, minutes) = float_time_parts(time);
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/* get hours and minutes parts of a float time */
fn float_time_parts(time: f64) -> (u32, u32) {
    let time = fix_hour(time + 0.5 / 60.); // add 0.5 minutes to round
    let hours = time.floor();
    let minutes = ((time - hours) * 60.).floor();
    (hours as u32 % 24, minutes as u32)
}

/* range reduce hours to 0..24 */
pub(crate) fn fix_hour(a: f64) -> f64 {
    let a = a - 24.0 * (a / 24.0).floor();
    if a < 0.0 {
        a + 24.0
    } else {
        a
    }
}

/// Formats a minute span as `HH:MM`; spans of a day or more keep counting hours.
pub fn format_span(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_annotated_values() {
        let expected = NaiveTime::from_hms_opt(5, 12, 0).unwrap();
        assert_eq!(parse_clock("05:12").unwrap(), expected);
        assert_eq!(parse_clock("05:12 (+03)").unwrap(), expected);
        assert_eq!(parse_clock(" 05:12:00 ").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "5", "25:00", "12:61", "noon", "-----"] {
            assert!(
                matches!(parse_clock(raw), Err(Error::MalformedSchedule(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn float_hours_round_to_nearest_minute() {
        assert_eq!(
            float_hours_to_clock(5.5),
            NaiveTime::from_hms_opt(5, 30, 0)
        );
        // 12h 14.6min rounds up
        assert_eq!(
            float_hours_to_clock(12. + 14.6 / 60.),
            NaiveTime::from_hms_opt(12, 15, 0)
        );
        // just before midnight wraps to 00:00
        assert_eq!(
            float_hours_to_clock(23.999),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(float_hours_to_clock(f64::NAN), None);
    }

    #[test]
    fn spans_are_zero_padded() {
        assert_eq!(format_span(0), "00:00");
        assert_eq!(format_span(315), "05:15");
        assert_eq!(format_span(1500), "25:00");
    }
}
