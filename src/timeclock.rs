//! Time-of-day arithmetic for entry validation.
//!
//! Entries carry `HH:MM` wall-clock times on a single calendar date. Overlap
//! uses half-open interval semantics: `[10:00, 11:00)` and `[11:00, 12:00)`
//! touch but do not overlap.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeclockError {
    #[error("start_time and end_time must be HH:MM (24h)")]
    BadFormat,
    #[error("End time must be after start time")]
    EndNotAfterStart,
}

/// Parse a strict `HH:MM` 24-hour time.
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, TimeclockError> {
    if raw.len() != 5 || raw.as_bytes()[2] != b':' {
        return Err(TimeclockError::BadFormat);
    }
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| TimeclockError::BadFormat)
}

/// Whole minutes between start and end; end must be strictly after start.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> Result<i32, TimeclockError> {
    if end <= start {
        return Err(TimeclockError::EndNotAfterStart);
    }
    let start_min = start.hour() * 60 + start.minute();
    let end_min = end.hour() * 60 + end.minute();
    Ok((end_min - start_min) as i32)
}

/// Two ranges overlap iff `start1 < end2 AND start2 < end1`. Strict
/// comparison keeps adjacent ranges legal.
pub fn ranges_overlap(start1: NaiveTime, end1: NaiveTime, start2: NaiveTime, end2: NaiveTime) -> bool {
    start1 < end2 && start2 < end1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> NaiveTime {
        parse_hhmm(raw).unwrap()
    }

    #[test]
    fn parses_strict_hhmm_only() {
        assert!(parse_hhmm("09:30").is_ok());
        assert!(parse_hhmm("23:59").is_ok());
        assert_eq!(parse_hhmm("9:30"), Err(TimeclockError::BadFormat));
        assert_eq!(parse_hhmm("09.30"), Err(TimeclockError::BadFormat));
        assert_eq!(parse_hhmm("25:00"), Err(TimeclockError::BadFormat));
        assert_eq!(parse_hhmm(""), Err(TimeclockError::BadFormat));
    }

    #[test]
    fn duration_is_minutes_between() {
        assert_eq!(duration_minutes(t("09:00"), t("10:30")), Ok(90));
        assert_eq!(duration_minutes(t("09:59"), t("10:00")), Ok(1));
    }

    #[test]
    fn zero_or_negative_duration_rejected() {
        assert_eq!(
            duration_minutes(t("10:00"), t("10:00")),
            Err(TimeclockError::EndNotAfterStart)
        );
        assert_eq!(
            duration_minutes(t("11:00"), t("10:00")),
            Err(TimeclockError::EndNotAfterStart)
        );
    }

    #[test]
    fn overlapping_ranges_detected() {
        assert!(ranges_overlap(t("10:00"), t("12:00"), t("11:00"), t("13:00")));
        assert!(ranges_overlap(t("11:00"), t("13:00"), t("10:00"), t("12:00")));
        // containment
        assert!(ranges_overlap(t("09:00"), t("17:00"), t("12:00"), t("12:30")));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!ranges_overlap(t("10:00"), t("11:00"), t("11:00"), t("12:00")));
        assert!(!ranges_overlap(t("11:00"), t("12:00"), t("10:00"), t("11:00")));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!ranges_overlap(t("08:00"), t("09:00"), t("10:00"), t("11:00")));
    }
}
