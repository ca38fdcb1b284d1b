use chrono::NaiveTime;
use sea_orm::ActiveEnum as _;

use crate::{entity::sea_orm_active_enums::AttendanceStatus, error::Error};

/// The editable part of one ledger day, after defaulting or upsert
/// normalization. Absence of a stored row is never ambiguous: it always
/// resolves to a concrete status through [`default_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDay {
    pub status: AttendanceStatus,
    pub time_in: Option<NaiveTime>,
    pub time_out: Option<NaiveTime>,
    pub total_hours_worked: f64,
}

/// Synthesized record for a day with no explicit entry.
pub fn default_for(is_weekend: bool) -> ResolvedDay {
    let status = if is_weekend { AttendanceStatus::Weekend } else { AttendanceStatus::Absent };

    ResolvedDay {
        status,
        time_in: None,
        time_out: None,
        total_hours_worked: 0.0,
    }
}

/// Parses a wire status value, naming the rejected value on failure.
pub fn parse_status(raw: &str) -> Result<AttendanceStatus, Error> {
    AttendanceStatus::try_from_value(&raw.to_owned())
        .map_err(|_| Error::Validation(format!("invalid attendance status `{raw}`")))
}

/// Parses an `HH:MM` clock value (seconds accepted but not required).
pub fn parse_clock(raw: &str) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| Error::Validation(format!("invalid clock time `{raw}`")))
}

/// Normalizes an upsert into a full-row replacement.
///
/// `present` requires both clock times and recomputes the worked hours;
/// every other status forces the clock times to null and the hours to 0,
/// overriding whatever the caller supplied.
pub fn resolve_upsert(
    status: AttendanceStatus,
    time_in: Option<NaiveTime>,
    time_out: Option<NaiveTime>,
) -> Result<ResolvedDay, Error> {
    if status != AttendanceStatus::Present {
        return Ok(ResolvedDay {
            status,
            time_in: None,
            time_out: None,
            total_hours_worked: 0.0,
        });
    }

    let (Some(time_in), Some(time_out)) = (time_in, time_out) else {
        return Err(Error::Validation(
            "time_in and time_out are required when status is `present`".to_owned(),
        ));
    };

    Ok(ResolvedDay {
        status: AttendanceStatus::Present,
        time_in: Some(time_in),
        time_out: Some(time_out),
        total_hours_worked: worked_hours(time_in, time_out),
    })
}

/// Worked hours between two clock times, clamped to >= 0. A time_out
/// earlier than time_in yields 0 hours, never a negative value or a
/// wraparound to the next day.
pub fn worked_hours(time_in: NaiveTime, time_out: NaiveTime) -> f64 {
    let minutes = (time_out - time_in).num_minutes();

    minutes.max(0) as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let weekday = default_for(false);
        assert_eq!(weekday.status, AttendanceStatus::Absent);
        assert_eq!(weekday.total_hours_worked, 0.0);

        let weekend = default_for(true);
        assert_eq!(weekend.status, AttendanceStatus::Weekend);
        assert_eq!(weekend.total_hours_worked, 0.0);
        assert_eq!(weekend.time_in, None);
        assert_eq!(weekend.time_out, None);
    }

    #[test]
    fn test_parse_status_names_rejected_value() {
        assert_eq!(parse_status("present").unwrap(), AttendanceStatus::Present);
        assert_eq!(parse_status("half_day").unwrap(), AttendanceStatus::HalfDay);

        let err = parse_status("vacationing").unwrap_err();
        assert!(err.to_string().contains("vacationing"));
    }

    #[test]
    fn test_present_computes_hours() {
        let day = resolve_upsert(
            AttendanceStatus::Present,
            Some(parse_clock("09:00").unwrap()),
            Some(parse_clock("17:30").unwrap()),
        ).unwrap();

        assert_eq!(day.total_hours_worked, 8.5);
    }

    #[test]
    fn test_reversed_clock_clamps_to_zero() {
        let day = resolve_upsert(
            AttendanceStatus::Present,
            Some(parse_clock("10:00").unwrap()),
            Some(parse_clock("09:00").unwrap()),
        ).unwrap();

        assert_eq!(day.total_hours_worked, 0.0);
    }

    #[test]
    fn test_present_requires_both_clock_times() {
        let res = resolve_upsert(AttendanceStatus::Present, Some(parse_clock("09:00").unwrap()), None);
        assert!(res.is_err());
    }

    #[test]
    fn test_non_present_forces_nulls() {
        let day = resolve_upsert(
            AttendanceStatus::Leave,
            Some(parse_clock("09:00").unwrap()),
            Some(parse_clock("17:00").unwrap()),
        ).unwrap();

        assert_eq!(day.status, AttendanceStatus::Leave);
        assert_eq!(day.time_in, None);
        assert_eq!(day.time_out, None);
        assert_eq!(day.total_hours_worked, 0.0);
    }

    #[test]
    fn test_parse_clock_formats() {
        assert!(parse_clock("09:00").is_ok());
        assert!(parse_clock("09:00:30").is_ok());
        assert!(parse_clock("9 am").is_err());
    }
}
