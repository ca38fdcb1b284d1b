use chrono::{Datelike as _, Days, Months, NaiveDate, Weekday};

use crate::error::Error;

/// One day of a job's active range within a requested month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), Error> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::Validation(format!("invalid period {year}-{month}")))?;

    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .ok_or_else(|| Error::Validation(format!("invalid period {year}-{month}")))?;

    Ok((first, last))
}

/// Enumerates the days of `(year, month)` that fall inside the job's
/// active range, ordered by ascending date.
///
/// A month entirely before the job started or after it ended yields an
/// empty sequence; that is a valid result, not an error.
pub fn enumerate_month(
    job_start: NaiveDate,
    job_end: Option<NaiveDate>,
    year: i32,
    month: u32,
) -> Result<Vec<MonthDay>, Error> {
    let (first, last) = month_bounds(year, month)?;

    let from = first.max(job_start);
    let to = match job_end {
        Some(end) => last.min(end),
        None => last,
    };

    let mut days = Vec::new();
    let mut date = from;

    while date <= to {
        days.push(MonthDay { date, is_weekend: is_weekend(date) });

        let Some(next) = date.succ_opt() else { break };
        date = next;
    }

    Ok(days)
}

/// Weekday count of an enumerated range, the denominator for per-day rates.
pub fn working_days(days: &[MonthDay]) -> u32 {
    days.iter().filter(|day| !day.is_weekend).count() as u32
}
