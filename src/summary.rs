use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar::MonthDay, entity::sea_orm_active_enums::AttendanceStatus, ledger::{self, ResolvedDay}};

/// Aggregate view of one job-month, recomputed from the ledger on every
/// call. Served to the UI as-is, hence the camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_days: u32,
    pub present_days: u32,
    /// Present on a weekday.
    pub regular_days_worked: u32,
    /// Present on a Saturday/Sunday.
    pub weekend_days_worked: u32,
    pub absent_days: u32,
    pub leaves: u32,
    pub half_days: u32,
    pub holidays: u32,
    /// Weekend days not overridden to a worked status.
    pub weekend_days: u32,
    pub working_hours: f64,
}

/// Folds a month of ledger rows into aggregate counts.
///
/// Every enumerated day lands in exactly one status bucket; days with no
/// stored row resolve through [`ledger::default_for`]. Working hours sum
/// over `present` rows only, regardless of day-type, so an explicitly
/// worked weekend counts like any other present day.
pub fn summarize(
    year: i32,
    month: u32,
    days: &[MonthDay],
    entries: &HashMap<NaiveDate, ResolvedDay>,
) -> MonthlySummary {
    let mut summary = MonthlySummary {
        year,
        month,
        total_days: days.len() as u32,
        present_days: 0,
        regular_days_worked: 0,
        weekend_days_worked: 0,
        absent_days: 0,
        leaves: 0,
        half_days: 0,
        holidays: 0,
        weekend_days: 0,
        working_hours: 0.0,
    };

    for day in days {
        let default = ledger::default_for(day.is_weekend);
        let entry = entries.get(&day.date).unwrap_or(&default);

        match entry.status {
            AttendanceStatus::Present => {
                summary.present_days += 1;
                if day.is_weekend {
                    summary.weekend_days_worked += 1;
                } else {
                    summary.regular_days_worked += 1;
                }
                summary.working_hours += entry.total_hours_worked;
            },
            AttendanceStatus::Absent => summary.absent_days += 1,
            AttendanceStatus::Leave => summary.leaves += 1,
            AttendanceStatus::HalfDay => summary.half_days += 1,
            AttendanceStatus::Holiday => summary.holidays += 1,
            AttendanceStatus::Weekend => summary.weekend_days += 1,
        }
    }

    summary
}
