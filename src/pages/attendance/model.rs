use chrono::NaiveTime;

use crate::entity::sea_orm_active_enums::AttendanceStatus;

use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PeriodQuery {
    pub(super) year: i32,
    pub(super) month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct UpsertDay {
    pub(super) status: String,
    #[serde(default)]
    pub(super) time_in: Option<String>,
    #[serde(default)]
    pub(super) time_out: Option<String>,
    #[serde(default)]
    pub(super) notes: Option<String>,
}

/// One day of the monthly view. Days with no stored row materialize with
/// a null id and the default status for their day-type.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct DayRecord {
    pub(super) id: Option<Uuid>,
    pub(super) date: NaiveDate,
    pub(super) status: AttendanceStatus,
    pub(super) time_in: Option<NaiveTime>,
    pub(super) time_out: Option<NaiveTime>,
    pub(super) total_hours_worked: f64,
    pub(super) notes: Option<String>,
}

impl DayRecord {
    pub(super) fn from_stored(record: &attendance_record::Model) -> Self {
        Self {
            id: Some(record.id),
            date: record.date,
            status: record.status.clone(),
            time_in: record.time_in,
            time_out: record.time_out,
            total_hours_worked: record.total_hours_worked,
            notes: record.notes.clone(),
        }
    }

    pub(super) fn materialized(date: NaiveDate, is_weekend: bool) -> Self {
        let day = ledger::default_for(is_weekend);

        Self {
            id: None,
            date,
            status: day.status,
            time_in: day.time_in,
            time_out: day.time_out,
            total_hours_worked: day.total_hours_worked,
            notes: None,
        }
    }
}
