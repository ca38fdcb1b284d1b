use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::*;

/// Job row as the listing shows it, with the related names denormalized in.
#[derive(Debug, Serialize)]
pub(super) struct JobRow {
    #[serde(flatten)]
    pub(super) job: job::Model,
    pub(super) candidate_name: Option<String>,
    pub(super) opportunity_title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CreateJob {
    pub(super) candidate_id: Uuid,
    pub(super) opportunity_id: Uuid,
    pub(super) client_company: String,
    #[serde(default)]
    pub(super) partner_company: Option<String>,
    pub(super) candidate_salary: Decimal,
    pub(super) client_billing_amount: Decimal,
    pub(super) payment_frequency: PaymentFrequency,
    pub(super) payment_currency: String,
    pub(super) start_date: NaiveDate,
    #[serde(default)]
    pub(super) end_date: Option<NaiveDate>,
    #[serde(default)]
    pub(super) status: Option<JobStatus>,
    #[serde(default)]
    pub(super) notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct UpdateJob {
    #[serde(default)]
    pub(super) client_company: Option<String>,
    #[serde(default)]
    pub(super) partner_company: Option<String>,
    #[serde(default)]
    pub(super) candidate_salary: Option<Decimal>,
    #[serde(default)]
    pub(super) client_billing_amount: Option<Decimal>,
    #[serde(default)]
    pub(super) payment_frequency: Option<PaymentFrequency>,
    #[serde(default)]
    pub(super) payment_currency: Option<String>,
    #[serde(default)]
    pub(super) start_date: Option<NaiveDate>,
    #[serde(default)]
    pub(super) end_date: Option<NaiveDate>,
    #[serde(default)]
    pub(super) status: Option<JobStatus>,
    #[serde(default)]
    pub(super) notes: Option<String>,
}

/// Monthly totals form, the coarse-grained companion of the daily ledger.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct RecordMonthTotals {
    pub(super) job_id: Uuid,
    pub(super) year: i32,
    pub(super) month: u32,
    #[serde(default)]
    pub(super) regular_days_worked: i32,
    #[serde(default)]
    pub(super) weekend_days_worked: i32,
    #[serde(default)]
    pub(super) holiday_days_worked: i32,
    #[serde(default)]
    pub(super) leaves_taken: i32,
    #[serde(default)]
    pub(super) overtime_hours: f64,
    #[serde(default)]
    pub(super) notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct MonthTotals {
    pub(super) job_id: Uuid,
    pub(super) year: i32,
    pub(super) month: u32,
    pub(super) regular_days_worked: i32,
    pub(super) weekend_days_worked: i32,
    pub(super) holiday_days_worked: i32,
    pub(super) leaves_taken: i32,
    pub(super) overtime_hours: f64,
    pub(super) notes: Option<String>,
    pub(super) total_working_days: u32,
}

impl MonthTotals {
    /// A month with no stored row reads back as all zeroes; only the
    /// working-day denominator is always present.
    pub(super) fn new(
        job_id: Uuid,
        year: i32,
        month: u32,
        total_working_days: u32,
        stored: Option<attendance_month::Model>,
    ) -> Self {
        match stored {
            Some(row) => Self {
                job_id,
                year,
                month,
                regular_days_worked: row.regular_days_worked,
                weekend_days_worked: row.weekend_days_worked,
                holiday_days_worked: row.holiday_days_worked,
                leaves_taken: row.leaves_taken,
                overtime_hours: row.overtime_hours,
                notes: row.notes,
                total_working_days,
            },
            None => Self {
                job_id,
                year,
                month,
                regular_days_worked: 0,
                weekend_days_worked: 0,
                holiday_days_worked: 0,
                leaves_taken: 0,
                overtime_hours: 0.0,
                notes: None,
                total_working_days,
            },
        }
    }
}
