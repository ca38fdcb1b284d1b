use rust_decimal::Decimal;

use crate::billing::{AttendanceBreakdown, InvoiceBreakdown, MoneyBreakdown, Period};

use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PeriodQuery {
    pub(super) year: i32,
    pub(super) month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GenerateBatch {
    pub(super) year: i32,
    pub(super) month: u32,
    pub(super) job_ids: Vec<Uuid>,
}

/// Wire shape of a freshly generated invoice, as the details page reads it.
#[derive(Debug, Serialize, Deserialize)]
pub(in crate::pages) struct InvoiceDetails {
    pub(in crate::pages) period: Period,
    pub(in crate::pages) attendance: AttendanceBreakdown,
    pub(in crate::pages) billing: MoneyBreakdown,
    pub(in crate::pages) salary: SalaryTotal,
    pub(in crate::pages) per_day_rate: Decimal,
    pub(in crate::pages) commission: Decimal,
    pub(in crate::pages) net_profit: Decimal,
    pub(in crate::pages) currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(in crate::pages) struct SalaryTotal {
    pub(in crate::pages) total: Decimal,
}

impl From<InvoiceBreakdown> for InvoiceDetails {
    fn from(breakdown: InvoiceBreakdown) -> Self {
        Self {
            period: breakdown.period,
            attendance: breakdown.attendance,
            billing: breakdown.billing,
            salary: SalaryTotal { total: breakdown.salary.total },
            per_day_rate: breakdown.per_day_rate,
            commission: breakdown.commission,
            net_profit: breakdown.net_profit,
            currency: breakdown.currency,
        }
    }
}

/// Condensed figures the invoice listing shows, camelCase as the UI
/// reads them.
///
/// `totalDays` is the working-day denominator behind `perDayRate`, while
/// `presentDays` counts every day actually worked, weekends included, so
/// it can exceed `totalDays` in a month with worked weekends.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InvoiceSummary {
    pub(super) year: i32,
    pub(super) month: i32,
    pub(super) present_days: i32,
    pub(super) total_days: i32,
    pub(super) total_hours: f64,
    pub(super) per_day_rate: Decimal,
    pub(super) total_salary: Decimal,
}

impl From<&invoice::Model> for InvoiceSummary {
    fn from(stored: &invoice::Model) -> Self {
        Self {
            year: stored.year,
            month: stored.month,
            present_days: stored.present_days,
            total_days: stored.total_days,
            total_hours: stored.total_hours,
            per_day_rate: stored.per_day_rate,
            total_salary: stored.salary_total,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct InvoiceView {
    pub(super) job: job::Model,
    pub(super) summary: InvoiceSummary,
    pub(super) candidate: Option<candidate::Model>,
    pub(super) opportunity: Option<opportunity::Model>,
}
