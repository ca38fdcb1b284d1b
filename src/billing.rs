use rust_decimal::{prelude::FromPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};

use crate::{consts::CURRENCY_SCALE, error::Error};

/// Premium/overtime/commission rates. The weekend and holiday premium
/// multipliers and the overtime rate basis are deployment configuration,
/// never hardcoded figures.
#[derive(Debug, Clone, Copy)]
pub struct RateConfig {
    /// Multiplier applied to the per-day rate for worked weekend days.
    pub weekend_multiplier: Decimal,
    /// Multiplier applied to the per-day rate for worked holidays.
    pub holiday_multiplier: Decimal,
    /// Hours per day used to derive the hourly overtime rate from the
    /// per-day rate.
    pub overtime_day_hours: Decimal,
    /// Commission as a fraction of the billing total.
    pub commission_rate: Decimal,
}

/// Rate terms read from the parent job.
#[derive(Debug, Clone)]
pub struct JobTerms {
    pub candidate_salary: Decimal,
    pub client_billing_amount: Decimal,
    pub currency: String,
}

/// Day counts feeding the invoice, merged from the daily ledger
/// (regular/weekend/half days) and the monthly totals form (worked
/// holidays and overtime, which the ledger cannot express).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceBreakdown {
    pub regular_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
    pub half_days: u32,
    pub overtime_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyBreakdown {
    pub regular: Decimal,
    pub weekend: Decimal,
    pub holiday: Decimal,
    pub overtime: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

/// Immutable financial snapshot for one job-month. Regeneration produces
/// a new value; snapshots already handed out are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBreakdown {
    pub period: Period,
    pub attendance: AttendanceBreakdown,
    pub billing: MoneyBreakdown,
    pub salary: MoneyBreakdown,
    pub per_day_rate: Decimal,
    pub commission: Decimal,
    pub net_profit: Decimal,
    pub currency: String,
}

/// Derives the invoice financials for one period.
///
/// `working_days` is the weekday count of the job's active range within
/// the month; both per-day rates divide by it, so a degenerate period
/// fails with `DivisionByZero` instead of emitting infinity or NaN.
pub fn compute(
    terms: &JobTerms,
    period: Period,
    working_days: u32,
    attendance: &AttendanceBreakdown,
    rates: &RateConfig,
) -> Result<InvoiceBreakdown, Error> {
    if terms.client_billing_amount <= Decimal::ZERO {
        return Err(Error::InvalidState("job is missing a client_billing_amount".to_owned()));
    }
    if terms.candidate_salary <= Decimal::ZERO {
        return Err(Error::InvalidState("job is missing a candidate_salary".to_owned()));
    }
    if working_days == 0 {
        return Err(Error::DivisionByZero);
    }
    if rates.overtime_day_hours <= Decimal::ZERO {
        return Err(Error::DivisionByZero);
    }

    let overtime_hours = Decimal::from_f64(attendance.overtime_hours)
        .filter(|hours| !hours.is_sign_negative())
        .ok_or_else(|| Error::Validation("overtime_hours must be a non-negative number".to_owned()))?;

    let salary_per_day = terms.candidate_salary / Decimal::from(working_days);
    let billing_per_day = terms.client_billing_amount / Decimal::from(working_days);

    let billing = buckets(billing_per_day, attendance, overtime_hours, rates);
    let salary = buckets(salary_per_day, attendance, overtime_hours, rates);

    let commission = (billing.total * rates.commission_rate).round_dp(CURRENCY_SCALE);
    let net_profit = billing.total - salary.total - commission;

    Ok(InvoiceBreakdown {
        period,
        attendance: *attendance,
        billing,
        salary,
        per_day_rate: salary_per_day.round_dp(CURRENCY_SCALE),
        commission,
        net_profit,
        currency: terms.currency.clone(),
    })
}

fn buckets(
    per_day: Decimal,
    attendance: &AttendanceBreakdown,
    overtime_hours: Decimal,
    rates: &RateConfig,
) -> MoneyBreakdown {
    // Half days compensate at half the regular rate
    let regular_days = Decimal::from(attendance.regular_days)
        + Decimal::from(attendance.half_days) / Decimal::TWO;

    let regular = (per_day * regular_days).round_dp(CURRENCY_SCALE);
    let weekend = (per_day * rates.weekend_multiplier * Decimal::from(attendance.weekend_days))
        .round_dp(CURRENCY_SCALE);
    let holiday = (per_day * rates.holiday_multiplier * Decimal::from(attendance.holiday_days))
        .round_dp(CURRENCY_SCALE);
    let overtime = (per_day / rates.overtime_day_hours * overtime_hours).round_dp(CURRENCY_SCALE);

    MoneyBreakdown {
        regular,
        weekend,
        holiday,
        overtime,
        total: regular + weekend + holiday + overtime,
    }
}
