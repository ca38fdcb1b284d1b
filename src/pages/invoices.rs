use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{auth::Admin, billing::{self, AttendanceBreakdown, JobTerms, Period, RateConfig}, calendar, entity::{attendance_month, attendance_record, candidate, invoice, job, opportunity, prelude::*, user}, error::Error, ledger::ResolvedDay, pdf, summary};

use model::*;

mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(generate_batch)
        .service(list_monthly)
        .service(get_job_invoice_pdf)
        .service(get_job_invoice);
}

/// Recomputes and stores the invoice for one job-month.
///
/// The daily ledger supplies the regular/weekend/half-day counts; the
/// monthly totals form supplies the worked holidays and overtime hours it
/// alone can express. Regeneration overwrites the stored row wholesale.
pub(super) async fn generate_for_job(
    db: &DatabaseConnection,
    actor: Option<Uuid>,
    job: &job::Model,
    year: i32,
    month: u32,
    rates: &RateConfig,
) -> Result<(invoice::Model, InvoiceDetails), Error> {
    let days = calendar::enumerate_month(job.start_date, job.end_date, year, month)?;
    let working_days = calendar::working_days(&days);

    let (first, last) = calendar::month_bounds(year, month)?;
    let records = AttendanceRecord::find()
        .filter(attendance_record::Column::JobId.eq(job.id))
        .filter(attendance_record::Column::Date.between(first, last))
        .all(db).await?;

    let entries = records.into_iter()
        .map(|record| (
            record.date,
            ResolvedDay {
                status: record.status,
                time_in: record.time_in,
                time_out: record.time_out,
                total_hours_worked: record.total_hours_worked,
            },
        ))
        .collect::<HashMap<_, _>>();

    let month_summary = summary::summarize(year, month, &days, &entries);

    let totals = AttendanceMonth::find()
        .filter(attendance_month::Column::JobId.eq(job.id))
        .filter(attendance_month::Column::Year.eq(year))
        .filter(attendance_month::Column::Month.eq(month as i32))
        .one(db).await?;

    let (holiday_days, overtime_hours) = totals
        .map(|row| (row.holiday_days_worked.max(0) as u32, row.overtime_hours))
        .unwrap_or((0, 0.0));

    let attendance = AttendanceBreakdown {
        regular_days: month_summary.regular_days_worked,
        weekend_days: month_summary.weekend_days_worked,
        holiday_days,
        half_days: month_summary.half_days,
        overtime_hours,
    };

    let terms = JobTerms {
        candidate_salary: job.candidate_salary,
        client_billing_amount: job.client_billing_amount,
        currency: job.payment_currency.clone(),
    };

    let breakdown = billing::compute(&terms, Period { year, month }, working_days, &attendance, rates)?;

    let model = invoice::ActiveModel {
        created_by: Set(actor),
        updated_by: Set(actor),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        job_id: Set(job.id),
        year: Set(year),
        month: Set(month as i32),
        regular_days: Set(attendance.regular_days as i32),
        weekend_days: Set(attendance.weekend_days as i32),
        holiday_days: Set(attendance.holiday_days as i32),
        half_days: Set(attendance.half_days as i32),
        overtime_hours: Set(attendance.overtime_hours),
        total_days: Set(working_days as i32),
        present_days: Set(month_summary.present_days as i32),
        total_hours: Set(month_summary.working_hours),
        per_day_rate: Set(breakdown.per_day_rate),
        billing_regular: Set(breakdown.billing.regular),
        billing_weekend: Set(breakdown.billing.weekend),
        billing_holiday: Set(breakdown.billing.holiday),
        billing_overtime: Set(breakdown.billing.overtime),
        billing_total: Set(breakdown.billing.total),
        salary_total: Set(breakdown.salary.total),
        commission: Set(breakdown.commission),
        net_profit: Set(breakdown.net_profit),
        currency: Set(breakdown.currency.clone()),
        ..Default::default()
    };

    let stored = Invoice::insert(model)
        .on_conflict(
            OnConflict::columns([
                invoice::Column::JobId,
                invoice::Column::Year,
                invoice::Column::Month,
            ])
                .update_columns([
                    invoice::Column::RegularDays,
                    invoice::Column::WeekendDays,
                    invoice::Column::HolidayDays,
                    invoice::Column::HalfDays,
                    invoice::Column::OvertimeHours,
                    invoice::Column::TotalDays,
                    invoice::Column::PresentDays,
                    invoice::Column::TotalHours,
                    invoice::Column::PerDayRate,
                    invoice::Column::BillingRegular,
                    invoice::Column::BillingWeekend,
                    invoice::Column::BillingHoliday,
                    invoice::Column::BillingOvertime,
                    invoice::Column::BillingTotal,
                    invoice::Column::SalaryTotal,
                    invoice::Column::Commission,
                    invoice::Column::NetProfit,
                    invoice::Column::Currency,
                    invoice::Column::UpdatedAt,
                    invoice::Column::UpdatedBy,
                ])
                .to_owned(),
        )
        .exec_with_returning(db).await?;

    Ok((stored, InvoiceDetails::from(breakdown)))
}

async fn find_invoice(db: &DatabaseConnection, job_id: Uuid, year: i32, month: u32) -> Result<Option<invoice::Model>, Error> {
    calendar::month_bounds(year, month)?;

    let stored = Invoice::find()
        .filter(invoice::Column::JobId.eq(job_id))
        .filter(invoice::Column::Year.eq(year))
        .filter(invoice::Column::Month.eq(month as i32))
        .one(db).await?;

    Ok(stored)
}

#[post("/generate")]
async fn generate_batch(db: web::Data<DatabaseConnection>, admin: Admin, rates: web::Data<RateConfig>, payload: web::Json<GenerateBatch>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    calendar::month_bounds(payload.year, payload.month)?;

    let mut invoices = Vec::new();
    let mut errors = Vec::new();

    // Each job settles on its own; one bad job never blocks the batch
    for job_id in payload.job_ids {
        let result = async {
            let job = Job::find_by_id(job_id)
                .one(db.as_ref()).await?
                .ok_or(Error::NotFound("job"))?;

            generate_for_job(db.as_ref(), Some(admin.id), &job, payload.year, payload.month, &rates).await
        }.await;

        match result {
            Ok((stored, _)) => invoices.push(stored),
            Err(err) => errors.push(json!({
                "job_id": job_id,
                "error": err.to_string(),
            })),
        }
    }

    Ok(web::Json(json!({
        "success": errors.is_empty(),
        "invoices": invoices,
        "errors": errors,
    })))
}

#[get("/monthly")]
async fn list_monthly(db: web::Data<DatabaseConnection>, _user: user::Model, query: web::Query<PeriodQuery>) -> Result<impl Responder, Error> {
    let PeriodQuery { year, month } = query.into_inner();

    calendar::month_bounds(year, month)?;

    let stored = Invoice::find()
        .filter(invoice::Column::Year.eq(year))
        .filter(invoice::Column::Month.eq(month as i32))
        .all(db.as_ref()).await?;

    // One fetch per related table, joined in memory
    let jobs = Job::find()
        .filter(job::Column::Id.is_in(stored.iter().map(|row| row.job_id).collect::<Vec<_>>()))
        .all(db.as_ref()).await?;

    let candidates = Candidate::find()
        .filter(candidate::Column::Id.is_in(jobs.iter().map(|job| job.candidate_id).collect::<Vec<_>>()))
        .all(db.as_ref()).await?
        .into_iter()
        .map(|candidate| (candidate.id, candidate))
        .collect::<HashMap<_, _>>();

    let opportunities = Opportunity::find()
        .filter(opportunity::Column::Id.is_in(jobs.iter().map(|job| job.opportunity_id).collect::<Vec<_>>()))
        .all(db.as_ref()).await?
        .into_iter()
        .map(|opportunity| (opportunity.id, opportunity))
        .collect::<HashMap<_, _>>();

    let jobs = jobs.into_iter()
        .map(|job| (job.id, job))
        .collect::<HashMap<_, _>>();

    let invoices = stored.into_iter()
        .filter_map(|row| {
            let job = jobs.get(&row.job_id)?.clone();

            Some(InvoiceView {
                summary: InvoiceSummary::from(&row),
                candidate: candidates.get(&job.candidate_id).cloned(),
                opportunity: opportunities.get(&job.opportunity_id).cloned(),
                job,
            })
        })
        .collect::<Vec<_>>();

    Ok(web::Json(json!({ "invoices": invoices })))
}

#[get("/job/{job_id}/monthly")]
async fn get_job_invoice(db: web::Data<DatabaseConnection>, _user: user::Model, job: job::Model, query: web::Query<PeriodQuery>) -> Result<impl Responder, Error> {
    let PeriodQuery { year, month } = query.into_inner();

    let Some(stored) = find_invoice(db.as_ref(), job.id, year, month).await? else {
        return Err(Error::NotFound("invoice"));
    };

    let candidate = Candidate::find_by_id(job.candidate_id).one(db.as_ref()).await?;
    let opportunity = Opportunity::find_by_id(job.opportunity_id).one(db.as_ref()).await?;

    Ok(web::Json(InvoiceView {
        summary: InvoiceSummary::from(&stored),
        job,
        candidate,
        opportunity,
    }))
}

#[get("/job/{job_id}/monthly/pdf")]
async fn get_job_invoice_pdf(db: web::Data<DatabaseConnection>, _user: user::Model, job: job::Model, query: web::Query<PeriodQuery>) -> Result<impl Responder, Error> {
    let PeriodQuery { year, month } = query.into_inner();

    let Some(stored) = find_invoice(db.as_ref(), job.id, year, month).await? else {
        return Err(Error::NotFound("invoice"));
    };

    let candidate = Candidate::find_by_id(job.candidate_id)
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("candidate"))?;
    let opportunity = Opportunity::find_by_id(job.opportunity_id)
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("opportunity"))?;

    let bytes = pdf::render(&pdf::InvoiceDocument {
        candidate_name: &candidate.name,
        opportunity_title: &opportunity.title,
        client_company: &job.client_company,
        invoice: &stored,
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::entity::sea_orm_active_enums::{JobStatus, PaymentFrequency, RoleType};
    use crate::auth::Authority;

    use super::*;

    fn recruiter() -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            username: "maya".to_string(),
            password: Vec::new(),
            role: RoleType::Recruiter,
        }
    }

    fn job_fixture() -> job::Model {
        job::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            candidate_id: Uuid::new_v4(),
            opportunity_id: Uuid::new_v4(),
            client_company: "Acme Corp".to_string(),
            partner_company: None,
            candidate_salary: dec!(62000),
            client_billing_amount: dec!(80000),
            payment_frequency: PaymentFrequency::Monthly,
            payment_currency: "INR".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: None,
            status: JobStatus::Active,
            notes: None,
        }
    }

    fn invoice_fixture(job: &job::Model) -> invoice::Model {
        invoice::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            job_id: job.id,
            year: 2024,
            month: 6,
            regular_days: 18,
            weekend_days: 0,
            holiday_days: 0,
            half_days: 0,
            overtime_hours: 0.0,
            total_days: 20,
            present_days: 18,
            total_hours: 144.0,
            per_day_rate: dec!(3100),
            billing_regular: dec!(72000),
            billing_weekend: dec!(0),
            billing_holiday: dec!(0),
            billing_overtime: dec!(0),
            billing_total: dec!(72000),
            salary_total: dec!(55800),
            commission: dec!(7200),
            net_profit: dec!(9000),
            currency: "INR".to_owned(),
        }
    }

    fn candidate_fixture(job: &job::Model) -> candidate::Model {
        candidate::Model {
            id: job.candidate_id,
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            name: "Priya Sharma".to_owned(),
            email: None,
            phone: None,
            skills: json!(["Rust"]),
            notes: None,
        }
    }

    fn opportunity_fixture(job: &job::Model) -> opportunity::Model {
        opportunity::Model {
            id: job.opportunity_id,
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            title: "Backend Engineer".to_owned(),
            client_company: "Acme Corp".to_owned(),
            required_skills: json!(["Rust"]),
            rate_per_hour: dec!(500),
            status: "open".to_owned(),
            notes: None,
        }
    }

    #[actix_web::test]
    async fn test_get_job_invoice_summary_shape() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let job = job_fixture();
        let stored = invoice_fixture(&job);
        let candidate = candidate_fixture(&job);
        let opportunity = opportunity_fixture(&job);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ job.clone() ] ])
            .append_query_results([ vec![ stored.clone() ] ])
            .append_query_results([ vec![ candidate.clone() ] ])
            .append_query_results([ vec![ opportunity.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(get_job_invoice)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/job/{}/monthly?year=2024&month=6", job.id))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["summary"]["presentDays"], 18);
        assert_eq!(body["summary"]["totalDays"], 20);
        assert_eq!(body["summary"]["perDayRate"], 3100.0);
        assert_eq!(body["summary"]["totalSalary"], 55800.0);
        assert_eq!(body["candidate"]["name"], "Priya Sharma");
        assert_eq!(body["opportunity"]["title"], "Backend Engineer");
    }

    #[actix_web::test]
    async fn test_list_monthly_batches_related_lookups() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let job = job_fixture();
        let stored = invoice_fixture(&job);
        let candidate = candidate_fixture(&job);
        let opportunity = opportunity_fixture(&job);

        // One result set per table: invoices, then jobs, candidates and
        // opportunities fetched in bulk rather than per invoice row
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ stored.clone() ] ])
            .append_query_results([ vec![ job.clone() ] ])
            .append_query_results([ vec![ candidate.clone() ] ])
            .append_query_results([ vec![ opportunity.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(list_monthly)
        ).await;

        let req = test::TestRequest::default()
            .uri("/monthly?year=2024&month=6")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["invoices"][0]["summary"]["presentDays"], 18);
        assert_eq!(body["invoices"][0]["candidate"]["name"], "Priya Sharma");
        assert_eq!(body["invoices"][0]["opportunity"]["title"], "Backend Engineer");
        assert_eq!(body["invoices"][0]["job"]["client_company"], "Acme Corp");
    }

    #[actix_web::test]
    async fn test_summary_keeps_worked_weekend_counts() {
        let job = job_fixture();
        let mut stored = invoice_fixture(&job);
        stored.weekend_days = 4;
        stored.present_days = 22;

        let summary = serde_json::to_value(InvoiceSummary::from(&stored)).unwrap();

        assert_eq!(summary["presentDays"], 22);
        assert_eq!(summary["totalDays"], 20);
    }

    #[actix_web::test]
    async fn test_get_job_invoice_missing_is_not_found() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let job = job_fixture();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ job.clone() ] ])
            .append_query_results([ Vec::<invoice::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(get_job_invoice)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/job/{}/monthly?year=2024&month=6", job.id))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
