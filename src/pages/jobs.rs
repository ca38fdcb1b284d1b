use std::collections::HashMap;

use actix_web::{dev, get, post, put, web, FromRequest, HttpRequest, HttpResponse, Responder};
use chrono::Local;
use futures_util::future::LocalBoxFuture;
use sea_orm::{sea_query::OnConflict, ActiveEnum as _, ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{auth::Admin, billing::RateConfig, calendar, entity::{attendance_month, job, prelude::*, sea_orm_active_enums::{JobStatus, PaymentFrequency}, user}, error::Error};

use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_jobs)
        .service(create_job)
        .service(record_month_totals)
        .service(get_month_totals)
        .service(generate_invoice)
        .service(get_job)
        .service(update_job);
}

/// Engagements only move forward. A pending job can start or be withdrawn;
/// an active one can finish or be cut short; completed and terminated are
/// frozen.
fn transition_allowed(current: &JobStatus, next: &JobStatus) -> bool {
    matches!(
        (current, next),
        (JobStatus::Pending, JobStatus::Active)
            | (JobStatus::Pending, JobStatus::Terminated)
            | (JobStatus::Active, JobStatus::Completed)
            | (JobStatus::Active, JobStatus::Terminated)
    )
}

#[get("")]
async fn list_jobs(db: web::Data<DatabaseConnection>, _user: user::Model) -> Result<impl Responder, Error> {
    let jobs = Job::find().all(db.as_ref()).await?;

    let candidate_names = Candidate::find().all(db.as_ref()).await?
        .into_iter()
        .map(|candidate| (candidate.id, candidate.name))
        .collect::<HashMap<_, _>>();

    let opportunity_titles = Opportunity::find().all(db.as_ref()).await?
        .into_iter()
        .map(|opportunity| (opportunity.id, opportunity.title))
        .collect::<HashMap<_, _>>();

    let rows = jobs.into_iter().map(|job|
        JobRow {
            candidate_name: candidate_names.get(&job.candidate_id).cloned(),
            opportunity_title: opportunity_titles.get(&job.opportunity_id).cloned(),
            job,
        }
    ).collect::<Vec<_>>();

    Ok(web::Json(rows))
}

#[post("")]
async fn create_job(db: web::Data<DatabaseConnection>, admin: Admin, payload: web::Json<CreateJob>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if let Some(end_date) = payload.end_date {
        if end_date < payload.start_date {
            return Err(Error::Validation("end_date is earlier than start_date".to_owned()));
        }
    }

    if Candidate::find_by_id(payload.candidate_id).one(db.as_ref()).await?.is_none() {
        return Err(Error::NotFound("candidate"));
    }
    if Opportunity::find_by_id(payload.opportunity_id).one(db.as_ref()).await?.is_none() {
        return Err(Error::NotFound("opportunity"));
    }

    let model = job::ActiveModel {
        created_by: Set(Some(admin.id)),
        updated_by: Set(Some(admin.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        candidate_id: Set(payload.candidate_id),
        opportunity_id: Set(payload.opportunity_id),
        client_company: Set(payload.client_company),
        partner_company: Set(payload.partner_company),
        candidate_salary: Set(payload.candidate_salary),
        client_billing_amount: Set(payload.client_billing_amount),
        payment_frequency: Set(payload.payment_frequency),
        payment_currency: Set(payload.payment_currency),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        status: Set(payload.status.unwrap_or(JobStatus::Pending)),
        notes: Set(payload.notes),
        ..Default::default()
    };

    let job = Job::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(job)))
}

#[get("/{job_id}")]
async fn get_job(db: web::Data<DatabaseConnection>, _user: user::Model, job: job::Model) -> Result<impl Responder, Error> {
    let candidate = Candidate::find_by_id(job.candidate_id).one(db.as_ref()).await?;
    let opportunity = Opportunity::find_by_id(job.opportunity_id).one(db.as_ref()).await?;

    Ok(web::Json(JobRow {
        candidate_name: candidate.map(|candidate| candidate.name),
        opportunity_title: opportunity.map(|opportunity| opportunity.title),
        job,
    }))
}

#[put("/{job_id}")]
async fn update_job(db: web::Data<DatabaseConnection>, admin: Admin, job: job::Model, payload: web::Json<UpdateJob>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if let Some(status) = &payload.status {
        if *status != job.status && !transition_allowed(&job.status, status) {
            return Err(Error::InvalidState(format!(
                "cannot move job from `{}` to `{}`",
                job.status.to_value(),
                status.to_value(),
            )));
        }
    }

    let start_date = payload.start_date.unwrap_or(job.start_date);
    let end_date = payload.end_date.or(job.end_date);
    if let Some(end_date) = end_date {
        if end_date < start_date {
            return Err(Error::Validation("end_date is earlier than start_date".to_owned()));
        }
    }

    let mut model = job::ActiveModel {
        id: Unchanged(job.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(admin.id)),
        ..Default::default()
    };

    if let Some(client_company) = payload.client_company { model.client_company = Set(client_company); }
    if payload.partner_company.is_some() { model.partner_company = Set(payload.partner_company); }
    if let Some(candidate_salary) = payload.candidate_salary { model.candidate_salary = Set(candidate_salary); }
    if let Some(client_billing_amount) = payload.client_billing_amount { model.client_billing_amount = Set(client_billing_amount); }
    if let Some(payment_frequency) = payload.payment_frequency { model.payment_frequency = Set(payment_frequency); }
    if let Some(payment_currency) = payload.payment_currency { model.payment_currency = Set(payment_currency); }
    if let Some(start_date) = payload.start_date { model.start_date = Set(start_date); }
    if payload.end_date.is_some() { model.end_date = Set(payload.end_date); }
    if let Some(status) = payload.status { model.status = Set(status); }
    if payload.notes.is_some() { model.notes = Set(payload.notes); }

    let updated = Job::update(model).exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}

#[post("/attendance")]
async fn record_month_totals(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<RecordMonthTotals>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    calendar::month_bounds(payload.year, payload.month)?;

    for (name, value) in [
        ("regular_days_worked", payload.regular_days_worked),
        ("weekend_days_worked", payload.weekend_days_worked),
        ("holiday_days_worked", payload.holiday_days_worked),
        ("leaves_taken", payload.leaves_taken),
    ] {
        if value < 0 {
            return Err(Error::Validation(format!("{name} cannot be negative")));
        }
    }
    if payload.overtime_hours < 0.0 {
        return Err(Error::Validation("overtime_hours cannot be negative".to_owned()));
    }

    if Job::find_by_id(payload.job_id).one(db.as_ref()).await?.is_none() {
        return Err(Error::NotFound("job"));
    }

    let model = attendance_month::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        job_id: Set(payload.job_id),
        year: Set(payload.year),
        month: Set(payload.month as i32),
        regular_days_worked: Set(payload.regular_days_worked),
        weekend_days_worked: Set(payload.weekend_days_worked),
        holiday_days_worked: Set(payload.holiday_days_worked),
        leaves_taken: Set(payload.leaves_taken),
        overtime_hours: Set(payload.overtime_hours),
        notes: Set(payload.notes),
        ..Default::default()
    };

    // One row per job-month; resubmitting the form overwrites it
    let totals = AttendanceMonth::insert(model)
        .on_conflict(
            OnConflict::columns([
                attendance_month::Column::JobId,
                attendance_month::Column::Year,
                attendance_month::Column::Month,
            ])
                .update_columns([
                    attendance_month::Column::RegularDaysWorked,
                    attendance_month::Column::WeekendDaysWorked,
                    attendance_month::Column::HolidayDaysWorked,
                    attendance_month::Column::LeavesTaken,
                    attendance_month::Column::OvertimeHours,
                    attendance_month::Column::Notes,
                    attendance_month::Column::UpdatedAt,
                    attendance_month::Column::UpdatedBy,
                ])
                .to_owned(),
        )
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "totals": totals,
    })))
}

#[get("/attendance/{job_id}/{year}/{month}")]
async fn get_month_totals(db: web::Data<DatabaseConnection>, _user: user::Model, job: job::Model, path: web::Path<(Uuid, i32, u32)>) -> Result<impl Responder, Error> {
    let (_, year, month) = path.into_inner();

    let days = calendar::enumerate_month(job.start_date, job.end_date, year, month)?;
    let total_working_days = calendar::working_days(&days);

    let stored = AttendanceMonth::find()
        .filter(attendance_month::Column::JobId.eq(job.id))
        .filter(attendance_month::Column::Year.eq(year))
        .filter(attendance_month::Column::Month.eq(month as i32))
        .one(db.as_ref()).await?;

    Ok(web::Json(MonthTotals::new(job.id, year, month, total_working_days, stored)))
}

#[post("/invoice/generate/{job_id}/{year}/{month}")]
async fn generate_invoice(db: web::Data<DatabaseConnection>, admin: Admin, job: job::Model, path: web::Path<(Uuid, i32, u32)>, rates: web::Data<RateConfig>) -> Result<impl Responder, Error> {
    let (_, year, month) = path.into_inner();

    let (_, details) = super::invoices::generate_for_job(db.as_ref(), Some(admin.id), &job, year, month, &rates).await?;

    Ok(web::Json(json!({
        "success": true,
        "invoice_details": details,
    })))
}
