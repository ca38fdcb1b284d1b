use std::collections::HashMap;

use actix_web::{get, post, web, Responder};
use chrono::{Local, NaiveDate};
use sea_orm::{sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{calendar, entity::{attendance_record, job, prelude::*, user}, error::Error, ledger::{self, ResolvedDay}, summary};

use model::*;

mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(get_monthly_attendance)
        .service(upsert_day);
}

/// Stored rows for one job-month, keyed by date. Days without a row are
/// absent from the map and resolve through the ledger defaults.
async fn month_entries(
    db: &DatabaseConnection,
    job_id: Uuid,
    year: i32,
    month: u32,
) -> Result<HashMap<NaiveDate, attendance_record::Model>, Error> {
    let (first, last) = calendar::month_bounds(year, month)?;

    let records = AttendanceRecord::find()
        .filter(attendance_record::Column::JobId.eq(job_id))
        .filter(attendance_record::Column::Date.between(first, last))
        .all(db).await?;

    Ok(records.into_iter().map(|record| (record.date, record)).collect())
}

fn resolved(record: &attendance_record::Model) -> ResolvedDay {
    ResolvedDay {
        status: record.status.clone(),
        time_in: record.time_in,
        time_out: record.time_out,
        total_hours_worked: record.total_hours_worked,
    }
}

#[get("/job/{job_id}/monthly")]
async fn get_monthly_attendance(db: web::Data<DatabaseConnection>, _user: user::Model, job: job::Model, query: web::Query<PeriodQuery>) -> Result<impl Responder, Error> {
    let PeriodQuery { year, month } = query.into_inner();

    let days = calendar::enumerate_month(job.start_date, job.end_date, year, month)?;
    let stored = month_entries(db.as_ref(), job.id, year, month).await?;

    let attendance = days.iter().map(|day|
        match stored.get(&day.date) {
            Some(record) => DayRecord::from_stored(record),
            None => DayRecord::materialized(day.date, day.is_weekend),
        }
    ).collect::<Vec<_>>();

    let entries = stored.iter()
        .map(|(date, record)| (*date, resolved(record)))
        .collect::<HashMap<_, _>>();
    let summary = summary::summarize(year, month, &days, &entries);

    Ok(web::Json(json!({
        "success": true,
        "attendance": attendance,
        "summary": summary,
    })))
}

#[post("/{job_id}/{year}/{month}/{day}")]
async fn upsert_day(db: web::Data<DatabaseConnection>, user: user::Model, job: job::Model, path: web::Path<(Uuid, i32, u32, u32)>, payload: web::Json<UpsertDay>) -> Result<impl Responder, Error> {
    let (_, year, month, day) = path.into_inner();
    let payload = payload.into_inner();

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::Validation(format!("invalid date {year}-{month}-{day}")))?;

    if date < job.start_date || job.end_date.is_some_and(|end| date > end) {
        return Err(Error::Validation(format!("{date} is outside the job's active range")));
    }

    let status = ledger::parse_status(&payload.status)?;
    let time_in = payload.time_in.as_deref().map(ledger::parse_clock).transpose()?;
    let time_out = payload.time_out.as_deref().map(ledger::parse_clock).transpose()?;

    let day = ledger::resolve_upsert(status, time_in, time_out)?;

    let model = attendance_record::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        job_id: Set(job.id),
        date: Set(date),
        status: Set(day.status),
        time_in: Set(day.time_in),
        time_out: Set(day.time_out),
        total_hours_worked: Set(day.total_hours_worked),
        notes: Set(payload.notes),
        ..Default::default()
    };

    // Last write wins for the whole row, atomically per day
    let record = AttendanceRecord::insert(model)
        .on_conflict(
            OnConflict::columns([
                attendance_record::Column::JobId,
                attendance_record::Column::Date,
            ])
                .update_columns([
                    attendance_record::Column::Status,
                    attendance_record::Column::TimeIn,
                    attendance_record::Column::TimeOut,
                    attendance_record::Column::TotalHoursWorked,
                    attendance_record::Column::Notes,
                    attendance_record::Column::UpdatedAt,
                    attendance_record::Column::UpdatedBy,
                ])
                .to_owned(),
        )
        .exec_with_returning(db.as_ref()).await?;

    Ok(web::Json(json!({
        "success": true,
        "record": record,
    })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::{Method, StatusCode}, test, App};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{auth::Authority, entity::sea_orm_active_enums::{JobStatus, PaymentFrequency, RoleType}};

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

    #[actix_web::test]
    async fn test_monthly_view_materializes_defaults() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let job = job_fixture();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ job.clone() ] ])
            .append_query_results([ Vec::<attendance_record::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(get_monthly_attendance)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/job/{}/monthly?year=2024&month=1", job.id))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        // Job started Jan 10th, so only 22 days materialize
        assert_eq!(body["attendance"].as_array().unwrap().len(), 22);
        assert_eq!(body["summary"]["totalDays"], 22);
        assert_eq!(body["summary"]["presentDays"], 0);

        let first = &body["attendance"][0];
        assert_eq!(first["date"], "2024-01-10");
        assert_eq!(first["status"], "absent");
    }

    #[actix_web::test]
    async fn test_upsert_rejects_invalid_status_and_date() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let job = job_fixture();

        // One extractor lookup per request, nothing reaches the insert
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ job.clone() ],
                vec![ job.clone() ],
                vec![ job.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(upsert_day)
        ).await;

        {
            let req = test::TestRequest::default()
                .uri(&format!("/{}/2024/2/30", job.id))
                .method(Method::POST)
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(UpsertDay {
                    status: "present".to_owned(),
                    time_in: Some("09:00".to_owned()),
                    time_out: Some("17:00".to_owned()),
                    notes: None,
                })
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        {
            let req = test::TestRequest::default()
                .uri(&format!("/{}/2024/2/12", job.id))
                .method(Method::POST)
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(UpsertDay {
                    status: "vacationing".to_owned(),
                    time_in: None,
                    time_out: None,
                    notes: None,
                })
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        {
            // Before the job started
            let req = test::TestRequest::default()
                .uri(&format!("/{}/2024/1/5", job.id))
                .method(Method::POST)
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(UpsertDay {
                    status: "leave".to_owned(),
                    time_in: None,
                    time_out: None,
                    notes: None,
                })
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
