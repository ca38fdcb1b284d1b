use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{entity::{activity, prelude::*, user}, error::Error};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_parent_activities)
        .service(create_activity)
        .service(get_activity)
        .service(update_activity)
        .service(delete_activity);
}

const ACTIVITY_TYPES: [&str; 4] = ["task", "call", "event", "note"];

fn parse_activity_type(raw: &str) -> Result<String, Error> {
    let normalized = raw.to_lowercase();

    if !ACTIVITY_TYPES.contains(&normalized.as_str()) {
        return Err(Error::Validation(format!("invalid activity_type `{raw}`")));
    }

    Ok(normalized)
}

/// Timeline entries hang off one of three record kinds; the parent must
/// exist before anything can be logged against it.
async fn ensure_parent_exists(db: &DatabaseConnection, parent_type: &str, parent_id: Uuid) -> Result<(), Error> {
    let found = match parent_type {
        "candidate" => Candidate::find_by_id(parent_id).one(db).await?.is_some(),
        "job" => Job::find_by_id(parent_id).one(db).await?.is_some(),
        "opportunity" => Opportunity::find_by_id(parent_id).one(db).await?.is_some(),
        _ => return Err(Error::Validation(format!("invalid parent_type `{parent_type}`"))),
    };

    if !found {
        return Err(Error::NotFound("parent record"));
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateActivity {
    parent_type: String,
    parent_id: Uuid,
    activity_type: String,
    subject: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assigned_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpdateActivity {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assigned_to: Option<String>,
}

#[get("/parent/{parent_type}/{parent_id}")]
async fn list_parent_activities(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<(String, Uuid)>) -> Result<impl Responder, Error> {
    let (parent_type, parent_id) = path.into_inner();

    let activities = Activity::find()
        .filter(activity::Column::ParentType.eq(&parent_type))
        .filter(activity::Column::ParentId.eq(parent_id))
        .order_by_desc(activity::Column::CreatedAt)
        .all(db.as_ref()).await?;

    Ok(web::Json(activities))
}

#[post("")]
async fn create_activity(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<CreateActivity>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if payload.subject.trim().is_empty() {
        return Err(Error::Validation("subject is required".to_owned()));
    }
    let activity_type = parse_activity_type(&payload.activity_type)?;
    ensure_parent_exists(db.as_ref(), &payload.parent_type, payload.parent_id).await?;

    let model = activity::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        parent_type: Set(payload.parent_type),
        parent_id: Set(payload.parent_id),
        activity_type: Set(activity_type),
        subject: Set(payload.subject),
        description: Set(payload.description),
        due_date: Set(payload.due_date),
        status: Set(payload.status.unwrap_or_else(|| "pending".to_owned())),
        assigned_to: Set(payload.assigned_to),
        ..Default::default()
    };

    let activity = Activity::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(activity)))
}

#[get("/{activity_id}")]
async fn get_activity(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let activity = Activity::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("activity"))?;

    Ok(web::Json(activity))
}

#[put("/{activity_id}")]
async fn update_activity(db: web::Data<DatabaseConnection>, user: user::Model, path: web::Path<Uuid>, payload: web::Json<UpdateActivity>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    let existing = Activity::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("activity"))?;

    let mut model = activity::ActiveModel {
        id: Unchanged(existing.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(user.id)),
        ..Default::default()
    };

    if let Some(subject) = payload.subject {
        if subject.trim().is_empty() {
            return Err(Error::Validation("subject cannot be empty".to_owned()));
        }
        model.subject = Set(subject);
    }
    if payload.description.is_some() { model.description = Set(payload.description); }
    if payload.due_date.is_some() { model.due_date = Set(payload.due_date); }
    if let Some(status) = payload.status { model.status = Set(status); }
    if payload.assigned_to.is_some() { model.assigned_to = Set(payload.assigned_to); }

    let updated = Activity::update(model).exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}

#[delete("/{activity_id}")]
async fn delete_activity(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let result = Activity::delete_by_id(path.into_inner())
        .exec(db.as_ref()).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("activity"));
    }

    Ok(web::Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{auth::Authority, entity::{candidate, sea_orm_active_enums::RoleType}};

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

    #[actix_web::test]
    async fn test_create_activity_rejects_unknown_kinds() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/activities").configure(config))
        ).await;

        {
            let req = test::TestRequest::post()
                .uri("/activities")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "parent_type": "candidate",
                    "parent_id": Uuid::new_v4(),
                    "activity_type": "webinar",
                    "subject": "Intro call",
                }))
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        {
            let req = test::TestRequest::post()
                .uri("/activities")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "parent_type": "payslip",
                    "parent_id": Uuid::new_v4(),
                    "activity_type": "call",
                    "subject": "Intro call",
                }))
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_create_activity_for_candidate() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let parent = candidate::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            name: "Priya Sharma".to_owned(),
            email: None,
            phone: None,
            skills: json!(["Rust"]),
            notes: None,
        };

        let stored = activity::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            parent_type: "candidate".to_owned(),
            parent_id: parent.id,
            activity_type: "task".to_owned(),
            subject: "Schedule interview".to_owned(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            status: "pending".to_owned(),
            assigned_to: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ parent.clone() ] ])
            .append_query_results([ vec![ stored.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/activities").configure(config))
        ).await;

        let req = test::TestRequest::post()
            .uri("/activities")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "parent_type": "candidate",
                "parent_id": parent.id,
                "activity_type": "Task",
                "subject": "Schedule interview",
                "due_date": "2024-07-01",
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
