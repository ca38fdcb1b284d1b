use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::{Set, Unchanged}, DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{auth::Admin, entity::{candidate, prelude::*, user}, error::Error, utils};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_candidates)
        .service(create_candidate)
        .service(get_candidate)
        .service(update_candidate)
        .service(delete_candidate);
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateCandidate {
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    skills: Value,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpdateCandidate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    skills: Option<Value>,
    #[serde(default)]
    notes: Option<String>,
}

#[get("")]
async fn list_candidates(db: web::Data<DatabaseConnection>, _user: user::Model) -> Result<impl Responder, Error> {
    let candidates = Candidate::find().all(db.as_ref()).await?;

    Ok(web::Json(candidates))
}

#[post("")]
async fn create_candidate(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<CreateCandidate>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() {
        return Err(Error::Validation("name is required".to_owned()));
    }

    let model = candidate::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        skills: Set(json!(utils::normalize_skills(&payload.skills))),
        notes: Set(payload.notes),
        ..Default::default()
    };

    let candidate = Candidate::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(candidate)))
}

#[get("/{candidate_id}")]
async fn get_candidate(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let candidate = Candidate::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("candidate"))?;

    Ok(web::Json(candidate))
}

#[put("/{candidate_id}")]
async fn update_candidate(db: web::Data<DatabaseConnection>, user: user::Model, path: web::Path<Uuid>, payload: web::Json<UpdateCandidate>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    let existing = Candidate::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("candidate"))?;

    let mut model = candidate::ActiveModel {
        id: Unchanged(existing.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(user.id)),
        ..Default::default()
    };

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(Error::Validation("name cannot be empty".to_owned()));
        }
        model.name = Set(name);
    }
    if payload.email.is_some() { model.email = Set(payload.email); }
    if payload.phone.is_some() { model.phone = Set(payload.phone); }
    if let Some(skills) = payload.skills { model.skills = Set(json!(utils::normalize_skills(&skills))); }
    if payload.notes.is_some() { model.notes = Set(payload.notes); }

    let updated = Candidate::update(model).exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}

#[delete("/{candidate_id}")]
async fn delete_candidate(db: web::Data<DatabaseConnection>, _admin: Admin, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let result = Candidate::delete_by_id(path.into_inner())
        .exec(db.as_ref()).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("candidate"));
    }

    Ok(web::Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{auth::Authority, entity::sea_orm_active_enums::RoleType};

    use super::*;

    #[actix_web::test]
    async fn test_get_missing_candidate_is_not_found() {
        let secret = b"secret";

        let user = user::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            username: "maya".to_string(),
            password: Vec::new(),
            role: RoleType::Recruiter,
        };
        let token = Authority::new(secret).issue_for(&user);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ Vec::<candidate::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(get_candidate)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", Uuid::new_v4()))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
