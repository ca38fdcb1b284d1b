use actix_web::{delete, get, post, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{auth::Admin, entity::{certificate, prelude::*, user}, error::Error};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_certificates)
        .service(create_certificate)
        .service(get_certificate)
        .service(delete_certificate);
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateCertificate {
    name: String,
    provider: String,
}

#[get("")]
async fn list_certificates(db: web::Data<DatabaseConnection>, _user: user::Model) -> Result<impl Responder, Error> {
    let certificates = Certificate::find().all(db.as_ref()).await?;

    Ok(web::Json(certificates))
}

#[post("")]
async fn create_certificate(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<CreateCertificate>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() {
        return Err(Error::Validation("name is required".to_owned()));
    }
    if payload.provider.trim().is_empty() {
        return Err(Error::Validation("provider is required".to_owned()));
    }

    let model = certificate::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        name: Set(payload.name),
        provider: Set(payload.provider),
        ..Default::default()
    };

    let certificate = Certificate::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(certificate)))
}

#[get("/{certificate_id}")]
async fn get_certificate(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let certificate = Certificate::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("certificate"))?;

    Ok(web::Json(certificate))
}

#[delete("/{certificate_id}")]
async fn delete_certificate(db: web::Data<DatabaseConnection>, _admin: Admin, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let result = Certificate::delete_by_id(path.into_inner())
        .exec(db.as_ref()).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("certificate"));
    }

    Ok(web::Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{auth::Authority, entity::sea_orm_active_enums::RoleType};

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
    async fn test_create_certificate_requires_both_fields() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/certificates").configure(config))
        ).await;

        let req = test::TestRequest::post()
            .uri("/certificates")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(CreateCertificate {
                name: "AWS Solutions Architect".to_owned(),
                provider: " ".to_owned(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_and_list_certificates() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let stored = certificate::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            name: "AWS Solutions Architect".to_owned(),
            provider: "Amazon".to_owned(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ stored.clone() ],
                vec![ stored.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/certificates").configure(config))
        ).await;

        let create_req = test::TestRequest::post()
            .uri("/certificates")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(CreateCertificate {
                name: stored.name.clone(),
                provider: stored.provider.clone(),
            })
            .to_request();

        let response = test::call_service(&app, create_req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let list_req = test::TestRequest::get()
            .uri("/certificates")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, list_req).await;
        assert_eq!(body[0]["name"], "AWS Solutions Architect");
        assert_eq!(body[0]["provider"], "Amazon");
    }
}
