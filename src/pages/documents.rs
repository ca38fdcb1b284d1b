use actix_web::{delete, get, post, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{entity::{document, prelude::*, user}, error::Error};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_entity_documents)
        .service(register_document)
        .service(delete_document);
}

const ENTITY_TYPES: [&str; 4] = ["candidate", "opportunity", "job", "invoice"];

/// Stores metadata only; the files themselves live in external object
/// storage under `file_key` and are fetched through `file_url`.
#[derive(Debug, Serialize, Deserialize)]
struct RegisterDocument {
    name: String,
    entity_type: String,
    entity_id: Uuid,
    file_key: String,
    file_url: String,
    file_type: String,
    file_size: i64,
}

#[get("/{entity_type}/{entity_id}")]
async fn list_entity_documents(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<(String, Uuid)>) -> Result<impl Responder, Error> {
    let (entity_type, entity_id) = path.into_inner();

    if !ENTITY_TYPES.contains(&entity_type.as_str()) {
        return Err(Error::Validation(format!("invalid entity_type `{entity_type}`")));
    }

    let documents = Document::find()
        .filter(document::Column::EntityType.eq(&entity_type))
        .filter(document::Column::EntityId.eq(entity_id))
        .order_by_desc(document::Column::CreatedAt)
        .all(db.as_ref()).await?;

    Ok(web::Json(documents))
}

#[post("")]
async fn register_document(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<RegisterDocument>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() {
        return Err(Error::Validation("name is required".to_owned()));
    }
    if !ENTITY_TYPES.contains(&payload.entity_type.as_str()) {
        return Err(Error::Validation(format!("invalid entity_type `{}`", payload.entity_type)));
    }
    if payload.file_key.trim().is_empty() || payload.file_url.trim().is_empty() {
        return Err(Error::Validation("file_key and file_url are required".to_owned()));
    }
    if payload.file_size < 0 {
        return Err(Error::Validation("file_size cannot be negative".to_owned()));
    }

    let model = document::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        name: Set(payload.name),
        entity_type: Set(payload.entity_type),
        entity_id: Set(payload.entity_id),
        file_key: Set(payload.file_key),
        file_url: Set(payload.file_url),
        file_type: Set(payload.file_type),
        file_size: Set(payload.file_size),
        ..Default::default()
    };

    let document = Document::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(document)))
}

#[delete("/{document_id}")]
async fn delete_document(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let result = Document::delete_by_id(path.into_inner())
        .exec(db.as_ref()).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("document"));
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
    async fn test_register_document_rejects_unknown_entity_type() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/documents").configure(config))
        ).await;

        let req = test::TestRequest::post()
            .uri("/documents")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(RegisterDocument {
                name: "resume.pdf".to_owned(),
                entity_type: "payslip".to_owned(),
                entity_id: Uuid::new_v4(),
                file_key: "uploads/resume.pdf".to_owned(),
                file_url: "https://storage.example.com/uploads/resume.pdf".to_owned(),
                file_type: "application/pdf".to_owned(),
                file_size: 52_431,
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_list_entity_documents_scopes_to_parent() {
        let secret = b"secret";
        let token = Authority::new(secret).issue_for(&recruiter());

        let entity_id = Uuid::new_v4();
        let stored = document::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            name: "resume.pdf".to_owned(),
            entity_type: "candidate".to_owned(),
            entity_id,
            file_key: "uploads/resume.pdf".to_owned(),
            file_url: "https://storage.example.com/uploads/resume.pdf".to_owned(),
            file_type: "application/pdf".to_owned(),
            file_size: 52_431,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ stored.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/documents").configure(config))
        ).await;

        let req = test::TestRequest::get()
            .uri(&format!("/documents/candidate/{entity_id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["name"], "resume.pdf");
        assert_eq!(body[0]["file_type"], "application/pdf");
    }
}
