use actix_web::{get, post, put, web, HttpResponse, Responder};
use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::{Set, Unchanged}, DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{entity::{opportunity, prelude::*, user}, error::Error, utils};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_opportunities)
        .service(create_opportunity)
        .service(get_opportunity)
        .service(update_opportunity);
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateOpportunity {
    title: String,
    client_company: String,
    #[serde(default)]
    required_skills: Value,
    rate_per_hour: Decimal,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpdateOpportunity {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    client_company: Option<String>,
    #[serde(default)]
    required_skills: Option<Value>,
    #[serde(default)]
    rate_per_hour: Option<Decimal>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[get("")]
async fn list_opportunities(db: web::Data<DatabaseConnection>, _user: user::Model) -> Result<impl Responder, Error> {
    let opportunities = Opportunity::find().all(db.as_ref()).await?;

    Ok(web::Json(opportunities))
}

#[post("")]
async fn create_opportunity(db: web::Data<DatabaseConnection>, user: user::Model, payload: web::Json<CreateOpportunity>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    if payload.title.trim().is_empty() {
        return Err(Error::Validation("title is required".to_owned()));
    }
    if payload.rate_per_hour < Decimal::ZERO {
        return Err(Error::Validation("rate_per_hour cannot be negative".to_owned()));
    }

    let model = opportunity::ActiveModel {
        created_by: Set(Some(user.id)),
        updated_by: Set(Some(user.id)),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        title: Set(payload.title),
        client_company: Set(payload.client_company),
        required_skills: Set(json!(utils::normalize_skills(&payload.required_skills))),
        rate_per_hour: Set(payload.rate_per_hour),
        status: Set(payload.status.unwrap_or_else(|| "open".to_owned())),
        notes: Set(payload.notes),
        ..Default::default()
    };

    let opportunity = Opportunity::insert(model)
        .exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(opportunity)))
}

#[get("/{opportunity_id}")]
async fn get_opportunity(db: web::Data<DatabaseConnection>, _user: user::Model, path: web::Path<Uuid>) -> Result<impl Responder, Error> {
    let opportunity = Opportunity::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("opportunity"))?;

    Ok(web::Json(opportunity))
}

#[put("/{opportunity_id}")]
async fn update_opportunity(db: web::Data<DatabaseConnection>, user: user::Model, path: web::Path<Uuid>, payload: web::Json<UpdateOpportunity>) -> Result<impl Responder, Error> {
    let payload = payload.into_inner();

    let existing = Opportunity::find_by_id(path.into_inner())
        .one(db.as_ref()).await?
        .ok_or(Error::NotFound("opportunity"))?;

    let mut model = opportunity::ActiveModel {
        id: Unchanged(existing.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(user.id)),
        ..Default::default()
    };

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title cannot be empty".to_owned()));
        }
        model.title = Set(title);
    }
    if let Some(client_company) = payload.client_company { model.client_company = Set(client_company); }
    if let Some(required_skills) = payload.required_skills {
        model.required_skills = Set(json!(utils::normalize_skills(&required_skills)));
    }
    if let Some(rate_per_hour) = payload.rate_per_hour {
        if rate_per_hour < Decimal::ZERO {
            return Err(Error::Validation("rate_per_hour cannot be negative".to_owned()));
        }
        model.rate_per_hour = Set(rate_per_hour);
    }
    if let Some(status) = payload.status { model.status = Set(status); }
    if payload.notes.is_some() { model.notes = Set(payload.notes); }

    let updated = Opportunity::update(model).exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}
