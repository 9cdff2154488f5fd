use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::skill::{NewSkill, UpdateSkill},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn get_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill(skill_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state, data))]
pub async fn create_skill(
    state: web::Data<AppState>,
    data: web::Json<NewSkill>,
) -> Result<impl Responder, AppError> {
    let created = state.skill_handler.create_skill(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(state, data))]
pub async fn update_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<i32>,
    data: web::Json<UpdateSkill>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .skill_handler
        .update_skill(skill_id.into_inner(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(skill_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
