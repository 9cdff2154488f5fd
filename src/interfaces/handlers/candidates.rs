use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::candidate::{NewCandidate, UpdateCandidate},
    entities::skill::SkillCategory,
    errors::AppError,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    pub category: Option<String>,
}

/// A missing or blank `category` query parameter lists every candidate.
#[instrument(skip(state))]
pub async fn list_candidates(
    state: web::Data<AppState>,
    query: web::Query<CandidateListQuery>,
) -> Result<impl Responder, AppError> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<SkillCategory>())
        .transpose()?;

    let candidates = state.candidate_handler.list_candidates(category).await?;
    Ok(HttpResponse::Ok().json(candidates))
}

#[instrument(skip(state))]
pub async fn get_candidate(
    state: web::Data<AppState>,
    candidate_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let candidate = state
        .candidate_handler
        .get_candidate(candidate_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(candidate))
}

#[instrument(skip(state, data))]
pub async fn create_candidate(
    state: web::Data<AppState>,
    data: web::Json<NewCandidate>,
) -> Result<impl Responder, AppError> {
    let created = state
        .candidate_handler
        .create_candidate(data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(state, data))]
pub async fn update_candidate(
    state: web::Data<AppState>,
    candidate_id: web::Path<i32>,
    data: web::Json<UpdateCandidate>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .candidate_handler
        .update_candidate(candidate_id.into_inner(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(state))]
pub async fn delete_candidate(
    state: web::Data<AppState>,
    candidate_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    state
        .candidate_handler
        .delete_candidate(candidate_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state))]
pub async fn link_skill(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (candidate_id, skill_id) = path.into_inner();
    let updated = state
        .candidate_handler
        .link_skill(candidate_id, skill_id)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(state))]
pub async fn unlink_skill(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (candidate_id, skill_id) = path.into_inner();
    let updated = state
        .candidate_handler
        .unlink_skill(candidate_id, skill_id)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
