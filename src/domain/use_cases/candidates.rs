use validator::Validate;

use crate::{
    entities::candidate::{CandidateResponse, NewCandidate, UpdateCandidate},
    entities::skill::SkillCategory,
    errors::AppError,
    repositories::candidate::CandidateRepository,
    utils::valid_id::valid_id,
};

pub struct CandidateHandler<R>
where
    R: CandidateRepository,
{
    pub candidate_repo: R,
}

impl<R> CandidateHandler<R>
where
    R: CandidateRepository,
{
    pub fn new(candidate_repo: R) -> Self {
        CandidateHandler { candidate_repo }
    }

    /// Creates a candidate; referenced skill ids that resolve are linked in
    /// the same transaction, the rest are skipped.
    pub async fn create_candidate(
        &self,
        request: NewCandidate,
    ) -> Result<CandidateResponse, AppError> {
        request.validate()?;

        let skill_ids = request.skill_ids();
        let created = self
            .candidate_repo
            .create(&request.prepare_for_insert(), &skill_ids)
            .await?;

        Ok(created.into())
    }

    pub async fn get_candidate(&self, id: i32) -> Result<CandidateResponse, AppError> {
        let id = valid_id(id)?;

        self.candidate_repo
            .find_by_id(id)
            .await?
            .map(CandidateResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }

    /// No category returns every candidate; a category narrows the list to
    /// candidates with at least one linked skill of that category.
    pub async fn list_candidates(
        &self,
        category: Option<SkillCategory>,
    ) -> Result<Vec<CandidateResponse>, AppError> {
        let rows = match category {
            Some(category) => self.candidate_repo.find_all_by_category(category).await?,
            None => self.candidate_repo.find_all().await?,
        };

        Ok(rows.into_iter().map(CandidateResponse::from).collect())
    }

    pub async fn update_candidate(
        &self,
        id: i32,
        request: UpdateCandidate,
    ) -> Result<CandidateResponse, AppError> {
        let id = valid_id(id)?;
        request.validate()?;

        self.candidate_repo
            .update(id, &request)
            .await?
            .map(CandidateResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }

    pub async fn delete_candidate(&self, id: i32) -> Result<(), AppError> {
        let id = valid_id(id)?;

        if self.candidate_repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Candidate {id} not found")))
        }
    }

    pub async fn link_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<CandidateResponse, AppError> {
        let candidate_id = valid_id(candidate_id)?;
        let skill_id = valid_id(skill_id)?;

        self.candidate_repo
            .link_skill(candidate_id, skill_id)
            .await?
            .map(CandidateResponse::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Candidate {candidate_id} or Skill {skill_id} not found"
                ))
            })
    }

    pub async fn unlink_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<CandidateResponse, AppError> {
        let candidate_id = valid_id(candidate_id)?;
        let skill_id = valid_id(skill_id)?;

        self.candidate_repo
            .unlink_skill(candidate_id, skill_id)
            .await?
            .map(CandidateResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
    }
}
