use validator::Validate;

use crate::{
    entities::skill::{NewSkill, SkillResponse, UpdateSkill},
    errors::AppError,
    repositories::skill::SkillRepository,
    utils::valid_id::valid_id,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn create_skill(&self, request: NewSkill) -> Result<SkillResponse, AppError> {
        request.validate()?;

        let created = self.skill_repo.create(&request.prepare_for_insert()).await?;
        Ok(created.into())
    }

    pub async fn get_skill(&self, id: i32) -> Result<SkillResponse, AppError> {
        let id = valid_id(id)?;

        self.skill_repo
            .find_by_id(id)
            .await?
            .map(SkillResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))
    }

    pub async fn list_skills(&self) -> Result<Vec<SkillResponse>, AppError> {
        let skills = self.skill_repo.find_all().await?;
        Ok(skills.into_iter().map(SkillResponse::from).collect())
    }

    pub async fn update_skill(
        &self,
        id: i32,
        request: UpdateSkill,
    ) -> Result<SkillResponse, AppError> {
        let id = valid_id(id)?;
        request.validate()?;

        self.skill_repo
            .update(id, &request)
            .await?
            .map(SkillResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))
    }

    pub async fn delete_skill(&self, id: i32) -> Result<(), AppError> {
        let id = valid_id(id)?;

        if self.skill_repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Skill {id} not found")))
        }
    }
}
