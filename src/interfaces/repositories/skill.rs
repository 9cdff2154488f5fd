use async_trait::async_trait;

use crate::{
    entities::skill::{Skill, SkillInsert, UpdateSkill},
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn create(&self, data: &SkillInsert) -> Result<Skill, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Skill>, AppError>;

    /// All skills ordered by name.
    async fn find_all(&self) -> Result<Vec<Skill>, AppError>;

    /// Merges the provided fields into an existing row; `None` when the id
    /// does not resolve.
    async fn update(&self, id: i32, changes: &UpdateSkill) -> Result<Option<Skill>, AppError>;

    /// Returns whether a row was deleted. Association rows go with it.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn create(&self, data: &SkillInsert) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, category, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(skill)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Skill>, AppError> {
        let skill = sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(skill)
    }

    async fn find_all(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>("SELECT * FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    async fn update(&self, id: i32, changes: &UpdateSkill) -> Result<Option<Skill>, AppError> {
        let updated = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.category)
        .bind(changes.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        // candidate_skills rows go via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
