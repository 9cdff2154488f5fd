use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgExecutor;

use crate::{
    entities::candidate::{Candidate, CandidateInsert, CandidateWithSkills, UpdateCandidate},
    entities::candidate_skill::CandidateSkill,
    entities::skill::{Skill, SkillCategory},
    errors::AppError,
    repositories::sqlx_repo::SqlxCandidateRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Persists a new candidate and links it to every resolvable skill id in
    /// one transaction; ids with no matching skill are silently skipped.
    async fn create(
        &self,
        data: &CandidateInsert,
        skill_ids: &[i32],
    ) -> Result<CandidateWithSkills, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<CandidateWithSkills>, AppError>;

    /// All candidates ordered by name.
    async fn find_all(&self) -> Result<Vec<CandidateWithSkills>, AppError>;

    /// Distinct candidates having at least one linked skill of the given
    /// category, ordered by name.
    async fn find_all_by_category(
        &self,
        category: SkillCategory,
    ) -> Result<Vec<CandidateWithSkills>, AppError>;

    /// Merges the provided fields into an existing row; `None` when the id
    /// does not resolve.
    async fn update(
        &self,
        id: i32,
        changes: &UpdateCandidate,
    ) -> Result<Option<CandidateWithSkills>, AppError>;

    /// Returns whether a row was deleted. Association rows go with it.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Idempotently links a skill to a candidate; `None` when either id fails
    /// to resolve.
    async fn link_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<Option<CandidateWithSkills>, AppError>;

    /// Removes the link if present (absence is not an error); `None` when the
    /// candidate id fails to resolve.
    async fn unlink_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<Option<CandidateWithSkills>, AppError>;
}

impl SqlxCandidateRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCandidateRepo { pool }
    }
}

/// Linked skills of one candidate, ordered by name.
async fn skills_for<'e, E>(executor: E, candidate_id: i32) -> Result<Vec<Skill>, AppError>
where
    E: PgExecutor<'e>,
{
    let skills = sqlx::query_as::<_, Skill>(
        r#"
        SELECT s.id, s.name, s.category, s.description, s.created_at, s.updated_at
        FROM candidate_skills cs
        JOIN skills s ON s.id = cs.skill_id
        WHERE cs.candidate_id = $1
        ORDER BY s.name
        "#,
    )
    .bind(candidate_id)
    .fetch_all(executor)
    .await?;

    Ok(skills)
}

/// Linked skills for a batch of candidates, grouped by candidate id.
async fn skills_by_candidate<'e, E>(
    executor: E,
    candidate_ids: &[i32],
) -> Result<HashMap<i32, Vec<Skill>>, AppError>
where
    E: PgExecutor<'e>,
{
    #[derive(sqlx::FromRow)]
    struct LinkedSkillRow {
        candidate_id: i32,
        #[sqlx(flatten)]
        skill: Skill,
    }

    let rows = sqlx::query_as::<_, LinkedSkillRow>(
        r#"
        SELECT cs.candidate_id, s.id, s.name, s.category, s.description, s.created_at, s.updated_at
        FROM candidate_skills cs
        JOIN skills s ON s.id = cs.skill_id
        WHERE cs.candidate_id = ANY($1)
        ORDER BY s.name
        "#,
    )
    .bind(candidate_ids.to_vec())
    .fetch_all(executor)
    .await?;

    let mut by_candidate: HashMap<i32, Vec<Skill>> = HashMap::new();
    for row in rows {
        by_candidate.entry(row.candidate_id).or_default().push(row.skill);
    }
    Ok(by_candidate)
}

fn with_skills(
    candidates: Vec<Candidate>,
    mut skills: HashMap<i32, Vec<Skill>>,
) -> Vec<CandidateWithSkills> {
    candidates
        .into_iter()
        .map(|candidate| {
            let skills = skills.remove(&candidate.id).unwrap_or_default();
            CandidateWithSkills { candidate, skills }
        })
        .collect()
}

#[async_trait]
impl CandidateRepository for SqlxCandidateRepo {
    async fn create(
        &self,
        data: &CandidateInsert,
        skill_ids: &[i32],
    ) -> Result<CandidateWithSkills, AppError> {
        let mut tx = self.pool.begin().await?;

        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (name, phone, education)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.education)
        .fetch_one(&mut *tx)
        .await?;

        for &skill_id in skill_ids {
            // The SELECT resolves the skill; ids without a matching row
            // insert nothing.
            sqlx::query(
                r#"
                INSERT INTO candidate_skills (candidate_id, skill_id)
                SELECT $1, id FROM skills WHERE id = $2
                ON CONFLICT (candidate_id, skill_id) DO NOTHING
                "#,
            )
            .bind(candidate.id)
            .bind(skill_id)
            .execute(&mut *tx)
            .await?;
        }

        let skills = skills_for(&mut *tx, candidate.id).await?;
        tx.commit().await?;

        Ok(CandidateWithSkills { candidate, skills })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CandidateWithSkills>, AppError> {
        // Candidate and skills come from the same transaction so a concurrent
        // link or delete cannot land between the two reads.
        let mut tx = self.pool.begin().await?;

        let candidate = sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let skills = skills_for(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(Some(CandidateWithSkills { candidate, skills }))
    }

    async fn find_all(&self) -> Result<Vec<CandidateWithSkills>, AppError> {
        let mut tx = self.pool.begin().await?;

        let candidates =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates ORDER BY name")
                .fetch_all(&mut *tx)
                .await?;

        let ids: Vec<i32> = candidates.iter().map(|c| c.id).collect();
        let skills = skills_by_candidate(&mut *tx, &ids).await?;
        tx.commit().await?;

        Ok(with_skills(candidates, skills))
    }

    async fn find_all_by_category(
        &self,
        category: SkillCategory,
    ) -> Result<Vec<CandidateWithSkills>, AppError> {
        let mut tx = self.pool.begin().await?;

        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT DISTINCT c.*
            FROM candidates c
            JOIN candidate_skills cs ON cs.candidate_id = c.id
            JOIN skills s ON s.id = cs.skill_id
            WHERE s.category = $1
            ORDER BY c.name
            "#,
        )
        .bind(category)
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<i32> = candidates.iter().map(|c| c.id).collect();
        let skills = skills_by_candidate(&mut *tx, &ids).await?;
        tx.commit().await?;

        Ok(with_skills(candidates, skills))
    }

    async fn update(
        &self,
        id: i32,
        changes: &UpdateCandidate,
    ) -> Result<Option<CandidateWithSkills>, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                education = COALESCE($4, education),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.education.as_deref())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(candidate) = updated else {
            return Ok(None);
        };

        let skills = skills_for(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(Some(CandidateWithSkills { candidate, skills }))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        // candidate_skills rows go via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn link_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<Option<CandidateWithSkills>, AppError> {
        let mut tx = self.pool.begin().await?;

        let candidate =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let skill_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM skills WHERE id = $1)")
                .bind(skill_id)
                .fetch_one(&mut *tx)
                .await?;

        if !skill_exists {
            return Ok(None);
        }

        let link = sqlx::query_as::<_, CandidateSkill>(
            r#"
            INSERT INTO candidate_skills (candidate_id, skill_id)
            VALUES ($1, $2)
            ON CONFLICT (candidate_id, skill_id) DO NOTHING
            RETURNING id, candidate_id, skill_id
            "#,
        )
        .bind(candidate_id)
        .bind(skill_id)
        .fetch_optional(&mut *tx)
        .await?;

        match link {
            Some(link) => tracing::debug!(
                link_id = link.id,
                candidate_id,
                skill_id,
                "created candidate-skill link"
            ),
            None => tracing::debug!(candidate_id, skill_id, "link already exists, no-op"),
        }

        let skills = skills_for(&mut *tx, candidate_id).await?;
        tx.commit().await?;

        Ok(Some(CandidateWithSkills { candidate, skills }))
    }

    async fn unlink_skill(
        &self,
        candidate_id: i32,
        skill_id: i32,
    ) -> Result<Option<CandidateWithSkills>, AppError> {
        let mut tx = self.pool.begin().await?;

        let candidate =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let removed =
            sqlx::query("DELETE FROM candidate_skills WHERE candidate_id = $1 AND skill_id = $2")
                .bind(candidate_id)
                .bind(skill_id)
                .execute(&mut *tx)
                .await?;

        if removed.rows_affected() == 0 {
            tracing::debug!(candidate_id, skill_id, "no link to remove, no-op");
        }

        let skills = skills_for(&mut *tx, candidate_id).await?;
        tx.commit().await?;

        Ok(Some(CandidateWithSkills { candidate, skills }))
    }
}
