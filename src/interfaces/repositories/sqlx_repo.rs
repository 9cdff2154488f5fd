use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxCandidateRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}
