pub mod candidate;
pub mod skill;
pub mod sqlx_repo;
