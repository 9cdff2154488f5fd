mod domain;
mod infrastructure;
mod interfaces;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{db, utils};
pub use interfaces::{handlers, repositories, routes};

use repositories::sqlx_repo::{SqlxCandidateRepo, SqlxSkillRepo};
use use_cases::candidates::CandidateHandler;
use use_cases::skills::SkillHandler;

pub type AppCandidateHandler = CandidateHandler<SqlxCandidateRepo>;
pub type AppSkillHandler = SkillHandler<SqlxSkillRepo>;

pub struct AppState {
    pub candidate_handler: AppCandidateHandler,
    pub skill_handler: AppSkillHandler,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let candidate_repo = SqlxCandidateRepo::new(pool.clone());
        let skill_repo = SqlxSkillRepo::new(pool);

        AppState {
            candidate_handler: CandidateHandler::new(candidate_repo),
            skill_handler: SkillHandler::new(skill_repo),
        }
    }
}
