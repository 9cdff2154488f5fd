use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::not_blank;
use crate::errors::AppError;

pub const CATEGORY_VALUES: &str = "PROG_LANG, DB, DEVOPS, FRONTEND, TESTING, DATA, FRAMEWORK";

/// Closed classification of a skill's domain. Stored as text in the
/// `skills.category` column and carried verbatim on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillCategory {
    #[display("PROG_LANG")]
    ProgLang,

    #[display("DB")]
    Db,

    #[display("DEVOPS")]
    Devops,

    #[display("FRONTEND")]
    Frontend,

    #[display("TESTING")]
    Testing,

    #[display("DATA")]
    Data,

    #[display("FRAMEWORK")]
    Framework,
}

impl FromStr for SkillCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PROG_LANG" => Ok(SkillCategory::ProgLang),
            "DB" => Ok(SkillCategory::Db),
            "DEVOPS" => Ok(SkillCategory::Devops),
            "FRONTEND" => Ok(SkillCategory::Frontend),
            "TESTING" => Ok(SkillCategory::Testing),
            "DATA" => Ok(SkillCategory::Data),
            "FRAMEWORK" => Ok(SkillCategory::Framework),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid category '{}'. Allowed values: {}",
                s.trim(),
                CATEGORY_VALUES
            ))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub category: SkillCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape: `{id, name, category, description}`.
#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub id: i32,
    pub name: String,
    pub category: SkillCategory,
    pub description: Option<String>,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        SkillResponse {
            id: skill.id,
            name: skill.name,
            category: skill.category,
            description: skill.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSkill {
    #[validate(custom(function = not_blank, message = "Not a valid name"))]
    pub name: String,

    pub category: SkillCategory,

    pub description: Option<String>,
}

#[derive(Debug)]
pub struct SkillInsert {
    pub name: String,
    pub category: SkillCategory,
    pub description: Option<String>,
}

impl NewSkill {
    pub fn prepare_for_insert(&self) -> SkillInsert {
        SkillInsert {
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSkill {
    #[validate(custom(function = not_blank, message = "Not a valid name"))]
    pub name: Option<String>,

    pub category: Option<SkillCategory>,

    pub description: Option<String>,
}
