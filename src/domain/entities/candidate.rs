use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::not_blank;
use crate::domain::entities::skill::{Skill, SkillResponse};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8}$").expect("valid phone pattern"));

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub education: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate row together with its linked skills, as one read snapshot.
#[derive(Debug, Clone)]
pub struct CandidateWithSkills {
    pub candidate: Candidate,
    pub skills: Vec<Skill>,
}

/// Wire shape: `{id, name, phone, education, skills: [Skill...]}`.
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub education: String,
    pub skills: Vec<SkillResponse>,
}

impl From<CandidateWithSkills> for CandidateResponse {
    fn from(row: CandidateWithSkills) -> Self {
        CandidateResponse {
            id: row.candidate.id,
            name: row.candidate.name,
            phone: row.candidate.phone,
            education: row.candidate.education,
            skills: row.skills.into_iter().map(SkillResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCandidate {
    #[validate(custom(function = not_blank, message = "Not a valid name"))]
    pub name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must be 8 digits"))]
    pub phone: String,

    #[validate(custom(function = not_blank, message = "Not a valid education"))]
    pub education: String,

    /// References to existing skills to link at creation time.
    #[serde(default)]
    pub skills: Vec<SkillRef>,
}

/// Incoming skill reference; only the id matters, entries without one are
/// ignored.
#[derive(Debug, Deserialize)]
pub struct SkillRef {
    pub id: Option<i32>,
}

#[derive(Debug)]
pub struct CandidateInsert {
    pub name: String,
    pub phone: String,
    pub education: String,
}

impl NewCandidate {
    pub fn skill_ids(&self) -> Vec<i32> {
        self.skills.iter().filter_map(|s| s.id).collect()
    }

    pub fn prepare_for_insert(&self) -> CandidateInsert {
        CandidateInsert {
            name: self.name.clone(),
            phone: self.phone.clone(),
            education: self.education.clone(),
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCandidate {
    #[validate(custom(function = not_blank, message = "Not a valid name"))]
    pub name: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must be 8 digits"))]
    pub phone: Option<String>,

    #[validate(custom(function = not_blank, message = "Not a valid education"))]
    pub education: Option<String>,
}
