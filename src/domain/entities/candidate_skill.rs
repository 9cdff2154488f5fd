/// Association row linking one candidate to one skill. Identity of a link is
/// the `(candidate_id, skill_id)` pair; the surrogate id only names the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateSkill {
    pub id: i32,
    pub candidate_id: i32,
    pub skill_id: i32,
}

impl PartialEq for CandidateSkill {
    fn eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id && self.skill_id == other.skill_id
    }
}

impl Eq for CandidateSkill {}
