pub mod candidates;
pub mod skills;
