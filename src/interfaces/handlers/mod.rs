pub mod candidates;
pub mod home;
pub mod skills;
