//! Vocational orientation: the RIASEC quiz, the narrative profile, job
//! suggestions, the action plan and the dashboard copy.

pub mod dashboard;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod plan;
pub mod profile;
pub mod prompts;
pub mod quiz;
