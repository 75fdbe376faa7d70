pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod skills;
pub mod suggestions;
pub mod tips;
