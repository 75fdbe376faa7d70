pub mod analysis;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod summary;
