//! The user's journey: in-memory state, its persisted blob and the autosave
//! scheduler that keeps the two in sync.

pub mod autosave;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod storage;
pub mod store;
