use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::journey::store::JourneyStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub journey: JourneyStore,
    pub collaborators: Collaborators,
    pub config: Config,
}
