use axum::{extract::State, Json};
use serde::Serialize;

use crate::journey::autosave::AutosaveStatus;
use crate::journey::models::{JourneyState, Progress, Theme};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// GET /api/v1/journey
pub async fn handle_get_journey(State(state): State<AppState>) -> Json<JourneyState> {
    Json(state.journey.snapshot())
}

/// POST /api/v1/journey/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<JourneyState> {
    state.journey.reset();
    Json(state.journey.snapshot())
}

/// POST /api/v1/journey/theme/toggle
pub async fn handle_toggle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: state.journey.toggle_theme(),
    })
}

/// GET /api/v1/journey/autosave
pub async fn handle_autosave_status(State(state): State<AppState>) -> Json<AutosaveStatus> {
    Json(state.journey.autosave_status())
}

/// GET /api/v1/journey/progress
pub async fn handle_progress(State(state): State<AppState>) -> Json<Progress> {
    Json(state.journey.read(JourneyState::progress))
}
