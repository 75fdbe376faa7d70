use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::orientation::jobs::DEFAULT_REGION;
use crate::orientation::models::{
    ActionPlan, ActionPlanInput, DashboardContent, JobSearchOutput, RiasecInput, RiasecOutput,
};
use crate::orientation::plan::validate_input;
use crate::orientation::quiz::{dominant_letters, score_answers, Question, QUESTIONS};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    /// Ids of the statements the user agreed with.
    pub answers: Vec<String>,
    pub nom: String,
    pub age: String,
    pub groupe_age: String,
    pub region: String,
    pub objectif: String,
}

impl Default for SubmitRequest {
    fn default() -> Self {
        Self {
            answers: Vec::new(),
            nom: String::new(),
            age: String::new(),
            groupe_age: "18-24".to_string(),
            region: "Non spécifié".to_string(),
            objectif: "exploration".to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub scores: BTreeMap<String, u32>,
    pub lettres_calculees: Vec<String>,
    pub result: RiasecOutput,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct JobsRequest {
    pub region: Option<String>,
}

/// GET /api/v1/riasec/questions
pub async fn handle_questions() -> Json<[Question; 18]> {
    Json(QUESTIONS)
}

/// POST /api/v1/riasec/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let scores = score_answers(req.answers.as_slice());
    if scores.values().all(|v| *v == 0) {
        return Err(AppError::Validation(
            "Sélectionne au moins un énoncé qui te ressemble.".to_string(),
        ));
    }

    let input = RiasecInput {
        nom: req.nom,
        age: req.age,
        groupe_age: or_default(req.groupe_age, "18-24"),
        region: or_default(req.region, "Non spécifié"),
        objectif: or_default(req.objectif, "exploration"),
        scores_riasec: scores.clone(),
    };
    let result = state.collaborators.profile_analyzer.analyze(&input).await?;
    state.journey.set_riasec_result(Some(result.clone()));
    info!(
        "RIASEC profile stored: {:?}",
        result.profil_riasec_principal.lettres_dominantes
    );

    Ok(Json(SubmitResponse {
        lettres_calculees: dominant_letters(&scores),
        scores,
        result,
    }))
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// DELETE /api/v1/riasec
pub async fn handle_clear(State(state): State<AppState>) -> StatusCode {
    state.journey.set_riasec_result(None);
    StatusCode::NO_CONTENT
}

fn stored_letters(state: &AppState) -> Vec<String> {
    state.journey.read(|s| {
        s.riasec_result
            .as_ref()
            .map(|r| r.profil_riasec_principal.lettres_dominantes.clone())
            .unwrap_or_default()
    })
}

/// POST /api/v1/riasec/jobs
pub async fn handle_jobs(
    State(state): State<AppState>,
    Json(req): Json<JobsRequest>,
) -> Result<Json<JobSearchOutput>, AppError> {
    let letters = stored_letters(&state);
    if letters.is_empty() {
        return Err(AppError::Validation(
            "Complète d'abord le test RIASEC pour trouver des emplois.".to_string(),
        ));
    }
    let region = req
        .region
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let output = state
        .collaborators
        .job_matcher
        .find_jobs(&letters, &region)
        .await?;
    Ok(Json(output))
}

/// POST /api/v1/action-plan
///
/// Missing profile fields are filled from the stored quiz result.
pub async fn handle_action_plan(
    State(state): State<AppState>,
    Json(mut input): Json<ActionPlanInput>,
) -> Result<Json<ActionPlan>, AppError> {
    if input.lettres_dominantes.is_empty() {
        input.lettres_dominantes = stored_letters(&state);
    }
    if input.titre_profil.trim().is_empty() {
        input.titre_profil = state.journey.read(|s| {
            s.riasec_result
                .as_ref()
                .map(|r| r.titre_profil.clone())
                .unwrap_or_default()
        });
    }
    validate_input(&input)?;

    let plan = state.collaborators.action_planner.plan(&input).await?;
    state.journey.set_has_action_plan(true);
    Ok(Json(plan))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardContent>, AppError> {
    if let Some(cached) = state.journey.cached_dashboard() {
        return Ok(Json(cached));
    }
    let progress = state.journey.read(|s| s.progress());
    let content = state.collaborators.dashboard_writer.write(&progress).await?;
    state.journey.cache_dashboard(content.clone());
    Ok(Json(content))
}
