use axum::{extract::State, Json};
use serde::Serialize;

use crate::budget::models::BudgetData;
use crate::budget::summary::{summarize, BudgetSummary};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BudgetAnalysisResponse {
    pub analysis: String,
}

/// PUT /api/v1/budget
pub async fn handle_put_budget(
    State(state): State<AppState>,
    Json(budget): Json<BudgetData>,
) -> Json<BudgetSummary> {
    state.journey.set_budget(budget);
    Json(state.journey.read(|s| summarize(&s.budget_data)))
}

/// GET /api/v1/budget/summary
pub async fn handle_summary(State(state): State<AppState>) -> Json<BudgetSummary> {
    Json(state.journey.read(|s| summarize(&s.budget_data)))
}

/// POST /api/v1/budget/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
) -> Result<Json<BudgetAnalysisResponse>, AppError> {
    let budget = state.journey.read(|s| s.budget_data.clone());
    if !budget.is_complete() {
        return Err(AppError::Validation(
            "Entre ton revenu d'abord pour obtenir une analyse pertinente.".to_string(),
        ));
    }
    let analysis = state.collaborators.budget_analyst.analyze(&budget).await?;
    Ok(Json(BudgetAnalysisResponse { analysis }))
}
