use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::locator::geo::nearest;
use crate::locator::geolocation::{locate, BrowserReport, PositionOptions};
use crate::locator::offices::{OfficeCard, OFFICES};
use crate::locator::resolver::{search, LocationQuery, SearchResult};
use crate::state::AppState;

pub const NEAREST_REASON: &str = "Ce CJE est le plus proche de ta position actuelle.";

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub office: OfficeCard,
    pub distance_km: f64,
    pub raison: String,
}

/// GET /api/v1/locator/offices
pub async fn handle_offices() -> Json<Vec<OfficeCard>> {
    Json(OFFICES.iter().map(OfficeCard::from).collect())
}

/// POST /api/v1/locator/nearest
///
/// Body is the browser's geolocation outcome.
pub async fn handle_nearest(
    Json(report): Json<BrowserReport>,
) -> Result<Json<NearestResponse>, AppError> {
    let position = locate(&report, &PositionOptions::default()).await?;
    let found = nearest(position, &OFFICES)
        .ok_or_else(|| AppError::NotFound("Impossible de trouver un CJE proche.".to_string()))?;

    tracing::info!("Nearest office {} at {:.1} km", found.office.id, found.distance_km);
    Ok(Json(NearestResponse {
        office: found.office.into(),
        distance_km: found.distance_km,
        raison: NEAREST_REASON.to_string(),
    }))
}

/// POST /api/v1/locator/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(query): Json<LocationQuery>,
) -> Result<Json<SearchResult>, AppError> {
    let result = search(state.collaborators.location_resolver.as_ref(), query).await?;
    Ok(Json(result))
}
