pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::budget::handlers as budget;
use crate::journey::handlers as journey;
use crate::locator::handlers as locator;
use crate::orientation::handlers as orientation;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Uploaded résumés (PDF or photo) can exceed axum's 2 MB default.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Journey
        .route("/api/v1/journey", get(journey::handle_get_journey))
        .route("/api/v1/journey/reset", post(journey::handle_reset))
        .route(
            "/api/v1/journey/theme/toggle",
            post(journey::handle_toggle_theme),
        )
        .route(
            "/api/v1/journey/autosave",
            get(journey::handle_autosave_status),
        )
        .route("/api/v1/journey/progress", get(journey::handle_progress))
        // Résumé
        .route("/api/v1/resume", put(resume::handle_put_resume))
        .route(
            "/api/v1/resume/personal-info",
            put(resume::handle_put_personal_info),
        )
        .route("/api/v1/resume/skills", post(resume::handle_add_skill))
        .route(
            "/api/v1/resume/skills/toggle",
            post(resume::handle_toggle_skill),
        )
        .route(
            "/api/v1/resume/skills/detect",
            post(resume::handle_detect_skills),
        )
        .route("/api/v1/resume/tips", get(resume::handle_tips))
        .route(
            "/api/v1/resume/experiences",
            post(resume::handle_add_experience),
        )
        .route(
            "/api/v1/resume/experiences/:index",
            put(resume::handle_update_experience).delete(resume::handle_delete_experience),
        )
        .route(
            "/api/v1/resume/experiences/:index/move",
            post(resume::handle_move_experience),
        )
        .route(
            "/api/v1/resume/experiences/:index/suggestions",
            post(resume::handle_suggestions),
        )
        .route(
            "/api/v1/resume/experiences/:index/apply-suggestion",
            post(resume::handle_apply_suggestion),
        )
        .route("/api/v1/resume/parse-text", post(resume::handle_parse_text))
        .route(
            "/api/v1/resume/parse-file",
            post(resume::handle_parse_file).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        // Budget
        .route("/api/v1/budget", put(budget::handle_put_budget))
        .route("/api/v1/budget/summary", get(budget::handle_summary))
        .route("/api/v1/budget/analysis", post(budget::handle_analysis))
        // Orientation
        .route(
            "/api/v1/riasec/questions",
            get(orientation::handle_questions),
        )
        .route("/api/v1/riasec/submit", post(orientation::handle_submit))
        .route("/api/v1/riasec", delete(orientation::handle_clear))
        .route("/api/v1/riasec/jobs", post(orientation::handle_jobs))
        .route("/api/v1/action-plan", post(orientation::handle_action_plan))
        .route("/api/v1/dashboard", get(orientation::handle_dashboard))
        // Locator
        .route("/api/v1/locator/offices", get(locator::handle_offices))
        .route("/api/v1/locator/nearest", post(locator::handle_nearest))
        .route("/api/v1/locator/search", post(locator::handle_search))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::collaborators::Collaborators;
    use crate::config::Config;
    use crate::journey::autosave::AutosaveConfig;
    use crate::journey::storage::MemoryStore;
    use crate::journey::store::JourneyStore;

    fn app() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            anthropic_base_url: None,
            data_dir: PathBuf::from("./data"),
            autosave: AutosaveConfig::default(),
        };
        let (journey, _task) = JourneyStore::open(Arc::new(MemoryStore::new()), config.autosave);
        build_router(AppState {
            journey,
            collaborators: Collaborators::mock(),
            config,
        })
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_simulation_mode() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["collaborators"], "simulation");
    }

    #[tokio::test]
    async fn test_budget_round_trip_gives_summary() {
        let app = app();
        let budget = json!({
            "income": 2000,
            "expenses": {"housing": {"rent": 1000}, "food": {"groceries": 500}}
        });
        let (status, summary) = send(&app, Method::PUT, "/api/v1/budget", Some(budget)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["total_expenses"], 1500.0);
        assert_eq!(summary["balance"], 500.0);
        assert_eq!(summary["gauge"]["value_pct"], 75.0);

        let (_, progress) = send(&app, Method::GET, "/api/v1/journey/progress", None).await;
        assert_eq!(progress["budget_complete"], true);
    }

    #[tokio::test]
    async fn test_skills_are_deduplicated_case_insensitively() {
        let app = app();
        let (_, first) = post_json(&app, "/api/v1/resume/skills", json!({"name": "Excel"})).await;
        assert_eq!(first["added"], true);
        let (_, second) = post_json(&app, "/api/v1/resume/skills", json!({"name": " excel "})).await;
        assert_eq!(second["added"], false);
        assert_eq!(second["skills"].as_array().unwrap().len(), 1);

        let (status, body) = post_json(&app, "/api/v1/resume/skills", json!({"name": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_theme_toggle_and_reset() {
        let app = app();
        let (_, toggled) = send(&app, Method::POST, "/api/v1/journey/theme/toggle", None).await;
        assert_eq!(toggled["theme"], "dark");

        let (status, reset) = send(&app, Method::POST, "/api/v1/journey/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reset["theme"], "light");
    }

    #[tokio::test]
    async fn test_riasec_submit_then_jobs() {
        let app = app();
        let (status, _) = post_json(&app, "/api/v1/riasec/jobs", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let answers = json!({"answers": ["R1", "R2", "I1"]});
        let (status, submitted) = post_json(&app, "/api/v1/riasec/submit", answers).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["scores"]["R"], 2);
        assert_eq!(submitted["lettres_calculees"], json!(["R", "I"]));

        let (status, jobs) = post_json(&app, "/api/v1/riasec/jobs", json!({"region": "Laval"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(jobs["resultats_filtres"][0]["id"], "4");

        let (status, _) = send(&app, Method::DELETE, "/api/v1/riasec", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_riasec_submit_without_agreed_statement_is_rejected() {
        let app = app();
        let (status, body) = post_json(&app, "/api/v1/riasec/submit", json!({"answers": []})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let unknown = json!({"answers": ["Z9"]});
        let (status, _) = post_json(&app, "/api/v1/riasec/submit", unknown).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, journey) = send(&app, Method::GET, "/api/v1/journey", None).await;
        assert_eq!(journey["riasecResult"], Value::Null);
    }

    #[tokio::test]
    async fn test_nearest_office_from_browser_report() {
        let app = app();
        let report = json!({"status": "ok", "latitude": 45.5581, "longitude": -73.7210});
        let (status, body) = post_json(&app, "/api/v1/locator/nearest", report).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["office"]["id"], "cje-laval");
        assert_eq!(body["raison"], "Ce CJE est le plus proche de ta position actuelle.");

        let denied = json!({"status": "error", "code": 1});
        let (status, body) = post_json(&app, "/api/v1/locator/nearest", denied).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "Tu as refusé l'accès à ta localisation.");
    }

    #[tokio::test]
    async fn test_text_search_validates_then_resolves() {
        let app = app();
        let (status, _) = post_json(&app, "/api/v1/locator/search", json!({"ville": " "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(&app, "/api/v1/locator/search", json!({"ville": "Montréal"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["office"]["id"], "cje-montreal-centre");
    }

    #[tokio::test]
    async fn test_dashboard_plan_guard_and_office_listing() {
        let app = app();
        let (status, first) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["prochaine_etape"], "Commence ton CV.");

        let (status, _) = post_json(&app, "/api/v1/action-plan", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, offices) = send(&app, Method::GET, "/api/v1/locator/offices", None).await;
        assert_eq!(offices.as_array().unwrap().len(), 8);
    }
}
