//! Reading and writing the journey blob.
//!
//! The loader decodes each top-level field and each résumé list on its own.
//! Anything missing or malformed gets its default; the other fields survive.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::budget::models::{sanitize_amount, BudgetData};
use crate::journey::models::JourneyState;
use crate::journey::storage::{KeyValueStore, StorageError};
use crate::lenient;
use crate::resume::models::ResumeData;

/// The single storage key holding the whole journey.
pub const JOURNEY_DATA_KEY: &str = "autonomyJourneyData";

pub fn save_journey(store: &dyn KeyValueStore, state: &JourneyState) -> Result<(), StorageError> {
    let serialized = serde_json::to_string(state)?;
    store.set(JOURNEY_DATA_KEY, &serialized)
}

/// Loads the persisted journey, falling back to the initial state when the
/// blob is absent, unreadable or not a JSON object.
pub fn load_journey(store: &dyn KeyValueStore) -> JourneyState {
    match store.get(JOURNEY_DATA_KEY) {
        Ok(Some(raw)) => {
            info!("Loaded persisted journey ({} bytes)", raw.len());
            decode_journey(&raw)
        }
        Ok(None) => JourneyState::default(),
        Err(e) => {
            warn!("Could not read journey data, starting fresh: {e}");
            JourneyState::default()
        }
    }
}

pub fn decode_journey(raw: &str) -> JourneyState {
    let root = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Persisted journey is not a JSON object, ignoring it");
            return JourneyState::default();
        }
        Err(e) => {
            warn!("Persisted journey is not valid JSON, ignoring it: {e}");
            return JourneyState::default();
        }
    };

    JourneyState {
        resume_data: decode_resume(root.get("resumeData")),
        budget_data: decode_budget(root.get("budgetData")),
        riasec_result: root
            .get("riasecResult")
            .filter(|v| !v.is_null())
            .and_then(|v| decode_or_warn(v, "riasecResult")),
        theme: field_or_default(&root, "theme"),
        has_action_plan: root
            .get("hasActionPlan")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn decode_resume(value: Option<&Value>) -> ResumeData {
    let Some(obj) = value.and_then(Value::as_object) else {
        return ResumeData::default();
    };

    let mut resume = ResumeData {
        personal_info: field_or_default(obj, "personalInfo"),
        experiences: list_field(obj, "experiences"),
        education: list_field(obj, "education"),
        skills: Vec::new(),
        projects: list_field(obj, "projects"),
        certifications: list_field(obj, "certifications"),
    };
    // Older blobs may carry duplicates; the dedup invariant is restored on load.
    resume.merge_skills(list_field(obj, "skills"));
    resume
}

fn decode_budget(value: Option<&Value>) -> BudgetData {
    let Some(obj) = value.and_then(Value::as_object) else {
        return BudgetData::default();
    };

    BudgetData {
        income: sanitize_amount(obj.get("income").and_then(Value::as_f64).unwrap_or(0.0)),
        expenses: field_or_default(obj, "expenses"),
        startup_costs: field_or_default(obj, "startupCosts"),
    }
}

fn decode_or_warn<T: DeserializeOwned>(value: &Value, field: &str) -> Option<T> {
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Malformed `{field}` in persisted journey, using default: {e}");
            None
        }
    }
}

fn field_or_default<T: DeserializeOwned + Default>(obj: &Map<String, Value>, field: &str) -> T {
    obj.get(field)
        .and_then(|v| decode_or_warn(v, field))
        .unwrap_or_default()
}

/// Keeps the well-formed elements of an array field; anything else is empty.
fn list_field<T: DeserializeOwned>(obj: &Map<String, Value>, field: &str) -> Vec<T> {
    obj.get(field).map(lenient::items_of).unwrap_or_default()
}
