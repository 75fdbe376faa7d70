use serde::{Deserialize, Serialize};

use crate::budget::models::BudgetData;
use crate::orientation::models::RiasecOutput;
use crate::resume::models::ResumeData;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Everything the user builds during the journey. This is the only shape
/// that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyState {
    pub resume_data: ResumeData,
    pub budget_data: BudgetData,
    pub riasec_result: Option<RiasecOutput>,
    pub theme: Theme,
    pub has_action_plan: bool,
}

/// Completion flags shown on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    pub resume_complete: bool,
    pub skills_count: usize,
    pub budget_complete: bool,
    pub riasec_complete: bool,
    pub riasec_letters: Vec<String>,
    pub has_action_plan: bool,
}

impl JourneyState {
    pub fn progress(&self) -> Progress {
        Progress {
            resume_complete: self.resume_data.is_complete(),
            skills_count: self.resume_data.skills.len(),
            budget_complete: self.budget_data.is_complete(),
            riasec_complete: self.riasec_result.is_some(),
            riasec_letters: self
                .riasec_result
                .as_ref()
                .map(|r| r.profil_riasec_principal.lettres_dominantes.clone())
                .unwrap_or_default(),
            has_action_plan: self.has_action_plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blob_shape() {
        let json = serde_json::to_value(JourneyState::default()).unwrap();
        assert_eq!(json["theme"], "light");
        assert!(json["riasecResult"].is_null());
        assert_eq!(json["hasActionPlan"], false);
        assert!(json["resumeData"]["skills"].as_array().unwrap().is_empty());
        assert_eq!(json["budgetData"]["income"], 0.0);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_progress_flags() {
        let mut state = JourneyState::default();
        state.budget_data.income = 1800.0;
        state.resume_data.add_skill("Excel");
        let progress = state.progress();
        assert!(!progress.resume_complete);
        assert!(progress.budget_complete);
        assert_eq!(progress.skills_count, 1);
        assert!(!progress.riasec_complete);
    }
}
