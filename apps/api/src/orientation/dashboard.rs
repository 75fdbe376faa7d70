use async_trait::async_trait;

use crate::errors::AppError;
use crate::journey::models::Progress;
use crate::llm_client::LlmClient;
use crate::orientation::models::DashboardContent;
use crate::orientation::prompts;

pub const DASHBOARD_FAILED: &str = "Impossible de préparer ton tableau de bord pour le moment.";

/// Writes the welcome copy of the dashboard from the user's progress.
#[async_trait]
pub trait DashboardWriter: Send + Sync {
    async fn write(&self, progress: &Progress) -> Result<DashboardContent, AppError>;
}

pub struct LlmDashboardWriter(pub LlmClient);

#[async_trait]
impl DashboardWriter for LlmDashboardWriter {
    async fn write(&self, progress: &Progress) -> Result<DashboardContent, AppError> {
        let payload = serde_json::to_value(progress).map_err(|e| AppError::Internal(e.into()))?;
        self.0
            .generate(&prompts::dashboard_prompt(&payload), &prompts::dashboard_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(DASHBOARD_FAILED, e))
    }
}

pub struct MockDashboardWriter;

#[async_trait]
impl DashboardWriter for MockDashboardWriter {
    async fn write(&self, progress: &Progress) -> Result<DashboardContent, AppError> {
        Ok(DashboardContent {
            titre: "Ton parcours vers l'autonomie".to_string(),
            message_accueil: "Bienvenue ! Voici où tu en es (Mode Démo).".to_string(),
            prochaine_etape: next_step(progress).to_string(),
            conseils: vec![
                "Avance une étape à la fois.".to_string(),
                "Garde ton CV à jour après chaque nouvelle expérience.".to_string(),
                "Ton Carrefour jeunesse-emploi peut t'accompagner gratuitement.".to_string(),
            ],
        })
    }
}

/// First unfinished step, in journey order.
pub fn next_step(progress: &Progress) -> &'static str {
    if !progress.resume_complete {
        "Commence ton CV."
    } else if !progress.budget_complete {
        "Prépare ton budget de premier appartement."
    } else if !progress.riasec_complete {
        "Fais le test RIASEC pour découvrir ton profil."
    } else if !progress.has_action_plan {
        "Génère ton plan d'action."
    } else {
        "Passe à l'action avec ton plan !"
    }
}
