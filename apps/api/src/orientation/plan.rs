use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::orientation::models::{
    ActionPlan, ActionPlanInput, CallToAction, MainGoal, PlanUi, ProfileSummary, RegionalResource,
};
use crate::orientation::prompts;
use crate::orientation::quiz::is_riasec_letter;

pub const PLAN_FAILED: &str = "Impossible de générer le plan d'action pour le moment.";

/// Builds a personalised action plan from the orientation results.
#[async_trait]
pub trait ActionPlanner: Send + Sync {
    async fn plan(&self, input: &ActionPlanInput) -> Result<ActionPlan, AppError>;
}

pub struct LlmActionPlanner(pub LlmClient);

#[async_trait]
impl ActionPlanner for LlmActionPlanner {
    async fn plan(&self, input: &ActionPlanInput) -> Result<ActionPlan, AppError> {
        let payload = serde_json::to_value(input).map_err(|e| AppError::Internal(e.into()))?;
        let plan: ActionPlan = self
            .0
            .generate(&prompts::plan_prompt(&payload), &prompts::plan_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(PLAN_FAILED, e))?;
        Ok(sanitize_plan(plan, input))
    }
}

/// The profile letters shown on the plan are the user's, not the model's.
/// Resource links that are not http(s) URLs are dropped.
pub fn sanitize_plan(mut plan: ActionPlan, input: &ActionPlanInput) -> ActionPlan {
    plan.resume_profil.lettres = input.lettres_dominantes.clone();
    for resource in &mut plan.ressources_region {
        let keep = resource
            .lien
            .as_deref()
            .is_some_and(|l| l.starts_with("https://") || l.starts_with("http://"));
        if !keep && resource.lien.is_some() {
            warn!("Dropping suspicious resource link for {}", resource.nom);
            resource.lien = None;
        }
    }
    plan
}

pub struct MockActionPlanner;

#[async_trait]
impl ActionPlanner for MockActionPlanner {
    async fn plan(&self, input: &ActionPlanInput) -> Result<ActionPlan, AppError> {
        let letters = input.lettres_dominantes.join("");
        let region = if input.region.trim().is_empty() {
            "ta région".to_string()
        } else {
            input.region.trim().to_string()
        };

        Ok(ActionPlan {
            ui: PlanUi {
                page_title: "Ton plan d'action (Démo)".to_string(),
                intro_text: "Ceci est un plan simulé car aucune clé API n'est configurée.".to_string(),
            },
            resume_profil: ProfileSummary {
                lettres: input.lettres_dominantes.clone(),
                description: format!("Un profil {letters} à explorer pas à pas."),
            },
            objectif_principal: MainGoal {
                titre: "Explorer deux métiers qui te ressemblent".to_string(),
                description: "Choisis deux pistes et va chercher de l'information concrète sur chacune."
                    .to_string(),
            },
            actions_prioritaires: vec![
                "Prendre rendez-vous avec un conseiller de ton Carrefour jeunesse-emploi.".to_string(),
                "Mettre ton CV à jour avec tes expériences récentes.".to_string(),
                "Lire deux fiches métiers liées à ton profil.".to_string(),
            ],
            actions_moyen_terme: vec![
                "Faire un stage d'un jour ou une journée d'observation.".to_string(),
                "Comparer deux formations possibles.".to_string(),
                "Postuler à au moins une offre qui t'intéresse.".to_string(),
            ],
            ressources_region: vec![RegionalResource {
                nom: format!("Carrefour jeunesse-emploi de {region}"),
                kind: "orientation".to_string(),
                lien: Some("https://www.trouvetoncje.com/".to_string()),
            }],
            cta_suite: CallToAction {
                texte: "Trouve ton CJE".to_string(),
                description: "Un conseiller peut t'aider à réaliser ce plan.".to_string(),
            },
            message_final: "Chaque petit pas compte. Tu es sur la bonne voie !".to_string(),
        })
    }
}

/// Checks the letters before any model call.
pub fn validate_input(input: &ActionPlanInput) -> Result<(), AppError> {
    if input.lettres_dominantes.is_empty() {
        return Err(AppError::Validation(
            "Complète d'abord le test RIASEC pour générer ton plan.".to_string(),
        ));
    }
    if let Some(bad) = input
        .lettres_dominantes
        .iter()
        .find(|l| !is_riasec_letter(l))
    {
        return Err(AppError::Validation(format!("Lettre RIASEC inconnue: {bad}")));
    }
    Ok(())
}
