use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::orientation::models::{
    ActivityLead, CareerLead, DominantProfile, RiasecInput, RiasecOutput,
};
use crate::orientation::prompts;
use crate::orientation::quiz::{dominant_letters, is_riasec_letter};

pub const PROFILE_FAILED: &str = "Impossible d'analyser le profil pour le moment.";

/// Turns quiz scores plus context into a narrative profile.
#[async_trait]
pub trait ProfileAnalyzer: Send + Sync {
    async fn analyze(&self, input: &RiasecInput) -> Result<RiasecOutput, AppError>;
}

pub struct LlmProfileAnalyzer(pub LlmClient);

#[async_trait]
impl ProfileAnalyzer for LlmProfileAnalyzer {
    async fn analyze(&self, input: &RiasecInput) -> Result<RiasecOutput, AppError> {
        let payload = serde_json::to_value(input).map_err(|e| AppError::Internal(e.into()))?;
        let output: RiasecOutput = self
            .0
            .generate(&prompts::profile_prompt(&payload), &prompts::profile_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(PROFILE_FAILED, e))?;
        Ok(sanitize_profile(output, input))
    }
}

/// Keeps only real RIASEC letters in the dominant profile. When the model
/// names none, the letters computed from the scores are used instead.
pub fn sanitize_profile(mut output: RiasecOutput, input: &RiasecInput) -> RiasecOutput {
    let mut letters: Vec<String> = Vec::new();
    for raw in &output.profil_riasec_principal.lettres_dominantes {
        let letter = raw.trim().to_uppercase();
        if is_riasec_letter(&letter) && !letters.contains(&letter) {
            letters.push(letter);
        }
    }
    if letters.is_empty() {
        warn!("Profile answer had no usable RIASEC letters, using computed ones");
        letters = dominant_letters(&input.scores_riasec);
    }
    output.profil_riasec_principal.lettres_dominantes = letters;
    output
}

pub struct MockProfileAnalyzer;

#[async_trait]
impl ProfileAnalyzer for MockProfileAnalyzer {
    async fn analyze(&self, _input: &RiasecInput) -> Result<RiasecOutput, AppError> {
        Ok(RiasecOutput {
            titre_profil: "Profil Démo (Sans IA)".to_string(),
            profil_riasec_principal: DominantProfile {
                lettres_dominantes: vec!["R".to_string(), "I".to_string()],
                description_courte:
                    "Ceci est une réponse simulée car aucune clé API n'est configurée.".to_string(),
            },
            description_detaillee: "Configure ta clé API pour obtenir une analyse réelle basée \
                sur tes réponses."
                .to_string(),
            forces: vec!["Force simulée 1".to_string(), "Force simulée 2".to_string()],
            pistes_metiers: vec![CareerLead {
                intitule: "Métier Test".to_string(),
                secteur: "Test".to_string(),
                commentaire: "Exemple".to_string(),
            }],
            pistes_activites: vec![ActivityLead {
                kind: "exploration".to_string(),
                description: "Activité test".to_string(),
            }],
            message_motivation: "Configure l'API pour continuer !".to_string(),
            avertissement: "Ceci est une démo.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::quiz::score_answers;

    fn input_with(answers: &[&str]) -> RiasecInput {
        RiasecInput {
            scores_riasec: score_answers(answers),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_normalizes_and_filters_letters() {
        let mut output = RiasecOutput::default();
        output.profil_riasec_principal.lettres_dominantes =
            vec!["s".into(), "X".into(), " E ".into(), "S".into()];
        let cleaned = sanitize_profile(output, &input_with(&["R1"]));
        assert_eq!(cleaned.profil_riasec_principal.lettres_dominantes, vec!["S", "E"]);
    }

    #[test]
    fn test_sanitize_falls_back_to_computed_letters() {
        let cleaned = sanitize_profile(RiasecOutput::default(), &input_with(&["C1", "C2", "A1"]));
        assert_eq!(cleaned.profil_riasec_principal.lettres_dominantes, vec!["C", "A"]);
    }

    #[tokio::test]
    async fn test_mock_profile_is_labelled_demo() {
        let output = MockProfileAnalyzer.analyze(&RiasecInput::default()).await.unwrap();
        assert_eq!(output.titre_profil, "Profil Démo (Sans IA)");
        assert_eq!(output.profil_riasec_principal.lettres_dominantes, vec!["R", "I"]);
    }
}
