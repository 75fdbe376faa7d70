use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resume::prompts;

pub const SUGGESTIONS_FAILED: &str = "Impossible d'obtenir des suggestions. Essaie de nouveau.";

/// Rewrites an experience description into stronger résumé bullets.
#[async_trait]
pub trait SuggestionWriter: Send + Sync {
    async fn suggest(&self, description: &str) -> Result<Vec<String>, AppError>;
}

pub struct LlmSuggestionWriter(pub LlmClient);

#[async_trait]
impl SuggestionWriter for LlmSuggestionWriter {
    async fn suggest(&self, description: &str) -> Result<Vec<String>, AppError> {
        let answer: Value = self
            .0
            .generate(
                &prompts::suggestions_prompt(description),
                &prompts::suggestions_schema(),
                None,
            )
            .await
            .map_err(|e| AppError::collaborator(SUGGESTIONS_FAILED, e))?;
        Ok(string_list(answer))
    }
}

/// Anything other than an array of strings counts as "no suggestions".
fn string_list(value: Value) -> Vec<String> {
    let Value::Array(items) = value else {
        warn!("Suggestions answer is not an array: {value}");
        return Vec::new();
    };
    let strings: Option<Vec<String>> = items
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();
    strings.unwrap_or_else(|| {
        warn!("Suggestions answer contains non-string items");
        Vec::new()
    })
}

pub struct MockSuggestionWriter;

#[async_trait]
impl SuggestionWriter for MockSuggestionWriter {
    async fn suggest(&self, _description: &str) -> Result<Vec<String>, AppError> {
        Ok(vec![
            "Optimisé le flux de travail en servant plus de [nombre] clients par heure durant les périodes de pointe.".to_string(),
            "Accru la satisfaction client de [pourcentage]% en personnalisant les commandes et en offrant un service rapide et amical.".to_string(),
            "Géré avec précision les transactions financières et la caisse, assurant un balancement parfait à la fin de chaque quart de travail.".to_string(),
        ])
    }
}
